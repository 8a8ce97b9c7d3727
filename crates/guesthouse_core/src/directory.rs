//! crates/guesthouse_core/src/directory.rs
//!
//! Customer lookup keyed by phone number. Phone numbers are the customer's
//! primary key, so they are normalized before being used as a join key.

use std::collections::HashMap;

use crate::domain::Customer;

const NATIONAL_NUMBER_LEN: usize = 10;
const COUNTRY_CODE: &str = "91";

/// Canonical form of a phone number for joins.
///
/// Drops whitespace and punctuation, then strips a `+91`/`91` country prefix or
/// a trunk `0` when what remains is a ten-digit national number.
pub fn normalize_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    if digits.len() == NATIONAL_NUMBER_LEN + COUNTRY_CODE.len() && digits.starts_with(COUNTRY_CODE) {
        return digits[COUNTRY_CODE.len()..].to_string();
    }
    if digits.len() == NATIONAL_NUMBER_LEN + 1 && digits.starts_with('0') {
        return digits[1..].to_string();
    }
    if digits.is_empty() {
        // Nothing numeric to key on; fall back to the trimmed input.
        return raw.trim().to_string();
    }
    digits
}

/// Customers indexed by normalized phone number. The first record for a key wins.
#[derive(Debug, Default)]
pub struct CustomerDirectory<'a> {
    by_phone: HashMap<String, &'a Customer>,
    duplicates: Vec<String>,
}

impl<'a> CustomerDirectory<'a> {
    pub fn new(customers: &'a [Customer]) -> Self {
        let mut by_phone = HashMap::with_capacity(customers.len());
        let mut duplicates = Vec::new();

        for customer in customers {
            let key = normalize_phone(&customer.phone_number);
            if by_phone.contains_key(&key) {
                duplicates.push(key);
            } else {
                by_phone.insert(key, customer);
            }
        }

        Self { by_phone, duplicates }
    }

    pub fn lookup(&self, phone: &str) -> Option<&'a Customer> {
        self.by_phone.get(&normalize_phone(phone)).copied()
    }

    /// The customer's name, or `Customer {phone}` when the record is missing.
    pub fn display_name(&self, phone: &str) -> String {
        match self.lookup(phone) {
            Some(customer) => customer.name.clone(),
            None => format!("Customer {phone}"),
        }
    }

    /// Normalized keys shared by more than one customer record.
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    pub fn len(&self) -> usize {
        self.by_phone.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_phone.is_empty()
    }
}
