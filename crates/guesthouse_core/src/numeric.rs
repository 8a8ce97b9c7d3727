//! crates/guesthouse_core/src/numeric.rs
//!
//! Lenient handling of the money fields that arrive from forms and the backend.
//! Cost and amount fields may be numbers, numeric strings, garbage, or absent;
//! every computation in this crate reads them through [`Amount::value`], which
//! never fails and falls back to zero.

/// A monetary field exactly as it was delivered by the caller.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Amount {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl Amount {
    /// Coerces the field to a number. Anything unparsable is worth zero.
    pub fn value(&self) -> f64 {
        match self {
            Amount::Number(n) if n.is_finite() => *n,
            Amount::Number(_) => 0.0,
            Amount::Text(s) => parse_leading_float(s).unwrap_or(0.0),
            Amount::Missing => 0.0,
        }
    }

    /// True when the field carries a strictly positive value.
    pub fn is_positive(&self) -> bool {
        self.value() > 0.0
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount::Number(value)
    }
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Amount::Text(value.to_string())
    }
}

impl From<Option<f64>> for Amount {
    fn from(value: Option<f64>) -> Self {
        value.map(Amount::Number).unwrap_or(Amount::Missing)
    }
}

/// Parses the longest decimal prefix of `raw`, after leading whitespace.
///
/// Accepts an optional sign, digits with an optional fractional part, and an
/// optional exponent. Returns `None` when no digits are found.
pub fn parse_leading_float(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when it is followed by at least one digit.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Sums the coerced values of a sequence of amounts.
pub fn sum_amounts<'a, I>(amounts: I) -> f64
where
    I: IntoIterator<Item = &'a Amount>,
{
    amounts.into_iter().map(Amount::value).sum()
}
