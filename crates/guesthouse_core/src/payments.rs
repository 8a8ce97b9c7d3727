//! crates/guesthouse_core/src/payments.rs
//!
//! Payment reconciliation: what a booking costs, what has been paid against it,
//! and what is still due.

use crate::domain::{Booking, Payment};
use crate::numeric::sum_amounts;

/// The money picture of a single booking.
///
/// `due_amount` is not clamped: a negative value means the guest overpaid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaymentBreakdown {
    pub total_amount: f64,
    pub total_paid: f64,
    pub due_amount: f64,
    pub payment_count: usize,
}

impl PaymentBreakdown {
    pub fn is_settled(&self) -> bool {
        self.due_amount <= 0.0
    }

    pub fn is_overpaid(&self) -> bool {
        self.due_amount < 0.0
    }
}

/// Aggregates the payments attached to `booking`.
///
/// Malformed payment amounts contribute zero but still count as payments.
pub fn calculate_payment_breakdown(booking: &Booking) -> PaymentBreakdown {
    let total_amount = booking.total_amount.value();
    let total_paid = sum_amounts(booking.payments.iter().map(|p| &p.amount));

    PaymentBreakdown {
        total_amount,
        total_paid,
        due_amount: total_amount - total_paid,
        payment_count: booking.payments.len(),
    }
}

/// Attaches each payment to its booking, keeping the payments' list order.
pub fn attach_payments(bookings: &mut [Booking], payments: &[Payment]) {
    for booking in bookings.iter_mut() {
        booking.payments = payments
            .iter()
            .filter(|p| p.booking_id == booking.id)
            .cloned()
            .collect();
    }
}
