//! crates/guesthouse_core/src/requests.rs
//!
//! Lifecycle of booking requests submitted by public customers.
//! A request starts PENDING and is moved once, by staff, to APPROVED or REJECTED.

use crate::domain::{BookingRequest, BookingRequestStatus};

/// A staff decision on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn target_status(self) -> BookingRequestStatus {
        match self {
            Decision::Approve => BookingRequestStatus::Approved,
            Decision::Reject => BookingRequestStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("Booking request {id} was already {status}")]
    AlreadyDecided {
        id: i64,
        status: BookingRequestStatus,
    },
}

impl BookingRequest {
    pub fn is_pending(&self) -> bool {
        self.status == BookingRequestStatus::Pending
    }

    /// Applies a staff decision. Remarks are replaced only when provided.
    pub fn decide(&mut self, decision: Decision, remarks: Option<String>) -> Result<(), RequestError> {
        if !self.is_pending() {
            return Err(RequestError::AlreadyDecided {
                id: self.id,
                status: self.status,
            });
        }
        self.status = decision.target_status();
        if remarks.is_some() {
            self.remarks = remarks;
        }
        Ok(())
    }
}

/// Requests still waiting for a decision, in their original order.
pub fn pending(requests: &[BookingRequest]) -> Vec<&BookingRequest> {
    requests.iter().filter(|r| r.is_pending()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DurationType;
    use crate::numeric::Amount;
    use chrono::NaiveDate;

    fn request(id: i64, status: BookingRequestStatus) -> BookingRequest {
        let check_in = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
        let check_out = NaiveDate::from_ymd_opt(2025, 5, 3).unwrap().and_hms_opt(11, 0, 0).unwrap();
        BookingRequest {
            id,
            customer_name: "Kiran".to_string(),
            customer_phone: "9888877777".to_string(),
            room_id: 4,
            check_in,
            check_out,
            duration_type: DurationType::Daily,
            daily_cost: Amount::from(700.0),
            monthly_cost: Amount::Missing,
            early_checkin_cost: Amount::Missing,
            late_checkout_cost: Amount::from("100"),
            number_of_people: 2,
            total_amount: Amount::Missing,
            status,
            remarks: Some("window room please".to_string()),
        }
    }

    #[test]
    fn pending_requests_can_be_decided_once() {
        let mut r = request(1, BookingRequestStatus::Pending);
        r.decide(Decision::Approve, None).unwrap();
        assert_eq!(r.status, BookingRequestStatus::Approved);
        assert_eq!(r.remarks.as_deref(), Some("window room please"));

        let err = r.decide(Decision::Reject, Some("late".to_string())).unwrap_err();
        assert_eq!(
            err,
            RequestError::AlreadyDecided { id: 1, status: BookingRequestStatus::Approved }
        );
        assert_eq!(err.to_string(), "Booking request 1 was already APPROVED");
    }

    #[test]
    fn rejection_replaces_remarks() {
        let mut r = request(2, BookingRequestStatus::Pending);
        r.decide(Decision::Reject, Some("room under repair".to_string())).unwrap();
        assert_eq!(r.status, BookingRequestStatus::Rejected);
        assert_eq!(r.remarks.as_deref(), Some("room under repair"));
    }

    #[test]
    fn pending_filter_and_quote() {
        let requests = vec![
            request(1, BookingRequestStatus::Approved),
            request(2, BookingRequestStatus::Pending),
            request(3, BookingRequestStatus::Rejected),
        ];
        let waiting = pending(&requests);
        assert_eq!(waiting.len(), 1);
        assert_eq!(waiting[0].id, 2);

        let q = waiting[0].quote().unwrap();
        assert_eq!(q.units, 2);
        assert_eq!(q.total_cost, 1500.0);
    }
}
