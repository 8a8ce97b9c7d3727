pub mod availability;
pub mod dashboard;
pub mod directory;
pub mod domain;
pub mod grid;
pub mod numeric;
pub mod payments;
pub mod ports;
pub mod pricing;
pub mod requests;

pub use availability::{available_rooms, AvailabilityError};
pub use dashboard::{compute_stats, today_summary, DashboardInput, DashboardStats, TodaySummary};
pub use directory::{normalize_phone, CustomerDirectory};
pub use domain::{
    Booking, BookingRequest, BookingRequestStatus, BookingStatus, Customer, DurationType, Expense,
    Payment, PaymentMode, PaymentStatus, Room, RoomConfiguration,
};
pub use grid::{build_availability_grid, AvailabilityGrid, GridCell, GridError, GridOptions, GridWindow};
pub use numeric::Amount;
pub use payments::{attach_payments, calculate_payment_breakdown, PaymentBreakdown};
pub use ports::{BookingDataSource, Clock, PortError, PortResult};
pub use pricing::{
    calculate_total_cost, find_configuration, quote, validate_booking_form, BookingForm,
    BookingFormError, Quote, RateCard,
};
pub use requests::{Decision, RequestError};
