pub mod backend;
pub mod clock;
pub mod memory;
pub mod records;

pub use backend::RestBackendAdapter;
pub use clock::{FixedClock, SystemClock};
pub use memory::{InMemoryDataSource, Snapshot};
