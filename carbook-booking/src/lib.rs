pub mod issues;
pub mod manager;
pub mod models;
pub mod ride_mates;

#[cfg(test)]
pub(crate) mod test_support;

pub use issues::{IssueError, IssueService};
pub use manager::{BookingError, BookingManager};
pub use models::{HandoverReading, NewBooking};
pub use ride_mates::{RideMateError, RideMateService};
