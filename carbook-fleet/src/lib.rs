pub mod availability;
pub mod service;

pub use availability::{find_conflict, windows_overlap};
pub use service::{FleetError, FleetService};
