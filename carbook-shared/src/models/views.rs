use serde::{Deserialize, Serialize};

use super::{Booking, Car, Handover, RideMateRequest, User};

/// A ride-mate request with the requesting user resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RideMateDetails {
    #[serde(flatten)]
    pub request: RideMateRequest,
    pub user: Option<User>,
}

/// A booking with its related records resolved by lookup at read time.
/// Foreign keys are not enforced, so every join is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDetails {
    #[serde(flatten)]
    pub booking: Booking,
    pub car: Option<Car>,
    pub user: Option<User>,
    pub ride_mates: Vec<RideMateDetails>,
    pub handover: Option<Handover>,
}

/// A car together with its non-cancelled bookings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarSchedule {
    #[serde(flatten)]
    pub car: Car,
    pub bookings: Vec<Booking>,
}
