use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Everything needed to reserve a car. Id, status and timestamps are assigned
/// by the manager.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBooking {
    pub car_id: Uuid,
    pub user_id: Uuid,
    pub pickup_at: DateTime<Utc>,
    pub return_at: DateTime<Utc>,
    pub pickup_location: String,
    pub destination: String,
    pub purpose: Option<String>,
    pub passengers: i32,
}

/// Odometer/fuel pair captured at a handover. Fuel stays free text
/// ("Full", "3/4", …) as drivers report it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandoverReading {
    pub odometer: i64,
    pub fuel: String,
}
