use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod views;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    User,
    Admin,
}

/// Offices the fleet is based out of. Wire names keep the human-readable
/// spelling the original store used.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HomeOffice {
    Dubai,
    #[serde(rename = "Al Ain")]
    AlAin,
    #[serde(rename = "Abu Dhabi")]
    AbuDhabi,
}

impl std::fmt::Display for HomeOffice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HomeOffice::Dubai => write!(f, "Dubai"),
            HomeOffice::AlAin => write!(f, "Al Ain"),
            HomeOffice::AbuDhabi => write!(f, "Abu Dhabi"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub share_phone: bool,
    pub role: UserRole,
    pub home_office: HomeOffice,
    pub team: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CarStatus {
    Available,
    InUse,
    Maintenance,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CarTag {
    #[serde(rename = "SUV")]
    Suv,
    Sedan,
    Compact,
    Luxury,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Car {
    pub id: Uuid,
    pub plate: String,
    pub make: String,
    pub model: String,
    pub color: String,
    pub seats: i32,
    pub base: HomeOffice,
    pub status: CarStatus,
    pub tags: Vec<CarTag>,
    pub photo_url: Option<String>,
    pub last_odometer: Option<i64>,
    pub last_fuel: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Reserved,
    CheckedOut,
    Returned,
    Cancelled,
}

impl BookingStatus {
    /// Whether a booking in this state occupies the car's calendar.
    pub fn blocks_car(&self) -> bool {
        matches!(self, BookingStatus::Reserved | BookingStatus::CheckedOut)
    }
}

/// A reservation of one car for one user over a time interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub car_id: Uuid,
    pub user_id: Uuid,
    pub pickup_at: DateTime<Utc>,
    pub return_at: DateTime<Utc>,
    pub pickup_location: String,
    pub destination: String,
    pub purpose: Option<String>,
    pub passengers: i32,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RideMateStatus {
    Requested,
    Approved,
    Declined,
}

/// A secondary user's request to join an existing booking's trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RideMateRequest {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub user_id: Uuid,
    pub status: RideMateStatus,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Odometer/fuel record captured at checkout and completed at return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Handover {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub checkout_odometer: Option<i64>,
    pub return_odometer: Option<i64>,
    pub checkout_fuel: Option<String>,
    pub return_fuel: Option<String>,
    #[serde(default)]
    pub checkout_photos: Vec<String>,
    #[serde(default)]
    pub return_photos: Vec<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    Mechanical,
    Electrical,
    Cosmetic,
    Cleanliness,
    Other,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    Open,
    InProgress,
    Resolved,
}

impl IssueStatus {
    fn rank(&self) -> u8 {
        match self {
            IssueStatus::Open => 0,
            IssueStatus::InProgress => 1,
            IssueStatus::Resolved => 2,
        }
    }

    /// Issues only move forward; a resolved issue is never reopened.
    pub fn can_progress_to(&self, next: IssueStatus) -> bool {
        next.rank() > self.rank()
    }
}

/// A defect report against a car.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: Uuid,
    pub car_id: Uuid,
    pub user_id: Uuid,
    pub category: IssueCategory,
    pub severity: IssueSeverity,
    pub description: String,
    #[serde(default)]
    pub photo_urls: Vec<String>,
    pub status: IssueStatus,
    pub created_at: DateTime<Utc>,
}
