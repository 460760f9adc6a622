use async_trait::async_trait;
use uuid::Uuid;

use carbook_shared::{Booking, Car, Handover, Issue, RideMateRequest, User};

use crate::RepoError;

/// Repository trait for user records
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, RepoError>;

    async fn get_user(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    /// Case-insensitive email lookup.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    async fn insert_user(&self, user: &User) -> Result<(), RepoError>;

    /// Full-record update; a missing id is an error at the call site.
    async fn save_user(&self, user: &User) -> Result<Option<User>, RepoError>;
}

/// Repository trait for the car fleet
#[async_trait]
pub trait CarRepository: Send + Sync {
    async fn list_cars(&self) -> Result<Vec<Car>, RepoError>;

    async fn get_car(&self, id: Uuid) -> Result<Option<Car>, RepoError>;

    async fn insert_car(&self, car: &Car) -> Result<(), RepoError>;

    /// Full-record update; refreshes `updated_at` on the stored copy.
    async fn save_car(&self, car: &Car) -> Result<Option<Car>, RepoError>;
}

/// Repository trait for bookings
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn list_bookings(&self) -> Result<Vec<Booking>, RepoError>;

    async fn get_booking(&self, id: Uuid) -> Result<Option<Booking>, RepoError>;

    async fn list_for_car(&self, car_id: Uuid) -> Result<Vec<Booking>, RepoError>;

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Booking>, RepoError>;

    async fn insert_booking(&self, booking: &Booking) -> Result<(), RepoError>;

    /// Full-record update; refreshes `updated_at` on the stored copy.
    async fn save_booking(&self, booking: &Booking) -> Result<Option<Booking>, RepoError>;
}

/// Repository trait for ride-mate requests
#[async_trait]
pub trait RideMateRepository: Send + Sync {
    async fn list_for_booking(&self, booking_id: Uuid) -> Result<Vec<RideMateRequest>, RepoError>;

    async fn get_request(&self, id: Uuid) -> Result<Option<RideMateRequest>, RepoError>;

    async fn insert_request(&self, request: &RideMateRequest) -> Result<(), RepoError>;

    async fn save_request(
        &self,
        request: &RideMateRequest,
    ) -> Result<Option<RideMateRequest>, RepoError>;
}

/// Repository trait for handover records
#[async_trait]
pub trait HandoverRepository: Send + Sync {
    async fn find_for_booking(&self, booking_id: Uuid) -> Result<Option<Handover>, RepoError>;

    async fn insert_handover(&self, handover: &Handover) -> Result<(), RepoError>;

    async fn save_handover(&self, handover: &Handover) -> Result<Option<Handover>, RepoError>;
}

/// Repository trait for issue reports
#[async_trait]
pub trait IssueRepository: Send + Sync {
    async fn list_issues(&self) -> Result<Vec<Issue>, RepoError>;

    async fn get_issue(&self, id: Uuid) -> Result<Option<Issue>, RepoError>;

    async fn list_for_car(&self, car_id: Uuid) -> Result<Vec<Issue>, RepoError>;

    async fn insert_issue(&self, issue: &Issue) -> Result<(), RepoError>;

    async fn save_issue(&self, issue: &Issue) -> Result<Option<Issue>, RepoError>;
}

/// The signed-in user persisted across launches.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn current_user(&self) -> Result<Option<User>, RepoError>;

    async fn set_current_user(&self, user: &User) -> Result<(), RepoError>;

    async fn clear_current_user(&self) -> Result<(), RepoError>;
}
