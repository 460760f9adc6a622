use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use carbook_core::repository::{
    BookingRepository, CarRepository, HandoverRepository, IssueRepository, RideMateRepository,
    UserRepository,
};
use carbook_shared::{Car, CarStatus, CarTag, HomeOffice, User, UserRole};
use carbook_store::{
    KvBookingRepository, KvCarRepository, KvHandoverRepository, KvIssueRepository,
    KvRideMateRepository, KvStore, KvUserRepository,
};

use crate::issues::IssueService;
use crate::manager::BookingManager;
use crate::ride_mates::RideMateService;

/// A fresh store with one bookable car, a booker and a second user.
pub struct TestEnv {
    _dir: tempfile::TempDir,
    pub user: User,
    pub mate: User,
    pub car: Car,
    pub users: Arc<dyn UserRepository>,
    pub cars: Arc<dyn CarRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub ride_mates: Arc<dyn RideMateRepository>,
    pub handovers: Arc<dyn HandoverRepository>,
    pub issues: Arc<dyn IssueRepository>,
}

impl TestEnv {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let store = KvStore::open(dir.path()).await.unwrap();
        let now = Utc::now();

        let users: Arc<dyn UserRepository> = Arc::new(KvUserRepository::new(store.clone()));
        let cars: Arc<dyn CarRepository> = Arc::new(KvCarRepository::new(store.clone()));
        let bookings: Arc<dyn BookingRepository> =
            Arc::new(KvBookingRepository::new(store.clone()));
        let ride_mates: Arc<dyn RideMateRepository> =
            Arc::new(KvRideMateRepository::new(store.clone()));
        let handovers: Arc<dyn HandoverRepository> =
            Arc::new(KvHandoverRepository::new(store.clone()));
        let issues: Arc<dyn IssueRepository> = Arc::new(KvIssueRepository::new(store.clone()));

        let user = User {
            id: Uuid::new_v4(),
            email: "driver@example.com".to_string(),
            full_name: "Driver One".to_string(),
            phone: None,
            share_phone: false,
            role: UserRole::User,
            home_office: HomeOffice::Dubai,
            team: None,
            created_at: now,
        };
        let mate = User {
            id: Uuid::new_v4(),
            email: "mate@example.com".to_string(),
            full_name: "Ride Mate".to_string(),
            phone: None,
            share_phone: true,
            role: UserRole::User,
            home_office: HomeOffice::Dubai,
            team: None,
            created_at: now,
        };
        users.insert_user(&user).await.unwrap();
        users.insert_user(&mate).await.unwrap();

        let car = Car {
            id: Uuid::new_v4(),
            plate: "DXB-1234".to_string(),
            make: "Toyota".to_string(),
            model: "Land Cruiser".to_string(),
            color: "White".to_string(),
            seats: 7,
            base: HomeOffice::Dubai,
            status: CarStatus::Available,
            tags: vec![CarTag::Suv],
            photo_url: None,
            last_odometer: Some(45_230),
            last_fuel: Some("Full".to_string()),
            notes: None,
            created_at: now,
            updated_at: now,
        };
        cars.insert_car(&car).await.unwrap();

        Self {
            _dir: dir,
            user,
            mate,
            car,
            users,
            cars,
            bookings,
            ride_mates,
            handovers,
            issues,
        }
    }

    pub fn manager(&self) -> BookingManager {
        BookingManager::new(
            self.bookings.clone(),
            self.cars.clone(),
            self.users.clone(),
            self.ride_mates.clone(),
            self.handovers.clone(),
        )
    }

    pub fn ride_mate_service(&self) -> RideMateService {
        RideMateService::new(self.bookings.clone(), self.users.clone(), self.ride_mates.clone())
    }

    pub fn issue_service(&self) -> IssueService {
        IssueService::new(self.issues.clone(), self.cars.clone(), self.users.clone())
    }
}
