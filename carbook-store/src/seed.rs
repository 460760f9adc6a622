use chrono::{Duration, Utc};
use tracing::info;
use uuid::Uuid;

use carbook_shared::{
    Booking, BookingStatus, Car, CarStatus, CarTag, HomeOffice, User, UserRole,
};

use crate::kv::{keys, KvStore};
use crate::StoreError;

/// First-run demo dataset: a handful of users, the fleet, and a few upcoming
/// reservations. Guarded by the `initialized` flag so reopening the store
/// never duplicates it. Returns whether seeding ran.
pub async fn initialize(store: &KvStore) -> Result<bool, StoreError> {
    if store.get::<bool>(keys::INITIALIZED).await == Some(true) {
        return Ok(false);
    }

    let now = Utc::now();

    let users = vec![
        User {
            id: Uuid::new_v4(),
            email: "admin@example.com".to_string(),
            full_name: "Admin User".to_string(),
            phone: Some("+971501234567".to_string()),
            share_phone: true,
            role: UserRole::Admin,
            home_office: HomeOffice::Dubai,
            team: Some("Project Management".to_string()),
            created_at: now,
        },
        User {
            id: Uuid::new_v4(),
            email: "john.engineer@example.com".to_string(),
            full_name: "John Engineer".to_string(),
            phone: Some("+971507654321".to_string()),
            share_phone: true,
            role: UserRole::User,
            home_office: HomeOffice::Dubai,
            team: Some("Rail Systems".to_string()),
            created_at: now,
        },
        User {
            id: Uuid::new_v4(),
            email: "sarah.tech@example.com".to_string(),
            full_name: "Sarah Tech".to_string(),
            phone: Some("+971509876543".to_string()),
            share_phone: false,
            role: UserRole::User,
            home_office: HomeOffice::AlAin,
            team: Some("Signaling".to_string()),
            created_at: now,
        },
    ];

    let car = |plate: &str,
               make: &str,
               model: &str,
               color: &str,
               seats: i32,
               base: HomeOffice,
               status: CarStatus,
               tags: Vec<CarTag>,
               odometer: i64,
               fuel: &str,
               notes: Option<&str>| Car {
        id: Uuid::new_v4(),
        plate: plate.to_string(),
        make: make.to_string(),
        model: model.to_string(),
        color: color.to_string(),
        seats,
        base,
        status,
        tags,
        photo_url: None,
        last_odometer: Some(odometer),
        last_fuel: Some(fuel.to_string()),
        notes: notes.map(str::to_string),
        created_at: now,
        updated_at: now,
    };

    let cars = vec![
        car(
            "DXB-1234",
            "Toyota",
            "Land Cruiser",
            "White",
            7,
            HomeOffice::Dubai,
            CarStatus::Available,
            vec![CarTag::Suv],
            45_230,
            "Full",
            None,
        ),
        car(
            "DXB-5678",
            "Nissan",
            "Patrol",
            "Black",
            7,
            HomeOffice::Dubai,
            CarStatus::Available,
            vec![CarTag::Suv, CarTag::Luxury],
            32_100,
            "3/4",
            None,
        ),
        car(
            "AAN-9012",
            "Toyota",
            "Camry",
            "Silver",
            5,
            HomeOffice::AlAin,
            CarStatus::Available,
            vec![CarTag::Sedan],
            67_800,
            "1/2",
            None,
        ),
        car(
            "AAN-3456",
            "Honda",
            "Accord",
            "Gray",
            5,
            HomeOffice::AlAin,
            CarStatus::Maintenance,
            vec![CarTag::Sedan],
            89_450,
            "1/4",
            Some("Scheduled for AC maintenance"),
        ),
        car(
            "DXB-7890",
            "Lexus",
            "LX570",
            "Pearl White",
            7,
            HomeOffice::Dubai,
            CarStatus::Available,
            vec![CarTag::Suv, CarTag::Luxury],
            28_900,
            "Full",
            None,
        ),
        car(
            "ABD-2468",
            "Toyota",
            "Corolla",
            "Blue",
            5,
            HomeOffice::AbuDhabi,
            CarStatus::Available,
            vec![CarTag::Sedan, CarTag::Compact],
            54_320,
            "Full",
            None,
        ),
    ];

    let tomorrow = now + Duration::hours(24);
    let next_week = now + Duration::days(7);

    let booking = |car_id: Uuid,
                   user_id: Uuid,
                   pickup_at: chrono::DateTime<Utc>,
                   hours: i64,
                   pickup_location: &str,
                   destination: &str,
                   purpose: &str,
                   passengers: i32| Booking {
        id: Uuid::new_v4(),
        car_id,
        user_id,
        pickup_at,
        return_at: pickup_at + Duration::hours(hours),
        pickup_location: pickup_location.to_string(),
        destination: destination.to_string(),
        purpose: Some(purpose.to_string()),
        passengers,
        status: BookingStatus::Reserved,
        created_at: now,
        updated_at: now,
    };

    let bookings = vec![
        booking(
            cars[0].id,
            users[1].id,
            tomorrow,
            8,
            "Dubai Office",
            "Al Ain Customer Site",
            "Client meeting - Project Hafeet Phase 2",
            2,
        ),
        booking(
            cars[1].id,
            users[2].id,
            now + Duration::days(3),
            6,
            "Al Ain Office",
            "Abu Dhabi Metro Station",
            "Site inspection",
            3,
        ),
        booking(
            cars[4].id,
            users[0].id,
            next_week,
            10,
            "Dubai Office",
            "Al Ain",
            "Project kickoff meeting",
            4,
        ),
    ];

    store.put(keys::USERS, &users).await?;
    store.put(keys::CARS, &cars).await?;
    store.put(keys::BOOKINGS, &bookings).await?;
    store.put(keys::RIDE_MATES, &Vec::<carbook_shared::RideMateRequest>::new()).await?;
    store.put(keys::HANDOVERS, &Vec::<carbook_shared::Handover>::new()).await?;
    store.put(keys::ISSUES, &Vec::<carbook_shared::Issue>::new()).await?;
    store.put(keys::INITIALIZED, &true).await?;

    info!(users = users.len(), cars = cars.len(), bookings = bookings.len(), "seeded store");
    Ok(true)
}

/// Wipe the device's copy of the database, seed flag included.
pub async fn clear_all(store: &KvStore) -> Result<(), StoreError> {
    store.clear().await
}
