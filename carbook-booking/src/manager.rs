use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use carbook_core::repository::{
    BookingRepository, CarRepository, HandoverRepository, RideMateRepository, UserRepository,
};
use carbook_core::RepoError;
use carbook_fleet::find_conflict;
use carbook_shared::{
    Booking, BookingDetails, BookingStatus, CarStatus, Handover, RideMateDetails,
};

use crate::models::{HandoverReading, NewBooking};

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Return time must be after pickup time")]
    InvalidWindow,

    #[error("Passenger count {passengers} does not fit the car ({seats} seats)")]
    InvalidPassengerCount { passengers: i32, seats: i32 },

    #[error("Car not found: {0}")]
    CarNotFound(Uuid),

    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Booking not found: {0}")]
    BookingNotFound(Uuid),

    #[error("Car {car_id} is in maintenance")]
    CarInMaintenance { car_id: Uuid },

    #[error("Car {car_id} is already booked from {conflict_start} to {conflict_end}")]
    CarUnavailable {
        car_id: Uuid,
        conflict_start: chrono::DateTime<Utc>,
        conflict_end: chrono::DateTime<Utc>,
    },

    #[error("Invalid state transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Booking {0} has no checkout handover")]
    MissingHandover(Uuid),

    #[error("Storage failure: {0}")]
    Storage(#[from] RepoError),
}

/// Owns the booking lifecycle: reserve, cancel, checkout, check in.
///
/// The one invariant worth the name lives in `create`: for any car, the
/// windows of reserved and checked-out bookings are pairwise non-overlapping.
/// Creation is the only door into that set (cancel/checkout/check-in only
/// shrink or keep it), so checking here keeps the invariant global.
pub struct BookingManager {
    bookings: Arc<dyn BookingRepository>,
    cars: Arc<dyn CarRepository>,
    users: Arc<dyn UserRepository>,
    ride_mates: Arc<dyn RideMateRepository>,
    handovers: Arc<dyn HandoverRepository>,
}

impl BookingManager {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        cars: Arc<dyn CarRepository>,
        users: Arc<dyn UserRepository>,
        ride_mates: Arc<dyn RideMateRepository>,
        handovers: Arc<dyn HandoverRepository>,
    ) -> Self {
        Self {
            bookings,
            cars,
            users,
            ride_mates,
            handovers,
        }
    }

    /// Reserve a car. Fails if the window is inverted, the passengers don't
    /// fit, the car is in maintenance, or the window clashes with an existing
    /// reserved/checked-out booking.
    pub async fn create(&self, req: NewBooking) -> Result<Booking, BookingError> {
        if req.return_at <= req.pickup_at {
            return Err(BookingError::InvalidWindow);
        }

        let car = self
            .cars
            .get_car(req.car_id)
            .await?
            .ok_or(BookingError::CarNotFound(req.car_id))?;

        if car.status == CarStatus::Maintenance {
            return Err(BookingError::CarInMaintenance { car_id: car.id });
        }

        if req.passengers < 1 || req.passengers > car.seats {
            return Err(BookingError::InvalidPassengerCount {
                passengers: req.passengers,
                seats: car.seats,
            });
        }

        if self.users.get_user(req.user_id).await?.is_none() {
            return Err(BookingError::UserNotFound(req.user_id));
        }

        let existing = self.bookings.list_for_car(req.car_id).await?;
        if let Some(conflict) = find_conflict(&existing, req.pickup_at, req.return_at, None) {
            return Err(BookingError::CarUnavailable {
                car_id: req.car_id,
                conflict_start: conflict.pickup_at,
                conflict_end: conflict.return_at,
            });
        }

        let now = Utc::now();
        let booking = Booking {
            id: Uuid::new_v4(),
            car_id: req.car_id,
            user_id: req.user_id,
            pickup_at: req.pickup_at,
            return_at: req.return_at,
            pickup_location: req.pickup_location,
            destination: req.destination,
            purpose: req.purpose,
            passengers: req.passengers,
            status: BookingStatus::Reserved,
            created_at: now,
            updated_at: now,
        };

        self.bookings.insert_booking(&booking).await?;
        info!(booking = %booking.id, car = %booking.car_id, "booking reserved");
        Ok(booking)
    }

    /// Transition: Reserved → Cancelled. A checked-out car has to come back
    /// through check-in instead.
    pub async fn cancel(&self, booking_id: Uuid) -> Result<Booking, BookingError> {
        let mut booking = self.get(booking_id).await?;

        if booking.status != BookingStatus::Reserved {
            return Err(BookingError::InvalidTransition {
                from: format!("{:?}", booking.status),
                to: "Cancelled".to_string(),
            });
        }

        booking.status = BookingStatus::Cancelled;
        let saved = self
            .bookings
            .save_booking(&booking)
            .await?
            .ok_or(BookingError::BookingNotFound(booking_id))?;
        info!(booking = %booking_id, "booking cancelled");
        Ok(saved)
    }

    /// Transition: Reserved → CheckedOut. Opens a handover with the checkout
    /// reading and marks the car in use.
    pub async fn checkout(
        &self,
        booking_id: Uuid,
        reading: HandoverReading,
    ) -> Result<Handover, BookingError> {
        let mut booking = self.get(booking_id).await?;

        if booking.status != BookingStatus::Reserved {
            return Err(BookingError::InvalidTransition {
                from: format!("{:?}", booking.status),
                to: "CheckedOut".to_string(),
            });
        }

        booking.status = BookingStatus::CheckedOut;
        self.bookings
            .save_booking(&booking)
            .await?
            .ok_or(BookingError::BookingNotFound(booking_id))?;

        let handover = Handover {
            id: Uuid::new_v4(),
            booking_id,
            checkout_odometer: Some(reading.odometer),
            return_odometer: None,
            checkout_fuel: Some(reading.fuel),
            return_fuel: None,
            checkout_photos: Vec::new(),
            return_photos: Vec::new(),
            notes: None,
            created_at: Utc::now(),
        };
        self.handovers.insert_handover(&handover).await?;

        if let Some(mut car) = self.cars.get_car(booking.car_id).await? {
            car.status = CarStatus::InUse;
            self.cars.save_car(&car).await?;
        }

        info!(booking = %booking_id, "checked out");
        Ok(handover)
    }

    /// Transition: CheckedOut → Returned. Completes the handover with the
    /// return reading and releases the car, carrying the latest odometer and
    /// fuel onto it.
    pub async fn check_in(
        &self,
        booking_id: Uuid,
        reading: HandoverReading,
        notes: Option<String>,
    ) -> Result<Handover, BookingError> {
        let mut booking = self.get(booking_id).await?;

        if booking.status != BookingStatus::CheckedOut {
            return Err(BookingError::InvalidTransition {
                from: format!("{:?}", booking.status),
                to: "Returned".to_string(),
            });
        }

        let mut handover = self
            .handovers
            .find_for_booking(booking_id)
            .await?
            .ok_or(BookingError::MissingHandover(booking_id))?;

        booking.status = BookingStatus::Returned;
        self.bookings
            .save_booking(&booking)
            .await?
            .ok_or(BookingError::BookingNotFound(booking_id))?;

        handover.return_odometer = Some(reading.odometer);
        handover.return_fuel = Some(reading.fuel.clone());
        handover.notes = notes;
        let handover = self
            .handovers
            .save_handover(&handover)
            .await?
            .ok_or(BookingError::MissingHandover(booking_id))?;

        if let Some(mut car) = self.cars.get_car(booking.car_id).await? {
            car.status = CarStatus::Available;
            car.last_odometer = Some(reading.odometer);
            car.last_fuel = Some(reading.fuel);
            self.cars.save_car(&car).await?;
        }

        info!(booking = %booking_id, "checked in");
        Ok(handover)
    }

    /// The booking with car, booker, ride mates and handover resolved.
    pub async fn booking_details(&self, booking_id: Uuid) -> Result<BookingDetails, BookingError> {
        let booking = self.get(booking_id).await?;
        self.details_for(booking).await
    }

    /// A user's bookings, fully joined, newest pickup first.
    pub async fn user_bookings(&self, user_id: Uuid) -> Result<Vec<BookingDetails>, BookingError> {
        let mut details = Vec::new();
        for booking in self.bookings.list_for_user(user_id).await? {
            details.push(self.details_for(booking).await?);
        }
        details.sort_by(|a, b| b.booking.pickup_at.cmp(&a.booking.pickup_at));
        Ok(details)
    }

    async fn get(&self, booking_id: Uuid) -> Result<Booking, BookingError> {
        self.bookings
            .get_booking(booking_id)
            .await?
            .ok_or(BookingError::BookingNotFound(booking_id))
    }

    async fn details_for(&self, booking: Booking) -> Result<BookingDetails, BookingError> {
        let car = self.cars.get_car(booking.car_id).await?;
        let user = self.users.get_user(booking.user_id).await?;
        let handover = self.handovers.find_for_booking(booking.id).await?;

        let mut ride_mates = Vec::new();
        for request in self.ride_mates.list_for_booking(booking.id).await? {
            let user = self.users.get_user(request.user_id).await?;
            ride_mates.push(RideMateDetails { request, user });
        }

        Ok(BookingDetails {
            booking,
            car,
            user,
            ride_mates,
            handover,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestEnv;
    use chrono::Duration;

    fn request(env: &TestEnv, hours_from_now: i64, hours_long: i64) -> NewBooking {
        let pickup = Utc::now() + Duration::hours(hours_from_now);
        NewBooking {
            car_id: env.car.id,
            user_id: env.user.id,
            pickup_at: pickup,
            return_at: pickup + Duration::hours(hours_long),
            pickup_location: "Dubai Office".to_string(),
            destination: "Al Ain".to_string(),
            purpose: Some("Site visit".to_string()),
            passengers: 2,
        }
    }

    #[tokio::test]
    async fn test_create_and_fetch_details() {
        let env = TestEnv::new().await;
        let manager = env.manager();

        let booking = manager.create(request(&env, 24, 8)).await.unwrap();
        assert_eq!(booking.status, BookingStatus::Reserved);

        let details = manager.booking_details(booking.id).await.unwrap();
        assert_eq!(details.car.as_ref().unwrap().id, env.car.id);
        assert_eq!(details.user.as_ref().unwrap().id, env.user.id);
        assert!(details.handover.is_none());
    }

    #[tokio::test]
    async fn test_overlapping_booking_rejected() {
        let env = TestEnv::new().await;
        let manager = env.manager();

        manager.create(request(&env, 24, 8)).await.unwrap();

        // Same car, window shifted two hours into the existing one.
        let err = manager.create(request(&env, 26, 8)).await.unwrap_err();
        assert!(matches!(err, BookingError::CarUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_back_to_back_booking_allowed() {
        let env = TestEnv::new().await;
        let manager = env.manager();

        let first = manager.create(request(&env, 24, 8)).await.unwrap();

        let mut next = request(&env, 0, 0);
        next.pickup_at = first.return_at;
        next.return_at = first.return_at + Duration::hours(4);
        manager.create(next).await.unwrap();
    }

    #[tokio::test]
    async fn test_cancel_frees_the_window() {
        let env = TestEnv::new().await;
        let manager = env.manager();

        let booking = manager.create(request(&env, 24, 8)).await.unwrap();
        manager.cancel(booking.id).await.unwrap();

        // The identical window books fine once the first is cancelled.
        manager.create(request(&env, 24, 8)).await.unwrap();
    }

    #[tokio::test]
    async fn test_inverted_window_rejected() {
        let env = TestEnv::new().await;
        let manager = env.manager();

        let mut req = request(&env, 24, 8);
        std::mem::swap(&mut req.pickup_at, &mut req.return_at);
        let err = manager.create(req).await.unwrap_err();
        assert!(matches!(err, BookingError::InvalidWindow));
    }

    #[tokio::test]
    async fn test_passengers_must_fit_the_car() {
        let env = TestEnv::new().await;
        let manager = env.manager();

        let mut req = request(&env, 24, 8);
        req.passengers = env.car.seats + 1;
        let err = manager.create(req).await.unwrap_err();
        assert!(matches!(err, BookingError::InvalidPassengerCount { .. }));
    }

    #[tokio::test]
    async fn test_maintenance_car_not_bookable() {
        let env = TestEnv::new().await;
        let manager = env.manager();

        let mut car = env.car.clone();
        car.status = CarStatus::Maintenance;
        env.cars.save_car(&car).await.unwrap();

        let err = manager.create(request(&env, 24, 8)).await.unwrap_err();
        assert!(matches!(err, BookingError::CarInMaintenance { .. }));
    }

    #[tokio::test]
    async fn test_checkout_then_check_in_roundtrip() {
        let env = TestEnv::new().await;
        let manager = env.manager();

        let booking = manager.create(request(&env, 24, 8)).await.unwrap();

        let handover = manager
            .checkout(
                booking.id,
                HandoverReading { odometer: 45_300, fuel: "Full".to_string() },
            )
            .await
            .unwrap();
        assert_eq!(handover.checkout_odometer, Some(45_300));
        assert_eq!(
            env.cars.get_car(env.car.id).await.unwrap().unwrap().status,
            CarStatus::InUse
        );

        let handover = manager
            .check_in(
                booking.id,
                HandoverReading { odometer: 45_480, fuel: "1/2".to_string() },
                Some("Windscreen chip".to_string()),
            )
            .await
            .unwrap();
        assert_eq!(handover.return_odometer, Some(45_480));
        assert_eq!(handover.notes.as_deref(), Some("Windscreen chip"));

        let car = env.cars.get_car(env.car.id).await.unwrap().unwrap();
        assert_eq!(car.status, CarStatus::Available);
        assert_eq!(car.last_odometer, Some(45_480));
        assert_eq!(car.last_fuel.as_deref(), Some("1/2"));
    }

    #[tokio::test]
    async fn test_check_in_requires_checkout() {
        let env = TestEnv::new().await;
        let manager = env.manager();

        let booking = manager.create(request(&env, 24, 8)).await.unwrap();
        let err = manager
            .check_in(
                booking.id,
                HandoverReading { odometer: 1, fuel: "Full".to_string() },
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn test_cancel_after_checkout_rejected() {
        let env = TestEnv::new().await;
        let manager = env.manager();

        let booking = manager.create(request(&env, 24, 8)).await.unwrap();
        manager
            .checkout(
                booking.id,
                HandoverReading { odometer: 10, fuel: "Full".to_string() },
            )
            .await
            .unwrap();

        let err = manager.cancel(booking.id).await.unwrap_err();
        assert!(matches!(err, BookingError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn test_user_bookings_sorted_newest_first() {
        let env = TestEnv::new().await;
        let manager = env.manager();

        let early = manager.create(request(&env, 24, 4)).await.unwrap();
        let late = manager.create(request(&env, 72, 4)).await.unwrap();

        let list = manager.user_bookings(env.user.id).await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].booking.id, late.id);
        assert_eq!(list[1].booking.id, early.id);
    }
}
