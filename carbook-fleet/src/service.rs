use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use carbook_core::repository::{BookingRepository, CarRepository};
use carbook_core::RepoError;
use carbook_shared::{Car, CarSchedule, CarStatus};

use crate::availability::find_conflict;

#[derive(Debug, thiserror::Error)]
pub enum FleetError {
    #[error("Car not found: {0}")]
    CarNotFound(Uuid),

    #[error("Storage failure: {0}")]
    Storage(#[from] RepoError),
}

/// Read-side queries over the fleet: availability windows and schedules.
/// Everything is a linear scan over the stored arrays; the fleet is small
/// enough that indexing would be ceremony.
pub struct FleetService {
    cars: Arc<dyn CarRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl FleetService {
    pub fn new(cars: Arc<dyn CarRepository>, bookings: Arc<dyn BookingRepository>) -> Self {
        Self { cars, bookings }
    }

    pub async fn list_cars(&self) -> Result<Vec<Car>, FleetError> {
        Ok(self.cars.list_cars().await?)
    }

    pub async fn get_car(&self, car_id: Uuid) -> Result<Car, FleetError> {
        self.cars
            .get_car(car_id)
            .await?
            .ok_or(FleetError::CarNotFound(car_id))
    }

    /// Whether the car is free for the window. `exclude_booking` lets a
    /// reschedule ignore its own reservation.
    pub async fn is_available(
        &self,
        car_id: Uuid,
        pickup_at: DateTime<Utc>,
        return_at: DateTime<Utc>,
        exclude_booking: Option<Uuid>,
    ) -> Result<bool, FleetError> {
        let bookings = self.bookings.list_for_car(car_id).await?;
        Ok(find_conflict(&bookings, pickup_at, return_at, exclude_booking).is_none())
    }

    /// Cars free for the window. Cars in maintenance never qualify.
    pub async fn available_cars(
        &self,
        pickup_at: DateTime<Utc>,
        return_at: DateTime<Utc>,
    ) -> Result<Vec<Car>, FleetError> {
        let mut available = Vec::new();

        for car in self.cars.list_cars().await? {
            if car.status == CarStatus::Maintenance {
                continue;
            }
            if self.is_available(car.id, pickup_at, return_at, None).await? {
                available.push(car);
            }
        }

        Ok(available)
    }

    /// The car with its live calendar: every booking except cancelled ones.
    pub async fn car_schedule(&self, car_id: Uuid) -> Result<CarSchedule, FleetError> {
        let car = self.get_car(car_id).await?;
        let bookings = self
            .bookings
            .list_for_car(car_id)
            .await?
            .into_iter()
            .filter(|b| b.status != carbook_shared::BookingStatus::Cancelled)
            .collect();

        Ok(CarSchedule { car, bookings })
    }
}
