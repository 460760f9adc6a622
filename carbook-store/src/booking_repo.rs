use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use carbook_core::repository::BookingRepository;
use carbook_core::RepoError;
use carbook_shared::Booking;

use crate::kv::{keys, KvStore};

pub struct KvBookingRepository {
    store: KvStore,
}

impl KvBookingRepository {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }

    async fn load(&self) -> Vec<Booking> {
        self.store.get(keys::BOOKINGS).await.unwrap_or_default()
    }
}

#[async_trait]
impl BookingRepository for KvBookingRepository {
    async fn list_bookings(&self) -> Result<Vec<Booking>, RepoError> {
        Ok(self.load().await)
    }

    async fn get_booking(&self, id: Uuid) -> Result<Option<Booking>, RepoError> {
        Ok(self.load().await.into_iter().find(|b| b.id == id))
    }

    async fn list_for_car(&self, car_id: Uuid) -> Result<Vec<Booking>, RepoError> {
        Ok(self
            .load()
            .await
            .into_iter()
            .filter(|b| b.car_id == car_id)
            .collect())
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Booking>, RepoError> {
        Ok(self
            .load()
            .await
            .into_iter()
            .filter(|b| b.user_id == user_id)
            .collect())
    }

    async fn insert_booking(&self, booking: &Booking) -> Result<(), RepoError> {
        let mut bookings = self.load().await;
        bookings.push(booking.clone());
        self.store.put(keys::BOOKINGS, &bookings).await?;
        Ok(())
    }

    async fn save_booking(&self, booking: &Booking) -> Result<Option<Booking>, RepoError> {
        let mut bookings = self.load().await;
        let Some(slot) = bookings.iter_mut().find(|b| b.id == booking.id) else {
            return Ok(None);
        };

        *slot = booking.clone();
        slot.updated_at = Utc::now();
        let saved = slot.clone();
        self.store.put(keys::BOOKINGS, &bookings).await?;
        Ok(Some(saved))
    }
}
