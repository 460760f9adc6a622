use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use carbook_core::repository::CarRepository;
use carbook_core::RepoError;
use carbook_shared::Car;

use crate::kv::{keys, KvStore};

pub struct KvCarRepository {
    store: KvStore,
}

impl KvCarRepository {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }

    async fn load(&self) -> Vec<Car> {
        self.store.get(keys::CARS).await.unwrap_or_default()
    }
}

#[async_trait]
impl CarRepository for KvCarRepository {
    async fn list_cars(&self) -> Result<Vec<Car>, RepoError> {
        Ok(self.load().await)
    }

    async fn get_car(&self, id: Uuid) -> Result<Option<Car>, RepoError> {
        Ok(self.load().await.into_iter().find(|c| c.id == id))
    }

    async fn insert_car(&self, car: &Car) -> Result<(), RepoError> {
        let mut cars = self.load().await;
        cars.push(car.clone());
        self.store.put(keys::CARS, &cars).await?;
        Ok(())
    }

    async fn save_car(&self, car: &Car) -> Result<Option<Car>, RepoError> {
        let mut cars = self.load().await;
        let Some(slot) = cars.iter_mut().find(|c| c.id == car.id) else {
            return Ok(None);
        };

        *slot = car.clone();
        slot.updated_at = Utc::now();
        let saved = slot.clone();
        self.store.put(keys::CARS, &cars).await?;
        Ok(Some(saved))
    }
}
