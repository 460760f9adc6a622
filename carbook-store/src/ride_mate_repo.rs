use async_trait::async_trait;
use uuid::Uuid;

use carbook_core::repository::RideMateRepository;
use carbook_core::RepoError;
use carbook_shared::RideMateRequest;

use crate::kv::{keys, KvStore};

pub struct KvRideMateRepository {
    store: KvStore,
}

impl KvRideMateRepository {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }

    async fn load(&self) -> Vec<RideMateRequest> {
        self.store.get(keys::RIDE_MATES).await.unwrap_or_default()
    }
}

#[async_trait]
impl RideMateRepository for KvRideMateRepository {
    async fn list_for_booking(&self, booking_id: Uuid) -> Result<Vec<RideMateRequest>, RepoError> {
        Ok(self
            .load()
            .await
            .into_iter()
            .filter(|r| r.booking_id == booking_id)
            .collect())
    }

    async fn get_request(&self, id: Uuid) -> Result<Option<RideMateRequest>, RepoError> {
        Ok(self.load().await.into_iter().find(|r| r.id == id))
    }

    async fn insert_request(&self, request: &RideMateRequest) -> Result<(), RepoError> {
        let mut requests = self.load().await;
        requests.push(request.clone());
        self.store.put(keys::RIDE_MATES, &requests).await?;
        Ok(())
    }

    async fn save_request(
        &self,
        request: &RideMateRequest,
    ) -> Result<Option<RideMateRequest>, RepoError> {
        let mut requests = self.load().await;
        let Some(slot) = requests.iter_mut().find(|r| r.id == request.id) else {
            return Ok(None);
        };

        *slot = request.clone();
        self.store.put(keys::RIDE_MATES, &requests).await?;
        Ok(Some(request.clone()))
    }
}
