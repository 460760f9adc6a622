use async_trait::async_trait;
use uuid::Uuid;

use carbook_core::repository::HandoverRepository;
use carbook_core::RepoError;
use carbook_shared::Handover;

use crate::kv::{keys, KvStore};

pub struct KvHandoverRepository {
    store: KvStore,
}

impl KvHandoverRepository {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }

    async fn load(&self) -> Vec<Handover> {
        self.store.get(keys::HANDOVERS).await.unwrap_or_default()
    }
}

#[async_trait]
impl HandoverRepository for KvHandoverRepository {
    async fn find_for_booking(&self, booking_id: Uuid) -> Result<Option<Handover>, RepoError> {
        Ok(self
            .load()
            .await
            .into_iter()
            .find(|h| h.booking_id == booking_id))
    }

    async fn insert_handover(&self, handover: &Handover) -> Result<(), RepoError> {
        let mut handovers = self.load().await;
        handovers.push(handover.clone());
        self.store.put(keys::HANDOVERS, &handovers).await?;
        Ok(())
    }

    async fn save_handover(&self, handover: &Handover) -> Result<Option<Handover>, RepoError> {
        let mut handovers = self.load().await;
        let Some(slot) = handovers.iter_mut().find(|h| h.id == handover.id) else {
            return Ok(None);
        };

        *slot = handover.clone();
        self.store.put(keys::HANDOVERS, &handovers).await?;
        Ok(Some(handover.clone()))
    }
}
