use async_trait::async_trait;

use carbook_core::repository::SessionStore;
use carbook_core::RepoError;
use carbook_shared::User;

use crate::kv::{keys, KvStore};

/// Persists the signed-in user across launches.
pub struct KvSessionStore {
    store: KvStore,
}

impl KvSessionStore {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SessionStore for KvSessionStore {
    async fn current_user(&self) -> Result<Option<User>, RepoError> {
        Ok(self.store.get(keys::CURRENT_USER).await)
    }

    async fn set_current_user(&self, user: &User) -> Result<(), RepoError> {
        self.store.put(keys::CURRENT_USER, user).await?;
        Ok(())
    }

    async fn clear_current_user(&self) -> Result<(), RepoError> {
        self.store.remove(keys::CURRENT_USER).await?;
        Ok(())
    }
}
