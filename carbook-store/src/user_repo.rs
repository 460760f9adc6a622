use async_trait::async_trait;
use uuid::Uuid;

use carbook_core::repository::UserRepository;
use carbook_core::RepoError;
use carbook_shared::User;

use crate::kv::{keys, KvStore};

pub struct KvUserRepository {
    store: KvStore,
}

impl KvUserRepository {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }

    async fn load(&self) -> Vec<User> {
        self.store.get(keys::USERS).await.unwrap_or_default()
    }
}

#[async_trait]
impl UserRepository for KvUserRepository {
    async fn list_users(&self) -> Result<Vec<User>, RepoError> {
        Ok(self.load().await)
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.load().await.into_iter().find(|u| u.id == id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .load()
            .await
            .into_iter()
            .find(|u| u.email.eq_ignore_ascii_case(email)))
    }

    async fn insert_user(&self, user: &User) -> Result<(), RepoError> {
        let mut users = self.load().await;
        users.push(user.clone());
        self.store.put(keys::USERS, &users).await?;
        Ok(())
    }

    async fn save_user(&self, user: &User) -> Result<Option<User>, RepoError> {
        let mut users = self.load().await;
        let Some(slot) = users.iter_mut().find(|u| u.id == user.id) else {
            return Ok(None);
        };

        *slot = user.clone();
        self.store.put(keys::USERS, &users).await?;
        Ok(Some(user.clone()))
    }
}
