use async_trait::async_trait;
use uuid::Uuid;

use carbook_core::repository::IssueRepository;
use carbook_core::RepoError;
use carbook_shared::Issue;

use crate::kv::{keys, KvStore};

pub struct KvIssueRepository {
    store: KvStore,
}

impl KvIssueRepository {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }

    async fn load(&self) -> Vec<Issue> {
        self.store.get(keys::ISSUES).await.unwrap_or_default()
    }
}

#[async_trait]
impl IssueRepository for KvIssueRepository {
    async fn list_issues(&self) -> Result<Vec<Issue>, RepoError> {
        Ok(self.load().await)
    }

    async fn get_issue(&self, id: Uuid) -> Result<Option<Issue>, RepoError> {
        Ok(self.load().await.into_iter().find(|i| i.id == id))
    }

    async fn list_for_car(&self, car_id: Uuid) -> Result<Vec<Issue>, RepoError> {
        Ok(self
            .load()
            .await
            .into_iter()
            .filter(|i| i.car_id == car_id)
            .collect())
    }

    async fn insert_issue(&self, issue: &Issue) -> Result<(), RepoError> {
        let mut issues = self.load().await;
        issues.push(issue.clone());
        self.store.put(keys::ISSUES, &issues).await?;
        Ok(())
    }

    async fn save_issue(&self, issue: &Issue) -> Result<Option<Issue>, RepoError> {
        let mut issues = self.load().await;
        let Some(slot) = issues.iter_mut().find(|i| i.id == issue.id) else {
            return Ok(None);
        };

        *slot = issue.clone();
        self.store.put(keys::ISSUES, &issues).await?;
        Ok(Some(issue.clone()))
    }
}
