use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use carbook_core::repository::{CarRepository, IssueRepository, UserRepository};
use carbook_core::RepoError;
use carbook_shared::{Issue, IssueCategory, IssueSeverity, IssueStatus};

#[derive(Debug, thiserror::Error)]
pub enum IssueError {
    #[error("Car not found: {0}")]
    CarNotFound(Uuid),

    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Issue not found: {0}")]
    IssueNotFound(Uuid),

    #[error("Issues move forward only: {from:?} cannot become {to:?}")]
    InvalidProgression { from: IssueStatus, to: IssueStatus },

    #[error("Storage failure: {0}")]
    Storage(#[from] RepoError),
}

/// Defect reports against cars: filed open, worked, resolved.
pub struct IssueService {
    issues: Arc<dyn IssueRepository>,
    cars: Arc<dyn CarRepository>,
    users: Arc<dyn UserRepository>,
}

impl IssueService {
    pub fn new(
        issues: Arc<dyn IssueRepository>,
        cars: Arc<dyn CarRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self { issues, cars, users }
    }

    pub async fn report(
        &self,
        car_id: Uuid,
        user_id: Uuid,
        category: IssueCategory,
        severity: IssueSeverity,
        description: String,
    ) -> Result<Issue, IssueError> {
        if self.cars.get_car(car_id).await?.is_none() {
            return Err(IssueError::CarNotFound(car_id));
        }
        if self.users.get_user(user_id).await?.is_none() {
            return Err(IssueError::UserNotFound(user_id));
        }

        let issue = Issue {
            id: Uuid::new_v4(),
            car_id,
            user_id,
            category,
            severity,
            description,
            photo_urls: Vec::new(),
            status: IssueStatus::Open,
            created_at: Utc::now(),
        };
        self.issues.insert_issue(&issue).await?;
        info!(issue = %issue.id, car = %car_id, ?severity, "issue reported");
        Ok(issue)
    }

    /// Move an issue along: open → in-progress → resolved. Skipping straight
    /// to resolved is fine; reopening is not.
    pub async fn set_status(
        &self,
        issue_id: Uuid,
        status: IssueStatus,
    ) -> Result<Issue, IssueError> {
        let mut issue = self
            .issues
            .get_issue(issue_id)
            .await?
            .ok_or(IssueError::IssueNotFound(issue_id))?;

        if !issue.status.can_progress_to(status) {
            return Err(IssueError::InvalidProgression {
                from: issue.status,
                to: status,
            });
        }

        issue.status = status;
        self.issues
            .save_issue(&issue)
            .await?
            .ok_or(IssueError::IssueNotFound(issue_id))?;
        Ok(issue)
    }

    pub async fn list(&self) -> Result<Vec<Issue>, IssueError> {
        Ok(self.issues.list_issues().await?)
    }

    pub async fn list_for_car(&self, car_id: Uuid) -> Result<Vec<Issue>, IssueError> {
        Ok(self.issues.list_for_car(car_id).await?)
    }
}
