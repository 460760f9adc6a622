use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use carbook_shared::{HomeOffice, User, UserRole};

use crate::repository::{SessionStore, UserRepository};
use crate::RepoError;

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("No account registered for {0}")]
    UnknownEmail(String),

    #[error("An account already exists for {0}")]
    EmailTaken(String),

    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Storage failure: {0}")]
    Storage(#[from] RepoError),
}

/// Field-level profile changes; `None` leaves the field untouched.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub share_phone: Option<bool>,
    pub team: Option<String>,
    pub home_office: Option<HomeOffice>,
}

/// Sign-in, registration and profile management over the local user store.
///
/// There is no password check: the device owns its copy of the database, so
/// matching a known email is the whole trust model.
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    session: Arc<dyn SessionStore>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserRepository>, session: Arc<dyn SessionStore>) -> Self {
        Self { users, session }
    }

    /// Sign in by email (case-insensitive) and persist the session.
    pub async fn login(&self, email: &str) -> Result<User, IdentityError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| IdentityError::UnknownEmail(email.to_string()))?;

        self.session.set_current_user(&user).await?;
        info!(user = %user.id, "signed in");
        Ok(user)
    }

    /// Create a new account and sign it in.
    pub async fn register(
        &self,
        email: &str,
        full_name: &str,
        home_office: HomeOffice,
    ) -> Result<User, IdentityError> {
        if self.users.find_by_email(email).await?.is_some() {
            return Err(IdentityError::EmailTaken(email.to_string()));
        }

        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            full_name: full_name.to_string(),
            phone: None,
            share_phone: false,
            role: UserRole::User,
            home_office,
            team: None,
            created_at: Utc::now(),
        };

        self.users.insert_user(&user).await?;
        self.session.set_current_user(&user).await?;
        info!(user = %user.id, "registered");
        Ok(user)
    }

    /// Apply profile changes. The persisted session copy follows when the
    /// updated user is the one signed in.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        changes: ProfileUpdate,
    ) -> Result<User, IdentityError> {
        let mut user = self
            .users
            .get_user(user_id)
            .await?
            .ok_or(IdentityError::UserNotFound(user_id))?;

        if let Some(full_name) = changes.full_name {
            user.full_name = full_name;
        }
        if let Some(phone) = changes.phone {
            user.phone = Some(phone);
        }
        if let Some(share_phone) = changes.share_phone {
            user.share_phone = share_phone;
        }
        if let Some(team) = changes.team {
            user.team = Some(team);
        }
        if let Some(home_office) = changes.home_office {
            user.home_office = home_office;
        }

        let saved = self
            .users
            .save_user(&user)
            .await?
            .ok_or(IdentityError::UserNotFound(user_id))?;

        if let Some(current) = self.session.current_user().await? {
            if current.id == saved.id {
                self.session.set_current_user(&saved).await?;
            }
        }

        Ok(saved)
    }

    pub async fn current_user(&self) -> Result<Option<User>, IdentityError> {
        Ok(self.session.current_user().await?)
    }

    pub async fn logout(&self) -> Result<(), IdentityError> {
        self.session.clear_current_user().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemUsers {
        users: Mutex<Vec<User>>,
    }

    #[async_trait]
    impl UserRepository for MemUsers {
        async fn list_users(&self) -> Result<Vec<User>, RepoError> {
            Ok(self.users.lock().unwrap().clone())
        }

        async fn get_user(&self, id: Uuid) -> Result<Option<User>, RepoError> {
            Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.email.eq_ignore_ascii_case(email))
                .cloned())
        }

        async fn insert_user(&self, user: &User) -> Result<(), RepoError> {
            self.users.lock().unwrap().push(user.clone());
            Ok(())
        }

        async fn save_user(&self, user: &User) -> Result<Option<User>, RepoError> {
            let mut users = self.users.lock().unwrap();
            match users.iter_mut().find(|u| u.id == user.id) {
                Some(slot) => {
                    *slot = user.clone();
                    Ok(Some(user.clone()))
                }
                None => Ok(None),
            }
        }
    }

    #[derive(Default)]
    struct MemSession {
        current: Mutex<Option<User>>,
    }

    #[async_trait]
    impl SessionStore for MemSession {
        async fn current_user(&self) -> Result<Option<User>, RepoError> {
            Ok(self.current.lock().unwrap().clone())
        }

        async fn set_current_user(&self, user: &User) -> Result<(), RepoError> {
            *self.current.lock().unwrap() = Some(user.clone());
            Ok(())
        }

        async fn clear_current_user(&self) -> Result<(), RepoError> {
            *self.current.lock().unwrap() = None;
            Ok(())
        }
    }

    fn service() -> AccountService {
        AccountService::new(Arc::new(MemUsers::default()), Arc::new(MemSession::default()))
    }

    #[tokio::test]
    async fn test_register_then_login_case_insensitive() {
        let svc = service();
        svc.register("Jane.Doe@example.com", "Jane Doe", HomeOffice::Dubai)
            .await
            .unwrap();

        let user = svc.login("jane.doe@EXAMPLE.com").await.unwrap();
        assert_eq!(user.full_name, "Jane Doe");
        assert_eq!(svc.current_user().await.unwrap().unwrap().id, user.id);
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let svc = service();
        svc.register("jane@example.com", "Jane", HomeOffice::Dubai)
            .await
            .unwrap();

        let err = svc
            .register("JANE@example.com", "Other Jane", HomeOffice::AlAin)
            .await
            .unwrap_err();
        assert!(matches!(err, IdentityError::EmailTaken(_)));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let svc = service();
        let err = svc.login("nobody@example.com").await.unwrap_err();
        assert!(matches!(err, IdentityError::UnknownEmail(_)));
    }

    #[tokio::test]
    async fn test_profile_update_refreshes_session() {
        let svc = service();
        let user = svc
            .register("jane@example.com", "Jane", HomeOffice::Dubai)
            .await
            .unwrap();

        svc.update_profile(
            user.id,
            ProfileUpdate {
                phone: Some("+971501234567".to_string()),
                share_phone: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let current = svc.current_user().await.unwrap().unwrap();
        assert_eq!(current.phone.as_deref(), Some("+971501234567"));
        assert!(current.share_phone);
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let svc = service();
        svc.register("jane@example.com", "Jane", HomeOffice::Dubai)
            .await
            .unwrap();
        svc.logout().await.unwrap();
        assert!(svc.current_user().await.unwrap().is_none());
    }
}
