//! Device-local stand-in for admin authentication.
//!
//! This is NOT a security boundary: credentials live in device storage and are
//! never verified by a server. Callers depend on [`AdminAuthenticator`] so a real
//! credential service can replace this stub.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::{
    repositories::{authenticator::AdminAuthenticator, device_storage::DeviceStorage},
    value_objects::session::{
        AUTH_TOKEN_KEY, DEFAULT_ADMIN_PASSWORD, PasswordChangeError, PasswordChangeRequest,
        SessionState, USER_EMAIL_KEY, USER_PASSWORD_KEY,
    },
};

pub struct DeviceLocalAuthenticator<D>
where
    D: DeviceStorage + Send + Sync + 'static,
{
    storage: Arc<D>,
}

impl<D> DeviceLocalAuthenticator<D>
where
    D: DeviceStorage + Send + Sync + 'static,
{
    pub fn new(storage: Arc<D>) -> Self {
        Self { storage }
    }

    async fn stored_password(&self) -> Result<String> {
        Ok(self
            .storage
            .get(USER_PASSWORD_KEY)
            .await?
            .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string()))
    }
}

#[async_trait]
impl<D> AdminAuthenticator for DeviceLocalAuthenticator<D>
where
    D: DeviceStorage + Send + Sync + 'static,
{
    async fn session(&self) -> Result<SessionState> {
        if self.storage.get(AUTH_TOKEN_KEY).await?.is_none() {
            return Ok(SessionState::Unauthenticated);
        }

        let email = self.storage.get(USER_EMAIL_KEY).await?.unwrap_or_default();
        Ok(SessionState::Authenticated { email })
    }

    async fn session_token(&self) -> Result<Option<String>> {
        self.storage.get(AUTH_TOKEN_KEY).await
    }

    async fn establish_session(&self, token: &str, email: &str) -> Result<()> {
        self.storage.set(AUTH_TOKEN_KEY, token).await?;
        self.storage.set(USER_EMAIL_KEY, email).await?;
        info!("mock_auth: session established");
        Ok(())
    }

    async fn logout(&self) -> Result<()> {
        for key in [AUTH_TOKEN_KEY, USER_EMAIL_KEY, USER_PASSWORD_KEY] {
            self.storage.remove(key).await?;
        }
        info!("mock_auth: session cleared");
        Ok(())
    }

    async fn change_password(
        &self,
        request: &PasswordChangeRequest,
    ) -> Result<(), PasswordChangeError> {
        let stored = self
            .stored_password()
            .await
            .map_err(|err| PasswordChangeError::Storage(err.to_string()))?;

        if let Err(err) = request.check_against(&stored) {
            warn!(reason = %err, "mock_auth: password change rejected");
            return Err(err);
        }

        self.storage
            .set(USER_PASSWORD_KEY, &request.new_password)
            .await
            .map_err(|err| PasswordChangeError::Storage(err.to_string()))?;

        info!("mock_auth: password changed");
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardAccess {
    Granted { email: String },
    RedirectTo(&'static str),
}

/// Dashboard gating: without a session the admin is sent back to the site root.
pub async fn enter_dashboard<A>(authenticator: &A) -> Result<DashboardAccess>
where
    A: AdminAuthenticator + Sync + ?Sized,
{
    match authenticator.session().await? {
        SessionState::Authenticated { email } => Ok(DashboardAccess::Granted { email }),
        SessionState::Unauthenticated => Ok(DashboardAccess::RedirectTo("/")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::repositories::device_storage::MockDeviceStorage,
        infra::device::memory_storage::MemoryDeviceStorage,
    };

    fn authenticator() -> (Arc<MemoryDeviceStorage>, DeviceLocalAuthenticator<MemoryDeviceStorage>) {
        let storage = Arc::new(MemoryDeviceStorage::new());
        (Arc::clone(&storage), DeviceLocalAuthenticator::new(storage))
    }

    fn change(current: &str, new: &str, confirm: &str) -> PasswordChangeRequest {
        PasswordChangeRequest {
            current_password: current.to_string(),
            new_password: new.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[tokio::test]
    async fn session_follows_the_stored_token() {
        let (_, auth) = authenticator();
        assert_eq!(auth.session().await.unwrap(), SessionState::Unauthenticated);
        assert_eq!(
            enter_dashboard(&auth).await.unwrap(),
            DashboardAccess::RedirectTo("/")
        );

        auth.establish_session("token-1", "admin@example.com").await.unwrap();
        assert_eq!(
            enter_dashboard(&auth).await.unwrap(),
            DashboardAccess::Granted {
                email: "admin@example.com".to_string()
            }
        );
    }

    #[tokio::test]
    async fn logout_clears_token_email_and_password_override() {
        let (storage, auth) = authenticator();
        auth.establish_session("token-1", "admin@example.com").await.unwrap();
        auth.change_password(&change("admin123", "newpass1", "newpass1"))
            .await
            .unwrap();

        auth.logout().await.unwrap();

        for key in [AUTH_TOKEN_KEY, USER_EMAIL_KEY, USER_PASSWORD_KEY] {
            assert_eq!(storage.get(key).await.unwrap(), None, "{key} should be cleared");
        }
        assert!(!auth.session().await.unwrap().is_authenticated());
    }

    #[tokio::test]
    async fn password_change_uses_default_then_stored_value() {
        let (storage, auth) = authenticator();

        auth.change_password(&change("admin123", "letmein", "letmein"))
            .await
            .unwrap();
        assert_eq!(
            storage.get(USER_PASSWORD_KEY).await.unwrap().as_deref(),
            Some("letmein")
        );

        let err = auth
            .change_password(&change("admin123", "another1", "another1"))
            .await
            .unwrap_err();
        assert_eq!(err, PasswordChangeError::IncorrectCurrentPassword);
    }

    #[tokio::test]
    async fn rejected_changes_leave_the_stored_password_alone() {
        let (storage, auth) = authenticator();
        storage.set(USER_PASSWORD_KEY, "current1").await.unwrap();

        for request in [
            change("wrong", "newpass1", "newpass1"),
            change("current1", "short", "short"),
            change("current1", "newpass1", "newpass2"),
            change("current1", "current1", "current1"),
        ] {
            assert!(auth.change_password(&request).await.is_err());
            assert_eq!(
                storage.get(USER_PASSWORD_KEY).await.unwrap().as_deref(),
                Some("current1")
            );
        }
    }

    #[tokio::test]
    async fn storage_failures_surface_as_password_errors() {
        let mut storage = MockDeviceStorage::new();
        storage
            .expect_get()
            .returning(|_| Err(anyhow::anyhow!("disk unavailable")));

        let auth = DeviceLocalAuthenticator::new(Arc::new(storage));
        let err = auth
            .change_password(&change("admin123", "newpass1", "newpass1"))
            .await
            .unwrap_err();

        assert!(matches!(err, PasswordChangeError::Storage(_)));
    }
}
