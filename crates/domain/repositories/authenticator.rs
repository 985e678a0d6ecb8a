use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::value_objects::session::{
    PasswordChangeError, PasswordChangeRequest, SessionState,
};

/// Seam for admin authentication. The only implementation today is the
/// device-local stub; a real credential service can replace it without
/// touching callers.
#[automock]
#[async_trait]
pub trait AdminAuthenticator {
    async fn session(&self) -> Result<SessionState>;
    async fn session_token(&self) -> Result<Option<String>>;
    async fn establish_session(&self, token: &str, email: &str) -> Result<()>;
    async fn logout(&self) -> Result<()>;
    async fn change_password(
        &self,
        request: &PasswordChangeRequest,
    ) -> Result<(), PasswordChangeError>;
}
