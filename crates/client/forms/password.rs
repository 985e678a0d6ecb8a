use chrono::{DateTime, Utc};

use crate::domain::{
    repositories::authenticator::AdminAuthenticator,
    value_objects::session::{PASSWORD_CHANGED_MESSAGE, PasswordChangeError, PasswordChangeRequest},
};

use super::FormStatus;

#[derive(Debug, Clone, Default)]
pub struct PasswordChangeForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
    status: FormStatus,
}

impl PasswordChangeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self, now: DateTime<Utc>) -> FormStatus {
        self.status.at(now)
    }

    /// Empties the inputs and any message.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub async fn submit<A>(
        &mut self,
        authenticator: &A,
        now: DateTime<Utc>,
    ) -> Result<(), PasswordChangeError>
    where
        A: AdminAuthenticator + Sync + ?Sized,
    {
        self.status = FormStatus::Pending;

        let request = PasswordChangeRequest {
            current_password: self.current_password.clone(),
            new_password: self.new_password.clone(),
            confirm_password: self.confirm_password.clone(),
        };

        match authenticator.change_password(&request).await {
            Ok(()) => {
                self.current_password.clear();
                self.new_password.clear();
                self.confirm_password.clear();
                self.status = FormStatus::succeeded(PASSWORD_CHANGED_MESSAGE, now);
                Ok(())
            }
            Err(err) => {
                self.status = FormStatus::failed(err.to_string());
                Err(err)
            }
        }
    }
}
