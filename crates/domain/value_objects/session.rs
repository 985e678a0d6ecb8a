use thiserror::Error;

pub const AUTH_TOKEN_KEY: &str = "authToken";
pub const USER_EMAIL_KEY: &str = "userEmail";
pub const USER_PASSWORD_KEY: &str = "userPassword";

/// Used when no password override is stored on the device.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const MIN_PASSWORD_LENGTH: usize = 6;

pub const PASSWORD_CHANGED_MESSAGE: &str = "Password changed successfully!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated { email: String },
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordChangeRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordChangeError {
    #[error("Current password is incorrect")]
    IncorrectCurrentPassword,

    #[error("New password must be at least 6 characters long")]
    TooShort,

    #[error("New password and confirmation do not match")]
    ConfirmationMismatch,

    #[error("New password must be different from current password")]
    UnchangedPassword,

    #[error("Failed to access device storage: {0}")]
    Storage(String),
}

impl PasswordChangeRequest {
    /// Checks the request against the stored password, in the order the
    /// dashboard reports problems.
    pub fn check_against(&self, stored_password: &str) -> Result<(), PasswordChangeError> {
        if self.current_password != stored_password {
            return Err(PasswordChangeError::IncorrectCurrentPassword);
        }

        // UTF-16 units, as the dashboard counts them.
        if self.new_password.encode_utf16().count() < MIN_PASSWORD_LENGTH {
            return Err(PasswordChangeError::TooShort);
        }

        if self.new_password != self.confirm_password {
            return Err(PasswordChangeError::ConfirmationMismatch);
        }

        if self.new_password == self.current_password {
            return Err(PasswordChangeError::UnchangedPassword);
        }

        Ok(())
    }
}
