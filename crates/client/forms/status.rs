use chrono::{DateTime, Duration, Utc};

/// How long a success message stays on screen.
pub const SUCCESS_DISPLAY_SECS: i64 = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Pending,
    Succeeded {
        message: String,
        at: DateTime<Utc>,
    },
    Failed {
        message: String,
    },
}

impl FormStatus {
    pub fn succeeded(message: &str, at: DateTime<Utc>) -> Self {
        FormStatus::Succeeded {
            message: message.to_string(),
            at,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        FormStatus::Failed {
            message: message.into(),
        }
    }

    /// The status as displayed at `now`: a success older than the display
    /// window reads as idle. Failures stay until the next submission.
    pub fn at(&self, now: DateTime<Utc>) -> FormStatus {
        match self {
            FormStatus::Succeeded { at, .. }
                if now - *at >= Duration::seconds(SUCCESS_DISPLAY_SECS) =>
            {
                FormStatus::Idle
            }
            other => other.clone(),
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            FormStatus::Failed { message } => Some(message),
            _ => None,
        }
    }

    pub fn success_message(&self) -> Option<&str> {
        match self {
            FormStatus::Succeeded { message, .. } => Some(message),
            _ => None,
        }
    }
}
