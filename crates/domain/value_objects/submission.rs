use thiserror::Error;

/// Why a form submission did not produce a record. Messages are shown to the
/// admin as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The draft failed local checks before any request was sent.
    #[error("{0}")]
    Invalid(String),

    /// The API answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("{0}")]
    Transport(String),

    #[error("Please login first")]
    NotLoggedIn,
}
