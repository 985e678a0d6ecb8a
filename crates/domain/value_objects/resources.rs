use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::ContentRecord;

use super::{raw_input::RawInput, validation::RequiredRule};

/// Schema of one content resource: where it lives, which fields a create
/// request must carry and how a record is built from the raw input.
pub trait ContentResource: ContentRecord + Clone + Serialize + Send + Sync + 'static {
    /// Path segment under `/api`, also used as the log field value.
    const RESOURCE: &'static str;

    /// Client-facing message for unexpected create failures.
    const FAILURE_MESSAGE: &'static str;

    fn required_rules(input: &RawInput) -> Vec<RequiredRule>;

    /// Builds an unsaved record. The id stays empty until the store assigns it.
    fn from_input(input: &RawInput, created_at: DateTime<Utc>) -> Self;
}
