pub mod drafts;
pub mod raw_input;
pub mod record_ids;
pub mod resources;
pub mod session;
pub mod submission;
pub mod uploads;
pub mod validation;
