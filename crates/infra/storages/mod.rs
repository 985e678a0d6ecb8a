pub mod local_uploads;
