pub mod content;
pub mod programs;
