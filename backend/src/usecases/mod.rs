pub mod programs;
pub mod resources;
