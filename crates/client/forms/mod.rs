//! Editable drafts behind the admin dashboard forms.
//!
//! Each form mirrors one resource's create input, runs the minimal local
//! checks and reports its outcome through a [`FormStatus`].

pub mod password;
pub mod pricing_plan;
pub mod program;
pub mod status;
pub mod testimonial;

pub use status::FormStatus;
