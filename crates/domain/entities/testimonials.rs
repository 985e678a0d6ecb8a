use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{
    raw_input::RawInput, resources::ContentResource, validation::RequiredRule,
};

use super::ContentRecord;

pub const TESTIMONIAL_REQUIRED_MESSAGE: &str = "Name, location, and review are required";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestimonialEntity {
    pub id: String,
    pub name: String,
    pub location: String,
    pub review: String,
    #[serde(default)]
    pub avatar: String,
}

impl ContentRecord for TestimonialEntity {
    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }
}

impl ContentResource for TestimonialEntity {
    const RESOURCE: &'static str = "testimonials";
    const FAILURE_MESSAGE: &'static str = "Failed to add testimonial";

    fn required_rules(_input: &RawInput) -> Vec<RequiredRule> {
        vec![RequiredRule::fixed(
            &["name", "location", "review"],
            TESTIMONIAL_REQUIRED_MESSAGE,
        )]
    }

    // Testimonials carry no timestamp on the wire.
    fn from_input(input: &RawInput, _created_at: DateTime<Utc>) -> Self {
        Self {
            id: String::new(),
            name: input.text("name"),
            location: input.text("location"),
            review: input.text("review"),
            avatar: input.text_or("avatar", ""),
        }
    }
}
