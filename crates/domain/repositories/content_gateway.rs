use async_trait::async_trait;
use mockall::automock;
use serde_json::Value;

use crate::domain::{
    entities::{
        pricing_plans::PricingPlanEntity, programs::ProgramEntity,
        testimonials::TestimonialEntity,
    },
    value_objects::{
        drafts::{PricingPlanDraft, ProgramDraft, TestimonialDraft},
        submission::SubmitError,
    },
};

/// Create endpoints as seen from the admin forms.
#[automock]
#[async_trait]
pub trait ContentGateway {
    async fn submit_pricing_plan(
        &self,
        draft: &PricingPlanDraft,
    ) -> Result<PricingPlanEntity, SubmitError>;

    async fn submit_program(&self, draft: &ProgramDraft) -> Result<ProgramEntity, SubmitError>;

    async fn submit_testimonial(
        &self,
        draft: &TestimonialDraft,
    ) -> Result<TestimonialEntity, SubmitError>;
}

/// The separately hosted testimonial API, authorized with the session token.
#[automock]
#[async_trait]
pub trait TestimonialRelay {
    async fn relay(
        &self,
        draft: &TestimonialDraft,
        bearer_token: &str,
    ) -> Result<Value, SubmitError>;
}
