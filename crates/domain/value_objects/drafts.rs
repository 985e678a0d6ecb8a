use serde::Serialize;

use crate::domain::entities::programs::{EmbeddedPricingPlan, ProgramSection};

use super::uploads::ImageUpload;

/// Editable create input for a pricing plan, serialized as the request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PricingPlanDraft {
    pub name: String,
    pub subtitle: String,
    pub price: String,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramDraft {
    pub name: String,
    pub short_description: String,
    pub main_image: String,
    pub intro_description: String,
    pub main_content_image: String,
    pub what_causes: String,
    pub what_causes_image: String,
    pub health_risks: String,
    pub health_risks_image: String,
    pub strategies: String,
    pub strategies_image: String,
    pub conclusion: String,
    pub conclusion_image: String,
    pub pricing_plans: Vec<EmbeddedPricingPlan>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<ProgramSection>,
    /// Image files sent as multipart parts; each replaces the URL field it is
    /// attached to.
    #[serde(skip)]
    pub images: Vec<ImageUpload>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TestimonialDraft {
    pub name: String,
    pub location: String,
    pub review: String,
    pub avatar: String,
}
