use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{
    raw_input::RawInput, resources::ContentResource, validation::RequiredRule,
};

use super::ContentRecord;

pub const MISSING_FIELDS_PREFIX: &str = "Missing required fields: ";
pub const PRICING_PLANS_REQUIRED_MESSAGE: &str = "At least one pricing plan is required";

/// Card and intro fields, always required.
const CORE_FIELDS: [&str; 5] = [
    "name",
    "shortDescription",
    "mainImage",
    "introDescription",
    "mainContentImage",
];

/// Fixed narrative sections. A non-empty `sections` list replaces them.
const NARRATIVE_FIELDS: [&str; 8] = [
    "whatCauses",
    "whatCausesImage",
    "healthRisks",
    "healthRisksImage",
    "strategies",
    "strategiesImage",
    "conclusion",
    "conclusionImage",
];

/// Image fields that accept an uploaded file, with the file name prefix used
/// when the upload is stored.
pub const PROGRAM_IMAGE_FIELDS: [(&str, &str); 6] = [
    ("mainImage", "main"),
    ("mainContentImage", "content"),
    ("whatCausesImage", "causes"),
    ("healthRisksImage", "risks"),
    ("strategiesImage", "strategies"),
    ("conclusionImage", "conclusion"),
];

pub fn image_upload_prefix(field: &str) -> Option<&'static str> {
    PROGRAM_IMAGE_FIELDS
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, prefix)| *prefix)
}

/// A pricing plan owned by a program. It has no id of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedPricingPlan {
    pub name: String,
    pub subtitle: String,
    pub price: String,
    pub features: Vec<String>,
}

impl EmbeddedPricingPlan {
    fn from_input(input: &RawInput) -> Self {
        Self {
            name: input.text("name"),
            subtitle: input.text("subtitle"),
            price: input.text("price"),
            features: input.text_list("features"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramSection {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image: String,
}

impl ProgramSection {
    fn from_input(input: &RawInput) -> Self {
        Self {
            title: input.text("title"),
            content: input.text("content"),
            image: input.text("image"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramEntity {
    pub id: String,
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
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<ProgramSection>,
    pub created_at: DateTime<Utc>,
}

impl ContentRecord for ProgramEntity {
    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }
}

impl ContentResource for ProgramEntity {
    const RESOURCE: &'static str = "programs";
    const FAILURE_MESSAGE: &'static str = "Failed to add program";

    fn required_rules(input: &RawInput) -> Vec<RequiredRule> {
        let mut fields: Vec<&'static str> = CORE_FIELDS.to_vec();
        if input.is_missing("sections") {
            fields.extend(NARRATIVE_FIELDS);
        }

        vec![
            RequiredRule::listing(&fields, MISSING_FIELDS_PREFIX),
            RequiredRule::fixed(&["pricingPlans"], PRICING_PLANS_REQUIRED_MESSAGE),
        ]
    }

    fn from_input(input: &RawInput, created_at: DateTime<Utc>) -> Self {
        Self {
            id: String::new(),
            name: input.text("name"),
            short_description: input.text("shortDescription"),
            main_image: input.text("mainImage"),
            intro_description: input.text("introDescription"),
            main_content_image: input.text("mainContentImage"),
            what_causes: input.text("whatCauses"),
            what_causes_image: input.text("whatCausesImage"),
            health_risks: input.text("healthRisks"),
            health_risks_image: input.text("healthRisksImage"),
            strategies: input.text("strategies"),
            strategies_image: input.text("strategiesImage"),
            conclusion: input.text("conclusion"),
            conclusion_image: input.text("conclusionImage"),
            pricing_plans: input
                .object_list("pricingPlans")
                .iter()
                .map(EmbeddedPricingPlan::from_input)
                .collect(),
            sections: input
                .object_list("sections")
                .iter()
                .map(ProgramSection::from_input)
                .collect(),
            created_at,
        }
    }
}
