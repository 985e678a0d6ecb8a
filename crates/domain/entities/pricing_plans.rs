use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{
    raw_input::RawInput, resources::ContentResource, validation::RequiredRule,
};

use super::ContentRecord;

pub const PRICING_PLAN_REQUIRED_MESSAGE: &str =
    "Name, subtitle, price, and at least one feature are required";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPlanEntity {
    pub id: String,
    pub name: String,
    pub subtitle: String,
    /// Display-formatted, e.g. `1,200,000.00`.
    pub price: String,
    pub features: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl ContentRecord for PricingPlanEntity {
    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }
}

impl ContentResource for PricingPlanEntity {
    const RESOURCE: &'static str = "pricing";
    const FAILURE_MESSAGE: &'static str = "Failed to add pricing plan";

    fn required_rules(_input: &RawInput) -> Vec<RequiredRule> {
        vec![RequiredRule::fixed(
            &["name", "subtitle", "price", "features"],
            PRICING_PLAN_REQUIRED_MESSAGE,
        )]
    }

    fn from_input(input: &RawInput, created_at: DateTime<Utc>) -> Self {
        Self {
            id: String::new(),
            name: input.text("name"),
            subtitle: input.text("subtitle"),
            price: input.text("price"),
            features: input.text_list("features"),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::validation::validate;
    use serde_json::json;

    fn input(value: serde_json::Value) -> RawInput {
        RawInput::from_json_slice(value.to_string().as_bytes()).unwrap()
    }

    #[test]
    fn zero_features_is_rejected_even_when_everything_else_is_valid() {
        let raw = input(json!({
            "name": "Basic",
            "subtitle": "Your foundation for a healthier life!",
            "price": "500,000.00",
            "features": [],
        }));

        let err = validate(&raw, &PricingPlanEntity::required_rules(&raw)).unwrap_err();
        assert_eq!(err.missing, vec!["features"]);
        assert_eq!(err.message, PRICING_PLAN_REQUIRED_MESSAGE);
    }

    #[test]
    fn builds_record_from_input_and_serializes_camel_case() {
        let created_at = Utc::now();
        let raw = input(json!({
            "name": "Premium",
            "subtitle": "Upgrade to an elite level of health!",
            "price": "1,200,000.00",
            "features": ["Basic Package", "Private coaching sessions"],
            "ignored": "extra",
        }));

        let plan = PricingPlanEntity::from_input(&raw, created_at);
        assert_eq!(plan.id, "");
        assert_eq!(plan.features.len(), 2);

        let body = serde_json::to_value(&plan).unwrap();
        assert_eq!(body["price"], "1,200,000.00");
        assert!(body.get("createdAt").is_some());
        assert!(body.get("ignored").is_none());
    }
}
