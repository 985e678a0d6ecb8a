use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::{
    entities::pricing_plans::PricingPlanEntity,
    repositories::content_gateway::ContentGateway,
    value_objects::{drafts::PricingPlanDraft, submission::SubmitError},
};

use super::FormStatus;

pub const NO_FEATURES_MESSAGE: &str = "Please add at least one feature";
pub const PRICING_PLAN_ADDED_MESSAGE: &str = "Pricing plan added successfully!";

#[derive(Debug, Clone, Default)]
pub struct PricingPlanForm {
    pub draft: PricingPlanDraft,
    /// Feature text typed but not yet added to the list.
    pub current_feature: String,
    status: FormStatus,
}

impl PricingPlanForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the trimmed pending feature into the list. Blank text is ignored.
    pub fn add_feature(&mut self) -> bool {
        let feature = self.current_feature.trim();
        if feature.is_empty() {
            return false;
        }

        self.draft.features.push(feature.to_string());
        self.current_feature.clear();
        true
    }

    pub fn remove_feature(&mut self, index: usize) -> Option<String> {
        (index < self.draft.features.len()).then(|| self.draft.features.remove(index))
    }

    pub fn status(&self, now: DateTime<Utc>) -> FormStatus {
        self.status.at(now)
    }

    pub async fn submit<G>(
        &mut self,
        gateway: &G,
        now: DateTime<Utc>,
    ) -> Result<PricingPlanEntity, SubmitError>
    where
        G: ContentGateway + Sync + ?Sized,
    {
        self.status = FormStatus::Pending;

        if self.draft.features.is_empty() {
            self.status = FormStatus::failed(NO_FEATURES_MESSAGE);
            return Err(SubmitError::Invalid(NO_FEATURES_MESSAGE.to_string()));
        }

        match gateway.submit_pricing_plan(&self.draft).await {
            Ok(plan) => {
                debug!(id = %plan.id, "pricing_plan_form: submitted");
                self.draft = PricingPlanDraft::default();
                self.current_feature.clear();
                self.status = FormStatus::succeeded(PRICING_PLAN_ADDED_MESSAGE, now);
                Ok(plan)
            }
            Err(err) => {
                self.status = FormStatus::failed(err.to_string());
                Err(err)
            }
        }
    }
}
