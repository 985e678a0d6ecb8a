use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::{
    entities::programs::{EmbeddedPricingPlan, ProgramEntity, ProgramSection, image_upload_prefix},
    repositories::content_gateway::ContentGateway,
    value_objects::{drafts::ProgramDraft, submission::SubmitError, uploads::ImageUpload},
};

use super::FormStatus;

pub const NO_PRICING_PLANS_MESSAGE: &str = "Please add at least one pricing plan";
pub const PROGRAM_ADDED_MESSAGE: &str = "Program added successfully!";

#[derive(Debug, Clone, Default)]
pub struct ProgramForm {
    pub draft: ProgramDraft,
    status: FormStatus,
}

impl ProgramForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plans without a name are ignored.
    pub fn add_pricing_plan(&mut self, plan: EmbeddedPricingPlan) -> bool {
        if plan.name.trim().is_empty() {
            return false;
        }
        self.draft.pricing_plans.push(plan);
        true
    }

    pub fn remove_pricing_plan(&mut self, index: usize) -> Option<EmbeddedPricingPlan> {
        (index < self.draft.pricing_plans.len()).then(|| self.draft.pricing_plans.remove(index))
    }

    /// Sections without a title are ignored.
    pub fn add_section(&mut self, section: ProgramSection) -> bool {
        if section.title.trim().is_empty() {
            return false;
        }
        self.draft.sections.push(section);
        true
    }

    pub fn remove_section(&mut self, index: usize) -> Option<ProgramSection> {
        (index < self.draft.sections.len()).then(|| self.draft.sections.remove(index))
    }

    /// Attaches a file to one of the program image fields, replacing any file
    /// already attached there. Unknown fields and empty files are ignored.
    pub fn attach_image(&mut self, image: ImageUpload) -> bool {
        if image_upload_prefix(&image.field).is_none() || image.is_empty() {
            return false;
        }
        self.draft.images.retain(|attached| attached.field != image.field);
        self.draft.images.push(image);
        true
    }

    pub fn detach_image(&mut self, field: &str) -> Option<ImageUpload> {
        let index = self.draft.images.iter().position(|image| image.field == field)?;
        Some(self.draft.images.remove(index))
    }

    pub fn status(&self, now: DateTime<Utc>) -> FormStatus {
        self.status.at(now)
    }

    pub async fn submit<G>(
        &mut self,
        gateway: &G,
        now: DateTime<Utc>,
    ) -> Result<ProgramEntity, SubmitError>
    where
        G: ContentGateway + Sync + ?Sized,
    {
        self.status = FormStatus::Pending;

        if self.draft.pricing_plans.is_empty() {
            self.status = FormStatus::failed(NO_PRICING_PLANS_MESSAGE);
            return Err(SubmitError::Invalid(NO_PRICING_PLANS_MESSAGE.to_string()));
        }

        match gateway.submit_program(&self.draft).await {
            Ok(program) => {
                debug!(id = %program.id, "program_form: submitted");
                self.draft = ProgramDraft::default();
                self.status = FormStatus::succeeded(PROGRAM_ADDED_MESSAGE, now);
                Ok(program)
            }
            Err(err) => {
                self.status = FormStatus::failed(err.to_string());
                Err(err)
            }
        }
    }
}
