use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{
    Client, RequestBuilder,
    multipart::{Form, Part},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::domain::{
    entities::{
        pricing_plans::PricingPlanEntity, programs::ProgramEntity,
        testimonials::TestimonialEntity,
    },
    repositories::content_gateway::ContentGateway,
    value_objects::{
        drafts::{PricingPlanDraft, ProgramDraft, TestimonialDraft},
        resources::ContentResource,
        submission::SubmitError,
    },
};

use super::rejection;

/// Talks to this service's `/api/<resource>` endpoints.
pub struct ContentApiClient {
    client: Client,
    base_url: Url,
}

impl ContentApiClient {
    pub fn new(base_url: Url) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .context("failed to build content api client")?;

        Ok(Self {
            client,
            base_url: with_trailing_slash(base_url),
        })
    }

    pub fn endpoint(&self, resource: &str) -> Result<Url> {
        self.base_url
            .join(&format!("api/{}", resource))
            .with_context(|| format!("invalid endpoint for resource {}", resource))
    }

    pub async fn list<R>(&self) -> Result<Vec<R>>
    where
        R: ContentResource + DeserializeOwned,
    {
        let url = self.endpoint(R::RESOURCE)?;
        let records = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("failed to list {}", R::RESOURCE))?
            .error_for_status()?
            .json::<Vec<R>>()
            .await
            .with_context(|| format!("failed to decode {} list", R::RESOURCE))?;

        Ok(records)
    }

    async fn submit<R, B>(&self, body: &B) -> Result<R, SubmitError>
    where
        R: ContentResource + DeserializeOwned,
        B: Serialize + Sync,
    {
        let request = self.post::<R>()?.json(body);
        self.send::<R>(request).await
    }

    async fn submit_multipart<R>(&self, form: Form) -> Result<R, SubmitError>
    where
        R: ContentResource + DeserializeOwned,
    {
        let request = self.post::<R>()?.multipart(form);
        self.send::<R>(request).await
    }

    fn post<R>(&self) -> Result<RequestBuilder, SubmitError>
    where
        R: ContentResource,
    {
        let url = self
            .endpoint(R::RESOURCE)
            .map_err(|err| SubmitError::Transport(err.to_string()))?;
        Ok(self.client.post(url))
    }

    async fn send<R>(&self, request: RequestBuilder) -> Result<R, SubmitError>
    where
        R: ContentResource + DeserializeOwned,
    {
        let response = request
            .send()
            .await
            .map_err(|err| {
                warn!(resource = R::RESOURCE, error = %err, "api_client: request failed");
                SubmitError::Transport(R::FAILURE_MESSAGE.to_string())
            })?;

        if !response.status().is_success() {
            return Err(rejection(response, R::FAILURE_MESSAGE).await);
        }

        let record = response.json::<R>().await.map_err(|err| {
            warn!(resource = R::RESOURCE, error = %err, "api_client: undecodable response");
            SubmitError::Transport(R::FAILURE_MESSAGE.to_string())
        })?;

        debug!(resource = R::RESOURCE, id = %record.id(), "api_client: record created");
        Ok(record)
    }
}

#[async_trait]
impl ContentGateway for ContentApiClient {
    async fn submit_pricing_plan(
        &self,
        draft: &PricingPlanDraft,
    ) -> Result<PricingPlanEntity, SubmitError> {
        self.submit(draft).await
    }

    /// Sends JSON, or a multipart form when image files are attached.
    async fn submit_program(&self, draft: &ProgramDraft) -> Result<ProgramEntity, SubmitError> {
        if draft.images.is_empty() {
            return self.submit(draft).await;
        }

        let form = program_form(draft).map_err(|err| {
            warn!(error = ?err, "api_client: failed to build program form");
            SubmitError::Transport(ProgramEntity::FAILURE_MESSAGE.to_string())
        })?;
        self.submit_multipart(form).await
    }

    async fn submit_testimonial(
        &self,
        draft: &TestimonialDraft,
    ) -> Result<TestimonialEntity, SubmitError> {
        self.submit(draft).await
    }
}

/// Text fields become plain parts, lists and objects become JSON text parts
/// and attached images become file parts. A URL field with an attached file is
/// left out.
fn program_form(draft: &ProgramDraft) -> Result<Form> {
    let Value::Object(fields) =
        serde_json::to_value(draft).context("failed to serialize program draft")?
    else {
        anyhow::bail!("program draft did not serialize to an object");
    };

    let mut form = Form::new();
    for (name, value) in fields {
        if draft.images.iter().any(|image| image.field == name) {
            continue;
        }
        let text = match value {
            Value::String(text) => text,
            other => other.to_string(),
        };
        form = form.text(name, text);
    }

    for image in &draft.images {
        let mut part = Part::bytes(image.bytes.clone()).file_name(image.file_name.clone());
        if let Some(content_type) = &image.content_type {
            part = part
                .mime_str(content_type)
                .with_context(|| format!("invalid content type for {}", image.field))?;
        }
        form = form.part(image.field.clone(), part);
    }

    Ok(form)
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
