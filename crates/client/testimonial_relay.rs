use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{info, warn};
use url::Url;

use crate::domain::{
    repositories::content_gateway::TestimonialRelay,
    value_objects::{drafts::TestimonialDraft, submission::SubmitError},
};

use super::rejection;

pub const EXTERNAL_API_BASE_URL_VAR: &str = "EXTERNAL_API_BASE_URL";
pub const DEFAULT_EXTERNAL_API_BASE_URL: &str = "https://plantbased-backend.onrender.com/api/v1";
const RELAY_FAILURE_MESSAGE: &str = "Failed to add review";

/// Posts testimonials to the separately hosted reviews API.
pub struct ExternalTestimonialClient {
    client: Client,
    endpoint: Url,
}

impl ExternalTestimonialClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let endpoint = Url::parse(&format!("{}/testimonials", base_url.trim_end_matches('/')))
            .with_context(|| format!("invalid external api base url {}", base_url))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .context("failed to build external testimonial client")?;

        Ok(Self { client, endpoint })
    }

    /// Uses `EXTERNAL_API_BASE_URL`, or the hosted reviews API when unset.
    pub fn from_env() -> Result<Self> {
        let base_url = resolve_base_url(std::env::var(EXTERNAL_API_BASE_URL_VAR).ok());
        info!(base_url = %base_url, "testimonial_relay: external api configured");
        Self::new(&base_url)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl TestimonialRelay for ExternalTestimonialClient {
    async fn relay(
        &self,
        draft: &TestimonialDraft,
        bearer_token: &str,
    ) -> Result<Value, SubmitError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(bearer_token)
            .json(draft)
            .send()
            .await
            .map_err(|err| {
                warn!(error = %err, "testimonial_relay: request failed");
                SubmitError::Transport(RELAY_FAILURE_MESSAGE.to_string())
            })?;

        if !response.status().is_success() {
            return Err(rejection(response, RELAY_FAILURE_MESSAGE).await);
        }

        let body = response.json::<Value>().await.unwrap_or(Value::Null);
        info!("testimonial_relay: review accepted by external api");
        Ok(body)
    }
}

fn resolve_base_url(configured: Option<String>) -> String {
    configured
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_EXTERNAL_API_BASE_URL.to_string())
}
