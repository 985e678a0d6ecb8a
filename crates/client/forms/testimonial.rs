use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::debug;

use crate::domain::{
    entities::testimonials::TestimonialEntity,
    repositories::{
        authenticator::AdminAuthenticator,
        content_gateway::{ContentGateway, TestimonialRelay},
    },
    value_objects::{drafts::TestimonialDraft, submission::SubmitError},
};

use super::FormStatus;

pub const REVIEW_ADDED_MESSAGE: &str = "Review added successfully!";

#[derive(Debug, Clone, Default)]
pub struct TestimonialForm {
    pub draft: TestimonialDraft,
    status: FormStatus,
}

impl TestimonialForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self, now: DateTime<Utc>) -> FormStatus {
        self.status.at(now)
    }

    /// Creates the testimonial through this service's API.
    pub async fn submit<G>(
        &mut self,
        gateway: &G,
        now: DateTime<Utc>,
    ) -> Result<TestimonialEntity, SubmitError>
    where
        G: ContentGateway + Sync + ?Sized,
    {
        self.status = FormStatus::Pending;
        let result = gateway.submit_testimonial(&self.draft).await;
        self.finish(result, now)
    }

    /// Sends the testimonial to the external reviews API using the session
    /// token held on the device.
    pub async fn relay<R, A>(
        &mut self,
        relay: &R,
        authenticator: &A,
        now: DateTime<Utc>,
    ) -> Result<Value, SubmitError>
    where
        R: TestimonialRelay + Sync + ?Sized,
        A: AdminAuthenticator + Sync + ?Sized,
    {
        self.status = FormStatus::Pending;

        let token = match authenticator.session_token().await {
            Ok(Some(token)) => token,
            Ok(None) => return self.finish(Err(SubmitError::NotLoggedIn), now),
            Err(err) => {
                return self.finish(Err(SubmitError::Transport(err.to_string())), now);
            }
        };

        let result = relay.relay(&self.draft, &token).await;
        self.finish(result, now)
    }

    fn finish<T>(
        &mut self,
        result: Result<T, SubmitError>,
        now: DateTime<Utc>,
    ) -> Result<T, SubmitError> {
        match result {
            Ok(value) => {
                debug!("testimonial_form: submitted");
                self.draft = TestimonialDraft::default();
                self.status = FormStatus::succeeded(REVIEW_ADDED_MESSAGE, now);
                Ok(value)
            }
            Err(err) => {
                self.status = FormStatus::failed(err.to_string());
                Err(err)
            }
        }
    }
}
