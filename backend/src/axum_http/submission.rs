use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{
        FromRequest, Multipart, Request,
        multipart::{MultipartError, MultipartRejection},
        rejection::BytesRejection,
    },
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use axum_extra::headers::{ContentType, HeaderMapExt};
use crates::domain::value_objects::{
    raw_input::{RawInput, RawInputError},
    uploads::ImageUpload,
};
use mime_guess::mime;
use thiserror::Error;
use tracing::debug;

use super::error_responses::AppError;

/// A create request body: a JSON object, or a multipart form whose text parts
/// become fields and whose file parts become uploads.
#[derive(Debug, Default)]
pub struct ResourceSubmission {
    pub input: RawInput,
    pub uploads: Vec<ImageUpload>,
}

#[derive(Debug, Error)]
pub enum SubmissionRejection {
    #[error("failed to read multipart body: {0}")]
    MultipartBody(#[from] MultipartRejection),

    #[error("failed to read multipart field: {0}")]
    MultipartField(#[from] MultipartError),

    #[error("failed to read request body: {0}")]
    Body(#[from] BytesRejection),

    #[error(transparent)]
    Json(#[from] RawInputError),
}

impl IntoResponse for SubmissionRejection {
    fn into_response(self) -> Response {
        AppError::internal("Failed to read request", self).into_response()
    }
}

#[async_trait]
impl<S> FromRequest<S> for ResourceSubmission
where
    S: Send + Sync,
{
    type Rejection = SubmissionRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_multipart(req.headers()) {
            let multipart = Multipart::from_request(req, state).await?;
            return Self::from_multipart(multipart).await;
        }

        let body = Bytes::from_request(req, state).await?;
        Ok(Self {
            input: RawInput::from_json_slice(&body)?,
            uploads: Vec::new(),
        })
    }
}

impl ResourceSubmission {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, SubmissionRejection> {
        let mut submission = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                debug!("submission: skipping unnamed multipart part");
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await?;
                    submission.uploads.push(ImageUpload {
                        field: name,
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
                None => {
                    let text = field.text().await?;
                    submission.input.append_form_value(&name, text);
                }
            }
        }

        debug!(
            uploads = submission.uploads.len(),
            "submission: multipart body read"
        );
        Ok(submission)
    }
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .typed_get::<ContentType>()
        .map(|content_type| mime::Mime::from(content_type).type_() == mime::MULTIPART)
        .unwrap_or(false)
}
