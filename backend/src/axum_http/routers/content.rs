use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use crates::domain::{
    repositories::resource_store::ResourceStore, value_objects::resources::ContentResource,
};
use tracing::debug;

use crate::{
    axum_http::{
        error_responses::AppError,
        submission::{ResourceSubmission, SubmissionRejection},
    },
    usecases::resources::{CreateResourceError, ResourceUseCase},
};

pub const LIST_FAILURE_MESSAGE: &str = "Failed to load content";

/// `GET /` and `POST /` for one resource, meant to be nested under
/// `/api/<resource>`.
pub fn routes<R, S>(store: Arc<S>) -> Router
where
    R: ContentResource,
    S: ResourceStore<R> + Send + Sync + 'static,
{
    let usecase = ResourceUseCase::<R, S>::new(store);

    Router::new()
        .route("/", get(list::<R, S>).post(create::<R, S>))
        .with_state(Arc::new(usecase))
}

pub async fn list<R, S>(State(usecase): State<Arc<ResourceUseCase<R, S>>>) -> impl IntoResponse
where
    R: ContentResource,
    S: ResourceStore<R> + Send + Sync + 'static,
{
    match usecase.list().await {
        Ok(records) => Json(records).into_response(),
        Err(err) => AppError::internal(LIST_FAILURE_MESSAGE, err).into_response(),
    }
}

pub async fn create<R, S>(
    State(usecase): State<Arc<ResourceUseCase<R, S>>>,
    submission: Result<ResourceSubmission, SubmissionRejection>,
) -> impl IntoResponse
where
    R: ContentResource,
    S: ResourceStore<R> + Send + Sync + 'static,
{
    let received_at = Utc::now();
    let submission = match submission {
        Ok(submission) => submission,
        Err(err) => return AppError::internal(R::FAILURE_MESSAGE, err).into_response(),
    };
    if !submission.uploads.is_empty() {
        debug!(
            resource = R::RESOURCE,
            uploads = submission.uploads.len(),
            "{}: ignoring file parts",
            R::RESOURCE
        );
    }

    match usecase.create(&submission.input, received_at).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(err) => create_error_response(err, R::FAILURE_MESSAGE),
    }
}

/// Client mistakes become 400 with their own message; anything else is a 500
/// with the resource's generic message.
pub fn create_error_response(err: CreateResourceError, failure_message: &'static str) -> Response {
    match err {
        CreateResourceError::Failed(source) => AppError::internal(failure_message, source),
        client_error => AppError::BadRequest(client_error.to_string()),
    }
    .into_response()
}
