use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;
use crates::{
    domain::{
        entities::programs::ProgramEntity,
        repositories::{asset_storage::AssetStorage, resource_store::ResourceStore},
        value_objects::resources::ContentResource,
    },
    infra::storages::local_uploads::{LocalUploadConfig, LocalUploadStorage},
};
use tracing::info;

use crate::{
    axum_http::{
        error_responses::AppError,
        routers::content::{LIST_FAILURE_MESSAGE, create_error_response},
        submission::{ResourceSubmission, SubmissionRejection},
    },
    config::config_model::Uploads,
    usecases::programs::ProgramsUseCase,
};

pub fn routes<S>(store: Arc<S>, uploads: &Uploads) -> Router
where
    S: ResourceStore<ProgramEntity> + Send + Sync + 'static,
{
    let asset_storage = LocalUploadStorage::new(LocalUploadConfig {
        upload_dir: uploads.dir.clone(),
        public_prefix: uploads.public_prefix.clone(),
    });
    let usecase = ProgramsUseCase::new(store, Arc::new(asset_storage), uploads.max_file_mb);

    Router::new()
        .route(
            "/",
            get(list::<S, LocalUploadStorage>).post(create::<S, LocalUploadStorage>),
        )
        .with_state(Arc::new(usecase))
}

pub async fn list<S, A>(State(usecase): State<Arc<ProgramsUseCase<S, A>>>) -> impl IntoResponse
where
    S: ResourceStore<ProgramEntity> + Send + Sync + 'static,
    A: AssetStorage + Send + Sync + 'static,
{
    match usecase.list().await {
        Ok(programs) => Json(programs).into_response(),
        Err(err) => AppError::internal(LIST_FAILURE_MESSAGE, err).into_response(),
    }
}

pub async fn create<S, A>(
    State(usecase): State<Arc<ProgramsUseCase<S, A>>>,
    submission: Result<ResourceSubmission, SubmissionRejection>,
) -> impl IntoResponse
where
    S: ResourceStore<ProgramEntity> + Send + Sync + 'static,
    A: AssetStorage + Send + Sync + 'static,
{
    let received_at = Utc::now();
    let ResourceSubmission { input, uploads } = match submission {
        Ok(submission) => submission,
        Err(err) => {
            return AppError::internal(ProgramEntity::FAILURE_MESSAGE, err).into_response();
        }
    };
    info!(uploads = uploads.len(), "programs: create request received");

    match usecase.create(input, uploads, received_at).await {
        Ok(program) => (StatusCode::CREATED, Json(program)).into_response(),
        Err(err) => create_error_response(err, ProgramEntity::FAILURE_MESSAGE),
    }
}
