use std::{marker::PhantomData, sync::Arc};

use anyhow::Result;
use chrono::{DateTime, Utc};
use crates::domain::{
    repositories::resource_store::ResourceStore,
    value_objects::{
        raw_input::RawInput,
        resources::ContentResource,
        validation::{ValidationError, validate},
    },
};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum CreateResourceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{field} exceeds the {limit_mb} MB upload limit")]
    UploadTooLarge { field: String, limit_mb: u64 },

    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

/// List and create for any content resource, driven by its schema.
pub struct ResourceUseCase<R, S>
where
    R: ContentResource,
    S: ResourceStore<R> + Send + Sync + 'static,
{
    store: Arc<S>,
    _resource: PhantomData<fn() -> R>,
}

impl<R, S> ResourceUseCase<R, S>
where
    R: ContentResource,
    S: ResourceStore<R> + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            _resource: PhantomData,
        }
    }

    pub async fn list(&self) -> Result<Vec<R>> {
        let records = self.store.list().await?;
        info!(
            resource = R::RESOURCE,
            count = records.len(),
            "{}: listed records",
            R::RESOURCE
        );
        Ok(records)
    }

    /// Validates `input`, builds the record stamped with `received_at` and
    /// appends it. Nothing is stored when validation fails.
    pub async fn create(
        &self,
        input: &RawInput,
        received_at: DateTime<Utc>,
    ) -> Result<R, CreateResourceError> {
        if let Err(err) = validate(input, &R::required_rules(input)) {
            warn!(
                resource = R::RESOURCE,
                missing = ?err.missing,
                "{}: create rejected",
                R::RESOURCE
            );
            return Err(err.into());
        }

        let record = self.store.append(R::from_input(input, received_at)).await?;
        info!(
            resource = R::RESOURCE,
            id = record.id(),
            "{}: record created",
            R::RESOURCE
        );

        Ok(record)
    }
}
