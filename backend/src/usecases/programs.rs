use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use crates::domain::{
    entities::programs::{ProgramEntity, image_upload_prefix},
    repositories::{asset_storage::AssetStorage, resource_store::ResourceStore},
    value_objects::{
        raw_input::RawInput,
        resources::ContentResource,
        uploads::{ImageUpload, StoredAsset},
        validation::validate,
    },
};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::resources::{CreateResourceError, ResourceUseCase};

/// Stands in for an uploaded image while the request is validated.
const PENDING_UPLOAD: &str = "pending-upload";

pub struct ProgramsUseCase<S, A>
where
    S: ResourceStore<ProgramEntity> + Send + Sync + 'static,
    A: AssetStorage + Send + Sync + 'static,
{
    resources: ResourceUseCase<ProgramEntity, S>,
    asset_storage: Arc<A>,
    max_file_bytes: usize,
    max_file_mb: u64,
}

impl<S, A> ProgramsUseCase<S, A>
where
    S: ResourceStore<ProgramEntity> + Send + Sync + 'static,
    A: AssetStorage + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>, asset_storage: Arc<A>, max_file_mb: u64) -> Self {
        let max_file_bytes =
            usize::try_from(max_file_mb.saturating_mul(1024 * 1024)).unwrap_or(usize::MAX);

        Self {
            resources: ResourceUseCase::new(store),
            asset_storage,
            max_file_bytes,
            max_file_mb,
        }
    }

    pub async fn list(&self) -> Result<Vec<ProgramEntity>> {
        self.resources.list().await
    }

    /// Creates a program from text fields plus optional image files. Files
    /// replace the URL field they were sent under and are only written once
    /// the request has passed validation. Any failure after the first write
    /// removes what this request already wrote.
    pub async fn create(
        &self,
        mut input: RawInput,
        uploads: Vec<ImageUpload>,
        received_at: DateTime<Utc>,
    ) -> Result<ProgramEntity, CreateResourceError> {
        let uploads = self.accept_uploads(uploads)?;

        for (_, upload) in &uploads {
            input.insert(upload.field.clone(), Value::String(PENDING_UPLOAD.to_string()));
        }
        if let Err(err) = validate(&input, &ProgramEntity::required_rules(&input)) {
            warn!(
                resource = ProgramEntity::RESOURCE,
                missing = ?err.missing,
                uploads = uploads.len(),
                "programs: create rejected before storing uploads"
            );
            return Err(err.into());
        }

        let stored = self.store_uploads(&uploads).await?;
        for (field, asset) in &stored {
            input.insert(field.clone(), Value::String(asset.public_path.clone()));
        }

        match self.resources.create(&input, received_at).await {
            Ok(program) => {
                info!(
                    id = %program.id,
                    uploads = stored.len(),
                    "programs: program created"
                );
                Ok(program)
            }
            Err(err) => {
                self.roll_back(stored.iter().map(|(_, asset)| asset)).await;
                Err(err)
            }
        }
    }

    /// Keeps the first non-empty file of each image field and enforces the
    /// per-file limit.
    fn accept_uploads(
        &self,
        uploads: Vec<ImageUpload>,
    ) -> Result<Vec<(&'static str, ImageUpload)>, CreateResourceError> {
        let mut accepted: Vec<(&'static str, ImageUpload)> = Vec::new();

        for upload in uploads {
            let Some(prefix) = image_upload_prefix(&upload.field) else {
                debug!(field = %upload.field, "programs: ignoring file for unknown field");
                continue;
            };
            if upload.is_empty() {
                debug!(field = %upload.field, "programs: empty file treated as absent");
                continue;
            }
            if accepted.iter().any(|(_, kept)| kept.field == upload.field) {
                debug!(field = %upload.field, "programs: ignoring repeated file");
                continue;
            }
            if upload.bytes.len() > self.max_file_bytes {
                warn!(
                    field = %upload.field,
                    size_bytes = upload.bytes.len(),
                    limit_mb = self.max_file_mb,
                    "programs: upload over size limit"
                );
                return Err(CreateResourceError::UploadTooLarge {
                    field: upload.field,
                    limit_mb: self.max_file_mb,
                });
            }

            accepted.push((prefix, upload));
        }

        Ok(accepted)
    }

    async fn store_uploads(
        &self,
        uploads: &[(&'static str, ImageUpload)],
    ) -> Result<Vec<(String, StoredAsset)>, CreateResourceError> {
        let mut stored = Vec::with_capacity(uploads.len());

        for (prefix, upload) in uploads {
            match self.asset_storage.save(prefix, upload).await {
                Ok(asset) => stored.push((upload.field.clone(), asset)),
                Err(err) => {
                    error!(
                        field = %upload.field,
                        error = ?err,
                        "programs: failed to store upload"
                    );
                    self.roll_back(stored.iter().map(|(_, asset)| asset)).await;
                    return Err(err.into());
                }
            }
        }

        Ok(stored)
    }

    async fn roll_back<'a>(&self, assets: impl Iterator<Item = &'a StoredAsset>) {
        for asset in assets {
            if let Err(err) = self.asset_storage.remove(asset).await {
                error!(
                    file_name = %asset.file_name,
                    error = ?err,
                    "programs: failed to remove upload during rollback"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crates::{
        domain::repositories::asset_storage::MockAssetStorage,
        infra::memory::resource_store::MemoryResourceStore,
    };
    use mockall::predicate::eq;
    use serde_json::json;

    const IMAGE_FIELDS: [&str; 6] = [
        "mainImage",
        "mainContentImage",
        "whatCausesImage",
        "healthRisksImage",
        "strategiesImage",
        "conclusionImage",
    ];

    fn text_fields() -> RawInput {
        RawInput::from_json_slice(
            json!({
                "name": "Obesity",
                "shortDescription": "A global concern",
                "introDescription": "Intro",
                "whatCauses": "Diet",
                "healthRisks": "Diabetes",
                "strategies": "Plants",
                "conclusion": "Start today",
                "pricingPlans": [{
                    "name": "Basic",
                    "subtitle": "Start here",
                    "price": "500,000.00",
                    "features": ["Full body scan"],
                }],
            })
            .to_string()
            .as_bytes(),
        )
        .unwrap()
    }

    fn upload(field: &str, bytes: &[u8]) -> ImageUpload {
        ImageUpload {
            field: field.to_string(),
            file_name: "photo.png".to_string(),
            content_type: Some("image/png".to_string()),
            bytes: bytes.to_vec(),
        }
    }

    fn all_images() -> Vec<ImageUpload> {
        IMAGE_FIELDS.iter().map(|field| upload(field, b"png")).collect()
    }

    fn asset_for(prefix: &str) -> StoredAsset {
        StoredAsset {
            file_name: format!("{prefix}-1-photo.png"),
            public_path: format!("/uploads/{prefix}-1-photo.png"),
        }
    }

    fn usecase(
        storage: MockAssetStorage,
    ) -> (
        Arc<MemoryResourceStore<ProgramEntity>>,
        ProgramsUseCase<MemoryResourceStore<ProgramEntity>, MockAssetStorage>,
    ) {
        let store = Arc::new(MemoryResourceStore::new());
        let usecase = ProgramsUseCase::new(Arc::clone(&store), Arc::new(storage), 1);
        (store, usecase)
    }

    #[tokio::test]
    async fn uploaded_files_replace_image_fields() {
        let mut storage = MockAssetStorage::new();
        storage
            .expect_save()
            .times(6)
            .returning(|prefix, _| Ok(asset_for(prefix)));
        storage.expect_remove().never();

        let (store, usecase) = usecase(storage);
        let received_at = Utc::now();
        let program = usecase
            .create(text_fields(), all_images(), received_at)
            .await
            .unwrap();

        assert_eq!(program.main_image, "/uploads/main-1-photo.png");
        assert_eq!(program.main_content_image, "/uploads/content-1-photo.png");
        assert_eq!(program.what_causes_image, "/uploads/causes-1-photo.png");
        assert_eq!(program.health_risks_image, "/uploads/risks-1-photo.png");
        assert_eq!(program.strategies_image, "/uploads/strategies-1-photo.png");
        assert_eq!(program.conclusion_image, "/uploads/conclusion-1-photo.png");
        assert!(program.created_at >= received_at);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn missing_images_are_rejected_before_anything_is_written() {
        let mut storage = MockAssetStorage::new();
        storage.expect_save().never();

        let (store, usecase) = usecase(storage);
        let mut uploads = all_images();
        uploads.retain(|upload| upload.field != "conclusionImage");
        uploads.push(upload("conclusionImage", b""));

        let err = usecase
            .create(text_fields(), uploads, Utc::now())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Missing required fields: conclusionImage");
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn url_fields_are_kept_without_files() {
        let mut storage = MockAssetStorage::new();
        storage
            .expect_save()
            .times(5)
            .returning(|prefix, _| Ok(asset_for(prefix)));

        let (_, usecase) = usecase(storage);
        let mut input = text_fields();
        input.insert("mainImage", json!("https://cdn.example.com/main.jpg"));
        let uploads = all_images()
            .into_iter()
            .filter(|upload| upload.field != "mainImage")
            .collect();

        let program = usecase.create(input, uploads, Utc::now()).await.unwrap();
        assert_eq!(program.main_image, "https://cdn.example.com/main.jpg");
    }

    #[tokio::test]
    async fn oversized_files_are_client_errors() {
        let mut storage = MockAssetStorage::new();
        storage.expect_save().never();

        let (_, usecase) = usecase(storage);
        let mut uploads = all_images();
        uploads[2] = upload("whatCausesImage", &vec![0u8; 1024 * 1024 + 1]);

        let err = usecase
            .create(text_fields(), uploads, Utc::now())
            .await
            .unwrap_err();

        assert!(matches!(err, CreateResourceError::UploadTooLarge { .. }));
        assert_eq!(
            err.to_string(),
            "whatCausesImage exceeds the 1 MB upload limit"
        );
    }

    #[tokio::test]
    async fn failed_write_removes_files_already_stored() {
        let mut storage = MockAssetStorage::new();
        storage
            .expect_save()
            .returning(|prefix, _| {
                if prefix == "causes" {
                    Err(anyhow::anyhow!("disk full"))
                } else {
                    Ok(asset_for(prefix))
                }
            });
        storage
            .expect_remove()
            .with(eq(asset_for("main")))
            .times(1)
            .returning(|_| Ok(()));
        storage
            .expect_remove()
            .with(eq(asset_for("content")))
            .times(1)
            .returning(|_| Ok(()));

        let (store, usecase) = usecase(storage);
        let err = usecase
            .create(text_fields(), all_images(), Utc::now())
            .await
            .unwrap_err();

        assert!(matches!(err, CreateResourceError::Failed(_)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn json_programs_need_no_storage() {
        let mut storage = MockAssetStorage::new();
        storage.expect_save().never();

        let (_, usecase) = usecase(storage);
        let mut input = text_fields();
        for field in IMAGE_FIELDS {
            input.insert(field, json!(format!("https://cdn.example.com/{field}.jpg")));
        }

        let program = usecase.create(input, Vec::new(), Utc::now()).await.unwrap();
        assert_eq!(program.pricing_plans.len(), 1);
        assert_eq!(usecase.list().await.unwrap().len(), 1);
    }
}
