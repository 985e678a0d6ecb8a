use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::value_objects::uploads::{ImageUpload, StoredAsset};

#[automock]
#[async_trait]
pub trait AssetStorage {
    /// Persists the upload as `{prefix}-{timestamp}-{sanitized-name}`.
    async fn save(&self, prefix: &str, upload: &ImageUpload) -> Result<StoredAsset>;
    async fn remove(&self, asset: &StoredAsset) -> Result<()>;
}
