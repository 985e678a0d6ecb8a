use std::{io::ErrorKind, path::PathBuf};

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use chrono::Utc;
use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, warn};

use crate::domain::{
    repositories::asset_storage::AssetStorage,
    value_objects::uploads::{ImageUpload, StoredAsset},
};

const MAX_NAME_ATTEMPTS: usize = 1024;

#[derive(Clone, Debug)]
pub struct LocalUploadConfig {
    pub upload_dir: PathBuf,
    pub public_prefix: String,
}

/// Writes uploads into a directory the HTTP server exposes as static files.
pub struct LocalUploadStorage {
    upload_dir: PathBuf,
    public_prefix: String,
}

impl LocalUploadStorage {
    pub fn new(config: LocalUploadConfig) -> Self {
        Self {
            upload_dir: config.upload_dir,
            public_prefix: normalize_prefix(&config.public_prefix),
        }
    }
}

#[async_trait]
impl AssetStorage for LocalUploadStorage {
    async fn save(&self, prefix: &str, upload: &ImageUpload) -> Result<StoredAsset> {
        fs::create_dir_all(&self.upload_dir)
            .await
            .with_context(|| {
                format!(
                    "failed to create upload directory {}",
                    self.upload_dir.display()
                )
            })?;

        // Names are claimed with `create_new`; a taken name moves the
        // timestamp forward so no existing upload is ever overwritten.
        let mut timestamp = Utc::now().timestamp_millis();
        for _ in 0..MAX_NAME_ATTEMPTS {
            let file_name = build_file_name(
                prefix,
                timestamp,
                &upload.file_name,
                upload.content_type.as_deref(),
            );
            let path = self.upload_dir.join(&file_name);

            let mut file = match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                    debug!(file_name = %file_name, "local_uploads: name taken, retrying");
                    timestamp += 1;
                    continue;
                }
                Err(err) => {
                    return Err(err)
                        .with_context(|| format!("failed to create upload {}", path.display()));
                }
            };

            let written: std::io::Result<()> = async {
                file.write_all(&upload.bytes).await?;
                file.flush().await
            }
            .await;
            drop(file);
            if let Err(err) = written {
                if let Err(remove_err) = fs::remove_file(&path).await {
                    warn!(
                        file_name = %file_name,
                        error = ?remove_err,
                        "local_uploads: failed to remove partial upload"
                    );
                }
                return Err(err)
                    .with_context(|| format!("failed to write upload {}", path.display()));
            }

            debug!(
                field = %upload.field,
                file_name = %file_name,
                size_bytes = upload.bytes.len(),
                "local_uploads: stored upload"
            );

            return Ok(StoredAsset {
                public_path: format!("{}{}", self.public_prefix, file_name),
                file_name,
            });
        }

        bail!(
            "no free upload name for {} after {} attempts",
            upload.field,
            MAX_NAME_ATTEMPTS
        )
    }

    async fn remove(&self, asset: &StoredAsset) -> Result<()> {
        let path = self.upload_dir.join(&asset.file_name);
        fs::remove_file(&path)
            .await
            .with_context(|| format!("failed to remove upload {}", path.display()))?;

        Ok(())
    }
}

/// `{prefix}-{timestamp}-{sanitized-original-name}`.
pub fn build_file_name(
    prefix: &str,
    timestamp_millis: i64,
    original_name: &str,
    content_type: Option<&str>,
) -> String {
    let mut name = sanitize_file_name(original_name);
    if name.trim_matches('.').is_empty() {
        let extension = content_type
            .and_then(mime_guess::get_mime_extensions_str)
            .and_then(|extensions| extensions.first())
            .map(|extension| format!(".{}", extension))
            .unwrap_or_default();
        name = format!("upload{}", extension);
    }

    format!("{}-{}-{}", prefix, timestamp_millis, name)
}

/// Keeps ASCII letters, digits, `.`, `_` and `-`. Everything else, path
/// separators included, is dropped.
pub fn sanitize_file_name(file_name: &str) -> String {
    file_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '.' || *c == '_' || *c == '-')
        .collect()
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "local-uploads-{}-{}-{}",
            name,
            std::process::id(),
            Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ))
    }

    fn upload(file_name: &str, bytes: &[u8]) -> ImageUpload {
        ImageUpload {
            field: "mainImage".to_string(),
            file_name: file_name.to_string(),
            content_type: Some("image/png".to_string()),
            bytes: bytes.to_vec(),
        }
    }

    #[test]
    fn sanitizes_original_names() {
        assert_eq!(sanitize_file_name("../../etc/pass wd.png"), "....etcpasswd.png");
        assert_eq!(sanitize_file_name("cover photo (1).JPG"), "coverphoto1.JPG");
    }

    #[test]
    fn file_name_combines_prefix_timestamp_and_name() {
        assert_eq!(
            build_file_name("main", 1_700_000_000_000, "cover.jpg", None),
            "main-1700000000000-cover.jpg"
        );
    }

    #[test]
    fn empty_names_fall_back_to_the_content_type() {
        let name = build_file_name("risks", 42, "日本.", Some("image/png"));
        assert_eq!(name, "risks-42-upload.png");

        let name = build_file_name("risks", 42, "", None);
        assert_eq!(name, "risks-42-upload");
    }

    #[tokio::test]
    async fn saves_and_removes_files() {
        let dir = scratch_dir("save");
        let storage = LocalUploadStorage::new(LocalUploadConfig {
            upload_dir: dir.clone(),
            public_prefix: "uploads".to_string(),
        });

        let asset = storage.save("main", &upload("cover.png", b"png-bytes")).await.unwrap();
        assert!(asset.public_path.starts_with("/uploads/main-"));
        assert!(asset.public_path.ends_with("-cover.png"));

        let written = fs::read(dir.join(&asset.file_name)).await.unwrap();
        assert_eq!(written, b"png-bytes");

        storage.remove(&asset).await.unwrap();
        assert!(!dir.join(&asset.file_name).exists());

        let _ = fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn same_name_uploads_never_overwrite_each_other() {
        let dir = scratch_dir("collide");
        let storage = std::sync::Arc::new(LocalUploadStorage::new(LocalUploadConfig {
            upload_dir: dir.clone(),
            public_prefix: "/uploads".to_string(),
        }));

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let storage = std::sync::Arc::clone(&storage);
                tokio::spawn(async move {
                    let body = format!("request-{i}");
                    let asset = storage
                        .save("main", &upload("photo.png", body.as_bytes()))
                        .await
                        .unwrap();
                    (asset, body)
                })
            })
            .collect();

        let mut saved = Vec::new();
        for handle in handles {
            saved.push(handle.await.unwrap());
        }

        let names: std::collections::HashSet<_> =
            saved.iter().map(|(asset, _)| asset.file_name.clone()).collect();
        assert_eq!(names.len(), saved.len());
        for (asset, body) in &saved {
            assert_eq!(fs::read(dir.join(&asset.file_name)).await.unwrap(), body.as_bytes());
        }

        // Rolling one request back leaves every other file in place.
        let (removed, _) = &saved[0];
        storage.remove(removed).await.unwrap();
        for (asset, body) in &saved[1..] {
            assert_eq!(fs::read(dir.join(&asset.file_name)).await.unwrap(), body.as_bytes());
        }

        let _ = fs::remove_dir_all(&dir).await;
    }
}
