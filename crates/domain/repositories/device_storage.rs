use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

/// Device-resident key/value state of the admin client.
#[automock]
#[async_trait]
pub trait DeviceStorage {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}
