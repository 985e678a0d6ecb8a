use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::repositories::device_storage::DeviceStorage;

/// Device storage that lives as long as the client process.
#[derive(Default)]
pub struct MemoryDeviceStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryDeviceStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DeviceStorage for MemoryDeviceStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.values.lock().await.remove(key);
        Ok(())
    }
}
