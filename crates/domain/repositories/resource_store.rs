use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::ContentRecord;

/// Ordered, append-only collection of one resource type.
///
/// Implementations serialize appends so concurrent creates never lose a
/// record or hand out the same id twice.
#[async_trait]
pub trait ResourceStore<R>: Send + Sync
where
    R: ContentRecord + Clone + Send + Sync + 'static,
{
    /// All records in insertion order.
    async fn list(&self) -> Result<Vec<R>>;

    /// Assigns an id to `record`, stores it and returns the stored copy.
    async fn append(&self, record: R) -> Result<R>;
}
