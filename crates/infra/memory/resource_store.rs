use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::{
    entities::ContentRecord, repositories::resource_store::ResourceStore,
    value_objects::record_ids::TimestampIdGenerator,
};

struct StoreState<R> {
    records: Vec<R>,
    ids: TimestampIdGenerator,
}

/// Process-lifetime store. Reads share the lock; appends take it exclusively,
/// so id assignment and the push happen as one step.
pub struct MemoryResourceStore<R> {
    state: RwLock<StoreState<R>>,
}

impl<R> MemoryResourceStore<R>
where
    R: ContentRecord + Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Starts with `records` as-is; their ids are kept.
    pub fn with_records(records: Vec<R>) -> Self {
        Self {
            state: RwLock::new(StoreState {
                records,
                ids: TimestampIdGenerator::default(),
            }),
        }
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<R> Default for MemoryResourceStore<R>
where
    R: ContentRecord + Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R> ResourceStore<R> for MemoryResourceStore<R>
where
    R: ContentRecord + Clone + Send + Sync + 'static,
{
    async fn list(&self) -> Result<Vec<R>> {
        Ok(self.state.read().await.records.clone())
    }

    async fn append(&self, mut record: R) -> Result<R> {
        let mut state = self.state.write().await;
        let StoreState { records, ids } = &mut *state;

        let id = ids.next(Utc::now(), |candidate| {
            records.iter().any(|existing| existing.id() == candidate)
        });
        record.assign_id(id);
        records.push(record.clone());

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::testimonials::TestimonialEntity;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn testimonial(name: &str) -> TestimonialEntity {
        TestimonialEntity {
            id: String::new(),
            name: name.to_string(),
            location: "Bangkok".to_string(),
            review: "Great".to_string(),
            avatar: String::new(),
        }
    }

    #[tokio::test]
    async fn lists_in_insertion_order() {
        let store = MemoryResourceStore::new();
        store.append(testimonial("first")).await.unwrap();
        store.append(testimonial("second")).await.unwrap();

        let names: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn seeded_ids_are_kept_and_never_reused() {
        let mut seeded = testimonial("seeded");
        seeded.id = "1".to_string();
        let store = MemoryResourceStore::with_records(vec![seeded]);

        let stored = store.append(testimonial("new")).await.unwrap();
        assert_ne!(stored.id, "1");
        assert_eq!(store.list().await.unwrap()[0].id, "1");
    }

    #[tokio::test]
    async fn concurrent_appends_keep_every_record_with_unique_ids() {
        let store = Arc::new(MemoryResourceStore::new());

        let handles: Vec<_> = (0..64)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.append(testimonial(&format!("t{i}"))).await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let records = store.list().await.unwrap();
        assert_eq!(records.len(), 64);
        let ids: HashSet<_> = records.iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids.len(), 64);
    }
}
