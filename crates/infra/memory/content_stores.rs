use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::entities::{
    pricing_plans::PricingPlanEntity, programs::ProgramEntity, testimonials::TestimonialEntity,
};

use super::{resource_store::MemoryResourceStore, seeds};

/// The stores of every content resource, created at process start and shut
/// down once the HTTP server has stopped.
#[derive(Clone)]
pub struct ContentStores {
    pub pricing_plans: Arc<MemoryResourceStore<PricingPlanEntity>>,
    pub programs: Arc<MemoryResourceStore<ProgramEntity>>,
    pub testimonials: Arc<MemoryResourceStore<TestimonialEntity>>,
}

impl ContentStores {
    pub fn initialize(seed_demo_content: bool) -> Self {
        let stores = if seed_demo_content {
            Self {
                pricing_plans: Arc::new(MemoryResourceStore::with_records(seeds::pricing_plans(
                    Utc::now(),
                ))),
                programs: Arc::new(MemoryResourceStore::new()),
                testimonials: Arc::new(MemoryResourceStore::with_records(seeds::testimonials())),
            }
        } else {
            Self::empty()
        };

        info!(seed_demo_content, "content_stores: initialized");
        stores
    }

    pub fn empty() -> Self {
        Self {
            pricing_plans: Arc::new(MemoryResourceStore::new()),
            programs: Arc::new(MemoryResourceStore::new()),
            testimonials: Arc::new(MemoryResourceStore::new()),
        }
    }

    /// Logs what is about to be discarded. Records do not outlive the process.
    pub async fn shutdown(self) {
        info!(
            pricing_plans = self.pricing_plans.len().await,
            programs = self.programs.len().await,
            testimonials = self.testimonials.len().await,
            "content_stores: shutting down, in-memory records discarded"
        );
    }
}
