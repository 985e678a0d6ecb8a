pub mod content_stores;
pub mod resource_store;
pub mod seeds;
