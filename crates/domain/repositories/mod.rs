pub mod asset_storage;
pub mod authenticator;
pub mod content_gateway;
pub mod device_storage;
pub mod resource_store;
