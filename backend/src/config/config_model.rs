use std::path::PathBuf;

use super::stage::Stage;

#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub backend_server: BackendServer,
    pub uploads: Uploads,
    pub content: Content,
    pub stage: Stage,
}

#[derive(Debug, Clone)]
pub struct BackendServer {
    pub port: u16,
    /// Megabytes.
    pub body_limit: u64,
    /// Seconds.
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Uploads {
    pub dir: PathBuf,
    pub public_prefix: String,
    pub max_file_mb: u64,
}

#[derive(Debug, Clone)]
pub struct Content {
    pub seed_demo_content: bool,
}
