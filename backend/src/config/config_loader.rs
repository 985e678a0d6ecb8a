use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use super::{
    config_model::{BackendServer, Content, DotEnvyConfig, Uploads},
    stage::Stage,
};

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let backend_server = BackendServer {
        port: env_or("SERVER_PORT_BACKEND", "8080")
            .parse()
            .context("SERVER_PORT_BACKEND is invalid")?,
        body_limit: env_or("SERVER_BODY_LIMIT", "20")
            .parse()
            .context("SERVER_BODY_LIMIT is invalid")?,
        timeout: env_or("SERVER_TIMEOUT", "30")
            .parse()
            .context("SERVER_TIMEOUT is invalid")?,
    };

    let public_prefix = env_or("UPLOAD_PUBLIC_PREFIX", "/uploads");
    if public_prefix.trim_matches('/').is_empty() {
        bail!("UPLOAD_PUBLIC_PREFIX is invalid: uploads cannot be served from the site root");
    }

    let uploads = Uploads {
        dir: PathBuf::from(env_or("UPLOAD_DIR", "public/uploads")),
        public_prefix,
        max_file_mb: env_or("UPLOAD_MAX_FILE_MB", "5")
            .parse()
            .context("UPLOAD_MAX_FILE_MB is invalid")?,
    };

    let content = Content {
        seed_demo_content: parse_bool(&env_or("SEED_DEMO_CONTENT", "true"))
            .context("SEED_DEMO_CONTENT is invalid")?,
    };

    Ok(DotEnvyConfig {
        backend_server,
        uploads,
        content,
        stage: get_stage(),
    })
}

pub fn get_stage() -> Stage {
    dotenvy::dotenv().ok();

    let stage_str = std::env::var("STAGE").unwrap_or("".to_string());
    Stage::try_from(&stage_str).unwrap_or_default()
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "f" | "no" | "n" | "off" => Ok(false),
        other => bail!("expected a boolean, got {}", other),
    }
}
