use std::path::{Path, PathBuf};

use tracing::{info, warn};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://school.db?mode=rwc";
pub const DEFAULT_PHOTOS_DIR: &str = "photos";

/// Outcome of reading one env file. Collected before the subscriber exists
/// and logged with `log_env_files` once it does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvFile {
    Loaded(String),
    Missing(String),
}

pub fn load_environment() -> anyhow::Result<Vec<EnvFile>> {
    let is_production =
        dotenvy::var("ROCKET_PROFILE").unwrap_or("development".to_string()) == "production";

    let env_files = if is_production {
        ["config/common.env", "config/prod.env", ".secrets.env"]
    } else {
        ["config/common.env", "config/dev.env", ".secrets.env"]
    };

    load_env_files(&env_files)
}

pub fn load_env_files(paths: &[&str]) -> anyhow::Result<Vec<EnvFile>> {
    let mut report = Vec::with_capacity(paths.len());

    for &path in paths {
        if !Path::new(path).exists() {
            report.push(EnvFile::Missing(path.to_string()));
            continue;
        }

        dotenvy::from_filename_override(path)?;
        report.push(EnvFile::Loaded(path.to_string()));
    }

    Ok(report)
}

pub fn log_env_files(report: &[EnvFile]) {
    for entry in report {
        match entry {
            EnvFile::Loaded(path) => info!("Loaded environment from: {}", path),
            EnvFile::Missing(path) => warn!("Environment file {} not found, skipping", path),
        }
    }
}

pub fn database_url() -> String {
    std::env::var("DATABASE_URL")
        .ok()
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
}

pub fn photos_dir() -> PathBuf {
    std::env::var("PHOTOS_DIR")
        .ok()
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PHOTOS_DIR))
}
