//! Config file location and reading.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Resolve the config directory.
/// Priority: `GARDEN_CONFIG_DIR` env > `~/.mindful-garden/` > `./.mindful-garden/`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("GARDEN_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    match dirs::home_dir() {
        Some(home) => home.join(".mindful-garden"),
        None => PathBuf::from(".mindful-garden"),
    }
}

/// Resolve the full path to the main config file.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Read the raw config text. `Ok(None)` when the file doesn't exist (first run).
pub async fn read_config_text(path: &Path) -> Result<Option<String>> {
    if !fs::try_exists(path).await.unwrap_or(false) {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(None);
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    info!(path = %path.display(), "Loaded config");
    Ok(Some(raw))
}
