//! `garden-config` — Mindful Garden runtime configuration.
//!
//! Provides:
//! - Typed config schema (server, logging, catalog source, response seed)
//! - YAML loading from the config directory
//! - `${ENV_VAR}` substitution inside the config file
//! - `GARDEN_*` environment overrides
//! - Default value application
//! - Validation with errors and warnings

pub mod defaults;
pub mod env;
pub mod io;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{apply_env_overrides, expand_env_vars, MissingEnvVarError};
pub use io::{config_dir, config_file_path, read_config_text};
pub use schema::{CatalogConfig, GardenConfig, LoggingConfig, ResponsesConfig, ServerConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};

/// Read, expand, parse, override from the environment, and apply defaults.
/// Does not validate.
pub async fn load_resolved(path: &Path) -> Result<GardenConfig> {
    let env: HashMap<String, String> = std::env::vars().collect();

    let config = match read_config_text(path).await? {
        Some(raw) => {
            let expanded = expand_env_vars(&raw, &env)
                .with_context(|| format!("Failed to expand env vars in {}", path.display()))?;
            serde_yaml::from_str::<GardenConfig>(&expanded)
                .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?
        }
        None => GardenConfig::default(),
    };

    let config = apply_env_overrides(config, &env)?;
    Ok(apply_all_defaults(config))
}

/// Validate a resolved config and log its warnings and errors.
///
/// Fails when validation reports any error.
pub fn prepare(config: GardenConfig) -> Result<GardenConfig> {
    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
    if !report.is_valid() {
        bail!("config has {} error(s)", report.errors.len());
    }

    Ok(config)
}

/// Load a config for serving: resolved, validated, warnings logged.
pub async fn load_and_prepare(path: &Path) -> Result<GardenConfig> {
    prepare(load_resolved(path).await?)
}
