//! Environment handling for config values.
//!
//! Two mechanisms:
//! - `${VAR_NAME}` references in the config file text, expanded before parsing.
//!   Only uppercase `[A-Z_][A-Z0-9_]*` names match; `$${VAR}` stays a literal `${VAR}`.
//! - `GARDEN_*` variables overriding individual settings after parsing.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::schema::{CatalogConfig, GardenConfig, LoggingConfig, ResponsesConfig, ServerConfig};

/// Matches `${VAR}` and the escaped form `$${VAR}`.
static ENV_REF_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\$?)\$\{([A-Z_][A-Z0-9_]*)\}").expect("valid env ref pattern"));

pub const ENV_BIND: &str = "GARDEN_BIND";
pub const ENV_PORT: &str = "GARDEN_PORT";
pub const ENV_LOG: &str = "GARDEN_LOG";
pub const ENV_CATALOG: &str = "GARDEN_CATALOG";
pub const ENV_RESPONSE_SEED: &str = "GARDEN_RESPONSE_SEED";

/// Error returned for a referenced env var that is unset or empty.
#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced on config line {line}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub line: usize,
}

/// Expand `${VAR}` references in raw config text.
pub fn expand_env_vars(
    raw: &str,
    env: &HashMap<String, String>,
) -> Result<String, MissingEnvVarError> {
    if !raw.contains("${") {
        return Ok(raw.to_string());
    }

    let mut out = String::with_capacity(raw.len());
    for (index, line) in raw.split_inclusive('\n').enumerate() {
        let mut last = 0;
        for caps in ENV_REF_PATTERN.captures_iter(line) {
            let Some(whole) = caps.get(0) else { continue };
            let name = &caps[2];
            out.push_str(&line[last..whole.start()]);
            if !caps[1].is_empty() {
                out.push_str(&format!("${{{name}}}"));
            } else {
                match env.get(name) {
                    Some(value) if !value.is_empty() => out.push_str(value),
                    _ => {
                        return Err(MissingEnvVarError {
                            var_name: name.to_string(),
                            line: index + 1,
                        })
                    }
                }
            }
            last = whole.end();
        }
        out.push_str(&line[last..]);
    }
    Ok(out)
}

/// Apply `GARDEN_*` overrides on top of the parsed file.
pub fn apply_env_overrides(
    mut config: GardenConfig,
    env: &HashMap<String, String>,
) -> Result<GardenConfig> {
    if let Some(bind) = env.get(ENV_BIND) {
        config.server.get_or_insert_with(ServerConfig::default).bind = Some(bind.clone());
    }
    if let Some(port) = env.get(ENV_PORT) {
        let port: u16 = port
            .parse()
            .with_context(|| format!("{ENV_PORT} is not a valid port: {port}"))?;
        config.server.get_or_insert_with(ServerConfig::default).port = Some(port);
    }
    if let Some(level) = env.get(ENV_LOG) {
        config.logging.get_or_insert_with(LoggingConfig::default).level = Some(level.clone());
    }
    if let Some(path) = env.get(ENV_CATALOG) {
        config.catalog.get_or_insert_with(CatalogConfig::default).path = Some(PathBuf::from(path));
    }
    if let Some(seed) = env.get(ENV_RESPONSE_SEED) {
        let seed: u64 = seed
            .parse()
            .with_context(|| format!("{ENV_RESPONSE_SEED} is not a valid u64: {seed}"))?;
        config.responses.get_or_insert_with(ResponsesConfig::default).seed = Some(seed);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn expands_simple_reference() {
        let raw = "server:\n  port: ${PORT_FROM_ENV}\n";
        let out = expand_env_vars(raw, &env(&[("PORT_FROM_ENV", "9000")])).unwrap();
        assert_eq!(out, "server:\n  port: 9000\n");
    }

    #[test]
    fn missing_reference_reports_line() {
        let raw = "a: 1\nb: ${NOPE}\n";
        let err = expand_env_vars(raw, &HashMap::new()).unwrap_err();
        assert_eq!(err.var_name, "NOPE");
        assert_eq!(err.line, 2);
    }

    #[test]
    fn escaped_reference_is_literal() {
        let raw = "note: \"$${HOME_DIR}\"\n";
        let out = expand_env_vars(raw, &HashMap::new()).unwrap();
        assert_eq!(out, "note: \"${HOME_DIR}\"\n");
    }

    #[test]
    fn lowercase_names_are_left_alone() {
        let raw = "x: ${not_a_var}\n";
        assert_eq!(expand_env_vars(raw, &HashMap::new()).unwrap(), raw);
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut cfg = GardenConfig::default();
        cfg.server = Some(ServerConfig {
            bind: Some("127.0.0.1".into()),
            port: Some(1234),
        });
        let cfg = apply_env_overrides(
            cfg,
            &env(&[(ENV_PORT, "8081"), (ENV_LOG, "debug"), (ENV_RESPONSE_SEED, "5")]),
        )
        .unwrap();
        assert_eq!(cfg.port(), 8081);
        assert_eq!(cfg.bind(), "127.0.0.1");
        assert_eq!(cfg.log_level(), "debug");
        assert_eq!(cfg.response_seed(), Some(5));
    }

    #[test]
    fn bad_port_override_is_error() {
        let result = apply_env_overrides(GardenConfig::default(), &env(&[(ENV_PORT, "eighty")]));
        assert!(result.unwrap_err().to_string().contains(ENV_PORT));
    }
}
