//! Mindful Garden configuration schema, typed for serde YAML deserialization.
//!
//! Every field is optional in the file; `defaults::apply_all_defaults` fills
//! the gaps after parsing.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GardenConfig {
    /// HTTP listener settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,

    /// Logging configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,

    /// Where the state/transition/response tables come from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<CatalogConfig>,

    /// Response selection settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responses: Option<ResponsesConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// EnvFilter directive, e.g. `info` or `garden_gateway=debug,info`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Directory for daily-rolling NDJSON logs; console only when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    /// Emit console logs as JSON
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogConfig {
    /// Replacement catalog file; the embedded catalog is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsesConfig {
    /// Fixed seed for reproducible response picks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl GardenConfig {
    pub fn bind(&self) -> &str {
        self.server
            .as_ref()
            .and_then(|s| s.bind.as_deref())
            .unwrap_or(crate::defaults::DEFAULT_BIND)
    }

    pub fn port(&self) -> u16 {
        self.server
            .as_ref()
            .and_then(|s| s.port)
            .unwrap_or(crate::defaults::DEFAULT_PORT)
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or(crate::defaults::DEFAULT_LOG_LEVEL)
    }

    pub fn log_dir(&self) -> Option<&std::path::Path> {
        self.logging.as_ref().and_then(|l| l.dir.as_deref())
    }

    pub fn log_json(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    pub fn catalog_path(&self) -> Option<&std::path::Path> {
        self.catalog.as_ref().and_then(|c| c.path.as_deref())
    }

    pub fn response_seed(&self) -> Option<u64> {
        self.responses.as_ref().and_then(|r| r.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_camel_case_yaml() {
        let raw = r#"
server:
  bind: "127.0.0.1"
  port: 8088
logging:
  level: debug
  json: true
catalog:
  path: /etc/garden/catalog.yaml
responses:
  seed: 9
"#;
        let cfg: GardenConfig = serde_yaml::from_str(raw).unwrap();
        assert_eq!(cfg.bind(), "127.0.0.1");
        assert_eq!(cfg.port(), 8088);
        assert_eq!(cfg.log_level(), "debug");
        assert!(cfg.log_json());
        assert_eq!(
            cfg.catalog_path(),
            Some(std::path::Path::new("/etc/garden/catalog.yaml"))
        );
        assert_eq!(cfg.response_seed(), Some(9));
    }

    #[test]
    fn test_accessors_fall_back_on_empty_config() {
        let cfg = GardenConfig::default();
        assert_eq!(cfg.bind(), "0.0.0.0");
        assert_eq!(cfg.port(), 5402);
        assert_eq!(cfg.log_level(), "info");
        assert!(cfg.log_dir().is_none());
        assert!(cfg.catalog_path().is_none());
    }
}
