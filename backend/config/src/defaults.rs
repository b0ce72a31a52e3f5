//! Config defaults: fills every unset field after parsing.

use crate::schema::{GardenConfig, LoggingConfig, ServerConfig};

/// Default listen address.
pub const DEFAULT_BIND: &str = "0.0.0.0";

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 5402;

/// Default log filter.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: GardenConfig) -> GardenConfig {
    let config = apply_server_defaults(config);
    apply_logging_defaults(config)
}

fn apply_server_defaults(mut config: GardenConfig) -> GardenConfig {
    let server = config.server.get_or_insert_with(ServerConfig::default);
    if server.bind.is_none() {
        server.bind = Some(DEFAULT_BIND.to_string());
    }
    if server.port.is_none() {
        server.port = Some(DEFAULT_PORT);
    }
    config
}

fn apply_logging_defaults(mut config: GardenConfig) -> GardenConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    if logging.level.is_none() {
        logging.level = Some(DEFAULT_LOG_LEVEL.to_string());
    }
    if logging.json.is_none() {
        logging.json = Some(false);
    }
    config
}
