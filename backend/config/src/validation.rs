//! Config validation with user-friendly error messages.

use crate::schema::GardenConfig;
use thiserror::Error;

const LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &GardenConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_server(config, &mut report);
    validate_logging(config, &mut report);
    validate_catalog(config, &mut report);
    report
}

fn validate_server(config: &GardenConfig, report: &mut ValidationReport) {
    let Some(server) = &config.server else { return };
    if let Some(port) = server.port {
        if port == 0 {
            report.error("server.port", "Port must be > 0");
        } else if port < 1024 && port != 80 && port != 443 {
            report.warn(
                "server.port",
                format!("Port {port} requires elevated privileges; consider using a port >= 1024"),
            );
        }
    }
    if let Some(bind) = &server.bind {
        if bind.trim().is_empty() {
            report.error("server.bind", "Bind address cannot be empty");
        }
    }
}

/// Each comma-separated directive must end in a known level (`info`, `garden_gateway=debug`).
fn validate_logging(config: &GardenConfig, report: &mut ValidationReport) {
    let Some(logging) = &config.logging else { return };
    if let Some(level) = &logging.level {
        for directive in level.split(',').map(str::trim).filter(|d| !d.is_empty()) {
            let lvl = directive.rsplit('=').next().unwrap_or(directive);
            if !LEVELS.contains(&lvl.to_ascii_lowercase().as_str()) {
                report.error(
                    "logging.level",
                    format!("Unknown log level '{lvl}' in directive '{directive}'"),
                );
            }
        }
    }
    if let Some(dir) = &logging.dir {
        if dir.is_file() {
            report.error("logging.dir", format!("{} is a file, not a directory", dir.display()));
        } else if !dir.exists() {
            report.warn("logging.dir", format!("{} does not exist; it will be created", dir.display()));
        }
    }
}

fn validate_catalog(config: &GardenConfig, report: &mut ValidationReport) {
    let Some(catalog) = &config.catalog else { return };
    if let Some(path) = &catalog.path {
        if !path.is_file() {
            report.error("catalog.path", format!("Catalog file not found: {}", path.display()));
        }
    }
}
