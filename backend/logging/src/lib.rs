//! Structured logging for Mindful Garden.
//!
//! Handles console/JSON output, daily-rolling NDJSON files, redaction of
//! message text, and session event logging.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::EventLogger;
pub use logger::init_logger;
pub use redact::redact_sensitive_data;
