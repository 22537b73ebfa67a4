//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default base URL of the documentation server
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Environment variable that overrides the configured base URL
pub const API_URL_ENV: &str = "DOCDECK_API_URL";

/// Directory under the home directory holding config, credentials and logs
pub const CONFIG_DIR_NAME: &str = ".docdeck";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Log file name inside the config directory
pub const LOG_FILE_NAME: &str = "docdeck.log";

/// Placeholder URL for new API documents
pub const NEW_DOCUMENT_URL: &str = "api/";

/// Placeholder JSON example for new bodies
pub const EMPTY_JSON_EXAMPLE: &str = "{\n  \n}";

/// Application name
pub const APP_NAME: &str = "docdeck";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
