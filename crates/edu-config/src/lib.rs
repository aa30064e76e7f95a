mod api_config;
mod config;
mod error;
mod log_level;
mod logging_config;
mod session_config;
mod tenant_config;
mod token_config;

#[cfg(test)]
mod tests;

pub use api_config::ApiConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use session_config::SessionConfig;
pub use tenant_config::TenantConfig;
pub use token_config::TokenConfig;

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_TENANT_KEY: &str = "default";
const DEFAULT_TOKEN_STORAGE_DIR: &str = "auth";
const DEFAULT_TOKEN_STORAGE_KEY: &str = "auth_token";
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
