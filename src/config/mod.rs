#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const MAX_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_USER_AGENT: &str = concat!("github-user-proxy/", env!("CARGO_PKG_VERSION"));

/// Shared checks for any `ConfigProvider`.
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_non_empty_string("host", config.host())?;
    validate_url("api_base_url", config.api_base_url())?;
    validate_range("timeout_secs", config.timeout_secs(), 1, MAX_TIMEOUT_SECS)?;
    validate_non_empty_string("user_agent", config.user_agent())?;
    Ok(())
}
