use super::{
    validate_provider, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::core::ConfigProvider;
use crate::utils::error::{ProxyError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File-based configuration, an alternative to the command-line flags.
///
/// ```toml
/// [server]
/// host = "0.0.0.0"
/// port = 5000
///
/// [upstream]
/// base_url = "https://api.github.com"
/// timeout_seconds = 10
/// user_agent = "${PROXY_USER_AGENT}"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: Option<ServerSection>,
    pub upstream: UpstreamSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamSection {
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ProxyError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ProxyError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the value of `VAR`; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ProxyError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn host(&self) -> &str {
        self.server
            .as_ref()
            .and_then(|server| server.host.as_deref())
            .unwrap_or(DEFAULT_HOST)
    }

    fn port(&self) -> u16 {
        self.server
            .as_ref()
            .and_then(|server| server.port)
            .unwrap_or(DEFAULT_PORT)
    }

    fn api_base_url(&self) -> &str {
        &self.upstream.base_url
    }

    fn timeout_secs(&self) -> u64 {
        self.upstream.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    fn user_agent(&self) -> &str {
        self.upstream
            .user_agent
            .as_deref()
            .unwrap_or(DEFAULT_USER_AGENT)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
