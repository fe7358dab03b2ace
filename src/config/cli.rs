use super::{
    validate_provider, DEFAULT_API_BASE_URL, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS,
    DEFAULT_USER_AGENT,
};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "github-user-proxy")]
#[command(about = "Serves a GitHub user's profile, followers and following as one JSON object")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    #[arg(long, default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, help = "Timeout for each upstream request")]
    pub timeout_secs: u64,

    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    #[arg(long, help = "TOML configuration file; replaces the other settings")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl ConfigProvider for CliConfig {
    fn host(&self) -> &str {
        &self.host
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
