pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::github::GithubClient;
pub use app::{build_router, router_with_directory, serve};
pub use config::TomlConfig;
pub use crate::core::aggregator::ProfileAggregator;
pub use domain::model::{ErrorRecord, LoginList, Lookup, UserProfile, USER_NOT_FOUND};
pub use utils::error::{ProxyError, Result};
