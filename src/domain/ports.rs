use crate::domain::model::{LoginList, Lookup};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Read-only view of an upstream user directory.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn fetch_user(&self, username: &str) -> Result<Lookup<Map<String, Value>>>;
    async fn fetch_followers(&self, username: &str) -> Result<Lookup<LoginList>>;
    async fn fetch_following(&self, username: &str) -> Result<Lookup<LoginList>>;
}

pub trait ConfigProvider: Send + Sync {
    fn host(&self) -> &str;
    fn port(&self) -> u16;
    fn api_base_url(&self) -> &str;
    fn timeout_secs(&self) -> u64;
    fn user_agent(&self) -> &str;
}
