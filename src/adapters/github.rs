use crate::domain::model::{LoginList, Lookup};
use crate::domain::ports::{ConfigProvider, UserDirectory};
use crate::utils::error::{ProxyError, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

#[derive(Debug, Deserialize)]
struct LoginEntry {
    login: String,
}

/// `UserDirectory` backed by the GitHub REST API (or anything serving the same paths).
#[derive(Debug, Clone)]
pub struct GithubClient {
    client: Client,
    base_url: String,
}

impl GithubClient {
    pub fn new<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs()))
            .user_agent(config.user_agent())
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // The username goes into the path as given.
    fn user_url(&self, username: &str, resource: Option<&str>) -> String {
        match resource {
            Some(resource) => format!("{}/users/{}/{}", self.base_url, username, resource),
            None => format!("{}/users/{}", self.base_url, username),
        }
    }

    /// GETs `url`, returning the body on 200 and `NotFound` on any other status.
    async fn get_body(&self, url: &str) -> Result<Lookup<String>> {
        tracing::debug!("Making upstream request to: {}", url);
        let response = self
            .client
            .get(url)
            .header(ACCEPT, GITHUB_MEDIA_TYPE)
            .send()
            .await
            .map_err(|e| ProxyError::from_request(e, url))?;

        let status = response.status();
        tracing::debug!("Upstream response status: {} ({})", status, url);

        if status != StatusCode::OK {
            return Ok(Lookup::NotFound);
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProxyError::from_request(e, url))?;
        Ok(Lookup::Found(body))
    }

    async fn fetch_logins(&self, username: &str, resource: &str) -> Result<Lookup<LoginList>> {
        let url = self.user_url(username, Some(resource));
        match self.get_body(&url).await? {
            Lookup::Found(body) => {
                let entries: Vec<LoginEntry> = serde_json::from_str(&body)?;
                Ok(Lookup::Found(
                    entries.into_iter().map(|entry| entry.login).collect(),
                ))
            }
            Lookup::NotFound => Ok(Lookup::NotFound),
        }
    }
}

#[async_trait]
impl UserDirectory for GithubClient {
    async fn fetch_user(&self, username: &str) -> Result<Lookup<Map<String, Value>>> {
        let url = self.user_url(username, None);
        match self.get_body(&url).await? {
            Lookup::Found(body) => match serde_json::from_str::<Value>(&body)? {
                Value::Object(fields) => Ok(Lookup::Found(fields)),
                other => Err(ProxyError::UnexpectedShapeError {
                    message: format!("expected a JSON object for user profile, got {}", other),
                }),
            },
            Lookup::NotFound => Ok(Lookup::NotFound),
        }
    }

    async fn fetch_followers(&self, username: &str) -> Result<Lookup<LoginList>> {
        self.fetch_logins(username, "followers").await
    }

    async fn fetch_following(&self, username: &str) -> Result<Lookup<LoginList>> {
        self.fetch_logins(username, "following").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    struct MockConfig {
        api_base_url: String,
        timeout_secs: u64,
    }

    impl MockConfig {
        fn new(api_base_url: String) -> Self {
            Self {
                api_base_url,
                timeout_secs: 5,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn host(&self) -> &str {
            "127.0.0.1"
        }

        fn port(&self) -> u16 {
            5000
        }

        fn api_base_url(&self) -> &str {
            &self.api_base_url
        }

        fn timeout_secs(&self) -> u64 {
            self.timeout_secs
        }

        fn user_agent(&self) -> &str {
            "github-user-proxy-tests"
        }
    }

    fn client_for(server: &MockServer) -> GithubClient {
        GithubClient::new(&MockConfig::new(server.base_url())).unwrap()
    }

    #[test]
    fn test_trailing_slash_is_trimmed_from_base_url() {
        let client = GithubClient::new(&MockConfig::new(
            "https://api.github.com/".to_string(),
        ))
        .unwrap();

        assert_eq!(client.base_url(), "https://api.github.com");
        assert_eq!(
            client.user_url("octocat", Some("followers")),
            "https://api.github.com/users/octocat/followers"
        );
    }

    #[tokio::test]
    async fn test_fetch_user_success() {
        let server = MockServer::start();
        let user = json!({
            "login": "testuser",
            "name": "Test User",
            "public_repos": 10,
            "followers": 20,
            "following": 15
        });

        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/users/testuser")
                .header("user-agent", "github-user-proxy-tests")
                .header("accept", GITHUB_MEDIA_TYPE);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(user.clone());
        });

        let result = client_for(&server).fetch_user("testuser").await.unwrap();

        api_mock.assert();
        assert_eq!(result, Lookup::Found(user.as_object().unwrap().clone()));
    }

    #[tokio::test]
    async fn test_fetch_user_not_found() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/users/nonexistentuser");
            then.status(404).json_body(json!({"message": "Not Found"}));
        });

        let result = client_for(&server)
            .fetch_user("nonexistentuser")
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(result, Lookup::NotFound);
    }

    #[tokio::test]
    async fn test_fetch_user_non_object_body_is_a_fault() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/users/testuser");
            then.status(200).json_body(json!(["not", "an", "object"]));
        });

        let err = client_for(&server).fetch_user("testuser").await.unwrap_err();
        assert!(matches!(err, ProxyError::UnexpectedShapeError { .. }));
    }

    #[tokio::test]
    async fn test_fetch_user_malformed_body_is_a_fault() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/users/testuser");
            then.status(200).body("<html>rate limited</html>");
        });

        let err = client_for(&server).fetch_user("testuser").await.unwrap_err();
        assert!(matches!(err, ProxyError::SerializationError(_)));
    }

    #[tokio::test]
    async fn test_fetch_followers_success_preserves_order() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/users/testuser/followers");
            then.status(200).json_body(json!([
                {"login": "follower0", "id": 1},
                {"login": "follower1", "id": 2},
                {"login": "follower2", "id": 3}
            ]));
        });

        let result = client_for(&server)
            .fetch_followers("testuser")
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(
            result,
            Lookup::Found(vec![
                "follower0".to_string(),
                "follower1".to_string(),
                "follower2".to_string()
            ])
        );
    }

    #[tokio::test]
    async fn test_fetch_followers_not_found() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/users/nonexistentuser/followers");
            then.status(404);
        });

        let result = client_for(&server)
            .fetch_followers("nonexistentuser")
            .await
            .unwrap();
        assert_eq!(result, Lookup::NotFound);
    }

    #[tokio::test]
    async fn test_fetch_following_success() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/users/testuser/following");
            then.status(200)
                .json_body(json!([{"login": "following0"}, {"login": "following1"}]));
        });

        let result = client_for(&server)
            .fetch_following("testuser")
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(
            result,
            Lookup::Found(vec!["following0".to_string(), "following1".to_string()])
        );
    }

    #[tokio::test]
    async fn test_fetch_following_entry_without_login_is_a_fault() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/users/testuser/following");
            then.status(200).json_body(json!([{"login": "a"}, {"id": 7}]));
        });

        let err = client_for(&server)
            .fetch_following("testuser")
            .await
            .unwrap_err();

        assert!(matches!(err, ProxyError::SerializationError(_)));
        assert!(err.to_string().contains("login"));
    }

    #[tokio::test]
    async fn test_slow_upstream_times_out() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/users/slowpoke");
            then.status(200)
                .delay(Duration::from_secs(3))
                .json_body(json!({"login": "slowpoke"}));
        });

        let mut config = MockConfig::new(server.base_url());
        config.timeout_secs = 1;
        let client = GithubClient::new(&config).unwrap();

        let err = client.fetch_user("slowpoke").await.unwrap_err();
        assert!(matches!(err, ProxyError::TimeoutError { .. }));
        assert!(err.to_string().contains("/users/slowpoke"));
    }
}
