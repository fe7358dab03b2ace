use crate::utils::error::ProxyError;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Text served in place of a profile when the upstream user does not exist.
pub const USER_NOT_FOUND: &str = "User not found 😥";

pub const FOLLOWERS_LIST_KEY: &str = "followers_list";
pub const FOLLOWING_LIST_KEY: &str = "following_list";

/// Logins in upstream response order.
pub type LoginList = Vec<String>;

/// Outcome of a single upstream lookup. A non-200 upstream status is `NotFound`, never an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Lookup<U> {
        match self {
            Lookup::Found(value) => Lookup::Found(f(value)),
            Lookup::NotFound => Lookup::NotFound,
        }
    }
}

impl<T: Default> Lookup<T> {
    pub fn unwrap_or_default(self) -> T {
        self.found().unwrap_or_default()
    }
}

/// Upstream user object with the follower and following logins attached.
///
/// Serialises as one flat JSON object: the upstream keys in upstream order,
/// then `followers_list`, then `following_list`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserProfile {
    fields: Map<String, Value>,
    followers_list: LoginList,
    following_list: LoginList,
}

impl UserProfile {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self {
            fields,
            followers_list: Vec::new(),
            following_list: Vec::new(),
        }
    }

    pub fn with_lists(mut self, followers_list: LoginList, following_list: LoginList) -> Self {
        self.followers_list = followers_list;
        self.following_list = following_list;
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn login(&self) -> Option<&str> {
        self.fields.get("login").and_then(Value::as_str)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn followers_list(&self) -> &[String] {
        &self.followers_list
    }

    pub fn following_list(&self) -> &[String] {
        &self.following_list
    }
}

impl Serialize for UserProfile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        // Attached lists replace any upstream key of the same name.
        for (key, value) in &self.fields {
            if key != FOLLOWERS_LIST_KEY && key != FOLLOWING_LIST_KEY {
                map.serialize_entry(key, value)?;
            }
        }
        map.serialize_entry(FOLLOWERS_LIST_KEY, &self.followers_list)?;
        map.serialize_entry(FOLLOWING_LIST_KEY, &self.following_list)?;
        map.end()
    }
}

/// Body returned when aggregation fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub error: String,
    pub message: String,
}

impl ErrorRecord {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: USER_NOT_FOUND.to_string(),
        }
    }
}

impl From<&ProxyError> for ErrorRecord {
    fn from(err: &ProxyError) -> Self {
        Self::new(err.to_string())
    }
}
