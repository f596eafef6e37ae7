//! Per-request headers forwarded on every store call.

use std::collections::BTreeMap;

pub const AUTHORIZATION: &str = "Authorization";
pub const STORE_NAME: &str = "storeName";
pub const LOCAL_DOMAIN: &str = "localDomain";

/// Header map attached to each store API request.
///
/// Built by the web layer from the session (credentials) and configuration
/// (store name, local domain). Kept ordered so logs are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    values: BTreeMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
