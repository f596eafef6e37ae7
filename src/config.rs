//! # Configuration
//!
//! [`AppConfig`] is assembled by the `config` crate from, in increasing
//! priority:
//!
//! 1. built-in defaults (`Default` impls below),
//! 2. `storefront.yaml` in the working directory, if present,
//! 3. the YAML file named by `STOREFRONT_CONFIG`, if set,
//! 4. environment variables prefixed `STOREFRONT__`, nested with `__`
//!    (e.g. `STOREFRONT__STORE_API__BASE_URL`).

use std::time::Duration;

use serde::Deserialize;
use session_actor::SessionConfig;
use store_api::StoreApiConfig;
use thiserror::Error;

use crate::order_detail::OrderDetailConfig;

pub const DEFAULT_CONFIG_FILE: &str = "storefront";
pub const CONFIG_ENV_VAR: &str = "STOREFRONT_CONFIG";
pub const CONFIG_ENV_PREFIX: &str = "STOREFRONT";

/// Errors raised while loading [`AppConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or did not match the settings shape.
    #[error("Configuration could not be loaded: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub store_api: StoreApiSettings,
    pub session: SessionSettings,
    pub order_detail: OrderDetailSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub listen_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreApiSettings {
    pub base_url: String,
    /// Sent as the `storeName` header on every store call.
    pub store_name: String,
    /// Sent as the `localDomain` header on every store call.
    pub local_domain: String,
    pub request_timeout_secs: Option<u64>,
}

impl Default for StoreApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3002".to_string(),
            store_name: "defaultLocalStore".to_string(),
            local_domain: "defaultLocalStore.mydomain.com".to_string(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub cookie_name: String,
    /// Idle lifetime; `0` keeps sessions until the process exits.
    pub max_age_secs: u64,
    pub buffer_size: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            cookie_name: "six910-session".to_string(),
            max_age_secs: 3600,
            buffer_size: 32,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OrderDetailSettings {
    /// Username recorded on notes added from the edit-order page.
    pub notes_username: String,
    /// Deadline for each remote fetch of the edit-order page. Absent means
    /// wait indefinitely.
    pub fetch_timeout_ms: Option<u64>,
}

impl Default for OrderDetailSettings {
    fn default() -> Self {
        Self {
            notes_username: "admin".to_string(),
            fetch_timeout_ms: None,
        }
    }
}

impl AppConfig {
    /// Loads defaults, the optional config files, then the environment.
    pub fn load() -> Result<Self, ConfigError> {
        use config::{Config, Environment, File, FileFormat};

        let mut builder = Config::builder()
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false));

        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            builder = builder.add_source(File::new(&config_path, FileFormat::Yaml).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn store_api_config(&self) -> StoreApiConfig {
        let config = StoreApiConfig::default().with_base_url(self.store_api.base_url.clone());
        match self.store_api.request_timeout_secs {
            Some(secs) => config.with_request_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            buffer_size: self.session.buffer_size,
            max_age: (self.session.max_age_secs > 0)
                .then(|| Duration::from_secs(self.session.max_age_secs)),
        }
    }

    pub fn order_detail_config(&self) -> OrderDetailConfig {
        OrderDetailConfig {
            notes_username: self.order_detail.notes_username.clone(),
            fetch_timeout: self.order_detail.fetch_timeout_ms.map(Duration::from_millis),
        }
    }
}
