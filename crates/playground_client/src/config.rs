//! Playground configuration.

use playground_error::{ConfigError, ConfigErrorKind};
use playground_interface::KeyPair;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument, warn};

/// Base URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8787";

/// Public key of the shared demo project.
pub const DEMO_PUBLIC_KEY: &str = "pk_demo_xxxxxxxxxxxxxxx";

/// Secret key of the shared demo project.
pub const DEMO_SECRET_KEY: &str = "sk_demo_xxxxxxxxxxxxxxx";

/// Default page size for record listing.
pub const DEFAULT_LIMIT: u32 = 3;

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_demo_public_key() -> String {
    DEMO_PUBLIC_KEY.to_string()
}

fn default_demo_secret_key() -> String {
    DEMO_SECRET_KEY.to_string()
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// Keys, endpoint and connector allow-list for the playground.
///
/// Only allow-listed connectors use the configured project keys. Every other
/// connector falls back to the demo project, which serves mocked data.
///
/// # Examples
///
/// ```
/// use playground_client::{DEMO_PUBLIC_KEY, PlaygroundConfig};
///
/// let config = PlaygroundConfig::builder()
///     .public_key(Some("pk_live".to_string()))
///     .secret_key(Some("sk_live".to_string()))
///     .available_connectors(vec!["hubspot".to_string()])
///     .build()
///     .unwrap();
///
/// assert_eq!(config.keys_for("hubspot").public_key(), "pk_live");
/// assert_eq!(config.keys_for("gong").public_key(), DEMO_PUBLIC_KEY);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct PlaygroundConfig {
    /// Base URL of the hosted connector API
    #[serde(default = "default_api_url")]
    #[builder(default = "default_api_url()")]
    api_base_url: String,
    /// Project public key
    #[serde(default)]
    #[builder(default)]
    public_key: Option<String>,
    /// Project secret key, only needed to create sessions
    #[serde(default, skip_serializing)]
    #[builder(default)]
    secret_key: Option<String>,
    /// Connectors fully configured on the project
    #[serde(default)]
    #[builder(default)]
    available_connectors: Vec<String>,
    /// Fallback public key
    #[serde(default = "default_demo_public_key")]
    #[builder(default = "default_demo_public_key()")]
    demo_public_key: String,
    /// Fallback secret key
    #[serde(default = "default_demo_secret_key", skip_serializing)]
    #[builder(default = "default_demo_secret_key()")]
    demo_secret_key: String,
    /// Initial record page size
    #[serde(default = "default_limit")]
    #[builder(default = "default_limit()")]
    default_limit: u32,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_url(),
            public_key: None,
            secret_key: None,
            available_connectors: Vec::new(),
            demo_public_key: default_demo_public_key(),
            demo_secret_key: default_demo_secret_key(),
            default_limit: default_limit(),
        }
    }
}

impl PlaygroundConfig {
    /// Returns a builder for constructing a PlaygroundConfig.
    pub fn builder() -> PlaygroundConfigBuilder {
        PlaygroundConfigBuilder::default()
    }

    /// Create config from environment variables
    ///
    /// Reads:
    /// - `PLAYGROUND_API_URL` (default: "http://localhost:8787")
    /// - `PLAYGROUND_PUBLIC_KEY` (optional)
    /// - `PLAYGROUND_SECRET_KEY` (optional)
    /// - `PLAYGROUND_AVAILABLE_CONNECTORS` (comma separated, optional)
    /// - `PLAYGROUND_DEFAULT_LIMIT` (default: 3)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from any key lookup, using the same keys as [`Self::from_env`].
    #[instrument(skip(lookup))]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let available_connectors = non_empty("PLAYGROUND_AVAILABLE_CONNECTORS")
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let default_limit = match non_empty("PLAYGROUND_DEFAULT_LIMIT") {
            Some(raw) => parse_limit(&raw)?,
            None => DEFAULT_LIMIT,
        };

        let config = Self {
            api_base_url: non_empty("PLAYGROUND_API_URL").unwrap_or_else(default_api_url),
            public_key: non_empty("PLAYGROUND_PUBLIC_KEY"),
            secret_key: non_empty("PLAYGROUND_SECRET_KEY"),
            available_connectors,
            default_limit,
            ..Self::default()
        };
        debug!(
            api_base_url = %config.api_base_url,
            available = config.available_connectors.len(),
            has_public_key = config.public_key.is_some(),
            "Loaded configuration from environment"
        );
        Ok(config)
    }

    /// Load configuration from a TOML file.
    #[instrument(skip(path))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(ConfigErrorKind::Io(e.to_string())))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(ConfigErrorKind::Parse(e.to_string())))?;
        if config.default_limit == 0 {
            return Err(ConfigError::new(ConfigErrorKind::Invalid {
                key: "default_limit".into(),
                reason: "must be at least 1".into(),
            }));
        }
        Ok(config)
    }

    /// Whether `connector` is fully configured on the project.
    pub fn is_available(&self, connector: &str) -> bool {
        self.available_connectors.iter().any(|id| id == connector)
    }

    /// Keys to use for `connector`.
    ///
    /// Allow-listed connectors get the project keys when a public key is
    /// configured; everything else gets the demo pair.
    pub fn keys_for(&self, connector: &str) -> KeyPair {
        match (&self.public_key, self.is_available(connector)) {
            (Some(public_key), true) => KeyPair::new(public_key.clone(), self.secret_key.clone()),
            (None, true) => {
                warn!(connector, "Connector is allow-listed but no public key is configured");
                self.demo_keys()
            }
            (_, false) => self.demo_keys(),
        }
    }

    fn demo_keys(&self) -> KeyPair {
        KeyPair::new(
            self.demo_public_key.clone(),
            Some(self.demo_secret_key.clone()),
        )
    }
}

fn parse_limit(raw: &str) -> Result<u32, ConfigError> {
    let invalid = |reason: &str| {
        ConfigError::new(ConfigErrorKind::Invalid {
            key: "PLAYGROUND_DEFAULT_LIMIT".into(),
            reason: reason.into(),
        })
    };
    let limit: u32 = raw
        .trim()
        .parse()
        .map_err(|_| invalid("not a positive integer"))?;
    if limit == 0 {
        return Err(invalid("must be at least 1"));
    }
    Ok(limit)
}
