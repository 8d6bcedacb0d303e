//! Client configuration.
//!
//! Holds the credential, endpoint and defaults shared by both front ends.
//! Nothing here touches the network; validation happens when a client is
//! constructed from the config.

use std::time::Duration;

/// Production endpoint used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.fabric.computer";

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("fabric-sdk-rust/", env!("CARGO_PKG_VERSION"));

pub const ENV_API_KEY: &str = "FABRIC_API_KEY";
pub const ENV_BASE_URL: &str = "FABRIC_BASE_URL";
pub const ENV_AGENT_ID: &str = "FABRIC_AGENT_ID";
pub const ENV_TIMEOUT_SECS: &str = "FABRIC_TIMEOUT_SECS";

/// Settings for a `Fabric` or `FabricAsync` handle.
#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    /// Agent used by operations that act on behalf of an agent when the
    /// caller does not pass one explicitly.
    pub agent_id: Option<String>,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            agent_id: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_agent_id(mut self, agent_id: impl Into<String>) -> Self {
        self.agent_id = Some(agent_id.into());
        self
    }

    /// Build a config from `FABRIC_*` environment variables.
    ///
    /// Returns `None` when `FABRIC_API_KEY` is unset or empty.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    ///
    /// Unset or empty values fall back to the defaults. An unparseable
    /// `FABRIC_TIMEOUT_SECS` is ignored.
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = Self::new(get(ENV_API_KEY)?);
        if let Some(base_url) = get(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(secs) = get(ENV_TIMEOUT_SECS).and_then(|s| s.trim().parse::<u64>().ok()) {
            config.timeout = Duration::from_secs(secs);
        }
        config.agent_id = get(ENV_AGENT_ID);
        Some(config)
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("agent_id", &self.agent_id)
            .finish()
    }
}
