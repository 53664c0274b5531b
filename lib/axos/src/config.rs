//! Client configuration types.
//!
//! [`ClientConfig`] tunes the HTTP layer; [`AxosConfig`] describes one AXOS
//! server (base URL, credentials, timeout, certificate checking) and is what
//! [`crate::AxosClient`] is built from.

use std::time::Duration;

use crate::{Error, Result};

/// Environment variable holding the base URL of the SMx REST service.
pub const ENV_HOST: &str = "SMX_HOST";
/// Environment variable holding the basic-auth user name.
pub const ENV_USERNAME: &str = "SMX_USERNAME";
/// Environment variable holding the basic-auth password.
pub const ENV_PASSWORD: &str = "SMX_PASSWORD";

/// Default timeout for connecting and for the whole request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Default `User-Agent` header value.
pub const DEFAULT_USER_AGENT: &str = concat!("axos-rs/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// HTTP layer
// ============================================================================

/// Configuration for the HTTP client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout duration.
    pub timeout: Duration,
    /// Connection timeout duration.
    pub connect_timeout: Duration,
    /// Skip server certificate verification.
    pub accept_invalid_certs: bool,
    /// Maximum idle connections per host.
    pub pool_idle_per_host: usize,
    /// Idle connection timeout.
    pub pool_idle_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_TIMEOUT,
            accept_invalid_certs: false,
            pool_idle_per_host: 32,
            pool_idle_timeout: Duration::from_secs(90),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    accept_invalid_certs: Option<bool>,
    pool_idle_per_host: Option<usize>,
    pool_idle_timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Set the request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Accept any server certificate (self-signed SMx installs).
    #[must_use]
    pub const fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = Some(accept);
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub const fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.pool_idle_per_host = Some(count);
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub const fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = Some(timeout);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> ClientConfig {
        let defaults = ClientConfig::default();
        ClientConfig {
            timeout: self.timeout.unwrap_or(defaults.timeout),
            connect_timeout: self.connect_timeout.unwrap_or(defaults.connect_timeout),
            accept_invalid_certs: self
                .accept_invalid_certs
                .unwrap_or(defaults.accept_invalid_certs),
            pool_idle_per_host: self
                .pool_idle_per_host
                .unwrap_or(defaults.pool_idle_per_host),
            pool_idle_timeout: self.pool_idle_timeout.unwrap_or(defaults.pool_idle_timeout),
        }
    }
}

// ============================================================================
// AXOS server
// ============================================================================

/// Connection settings for one AXOS / SMx server.
#[derive(Clone)]
pub struct AxosConfig {
    /// Base URL of the REST service, e.g. `https://smx:18443/rest/v1/`.
    pub url: String,
    /// Basic-auth user name.
    pub username: String,
    /// Basic-auth password.
    pub password: String,
    /// Applied to both the connect phase and the whole request.
    pub timeout: Duration,
    /// Verify the server certificate. Off by default: SMx ships self-signed.
    pub verify: bool,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl std::fmt::Debug for AxosConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AxosConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("verify", &self.verify)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl AxosConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> AxosConfigBuilder {
        AxosConfigBuilder::default()
    }

    /// Read `SMX_HOST`, `SMX_USERNAME` and `SMX_PASSWORD` from the process
    /// environment. Timeout and verification keep their defaults.
    ///
    /// Meant for the application entry point; the client itself never looks
    /// at the environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a variable is missing or not unicode.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`AxosConfig::from_env`] with a custom variable source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a variable is missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| {
            lookup(name).ok_or_else(|| Error::config(format!("{name} is not set")))
        };
        Self::builder()
            .url(var(ENV_HOST)?)
            .username(var(ENV_USERNAME)?)
            .password(var(ENV_PASSWORD)?)
            .build()
    }

    /// HTTP layer settings derived from this configuration.
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::builder()
            .timeout(self.timeout)
            .connect_timeout(self.timeout)
            .accept_invalid_certs(!self.verify)
            .build()
    }
}

/// Builder for [`AxosConfig`].
#[derive(Debug, Clone, Default)]
pub struct AxosConfigBuilder {
    url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    timeout: Option<Duration>,
    verify: Option<bool>,
    user_agent: Option<String>,
}

impl AxosConfigBuilder {
    /// Set the base URL.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the basic-auth user name.
    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the basic-auth password.
    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set the timeout (default 20 seconds).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Enable or disable certificate verification (default off).
    #[must_use]
    pub const fn verify(mut self, verify: bool) -> Self {
        self.verify = Some(verify);
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the URL is missing or empty. Credentials
    /// default to empty strings.
    pub fn build(self) -> Result<AxosConfig> {
        let url = self
            .url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| Error::config("base URL is not set"))?;

        Ok(AxosConfig {
            url,
            username: self.username.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            verify: self.verify.unwrap_or(false),
            user_agent: self
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        })
    }
}
