//! Configuration types for the iControl REST client.
//!
//! # Overview
//!
//! - [`BigIpConfig`]: Connection settings for one appliance
//! - [`BigIpConfigBuilder`]: A builder for constructing [`BigIpConfig`] instances
//! - [`ContentConfig`]: Content negotiation defaults
//! - [`HostUrl`], [`Username`], [`Password`], [`AuthToken`]: Validated newtypes
//!
//! # Example
//!
//! ```rust
//! use bigip_rest::{BigIpConfig, HostUrl, Password, Username};
//! use std::time::Duration;
//!
//! let config = BigIpConfig::builder()
//!     .host(HostUrl::new("https://10.0.0.1").unwrap())
//!     .credentials(Username::new("admin").unwrap(), Password::new("admin").unwrap())
//!     .timeout(Duration::from_secs(30))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
//! ```

mod newtypes;

pub use newtypes::{AuthToken, HostUrl, Password, Username};

use std::time::Duration;

use crate::error::ConfigError;

/// Default content type for request and response bodies.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Content negotiation settings applied to every request.
///
/// When `accept` is set it is sent verbatim as the `Accept` header.
/// Otherwise `Accept` is derived from `content_type` as
/// `<content_type>, */*`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentConfig {
    /// Explicit `Accept` header value.
    pub accept: Option<String>,
    /// Content type of request bodies.
    pub content_type: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            accept: None,
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
        }
    }
}

impl ContentConfig {
    /// Returns the `Accept` header value, if any.
    #[must_use]
    pub fn accept_header(&self) -> Option<String> {
        match &self.accept {
            Some(accept) if !accept.is_empty() => Some(accept.clone()),
            _ if !self.content_type.is_empty() => Some(format!("{}, */*", self.content_type)),
            _ => None,
        }
    }
}

/// How requests authenticate against the appliance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
    /// HTTP basic authentication.
    Basic {
        /// User name.
        username: Username,
        /// Password.
        password: Password,
    },
    /// Token sent in the `X-F5-Auth-Token` header.
    Token(AuthToken),
}

/// Connection settings for one appliance.
///
/// # Thread Safety
///
/// `BigIpConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct BigIpConfig {
    host: HostUrl,
    credentials: Credentials,
    api_path: String,
    timeout: Option<Duration>,
    accept_invalid_certs: bool,
    user_agent_prefix: Option<String>,
    content: ContentConfig,
}

impl BigIpConfig {
    /// Creates a new builder for constructing a `BigIpConfig`.
    #[must_use]
    pub fn builder() -> BigIpConfigBuilder {
        BigIpConfigBuilder::new()
    }

    /// Returns the management endpoint.
    #[must_use]
    pub const fn host(&self) -> &HostUrl {
        &self.host
    }

    /// Returns the configured credentials.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the path appended to the host path for every request.
    #[must_use]
    pub fn api_path(&self) -> &str {
        &self.api_path
    }

    /// Returns the default per-request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns whether invalid TLS certificates are accepted.
    #[must_use]
    pub const fn accept_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the content negotiation settings.
    #[must_use]
    pub const fn content(&self) -> &ContentConfig {
        &self.content
    }
}

// Verify BigIpConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BigIpConfig>();
};

/// Builder for constructing [`BigIpConfig`] instances.
///
/// `host` and one form of credentials are required.
///
/// # Defaults
///
/// - `api_path`: empty
/// - `timeout`: `None`
/// - `accept_invalid_certs`: `false`
/// - `user_agent_prefix`: `None`
/// - `content`: [`ContentConfig::default`]
#[derive(Debug, Default)]
pub struct BigIpConfigBuilder {
    host: Option<HostUrl>,
    credentials: Option<Credentials>,
    api_path: Option<String>,
    timeout: Option<Duration>,
    accept_invalid_certs: Option<bool>,
    user_agent_prefix: Option<String>,
    content: Option<ContentConfig>,
}

impl BigIpConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the management endpoint (required).
    #[must_use]
    pub fn host(mut self, host: HostUrl) -> Self {
        self.host = Some(host);
        self
    }

    /// Uses HTTP basic authentication.
    #[must_use]
    pub fn credentials(mut self, username: Username, password: Password) -> Self {
        self.credentials = Some(Credentials::Basic { username, password });
        self
    }

    /// Uses token authentication.
    #[must_use]
    pub fn auth_token(mut self, token: AuthToken) -> Self {
        self.credentials = Some(Credentials::Token(token));
        self
    }

    /// Sets a path inserted between the host path and every request path.
    #[must_use]
    pub fn api_path(mut self, path: impl Into<String>) -> Self {
        self.api_path = Some(path.into());
        self
    }

    /// Sets the default per-request timeout.
    ///
    /// A zero duration disables the default.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Accepts self-signed or otherwise invalid TLS certificates.
    #[must_use]
    pub const fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = Some(accept);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the content negotiation settings.
    #[must_use]
    pub fn content(mut self, content: ContentConfig) -> Self {
        self.content = Some(content);
        self
    }

    /// Builds the [`BigIpConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `host` is not set and
    /// [`ConfigError::MissingCredentials`] if no credentials were given.
    pub fn build(self) -> Result<BigIpConfig, ConfigError> {
        let host = self
            .host
            .ok_or(ConfigError::MissingRequiredField { field: "host" })?;
        let credentials = self.credentials.ok_or(ConfigError::MissingCredentials)?;

        Ok(BigIpConfig {
            host,
            credentials,
            api_path: self.api_path.unwrap_or_default(),
            timeout: self.timeout.filter(|t| !t.is_zero()),
            accept_invalid_certs: self.accept_invalid_certs.unwrap_or(false),
            user_agent_prefix: self.user_agent_prefix,
            content: self.content.unwrap_or_default(),
        })
    }
}
