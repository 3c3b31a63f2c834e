//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// A validated BIG-IP user name.
///
/// # Example
///
/// ```rust
/// use bigip_rest::Username;
///
/// let user = Username::new("admin").unwrap();
/// assert_eq!(user.as_ref(), "admin");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    /// Creates a new validated user name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyUsername`] if the name is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConfigError::EmptyUsername);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated password.
///
/// The `Debug` implementation masks the value, displaying only
/// `Password(*****)`.
///
/// # Example
///
/// ```rust
/// use bigip_rest::Password;
///
/// let password = Password::new("hunter2").unwrap();
/// assert_eq!(format!("{:?}", password), "Password(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Creates a new validated password.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyPassword`] if the password is empty.
    pub fn new(password: impl Into<String>) -> Result<Self, ConfigError> {
        let password = password.into();
        if password.is_empty() {
            return Err(ConfigError::EmptyPassword);
        }
        Ok(Self(password))
    }
}

impl AsRef<str> for Password {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(*****)")
    }
}

/// A token sent in the `X-F5-Auth-Token` header.
///
/// Like [`Password`], the value is masked in debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Creates a new validated token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAuthToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ConfigError::EmptyAuthToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for AuthToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(*****)")
    }
}

/// A validated management endpoint URL.
///
/// The URL must use `http` or `https`, name a host, and carry no query or
/// fragment. An optional path (for appliances behind a reverse proxy) becomes
/// the start of every request path.
///
/// # Example
///
/// ```rust
/// use bigip_rest::HostUrl;
///
/// let url = HostUrl::new("https://10.0.0.1:8443/proxy").unwrap();
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), Some("10.0.0.1"));
/// assert_eq!(url.origin(), "https://10.0.0.1:8443");
/// assert_eq!(url.path(), "/proxy");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
    path_start: usize,
}

impl HostUrl {
    /// Creates a new validated host URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHostUrl`] if the URL is invalid.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into().trim().to_string();
        let invalid = || ConfigError::InvalidHostUrl { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(invalid());
        }

        if url.contains(['?', '#']) {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        let remainder = &url[host_start..];

        // Bracketed IPv6 literals contain colons
        let host_end = if remainder.starts_with('[') {
            remainder
                .find(']')
                .map(|i| host_start + i + 1)
                .ok_or_else(invalid)?
        } else {
            remainder
                .find([':', '/'])
                .map_or(url.len(), |i| host_start + i)
        };
        if host_end == host_start {
            return Err(invalid());
        }

        let path_start = url[host_end..]
            .find('/')
            .map_or(url.len(), |i| host_end + i);

        let port = &url[host_end..path_start];
        if let Some(port) = port.strip_prefix(':') {
            if port.is_empty() || !port.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }
        } else if !port.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
            path_start,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        let host = &self.url[self.host_start..self.host_end];
        if host.is_empty() {
            None
        } else {
            Some(host)
        }
    }

    /// Returns scheme, host and port without the path.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.url[..self.path_start]
    }

    /// Returns the path portion, or an empty string.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.url[self.path_start..]
    }
}

impl AsRef<str> for HostUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}
