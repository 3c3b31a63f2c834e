//! Error types for client configuration.
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation before any request is built.
//!
//! # Example
//!
//! ```rust
//! use bigip_rest::{ConfigError, Username};
//!
//! let result = Username::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyUsername)));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring a client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Username cannot be empty.
    #[error("Username cannot be empty. Please provide the name of a BIG-IP user.")]
    EmptyUsername,

    /// Password cannot be empty.
    #[error("Password cannot be empty. Please provide the password of the BIG-IP user.")]
    EmptyPassword,

    /// Auth token cannot be empty.
    #[error("Auth token cannot be empty. Please provide a token issued by /mgmt/shared/authn/login.")]
    EmptyAuthToken,

    /// Host URL is invalid.
    #[error("Invalid host URL '{url}'. Please provide an http or https URL without query or fragment (e.g., 'https://10.0.0.1:8443').")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Neither basic credentials nor an auth token were configured.
    #[error("No credentials configured. Set either a username and password or an auth token.")]
    MissingCredentials,

    /// A value cannot be sent as an HTTP header.
    #[error("Invalid value for header '{header}'.")]
    InvalidHeaderValue {
        /// The header the value was meant for.
        header: &'static str,
    },

    /// The underlying HTTP client could not be created.
    #[error("Failed to create HTTP client: {reason}")]
    HttpClient {
        /// Description of the failure.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_username_error_message() {
        let message = ConfigError::EmptyUsername.to_string();
        assert!(message.contains("Username cannot be empty"));
    }

    #[test]
    fn test_invalid_host_url_error_message() {
        let error = ConfigError::InvalidHostUrl {
            url: "ftp://box".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("ftp://box"));
        assert!(message.contains("http or https"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField { field: "host" };
        let message = error.to_string();
        assert!(message.contains("host"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::MissingCredentials;
        let _: &dyn std::error::Error = &error;
    }
}
