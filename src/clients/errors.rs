//! HTTP-specific error types for the iControl REST client.
//!
//! This module contains the error types produced while building and
//! executing a [`Request`](crate::clients::Request).
//!
//! # Error Handling
//!
//! - [`InvalidRequestError`]: A setter rejected a value; stored on the request
//!   and surfaced at execution without any network I/O
//! - [`RequestError`]: A JSON error body returned by the appliance
//! - [`HttpError`]: Unified error type returned by request execution
//!
//! # Example
//!
//! ```rust,ignore
//! use bigip_rest::clients::HttpError;
//!
//! match request.do_raw().await {
//!     Ok(body) => println!("{} bytes", body.len()),
//!     Err(HttpError::Api(e)) => println!("API error {}: {}", e.code, e.message),
//!     Err(HttpError::InvalidRequest(e)) => println!("Bad request: {e}"),
//!     Err(HttpError::Timeout { timeout }) => println!("Gave up after {timeout:?}"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// The write-once hierarchy fields of a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestField {
    /// Top-level grouping, e.g. `tm`.
    ResourceCategory,
    /// Module namespace within a category, e.g. `ltm`.
    ManagerName,
    /// Configuration object type, e.g. `pool`.
    Resource,
    /// Full path of the addressed object.
    ResourceInstance,
    /// Nested object type.
    SubResource,
    /// Full path of the nested object.
    SubResourceInstance,
    /// Stats sub-tree, e.g. `stats`.
    SubStatsResource,
}

impl fmt::Display for RequestField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ResourceCategory => "resource category",
            Self::ManagerName => "manager name",
            Self::Resource => "resource",
            Self::ResourceInstance => "resource instance",
            Self::SubResource => "sub-resource",
            Self::SubResourceInstance => "sub-resource instance",
            Self::SubStatsResource => "sub-stats resource",
        };
        f.write_str(name)
    }
}

/// Error recorded while configuring a request.
///
/// The first error recorded on a request wins; later setters become no-ops
/// and execution fails with this error before any I/O is attempted.
#[derive(Debug, Error)]
pub enum InvalidRequestError {
    /// A write-once hierarchy field was set twice.
    #[error("{field} already set to {current:?}, cannot change to {attempted:?}")]
    FieldAlreadySet {
        /// The field that was already set.
        field: RequestField,
        /// The value that is kept.
        current: String,
        /// The rejected value.
        attempted: String,
    },

    /// A value is not a legal path segment.
    #[error("invalid {field} {value:?}: [{}]", .violations.join(", "))]
    InvalidSegment {
        /// The field being set.
        field: RequestField,
        /// The rejected value.
        value: String,
        /// Every rule the value violates.
        violations: Vec<String>,
    },

    /// The manager name was empty.
    #[error("manager name may not be empty")]
    EmptyManagerName,

    /// The body file could not be read.
    #[error("cannot read request body from {}: {source}", .path.display())]
    BodyFile {
        /// Path of the file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The body could not be serialized to JSON.
    #[error("cannot serialize request body: {0}")]
    BodySerialization(#[source] serde_json::Error),

    /// A header name or value is not valid HTTP.
    #[error("invalid header {name:?}")]
    InvalidHeader {
        /// The header name.
        name: String,
    },
}

/// An error body returned by the appliance.
///
/// The wire format is
/// `{"code": 404, "message": "...", "errorStack": ["...", ...]}`; every
/// field is optional.
///
/// # Example
///
/// ```rust
/// use bigip_rest::clients::RequestError;
///
/// let error = RequestError::from_body(
///     br#"{"code":404,"message":"not found","errorStack":["at a","at b"]}"#,
/// ).unwrap();
///
/// assert_eq!(error.to_string(), "not found (code: 404)");
/// assert_eq!(error.detailed(), "not found (code: 404)\n   at a\n   at b");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Error)]
#[error("{message} (code: {code})")]
pub struct RequestError {
    /// Numeric error code, usually the HTTP status.
    #[serde(default)]
    pub code: i64,
    /// Human readable message.
    #[serde(default)]
    pub message: String,
    /// Nested error stack in the order the appliance reported it.
    #[serde(default, rename = "errorStack")]
    pub error_stack: Vec<String>,
}

impl RequestError {
    /// Decodes a `RequestError` from a response body.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if the body is not a valid error document.
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// Returns the message followed by each error-stack entry on its own
    /// indented line.
    #[must_use]
    pub fn detailed(&self) -> String {
        let mut out = self.to_string();
        for entry in &self.error_stack {
            out.push_str("\n   ");
            out.push_str(entry);
        }
        out
    }
}

/// Unified error type for request execution.
///
/// # Example
///
/// ```rust,ignore
/// match client.get().prefix(["mgmt"]).do_raw().await {
///     Ok(body) => { /* decode */ }
///     Err(HttpError::Api(e)) => { /* appliance rejected the call */ }
///     Err(HttpError::Status { status, .. }) => { /* non-JSON failure */ }
///     Err(e) => { /* transport, timeout, decode or build error */ }
/// }
/// ```
#[derive(Debug, Error)]
pub enum HttpError {
    /// The request was misconfigured; no I/O was attempted.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidRequestError),

    /// The appliance returned a JSON error body.
    #[error(transparent)]
    Api(#[from] RequestError),

    /// A failure response did not carry a JSON body.
    #[error("the http response error status code: {status}")]
    Status {
        /// Numeric status code.
        code: u16,
        /// Status line, e.g. `502 Bad Gateway`.
        status: String,
    },

    /// A JSON failure body could not be decoded.
    #[error("cannot read error message from response body: {0}")]
    ErrorBody(#[source] serde_json::Error),

    /// A success body could not be decoded.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The configured deadline elapsed before the response was read.
    #[error("request timed out after {timeout:?}")]
    Timeout {
        /// The deadline that elapsed.
        timeout: Duration,
    },

    /// The caller cancelled the request.
    #[error("request cancelled")]
    Cancelled,

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the decoded API error, if this is one.
    #[must_use]
    pub const fn api_error(&self) -> Option<&RequestError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the HTTP status code reported by the appliance, if any.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(e) => u16::try_from(e.code).ok(),
            Self::Status { code, .. } => Some(*code),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` for deadline and cancellation errors.
    #[must_use]
    pub fn is_cancellation(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Cancelled => true,
            Self::Network(e) => e.is_timeout(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_display() {
        let error = RequestError {
            code: 404,
            message: "not found".to_string(),
            error_stack: vec![],
        };
        assert_eq!(error.to_string(), "not found (code: 404)");
        assert_eq!(error.detailed(), "not found (code: 404)");
    }

    #[test]
    fn test_request_error_detailed_keeps_stack_order() {
        let error = RequestError {
            code: 400,
            message: "bad".to_string(),
            error_stack: vec!["first".to_string(), "second".to_string()],
        };
        assert_eq!(error.detailed(), "bad (code: 400)\n   first\n   second");
    }

    #[test]
    fn test_request_error_decodes_partial_body() {
        let error = RequestError::from_body(br#"{"message":"oops"}"#).unwrap();
        assert_eq!(error.code, 0);
        assert_eq!(error.message, "oops");
        assert!(error.error_stack.is_empty());

        assert!(RequestError::from_body(b"<html>").is_err());
    }

    #[test]
    fn test_field_already_set_message() {
        let error = InvalidRequestError::FieldAlreadySet {
            field: RequestField::Resource,
            current: "pool".to_string(),
            attempted: "virtual".to_string(),
        };
        assert_eq!(
            error.to_string(),
            r#"resource already set to "pool", cannot change to "virtual""#
        );
    }

    #[test]
    fn test_invalid_segment_lists_violations() {
        let error = InvalidRequestError::InvalidSegment {
            field: RequestField::SubResource,
            value: "a/%".to_string(),
            violations: vec![
                "may not contain '/'".to_string(),
                "may not contain '%'".to_string(),
            ],
        };
        let message = error.to_string();
        assert!(message.starts_with(r#"invalid sub-resource "a/%""#));
        assert!(message.contains("may not contain '/', may not contain '%'"));
    }

    #[test]
    fn test_http_error_helpers() {
        let api = HttpError::Api(RequestError {
            code: 409,
            message: "conflict".to_string(),
            error_stack: vec![],
        });
        assert_eq!(api.status_code(), Some(409));
        assert_eq!(api.api_error().map(|e| e.code), Some(409));
        assert!(!api.is_cancellation());

        let status = HttpError::Status {
            code: 502,
            status: "502 Bad Gateway".to_string(),
        };
        assert_eq!(status.status_code(), Some(502));
        assert_eq!(
            status.to_string(),
            "the http response error status code: 502 Bad Gateway"
        );

        let timeout = HttpError::Timeout {
            timeout: Duration::from_secs(30),
        };
        assert!(timeout.is_cancellation());
        assert_eq!(timeout.to_string(), "request timed out after 30s");
        assert!(HttpError::Cancelled.is_cancellation());
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let _: &dyn std::error::Error = &RequestError::default();
        let _: &dyn std::error::Error = &InvalidRequestError::EmptyManagerName;
        let _: &dyn std::error::Error = &HttpError::Cancelled;
    }
}
