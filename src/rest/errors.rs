//! Resource-specific error types for iControl REST operations.
//!
//! This module contains the error type returned by resource wrappers,
//! extending [`HttpError`] with resource semantics.
//!
//! # Error Handling
//!
//! - **404**: [`ResourceError::NotFound`] - The object doesn't exist
//! - **Anything else**: [`ResourceError::Http`] - Wrapped HTTP error
//!
//! # Example
//!
//! ```rust,ignore
//! use bigip_rest::rest::{ResourceError, TmResource};
//! use bigip_rest::rest::resources::ltm::Pool;
//!
//! match Pool::get(&client, "/Common/web").await {
//!     Ok(pool) => println!("Found: {}", pool.name),
//!     Err(ResourceError::NotFound { resource, full_path }) => {
//!         println!("{resource} {full_path} not found");
//!     }
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use crate::clients::HttpError;
use thiserror::Error;

/// Error type for resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The object was not found (HTTP 404).
    #[error("{resource} {full_path} not found")]
    NotFound {
        /// The type name of the resource (e.g., "Pool", "Virtual").
        resource: &'static str,
        /// The full path that was requested.
        full_path: String,
    },

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl ResourceError {
    /// Maps an execution error for `resource` at `full_path`.
    ///
    /// A 404 reported by the appliance becomes [`ResourceError::NotFound`];
    /// everything else is wrapped unchanged.
    #[must_use]
    pub fn from_http(error: HttpError, resource: &'static str, full_path: Option<&str>) -> Self {
        match (error.status_code(), full_path) {
            (Some(404), Some(full_path)) => Self::NotFound {
                resource,
                full_path: full_path.to_string(),
            },
            _ => Self::Http(error),
        }
    }

    /// Returns the HTTP status code, if the appliance reported one.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Http(e) => e.status_code(),
        }
    }
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::RequestError;

    fn api_error(code: i64) -> HttpError {
        HttpError::Api(RequestError {
            code,
            message: "boom".to_string(),
            error_stack: vec![],
        })
    }

    #[test]
    fn test_not_found_error_formats_message_with_resource_and_path() {
        let error = ResourceError::NotFound {
            resource: "Pool",
            full_path: "/Common/web".to_string(),
        };
        assert_eq!(error.to_string(), "Pool /Common/web not found");
        assert_eq!(error.status_code(), Some(404));
    }

    #[test]
    fn test_from_http_maps_404_to_not_found() {
        let error = ResourceError::from_http(api_error(404), "Pool", Some("/Common/web"));
        assert!(matches!(
            error,
            ResourceError::NotFound { resource: "Pool", ref full_path } if full_path == "/Common/web"
        ));

        let error = ResourceError::from_http(
            HttpError::Status {
                code: 404,
                status: "404 Not Found".to_string(),
            },
            "Virtual",
            Some("vs"),
        );
        assert!(matches!(error, ResourceError::NotFound { .. }));
    }

    #[test]
    fn test_from_http_keeps_other_errors() {
        let error = ResourceError::from_http(api_error(409), "Pool", Some("/Common/web"));
        assert!(matches!(error, ResourceError::Http(HttpError::Api(_))));
        assert_eq!(error.to_string(), "boom (code: 409)");

        // A collection that is missing has no object path to report
        let error = ResourceError::from_http(api_error(404), "Pool", None);
        assert!(matches!(error, ResourceError::Http(_)));
    }

    #[test]
    fn test_from_http_error_conversion() {
        let resource_error: ResourceError = HttpError::Cancelled.into();
        assert!(matches!(resource_error, ResourceError::Http(HttpError::Cancelled)));
    }
}
