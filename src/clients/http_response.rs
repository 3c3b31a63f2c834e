//! HTTP response types for the iControl REST client.
//!
//! This module provides the [`HttpResponse`] type, a fully read response,
//! and the classification of failure responses into [`HttpError`] values.

use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::clients::errors::{HttpError, RequestError};

/// Content type marker identifying a JSON error body.
const JSON_CONTENT_TYPE: &str = "application/json";

/// A response whose body has been read to the end.
///
/// # Example
///
/// ```rust
/// use bigip_rest::clients::HttpResponse;
/// use reqwest::header::HeaderMap;
/// use reqwest::StatusCode;
///
/// let response = HttpResponse::new(StatusCode::OK, HeaderMap::new(), b"{}".to_vec());
/// assert!(response.is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response from its parts.
    #[must_use]
    pub const fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Reads the whole body of `response`.
    ///
    /// The body is drained even for failure statuses so the connection can
    /// be reused.
    pub(crate) async fn read(response: reqwest::Response) -> Result<Self, reqwest::Error> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();
        Ok(Self::new(status, headers, body))
    }

    /// Returns the numeric status code.
    #[must_use]
    pub fn code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Returns `true` for statuses the appliance uses for success (200-206).
    #[must_use]
    pub fn is_ok(&self) -> bool {
        (200..=206).contains(&self.code())
    }

    /// Returns the `Content-Type` header, or an empty string.
    #[must_use]
    pub fn content_type(&self) -> &str {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
    }

    /// Returns the error carried by a failure response, or `None` on
    /// success.
    ///
    /// Failures without a JSON content type yield [`HttpError::Status`].
    /// JSON failures are decoded into [`HttpError::Api`]; an undecodable
    /// JSON body yields [`HttpError::ErrorBody`].
    #[must_use]
    pub fn error(&self) -> Option<HttpError> {
        if self.is_ok() {
            return None;
        }

        if !self.content_type().contains(JSON_CONTENT_TYPE) {
            return Some(HttpError::Status {
                code: self.code(),
                status: self.status.to_string(),
            });
        }

        Some(match RequestError::from_body(&self.body) {
            Ok(error) => HttpError::Api(error),
            Err(e) => HttpError::ErrorBody(e),
        })
    }

    /// Converts the response into its body, or the classified error.
    ///
    /// # Errors
    ///
    /// Returns the error described by [`error`](Self::error).
    pub fn into_body(self) -> Result<Vec<u8>, HttpError> {
        match self.error() {
            Some(error) => Err(error),
            None => Ok(self.body),
        }
    }

    /// Decodes a success body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the classified error for failure responses and
    /// [`HttpError::Decode`] if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(self) -> Result<T, HttpError> {
        let body = self.into_body()?;
        serde_json::from_slice(&body).map_err(HttpError::Decode)
    }
}
