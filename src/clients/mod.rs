//! HTTP client types for iControl REST communication.
//!
//! This module provides the request layer of the library: a client bound to
//! one appliance, a hierarchical request builder and response handling.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`RestClient`]: The async client holding connection defaults
//! - [`Request`]: A hierarchical request under construction
//! - [`HttpResponse`]: A fully read response
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, PATCH, DELETE)
//! - [`RequestBody`]: The body forms a request can carry
//! - [`HttpError`]: Errors returned by request execution
//! - [`RequestError`]: Error bodies returned by the appliance
//!
//! # Example
//!
//! ```rust,ignore
//! use bigip_rest::{BigIpConfig, HostUrl, Password, RestClient, Username};
//! use std::time::Duration;
//!
//! let config = BigIpConfig::builder()
//!     .host(HostUrl::new("https://10.0.0.1")?)
//!     .credentials(Username::new("admin")?, Password::new("admin")?)
//!     .build()?;
//! let client = RestClient::new(&config)?;
//!
//! let pool: serde_json::Value = client
//!     .get()
//!     .prefix(["mgmt"])
//!     .resource_category("tm")
//!     .manager_name("ltm")
//!     .resource("pool")
//!     .resource_instance(["Common", "web"])
//!     .timeout(Duration::from_secs(30))
//!     .do_json()
//!     .await?;
//! ```
//!
//! # Error Classification
//!
//! Statuses 200 through 206 are successes. Any other status is an error:
//!
//! - **JSON body**: decoded into [`RequestError`] and returned as [`HttpError::Api`]
//! - **Undecodable JSON body**: [`HttpError::ErrorBody`]
//! - **Any other content type**: [`HttpError::Status`] carrying the status line

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{HttpError, InvalidRequestError, RequestError, RequestField};
pub use http_client::{RestClient, AUTH_TOKEN_HEADER, SDK_VERSION};
pub use http_request::{format_duration, HttpMethod, Request, RequestBody, TIMEOUT_PARAM};
pub use http_response::HttpResponse;
