//! # BIG-IP iControl REST client
//!
//! A Rust client for the iControl REST management API of BIG-IP appliances,
//! providing type-safe configuration, a hierarchical request builder and
//! typed wrappers for common configuration objects.
//!
//! ## Overview
//!
//! This library provides:
//! - Type-safe configuration via [`BigIpConfig`] and [`BigIpConfigBuilder`]
//! - Validated newtypes for the endpoint and credentials
//! - A [`RestClient`] holding connection defaults for one appliance
//! - A hierarchical [`Request`] builder that renders
//!   `/mgmt/<category>/<manager>/<resource>/<instance>/...` URLs
//! - Error decoding of the appliance's JSON error bodies
//! - Resource wrappers under [`rest::resources`]
//!
//! ## Quick Start
//!
//! ```rust
//! use bigip_rest::{BigIpConfig, HostUrl, Password, RestClient, Username};
//! use std::time::Duration;
//!
//! let config = BigIpConfig::builder()
//!     .host(HostUrl::new("https://10.0.0.1").unwrap())
//!     .credentials(Username::new("admin").unwrap(), Password::new("admin").unwrap())
//!     .accept_invalid_certs(true)
//!     .timeout(Duration::from_secs(30))
//!     .build()
//!     .unwrap();
//!
//! let client = RestClient::new(&config).unwrap();
//!
//! let request = client
//!     .get()
//!     .prefix(["mgmt"])
//!     .resource_category("tm")
//!     .manager_name("ltm")
//!     .resource("pool")
//!     .resource_instance(["Common", "my-pool"]);
//!
//! assert!(request.error().is_none());
//! assert_eq!(
//!     request.url(),
//!     "https://10.0.0.1/mgmt/tm/ltm/pool/Common~my-pool?timeout=30s"
//! );
//! ```
//!
//! ## Executing Requests
//!
//! ```rust,ignore
//! use bigip_rest::HttpError;
//!
//! match request.do_raw().await {
//!     Ok(body) => println!("{}", String::from_utf8_lossy(&body)),
//!     Err(HttpError::Api(e)) => println!("{}", e.detailed()),
//!     Err(e) => println!("request failed: {e}"),
//! }
//! ```
//!
//! ## Using Resources
//!
//! ```rust,ignore
//! use bigip_rest::rest::resources::ltm::Virtual;
//! use bigip_rest::rest::{StatsResource, TmResource};
//!
//! let virtuals = Virtual::list(&client).await?;
//! let stats = Virtual::stats_for(&client, "/Common/vs_https").await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Newtypes validate on construction; request
//!   setters record the first error and execution reports it without I/O
//! - **Thread-safe**: Configuration and clients are `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio async runtime

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{
    AuthToken, BigIpConfig, BigIpConfigBuilder, ContentConfig, Credentials, HostUrl, Password,
    Username,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    HttpError, HttpMethod, HttpResponse, InvalidRequestError, Request, RequestBody, RequestError,
    RestClient,
};

// Re-export resource types
pub use rest::{ResourceError, StatsResource, TmResource};
