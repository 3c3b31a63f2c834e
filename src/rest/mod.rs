//! Addressing and resource infrastructure for the iControl REST API.
//!
//! This module provides:
//!
//! - **Path building**: segment validation, joining and full-path encoding
//!   used by the request builder
//! - **[`TmResource`] trait**: A standardized interface for CRUD operations
//! - **[`StatsResource`] trait**: Access to the `stats` sub-tree of a resource
//! - **[`Collection<T>`] and [`Stats`]**: Response envelopes
//! - **[`ResourceError`]**: Semantic error types for resource operations
//!
//! # Example
//!
//! ```rust,ignore
//! use bigip_rest::rest::resources::ltm::Pool;
//! use bigip_rest::rest::{ResourceError, TmResource};
//!
//! let pool = Pool {
//!     name: "web".to_string(),
//!     partition: Some("Common".to_string()),
//!     load_balancing_mode: Some("round-robin".to_string()),
//!     ..Pool::default()
//! };
//! let created = pool.create(&client).await?;
//!
//! match Pool::get(&client, "/Common/web").await {
//!     Ok(pool) => println!("{:?}", pool.full_path),
//!     Err(ResourceError::NotFound { .. }) => println!("gone"),
//!     Err(e) => return Err(e.into()),
//! }
//!
//! Pool::delete(&client, "/Common/web").await?;
//! ```

mod errors;
mod path;
mod resource;

pub mod resources;

pub use errors::ResourceError;
pub use path::{
    clean_path, decode_full_path, encode_full_path, escape_path, is_valid_path_segment_name,
    is_valid_path_segment_prefix, join_path, validate_full_path_component,
    validate_path_segment_name, FULL_PATH_SEPARATOR, NAME_MAY_NOT_BE, NAME_MAY_NOT_CONTAIN,
};
pub use resource::{
    Collection, NestedStats, StatValue, Stats, StatsEntry, StatsResource, TmResource, BASE_PATH,
    GTM_MANAGER, LTM_MANAGER, NET_MANAGER, STATS, SYS_MANAGER, TM_RESOURCE,
};
