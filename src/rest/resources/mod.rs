//! Typed wrappers for iControl REST configuration objects.
//!
//! Resources are grouped by the manager they live under:
//!
//! ```text
//! resources/
//!   ltm.rs   <- /mgmt/tm/ltm: pools, virtual servers, monitors, profiles
//!   gtm.rs   <- /mgmt/tm/gtm: wide IP pools
//!   net.rs   <- /mgmt/tm/net: route domains
//!   sys.rs   <- /mgmt/tm/sys: DNS resolver settings
//! ```
//!
//! # Using Resources
//!
//! ```rust,ignore
//! use bigip_rest::rest::resources::ltm::{Pool, Virtual};
//! use bigip_rest::rest::{StatsResource, TmResource};
//!
//! // List pools
//! let pools = Pool::list(&client).await?;
//!
//! // Fetch one virtual server and its statistics
//! let vs = Virtual::get(&client, "/Common/vs_https").await?;
//! let stats = Virtual::stats_for(&client, "/Common/vs_https").await?;
//!
//! // Change a single property
//! let vs: Virtual = Virtual::modify(
//!     &client,
//!     "/Common/vs_https",
//!     &serde_json::json!({"description": "public"}),
//! )
//! .await?;
//! ```

pub mod gtm;
pub mod ltm;
pub mod net;
pub mod sys;
