//! Resource traits for iControl REST configuration objects.
//!
//! This module defines the [`TmResource`] trait, which provides a standardized
//! interface for objects under `/mgmt/tm`. Types that implement it gain
//! `list()`, `get()`, `create()`, `update()`, `modify()` and `delete()`
//! methods. [`StatsResource`] adds access to the `stats` sub-tree.
//!
//! # Implementing a Resource
//!
//! 1. Define a struct with serde derives using the appliance's camelCase
//!    property names
//! 2. Implement `TmResource` with the manager and resource names
//! 3. The trait provides default implementations for CRUD operations
//!
//! # Example
//!
//! ```rust,ignore
//! use bigip_rest::rest::{TmResource, LTM_MANAGER};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Default, Serialize, Deserialize)]
//! #[serde(rename_all = "camelCase")]
//! pub struct Node {
//!     pub name: String,
//!     #[serde(skip_serializing_if = "Option::is_none")]
//!     pub address: Option<String>,
//! }
//!
//! impl TmResource for Node {
//!     const NAME: &'static str = "Node";
//!     const MANAGER: &'static str = LTM_MANAGER;
//!     const RESOURCE: &'static str = "node";
//! }
//!
//! let nodes = Node::list(&client).await?;
//! let node = Node::get(&client, "/Common/10.0.0.2").await?;
//! ```

use std::collections::BTreeMap;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::clients::{HttpMethod, Request, RestClient};
use crate::rest::ResourceError;

/// First segment of every management API path.
pub const BASE_PATH: &str = "mgmt";

/// Resource category of the traffic management shell.
pub const TM_RESOURCE: &str = "tm";

/// Local traffic manager.
pub const LTM_MANAGER: &str = "ltm";

/// Global traffic manager.
pub const GTM_MANAGER: &str = "gtm";

/// Network manager.
pub const NET_MANAGER: &str = "net";

/// System manager.
pub const SYS_MANAGER: &str = "sys";

/// Name of the statistics sub-tree.
pub const STATS: &str = "stats";

/// A list of objects as returned by a collection endpoint.
///
/// The wire format is `{"kind": "...", "selfLink": "...", "items": [...]}`.
/// An empty collection omits `items`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection<T> {
    /// Collection kind, e.g. `tm:ltm:pool:poolcollectionstate`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    /// URL of the collection on the appliance.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub self_link: String,
    /// The objects.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> Collection<T> {
    /// Returns the number of objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the collection holds no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns an iterator over the objects.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// A single statistic: a counter, a description, or both.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatValue {
    /// Numeric value of a counter or gauge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
    /// Textual value such as an availability state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The statistics of one object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NestedStats {
    /// Stats kind.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    /// URL of the object's statistics.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub self_link: String,
    /// Statistics keyed by name, e.g. `clientside.curConns`.
    #[serde(default)]
    pub entries: BTreeMap<String, StatValue>,
}

impl NestedStats {
    /// Returns the numeric value of statistic `name`.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<i64> {
        self.entries.get(name).and_then(|stat| stat.value)
    }

    /// Returns the description of statistic `name`.
    #[must_use]
    pub fn description(&self, name: &str) -> Option<&str> {
        self.entries
            .get(name)
            .and_then(|stat| stat.description.as_deref())
    }
}

/// Wrapper the appliance puts around each object's statistics.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsEntry {
    /// The statistics of one object.
    #[serde(default)]
    pub nested_stats: NestedStats,
}

/// A response from a `stats` endpoint.
///
/// Entries are keyed by the self link of the object they describe.
///
/// # Example
///
/// ```rust
/// use bigip_rest::rest::Stats;
///
/// let stats: Stats = serde_json::from_str(r#"{
///     "kind": "tm:ltm:virtual:virtualstats",
///     "entries": {
///         "https://localhost/mgmt/tm/ltm/virtual/~Common~vs/stats": {
///             "nestedStats": {
///                 "entries": {
///                     "clientside.curConns": {"value": 3},
///                     "status.availabilityState": {"description": "available"}
///                 }
///             }
///         }
///     }
/// }"#).unwrap();
///
/// let vs = stats.objects().next().unwrap();
/// assert_eq!(vs.value("clientside.curConns"), Some(3));
/// assert_eq!(vs.description("status.availabilityState"), Some("available"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Stats kind.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    /// URL of the statistics.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub self_link: String,
    /// Per-object statistics.
    #[serde(default)]
    pub entries: BTreeMap<String, StatsEntry>,
}

impl Stats {
    /// Returns the statistics of every object in the response.
    pub fn objects(&self) -> impl Iterator<Item = &NestedStats> {
        self.entries.values().map(|entry| &entry.nested_stats)
    }
}

/// A configuration object under `/mgmt/tm/<manager>/<resource>`.
///
/// # Associated Constants
///
/// - `NAME`: The resource name used in errors (e.g., "Pool")
/// - `MANAGER`: The module namespace (e.g., [`LTM_MANAGER`])
/// - `RESOURCE`: The object type (e.g., "pool")
/// - `SUB_RESOURCE`: The object sub-type for types such as `monitor/tcp`
///
/// Objects are addressed by full path, either partition-qualified
/// (`/Common/web`, `Common/web`) or a bare name.
///
/// # Required Bounds
///
/// Resources must be serializable, deserializable, cloneable and thread-safe.
#[allow(async_fn_in_trait)]
pub trait TmResource: Serialize + DeserializeOwned + Clone + Send + Sync + Sized {
    /// The resource name used in error messages.
    const NAME: &'static str;

    /// The manager the resource belongs to.
    const MANAGER: &'static str;

    /// The resource type segment.
    const RESOURCE: &'static str;

    /// The sub-type segment, if objects live one level below `RESOURCE`.
    const SUB_RESOURCE: Option<&'static str> = None;

    /// Starts a request addressing the collection.
    fn collection_request(client: &RestClient, method: HttpMethod) -> Request<'_> {
        let request = client
            .verb(method)
            .prefix([BASE_PATH])
            .resource_category(TM_RESOURCE)
            .manager_name(Self::MANAGER)
            .resource(Self::RESOURCE);
        match Self::SUB_RESOURCE {
            Some(sub_resource) => request.sub_resource([sub_resource]),
            None => request,
        }
    }

    /// Starts a request addressing the object at `full_path`.
    fn instance_request<'c>(
        client: &'c RestClient,
        method: HttpMethod,
        full_path: &str,
    ) -> Request<'c> {
        let request = Self::collection_request(client, method);
        match Self::SUB_RESOURCE {
            Some(_) => request.sub_resource_instance([full_path]),
            None => request.resource_instance([full_path]),
        }
    }

    /// Lists every object of this type.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    async fn list(client: &RestClient) -> Result<Collection<Self>, ResourceError> {
        Self::collection_request(client, HttpMethod::Get)
            .do_json()
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, None))
    }

    /// Fetches the object at `full_path`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the object doesn't exist.
    async fn get(client: &RestClient, full_path: &str) -> Result<Self, ResourceError> {
        Self::instance_request(client, HttpMethod::Get, full_path)
            .do_json()
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, Some(full_path)))
    }

    /// Creates the object and returns it as stored by the appliance.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the appliance rejects the object.
    async fn create(&self, client: &RestClient) -> Result<Self, ResourceError> {
        Self::collection_request(client, HttpMethod::Post)
            .body_json(self)
            .do_json()
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, None))
    }

    /// Replaces the object at `full_path` with `self`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the object doesn't exist.
    async fn update(&self, client: &RestClient, full_path: &str) -> Result<Self, ResourceError> {
        Self::instance_request(client, HttpMethod::Put, full_path)
            .body_json(self)
            .do_json()
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, Some(full_path)))
    }

    /// Changes only the properties present in `changes`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the object doesn't exist.
    async fn modify<C: Serialize + Sync>(
        client: &RestClient,
        full_path: &str,
        changes: &C,
    ) -> Result<Self, ResourceError> {
        Self::instance_request(client, HttpMethod::Patch, full_path)
            .body_json(changes)
            .do_json()
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, Some(full_path)))
    }

    /// Deletes the object at `full_path`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the object doesn't exist.
    async fn delete(client: &RestClient, full_path: &str) -> Result<(), ResourceError> {
        Self::instance_request(client, HttpMethod::Delete, full_path)
            .do_empty()
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, Some(full_path)))
    }
}

/// A resource whose objects expose a `stats` sub-tree.
#[allow(async_fn_in_trait)]
pub trait StatsResource: TmResource {
    /// Fetches statistics for every object of this type.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    async fn stats(client: &RestClient) -> Result<Stats, ResourceError> {
        Self::collection_request(client, HttpMethod::Get)
            .sub_stats_resource([STATS])
            .do_json()
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, None))
    }

    /// Fetches statistics for the object at `full_path`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the object doesn't exist.
    async fn stats_for(client: &RestClient, full_path: &str) -> Result<Stats, ResourceError> {
        Self::instance_request(client, HttpMethod::Get, full_path)
            .sub_stats_resource([STATS])
            .do_json()
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, Some(full_path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BigIpConfig, HostUrl, Password, Username};

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    struct Widget {
        name: String,
    }

    impl TmResource for Widget {
        const NAME: &'static str = "Widget";
        const MANAGER: &'static str = LTM_MANAGER;
        const RESOURCE: &'static str = "widget";
    }

    impl StatsResource for Widget {}

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    struct Gadget {
        name: String,
    }

    impl TmResource for Gadget {
        const NAME: &'static str = "Gadget";
        const MANAGER: &'static str = GTM_MANAGER;
        const RESOURCE: &'static str = "pool";
        const SUB_RESOURCE: Option<&'static str> = Some("naptr");
    }

    fn client() -> RestClient {
        let config = BigIpConfig::builder()
            .host(HostUrl::new("https://10.0.0.1").unwrap())
            .credentials(Username::new("admin").unwrap(), Password::new("admin").unwrap())
            .build()
            .unwrap();
        RestClient::new(&config).unwrap()
    }

    #[test]
    fn test_collection_path() {
        let client = client();
        let request = Widget::collection_request(&client, HttpMethod::Get);
        assert_eq!(request.path(), "/mgmt/tm/ltm/widget");

        let request = Gadget::collection_request(&client, HttpMethod::Get);
        assert_eq!(request.path(), "/mgmt/tm/gtm/pool/naptr");
    }

    #[test]
    fn test_instance_path_uses_sub_resource_instance_when_nested() {
        let client = client();
        let request = Widget::instance_request(&client, HttpMethod::Get, "/Common/w1");
        assert_eq!(request.path(), "/mgmt/tm/ltm/widget/~Common~w1");

        let request = Gadget::instance_request(&client, HttpMethod::Get, "Common/g1");
        assert_eq!(request.path(), "/mgmt/tm/gtm/pool/naptr/Common~g1");
    }

    #[test]
    fn test_stats_path() {
        let client = client();
        let request = Widget::instance_request(&client, HttpMethod::Get, "/Common/w1")
            .sub_stats_resource([STATS]);
        assert_eq!(request.path(), "/mgmt/tm/ltm/widget/~Common~w1/stats");
    }

    #[test]
    fn test_collection_deserializes_without_items() {
        let collection: Collection<Widget> =
            serde_json::from_str(r#"{"kind":"tm:ltm:widget:widgetcollectionstate","selfLink":"https://localhost/mgmt/tm/ltm/widget"}"#)
                .unwrap();
        assert!(collection.is_empty());
        assert_eq!(collection.kind, "tm:ltm:widget:widgetcollectionstate");
    }

    #[test]
    fn test_collection_iterates_items() {
        let collection: Collection<Widget> =
            serde_json::from_str(r#"{"items":[{"name":"a"},{"name":"b"}]}"#).unwrap();
        assert_eq!(collection.len(), 2);
        let names: Vec<String> = collection.into_iter().map(|w| w.name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_nested_stats_lookup() {
        let stats = NestedStats {
            entries: BTreeMap::from([
                (
                    "clientside.bitsIn".to_string(),
                    StatValue {
                        value: Some(1024),
                        description: None,
                    },
                ),
                (
                    "status.enabledState".to_string(),
                    StatValue {
                        value: None,
                        description: Some("enabled".to_string()),
                    },
                ),
            ]),
            ..NestedStats::default()
        };
        assert_eq!(stats.value("clientside.bitsIn"), Some(1024));
        assert_eq!(stats.description("status.enabledState"), Some("enabled"));
        assert_eq!(stats.value("missing"), None);
    }
}
