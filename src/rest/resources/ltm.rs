//! Local traffic manager resources (`/mgmt/tm/ltm`).
//!
//! # Example
//!
//! ```rust,ignore
//! use bigip_rest::rest::resources::ltm::{Pool, Virtual};
//! use bigip_rest::rest::{StatsResource, TmResource};
//!
//! let pools = Pool::list(&client).await?;
//! for pool in pools.iter() {
//!     println!("{} ({:?})", pool.name, pool.load_balancing_mode);
//! }
//!
//! let members = Pool::members(&client, "/Common/web").await?;
//! let stats = Virtual::stats_for(&client, "/Common/vs_https").await?;
//! ```

use serde::{Deserialize, Serialize};

use crate::clients::{HttpMethod, RestClient};
use crate::rest::{Collection, ResourceError, StatsResource, TmResource, LTM_MANAGER};

/// Sub-collection holding the members of a pool.
pub const POOL_MEMBERS: &str = "members";

/// A load balancing pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    /// Object kind, e.g. `tm:ltm:pool:poolstate`.
    #[serde(default, skip_serializing)]
    pub kind: Option<String>,
    /// Name of the pool.
    pub name: String,
    /// Partition holding the pool.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition: Option<String>,
    /// Partition-qualified name, e.g. `/Common/web`.
    #[serde(default, skip_serializing)]
    pub full_path: Option<String>,
    /// Configuration generation.
    #[serde(default, skip_serializing)]
    pub generation: Option<u64>,
    /// URL of the pool on the appliance.
    #[serde(default, skip_serializing)]
    pub self_link: Option<String>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Load balancing method, e.g. `round-robin`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_balancing_mode: Option<String>,
    /// Health monitor rule, e.g. `/Common/http and /Common/tcp`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor: Option<String>,
    /// Minimum number of active members for priority group activation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_active_members: Option<u32>,
    /// Seconds a newly enabled member ramps up traffic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slow_ramp_time: Option<u32>,
    /// Action when every member is down, e.g. `reset`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_down_action: Option<String>,
    /// Members to create along with the pool.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<PoolMember>,
}

impl TmResource for Pool {
    const NAME: &'static str = "Pool";
    const MANAGER: &'static str = LTM_MANAGER;
    const RESOURCE: &'static str = "pool";
}

impl Pool {
    /// Lists the members of the pool at `pool`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the pool doesn't exist.
    pub async fn members(
        client: &RestClient,
        pool: &str,
    ) -> Result<Collection<PoolMember>, ResourceError> {
        Self::instance_request(client, HttpMethod::Get, pool)
            .sub_resource([POOL_MEMBERS])
            .do_json()
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, Some(pool)))
    }

    /// Fetches member `member` (e.g. `/Common/10.0.0.2:80`) of `pool`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the pool or member doesn't exist.
    pub async fn member(
        client: &RestClient,
        pool: &str,
        member: &str,
    ) -> Result<PoolMember, ResourceError> {
        Self::instance_request(client, HttpMethod::Get, pool)
            .sub_resource([POOL_MEMBERS])
            .sub_resource_instance([member])
            .do_json()
            .await
            .map_err(|e| ResourceError::from_http(e, PoolMember::NAME, Some(member)))
    }

    /// Adds `member` to `pool`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the pool doesn't exist.
    pub async fn add_member(
        client: &RestClient,
        pool: &str,
        member: &PoolMember,
    ) -> Result<PoolMember, ResourceError> {
        Self::instance_request(client, HttpMethod::Post, pool)
            .sub_resource([POOL_MEMBERS])
            .body_json(member)
            .do_json()
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, Some(pool)))
    }

    /// Removes member `member` from `pool`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the pool or member doesn't exist.
    pub async fn remove_member(
        client: &RestClient,
        pool: &str,
        member: &str,
    ) -> Result<(), ResourceError> {
        Self::instance_request(client, HttpMethod::Delete, pool)
            .sub_resource([POOL_MEMBERS])
            .sub_resource_instance([member])
            .do_empty()
            .await
            .map_err(|e| ResourceError::from_http(e, PoolMember::NAME, Some(member)))
    }
}

/// A member of a pool, named `<node>:<port>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolMember {
    /// Member name, e.g. `10.0.0.2:80`.
    pub name: String,
    /// Partition holding the member.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition: Option<String>,
    /// Partition-qualified name, e.g. `/Common/10.0.0.2:80`.
    #[serde(default, skip_serializing)]
    pub full_path: Option<String>,
    /// Node address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Connection limit; zero means unlimited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_limit: Option<u32>,
    /// Priority group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_group: Option<u32>,
    /// Ratio weight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio: Option<u32>,
    /// Administrative session state, e.g. `user-enabled`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
    /// Monitor state, e.g. `up` or `user-down`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl PoolMember {
    const NAME: &'static str = "PoolMember";
}

/// Source address translation of a virtual server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceAddressTranslation {
    /// Translation type: `none`, `automap` or `snat`.
    #[serde(rename = "type")]
    pub kind: String,
    /// SNAT pool when `kind` is `snat`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool: Option<String>,
}

/// A virtual server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Virtual {
    /// Object kind, e.g. `tm:ltm:virtual:virtualstate`.
    #[serde(default, skip_serializing)]
    pub kind: Option<String>,
    /// Name of the virtual server.
    pub name: String,
    /// Partition holding the virtual server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition: Option<String>,
    /// Partition-qualified name, e.g. `/Common/vs_https`.
    #[serde(default, skip_serializing)]
    pub full_path: Option<String>,
    /// Configuration generation.
    #[serde(default, skip_serializing)]
    pub generation: Option<u64>,
    /// URL of the virtual server on the appliance.
    #[serde(default, skip_serializing)]
    pub self_link: Option<String>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Listener, e.g. `/Common/10.0.0.10:443`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    /// Accepted source network, e.g. `0.0.0.0/0`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Destination netmask.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,
    /// Default pool.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool: Option<String>,
    /// Transport protocol, e.g. `tcp`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_protocol: Option<String>,
    /// Attached iRules.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<String>,
    /// Source address translation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_address_translation: Option<SourceAddressTranslation>,
    /// Whether the virtual server accepts traffic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Whether the virtual server is disabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
}

impl TmResource for Virtual {
    const NAME: &'static str = "Virtual";
    const MANAGER: &'static str = LTM_MANAGER;
    const RESOURCE: &'static str = "virtual";
}

impl StatsResource for Virtual {}

/// A TCP health monitor (`ltm/monitor/tcp`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorTcp {
    #[serde(default, skip_serializing)]
    pub kind: Option<String>,
    /// Name of the monitor.
    pub name: String,
    /// Partition holding the monitor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition: Option<String>,
    #[serde(default, skip_serializing)]
    pub full_path: Option<String>,
    #[serde(default, skip_serializing)]
    pub self_link: Option<String>,
    /// Parent monitor, e.g. `/Common/tcp`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults_from: Option<String>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Alias address and port, e.g. `*:*`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    /// Seconds between probes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
    /// Seconds before a member is marked down.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
    /// Probe payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send: Option<String>,
    /// Expected response pattern.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recv: Option<String>,
    /// Response pattern that disables the member.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recv_disable: Option<String>,
    /// `enabled` to mark members down when `recv` matches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverse: Option<String>,
    /// `enabled` to probe through the destination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transparent: Option<String>,
    /// `enabled` to require a manual resume after a failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual_resume: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_until_up: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub up_interval: Option<u32>,
}

impl TmResource for MonitorTcp {
    const NAME: &'static str = "MonitorTcp";
    const MANAGER: &'static str = LTM_MANAGER;
    const RESOURCE: &'static str = "monitor";
    const SUB_RESOURCE: Option<&'static str> = Some("tcp");
}

/// An ICAP profile (`ltm/profile/icap`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileIcap {
    #[serde(default, skip_serializing)]
    pub kind: Option<String>,
    /// Name of the profile.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition: Option<String>,
    #[serde(default, skip_serializing)]
    pub full_path: Option<String>,
    #[serde(default, skip_serializing)]
    pub self_link: Option<String>,
    /// Parent profile, e.g. `/Common/icap`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults_from: Option<String>,
    /// Value of the ICAP `From` header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_from: Option<String>,
    /// Value of the ICAP `Host` header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Bytes of payload previewed to the ICAP server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_length: Option<u32>,
    /// Value of the ICAP `Referer` header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referer: Option<String>,
    /// ICAP service URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Value of the ICAP `User-Agent` header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl TmResource for ProfileIcap {
    const NAME: &'static str = "ProfileIcap";
    const MANAGER: &'static str = LTM_MANAGER;
    const RESOURCE: &'static str = "profile";
    const SUB_RESOURCE: Option<&'static str> = Some("icap");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pool_serialization_skips_read_only_fields() {
        let pool = Pool {
            kind: Some("tm:ltm:pool:poolstate".to_string()),
            name: "web".to_string(),
            partition: Some("Common".to_string()),
            full_path: Some("/Common/web".to_string()),
            generation: Some(7),
            load_balancing_mode: Some("least-connections-member".to_string()),
            members: vec![PoolMember {
                name: "10.0.0.2:80".to_string(),
                address: Some("10.0.0.2".to_string()),
                ..PoolMember::default()
            }],
            ..Pool::default()
        };

        let value = serde_json::to_value(&pool).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "web",
                "partition": "Common",
                "loadBalancingMode": "least-connections-member",
                "members": [{"name": "10.0.0.2:80", "address": "10.0.0.2"}]
            })
        );
    }

    #[test]
    fn test_pool_deserializes_appliance_response() {
        let pool: Pool = serde_json::from_value(json!({
            "kind": "tm:ltm:pool:poolstate",
            "name": "web",
            "partition": "Common",
            "fullPath": "/Common/web",
            "generation": 42,
            "selfLink": "https://localhost/mgmt/tm/ltm/pool/~Common~web?ver=16.1.0",
            "loadBalancingMode": "round-robin",
            "minActiveMembers": 0,
            "monitor": "/Common/http ",
            "membersReference": {"link": "https://localhost/mgmt/tm/ltm/pool/~Common~web/members?ver=16.1.0"}
        }))
        .unwrap();

        assert_eq!(pool.full_path.as_deref(), Some("/Common/web"));
        assert_eq!(pool.generation, Some(42));
        assert_eq!(pool.load_balancing_mode.as_deref(), Some("round-robin"));
        assert!(pool.members.is_empty());
    }

    #[test]
    fn test_virtual_source_address_translation_uses_type_key() {
        let virtual_server = Virtual {
            name: "vs_https".to_string(),
            destination: Some("/Common/10.0.0.10:443".to_string()),
            source_address_translation: Some(SourceAddressTranslation {
                kind: "automap".to_string(),
                pool: None,
            }),
            ..Virtual::default()
        };

        let value = serde_json::to_value(&virtual_server).unwrap();
        assert_eq!(value["sourceAddressTranslation"], json!({"type": "automap"}));
        assert_eq!(value["destination"], "/Common/10.0.0.10:443");
    }

    #[test]
    fn test_resource_names() {
        assert_eq!(<MonitorTcp as TmResource>::RESOURCE, "monitor");
        assert_eq!(<MonitorTcp as TmResource>::SUB_RESOURCE, Some("tcp"));
        assert_eq!(<ProfileIcap as TmResource>::SUB_RESOURCE, Some("icap"));
        assert_eq!(<Virtual as TmResource>::SUB_RESOURCE, None);
    }
}
