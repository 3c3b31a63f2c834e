//! Network resources (`/mgmt/tm/net`).

use serde::{Deserialize, Serialize};

use crate::rest::{TmResource, NET_MANAGER};

/// A link to another object on the appliance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// URL of the referenced object.
    pub link: String,
}

/// A route domain isolating a set of VLANs and routes.
///
/// # Example
///
/// ```rust,ignore
/// use bigip_rest::rest::resources::net::RouteDomain;
/// use bigip_rest::rest::TmResource;
///
/// let rd = RouteDomain {
///     name: "rd_10".to_string(),
///     id: Some(10),
///     vlans: vec!["/Common/internal".to_string()],
///     ..RouteDomain::default()
/// };
/// rd.create(&client).await?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDomain {
    #[serde(default, skip_serializing)]
    pub kind: Option<String>,
    /// Name of the route domain.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition: Option<String>,
    #[serde(default, skip_serializing)]
    pub full_path: Option<String>,
    #[serde(default, skip_serializing)]
    pub generation: Option<u64>,
    #[serde(default, skip_serializing)]
    pub self_link: Option<String>,
    /// Numeric route domain identifier, used as the `%<id>` address suffix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    /// Connection limit; zero means unlimited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_limit: Option<u32>,
    /// `enabled` to keep routes inside the domain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub throughput_capacity: Option<String>,
    /// Dynamic routing protocols enabled in the domain.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routing_protocol: Vec<String>,
    /// VLANs assigned to the domain.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vlans: Vec<String>,
    #[serde(default, skip_serializing)]
    pub vlans_reference: Vec<Reference>,
}

impl TmResource for RouteDomain {
    const NAME: &'static str = "RouteDomain";
    const MANAGER: &'static str = NET_MANAGER;
    const RESOURCE: &'static str = "route-domain";
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_route_domain_round_trips_appliance_fields() {
        let rd: RouteDomain = serde_json::from_value(json!({
            "kind": "tm:net:route-domain:route-domainstate",
            "name": "0",
            "partition": "Common",
            "fullPath": "/Common/0",
            "id": 0,
            "strict": "enabled",
            "vlans": ["/Common/http-tunnel", "/Common/socks-tunnel"],
            "vlansReference": [{"link": "https://localhost/mgmt/tm/net/tunnels/tunnel/~Common~http-tunnel"}]
        }))
        .unwrap();

        assert_eq!(rd.id, Some(0));
        assert_eq!(rd.vlans.len(), 2);
        assert_eq!(rd.vlans_reference.len(), 1);

        let value = serde_json::to_value(&rd).unwrap();
        assert!(value.get("vlansReference").is_none());
        assert!(value.get("fullPath").is_none());
        assert_eq!(value["strict"], "enabled");
    }
}
