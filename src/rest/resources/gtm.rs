//! Global traffic manager resources (`/mgmt/tm/gtm`).

use serde::{Deserialize, Serialize};

use crate::rest::{TmResource, GTM_MANAGER};

/// A wide IP pool answering NAPTR queries (`gtm/pool/naptr`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NaptrPool {
    #[serde(default, skip_serializing)]
    pub kind: Option<String>,
    /// Name of the pool.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition: Option<String>,
    #[serde(default, skip_serializing)]
    pub full_path: Option<String>,
    #[serde(default, skip_serializing)]
    pub self_link: Option<String>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the pool answers queries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Preferred load balancing method, e.g. `round-robin`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_balancing_mode: Option<String>,
    /// Alternate load balancing method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate_mode: Option<String>,
    /// Fallback load balancing method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_mode: Option<String>,
    /// Seconds answers may be cached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Health monitor rule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor: Option<String>,
}

impl TmResource for NaptrPool {
    const NAME: &'static str = "NaptrPool";
    const MANAGER: &'static str = GTM_MANAGER;
    const RESOURCE: &'static str = "pool";
    const SUB_RESOURCE: Option<&'static str> = Some("naptr");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naptr_pool_skips_unset_fields() {
        let pool = NaptrPool {
            name: "sip".to_string(),
            ttl: Some(30),
            ..NaptrPool::default()
        };
        assert_eq!(
            serde_json::to_string(&pool).unwrap(),
            r#"{"name":"sip","ttl":30}"#
        );
    }
}
