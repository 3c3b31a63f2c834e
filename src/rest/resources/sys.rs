//! System resources (`/mgmt/tm/sys`).

use serde::{Deserialize, Serialize};

use crate::clients::{HttpMethod, Request, RestClient};
use crate::rest::{ResourceError, BASE_PATH, SYS_MANAGER, TM_RESOURCE};

/// The appliance's DNS resolver settings.
///
/// This is a singleton: it can be read and replaced, but not listed,
/// created or deleted.
///
/// # Example
///
/// ```rust,ignore
/// use bigip_rest::rest::resources::sys::Dns;
///
/// let dns = Dns::add_name_servers(&client, ["10.0.0.53"]).await?;
/// println!("{:?}", dns.name_servers);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dns {
    /// Object kind, `tm:sys:dns:dnsstate`.
    #[serde(default, skip_serializing)]
    pub kind: Option<String>,
    /// URL of the settings on the appliance.
    #[serde(default, skip_serializing)]
    pub self_link: Option<String>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Resolver addresses, in query order.
    #[serde(default)]
    pub name_servers: Vec<String>,
    /// Dots a name needs before it is tried as absolute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_dots: Option<u32>,
    /// Search domains.
    #[serde(default)]
    pub search: Vec<String>,
}

impl Dns {
    const NAME: &'static str = "Dns";
    const RESOURCE: &'static str = "dns";

    fn request(client: &RestClient, method: HttpMethod) -> Request<'_> {
        client
            .verb(method)
            .prefix([BASE_PATH])
            .resource_category(TM_RESOURCE)
            .manager_name(SYS_MANAGER)
            .resource(Self::RESOURCE)
    }

    /// Fetches the current settings.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn get(client: &RestClient) -> Result<Self, ResourceError> {
        Self::request(client, HttpMethod::Get)
            .do_json()
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, None))
    }

    /// Replaces the settings with `self`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the appliance rejects the settings.
    pub async fn update(&self, client: &RestClient) -> Result<Self, ResourceError> {
        Self::request(client, HttpMethod::Put)
            .body_json(self)
            .do_json()
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, None))
    }

    /// Appends `servers` to the configured resolvers, skipping ones already
    /// present.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if reading or writing fails.
    pub async fn add_name_servers<I, S>(client: &RestClient, servers: I) -> Result<Self, ResourceError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut dns = Self::get(client).await?;
        let before = dns.name_servers.len();
        for server in servers {
            let server = server.into();
            if !dns.name_servers.contains(&server) {
                dns.name_servers.push(server);
            }
        }
        if dns.name_servers.len() == before {
            return Ok(dns);
        }
        dns.update(client).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dns_serialization() {
        let dns: Dns = serde_json::from_value(json!({
            "kind": "tm:sys:dns:dnsstate",
            "selfLink": "https://localhost/mgmt/tm/sys/dns?ver=16.1.0",
            "nameServers": ["10.0.0.53"],
            "numberOfDots": 0
        }))
        .unwrap();

        assert_eq!(dns.name_servers, vec!["10.0.0.53"]);
        assert!(dns.search.is_empty());

        let value = serde_json::to_value(&dns).unwrap();
        assert_eq!(
            value,
            json!({"nameServers": ["10.0.0.53"], "numberOfDots": 0, "search": []})
        );
    }
}
