//! Integration tests for request building and URL rendering.
//!
//! These tests exercise the public builder API the way resource wrappers
//! use it, without sending anything.

use bigip_rest::clients::{format_duration, RequestField};
use bigip_rest::{
    BigIpConfig, ContentConfig, HostUrl, InvalidRequestError, Password, RestClient, Username,
};
use std::time::Duration;

/// Creates a client for `host` with basic credentials.
fn create_client(host: &str) -> RestClient {
    let config = BigIpConfig::builder()
        .host(HostUrl::new(host).unwrap())
        .credentials(Username::new("admin").unwrap(), Password::new("admin").unwrap())
        .build()
        .unwrap();
    RestClient::new(&config).unwrap()
}

#[test]
fn test_pool_instance_url() {
    let client = create_client("https://10.0.0.1");
    let request = client
        .get()
        .prefix(["mgmt"])
        .resource_category("tm")
        .manager_name("ltm")
        .resource("pool")
        .resource_instance(["Common", "my-pool"]);

    assert!(request.error().is_none());
    assert_eq!(
        request.url(),
        "https://10.0.0.1/mgmt/tm/ltm/pool/Common~my-pool"
    );
}

#[test]
fn test_same_value_in_category_and_manager() {
    let client = create_client("https://10.0.0.1");
    let request = client
        .get()
        .resource_category("ltm")
        .manager_name("ltm")
        .resource("pool")
        .resource_instance(["Common", "my-pool"]);

    assert_eq!(request.path(), "/ltm/ltm/pool/Common~my-pool");
}

#[test]
fn test_untouched_request_keeps_prefix() {
    let client = create_client("https://10.0.0.1/proxy");
    let request = client.get();
    assert_eq!(request.path(), "/proxy");
    assert_eq!(request.url(), "https://10.0.0.1/proxy");
}

#[test]
fn test_api_path_is_part_of_prefix() {
    let config = BigIpConfig::builder()
        .host(HostUrl::new("https://bigip.example.com:8443").unwrap())
        .credentials(Username::new("admin").unwrap(), Password::new("admin").unwrap())
        .api_path("/mgmt/")
        .build()
        .unwrap();
    let client = RestClient::new(&config).unwrap();

    let request = client
        .get()
        .resource_category("tm")
        .manager_name("sys")
        .resource("version");
    assert_eq!(
        request.url(),
        "https://bigip.example.com:8443/mgmt/tm/sys/version"
    );
}

#[test]
fn test_stats_url_for_virtual_server() {
    let client = create_client("https://10.0.0.1");
    let request = client
        .get()
        .prefix(["mgmt"])
        .resource_category("tm")
        .manager_name("ltm")
        .resource("virtual")
        .resource_instance(["/Common/vs_https"])
        .sub_stats_resource(["stats"]);

    assert_eq!(
        request.url(),
        "https://10.0.0.1/mgmt/tm/ltm/virtual/~Common~vs_https/stats"
    );
}

#[test]
fn test_names_with_spaces_are_escaped() {
    let client = create_client("https://10.0.0.1");
    let request = client
        .get()
        .prefix(["mgmt"])
        .resource_category("tm")
        .manager_name("ltm")
        .resource("rule")
        .resource_instance(["Common", "my rule"]);

    assert_eq!(
        request.url(),
        "https://10.0.0.1/mgmt/tm/ltm/rule/Common~my%20rule"
    );
}

#[test]
fn test_query_parameters_and_timeout() {
    let client = create_client("https://10.0.0.1");
    let request = client
        .get()
        .prefix(["mgmt"])
        .resource_category("tm")
        .manager_name("ltm")
        .resource("pool")
        .param("expandSubcollections", "true")
        .timeout(Duration::from_secs(90));

    assert_eq!(
        request.url(),
        "https://10.0.0.1/mgmt/tm/ltm/pool?expandSubcollections=true&timeout=1m30s"
    );
}

#[test]
fn test_default_timeout_from_config() {
    let config = BigIpConfig::builder()
        .host(HostUrl::new("https://10.0.0.1").unwrap())
        .credentials(Username::new("admin").unwrap(), Password::new("admin").unwrap())
        .timeout(Duration::from_millis(1500))
        .build()
        .unwrap();
    let client = RestClient::new(&config).unwrap();

    assert_eq!(client.get().query(), "timeout=1.5s");
    assert_eq!(client.get().timeout(Duration::ZERO).query(), "");
}

#[test]
fn test_error_is_recorded_once_and_kept() {
    let client = create_client("https://10.0.0.1");
    let request = client
        .get()
        .resource_category("tm")
        .manager_name("ltm")
        .resource("pool")
        .resource("virtual")
        .resource_instance(["Common", "x"]);

    match request.error() {
        Some(InvalidRequestError::FieldAlreadySet {
            field,
            current,
            attempted,
        }) => {
            assert_eq!(*field, RequestField::Resource);
            assert_eq!(current, "pool");
            assert_eq!(attempted, "virtual");
        }
        other => panic!("expected FieldAlreadySet, got {other:?}"),
    }
    assert_eq!(request.path(), "/tm/ltm/pool");
}

#[test]
fn test_invalid_segment_lists_every_violation() {
    let client = create_client("https://10.0.0.1");
    let request = client.get().resource("a/%b");

    let message = request.error().unwrap().to_string();
    assert!(message.contains("may not contain '/'"));
    assert!(message.contains("may not contain '%'"));
}

#[test]
fn test_content_config_drives_accept_header() {
    let config = BigIpConfig::builder()
        .host(HostUrl::new("https://10.0.0.1").unwrap())
        .credentials(Username::new("admin").unwrap(), Password::new("admin").unwrap())
        .content(ContentConfig {
            accept: None,
            content_type: "application/vnd.f5+json".to_string(),
        })
        .build()
        .unwrap();
    let client = RestClient::new(&config).unwrap();

    let request = client.get();
    assert_eq!(
        request.headers().get("accept").unwrap(),
        "application/vnd.f5+json, */*"
    );
}

#[test]
fn test_format_duration_matches_query_rendering() {
    assert_eq!(format_duration(Duration::from_secs(30)), "30s");
    assert_eq!(format_duration(Duration::from_secs(7200)), "2h0m0s");
    assert_eq!(format_duration(Duration::from_millis(200)), "200ms");
}
