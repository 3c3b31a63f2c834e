//! HTTP client for iControl REST communication.
//!
//! This module provides the [`RestClient`] type, which holds the connection
//! settings shared by every request (base URL, path prefix, default headers,
//! default timeout) and executes [`Request`]s built from it.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT,
};

use crate::clients::errors::HttpError;
use crate::clients::http_request::{HttpMethod, Request, RequestBody};
use crate::clients::http_response::HttpResponse;
use crate::config::{BigIpConfig, Credentials, HostUrl};
use crate::error::ConfigError;
use crate::rest::join_path;

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Header carrying a token issued by the appliance.
pub const AUTH_TOKEN_HEADER: &str = "X-F5-Auth-Token";

/// Client for the iControl REST API of one appliance.
///
/// The client handles:
/// - Path prefix construction from the host path and the configured API path
/// - Default headers including User-Agent, Accept and authentication
/// - Request execution with timeouts and error classification
///
/// # Thread Safety
///
/// `RestClient` is `Clone`, `Send` and `Sync`. Clones share the underlying
/// connection pool.
///
/// # Example
///
/// ```rust,ignore
/// use bigip_rest::{BigIpConfig, HostUrl, Password, RestClient, Username};
///
/// let config = BigIpConfig::builder()
///     .host(HostUrl::new("https://10.0.0.1")?)
///     .credentials(Username::new("admin")?, Password::new("admin")?)
///     .build()?;
/// let client = RestClient::new(&config)?;
///
/// let body = client
///     .get()
///     .prefix(["mgmt"])
///     .resource_category("tm")
///     .manager_name("sys")
///     .resource("version")
///     .do_raw()
///     .await?;
/// ```
#[derive(Clone, Debug)]
pub struct RestClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Management endpoint.
    base_url: HostUrl,
    /// Path every request starts from (e.g., `/` or `/proxy/mgmt`).
    path_prefix: String,
    /// Default headers to include in all requests.
    default_headers: HeaderMap,
    /// Content type applied to bodies that do not declare one.
    content_type: Option<HeaderValue>,
    default_timeout: Option<Duration>,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a client for the appliance described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHeaderValue`] if a configured value
    /// cannot be sent as a header, and [`ConfigError::HttpClient`] if the
    /// TLS backend fails to initialize.
    pub fn new(config: &BigIpConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .danger_accept_invalid_certs(config.accept_invalid_certs())
            .build()
            .map_err(|e| ConfigError::HttpClient {
                reason: e.to_string(),
            })?;
        Self::with_http_client(config, client)
    }

    /// Creates a client that sends requests through `client`.
    ///
    /// TLS settings of `config` are ignored; they belong to `client`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHeaderValue`] if a configured value
    /// cannot be sent as a header.
    pub fn with_http_client(
        config: &BigIpConfig,
        client: reqwest::Client,
    ) -> Result<Self, ConfigError> {
        let base_url = config.host().clone();

        let path_prefix = join_path(["/", base_url.path(), config.api_path()]);

        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}BIG-IP REST Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, header_value(&user_agent, "User-Agent")?);

        if let Some(accept) = config.content().accept_header() {
            default_headers.insert(ACCEPT, header_value(&accept, "Accept")?);
        }

        match config.credentials() {
            Credentials::Basic { username, password } => {
                let encoded = STANDARD.encode(format!(
                    "{}:{}",
                    username.as_ref(),
                    password.as_ref()
                ));
                let mut value = header_value(&format!("Basic {encoded}"), "Authorization")?;
                value.set_sensitive(true);
                default_headers.insert(AUTHORIZATION, value);
            }
            Credentials::Token(token) => {
                let mut value = header_value(token.as_ref(), AUTH_TOKEN_HEADER)?;
                value.set_sensitive(true);
                default_headers.insert(HeaderName::from_static("x-f5-auth-token"), value);
            }
        }

        let content_type = match config.content().content_type.as_str() {
            "" => None,
            ct => Some(header_value(ct, "Content-Type")?),
        };

        Ok(Self {
            client,
            base_url,
            path_prefix,
            default_headers,
            content_type,
            default_timeout: config.timeout(),
        })
    }

    /// Returns the management endpoint.
    #[must_use]
    pub const fn base_url(&self) -> &HostUrl {
        &self.base_url
    }

    /// Returns the path every request starts from.
    #[must_use]
    pub fn path_prefix(&self) -> &str {
        &self.path_prefix
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    /// Returns the default per-request timeout, if any.
    #[must_use]
    pub const fn default_timeout(&self) -> Option<Duration> {
        self.default_timeout
    }

    /// Starts a request with the given method.
    pub fn verb(&self, method: HttpMethod) -> Request<'_> {
        Request::new(self, method)
    }

    /// Starts a GET request.
    pub fn get(&self) -> Request<'_> {
        self.verb(HttpMethod::Get)
    }

    /// Starts a POST request.
    pub fn post(&self) -> Request<'_> {
        self.verb(HttpMethod::Post)
    }

    /// Starts a PUT request.
    pub fn put(&self) -> Request<'_> {
        self.verb(HttpMethod::Put)
    }

    /// Starts a PATCH request.
    pub fn patch(&self) -> Request<'_> {
        self.verb(HttpMethod::Patch)
    }

    /// Starts a DELETE request.
    pub fn delete(&self) -> Request<'_> {
        self.verb(HttpMethod::Delete)
    }

    /// Sends `request` and reads the whole response.
    ///
    /// This method handles:
    /// - Failing fast on a request that recorded a configuration error
    /// - Applying the default content type to bodies without one
    /// - Bounding the exchange by the request timeout
    /// - Classifying failure responses
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - The request is invalid (`InvalidRequest`); nothing is sent
    /// - The timeout elapses (`Timeout`)
    /// - A network error occurs (`Network`)
    /// - The status is outside 200-206 (`Api`, `Status` or `ErrorBody`)
    pub async fn execute(&self, mut request: Request<'_>) -> Result<HttpResponse, HttpError> {
        let method = request.verb;
        if let Some(error) = request.err.take() {
            tracing::warn!(%method, %error, "Refusing to send invalid request");
            return Err(error.into());
        }

        let url = request.url();
        let timeout = request.timeout;
        let mut headers = std::mem::take(&mut request.headers);
        let body = std::mem::take(&mut request.body);

        if !body.is_empty() && !headers.contains_key(CONTENT_TYPE) {
            if let Some(content_type) = &self.content_type {
                headers.insert(CONTENT_TYPE, content_type.clone());
            }
        }

        let mut builder = self.client.request(method.into(), &url).headers(headers);
        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Bytes(data) => builder.body(data),
            RequestBody::Stream(stream) => builder.body(stream),
        };

        tracing::debug!(%method, %url, ?timeout, "Sending request");

        let exchange = async {
            let response = builder.send().await?;
            HttpResponse::read(response).await
        };
        let response = if timeout.is_zero() {
            exchange.await?
        } else {
            tokio::time::timeout(timeout, exchange).await.map_err(|_| {
                tracing::warn!(%method, %url, ?timeout, "Request deadline elapsed");
                HttpError::Timeout { timeout }
            })??
        };

        tracing::debug!(%method, %url, status = response.code(), "Received response");

        if let Some(error) = response.error() {
            tracing::debug!(%method, %url, %error, "Request failed");
            return Err(error);
        }
        Ok(response)
    }
}

fn header_value(value: &str, header: &'static str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(value).map_err(|_| ConfigError::InvalidHeaderValue { header })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AuthToken, BigIpConfigBuilder, ContentConfig, Password, Username};

    fn builder(host: &str) -> BigIpConfigBuilder {
        BigIpConfig::builder()
            .host(HostUrl::new(host).unwrap())
            .credentials(Username::new("admin").unwrap(), Password::new("admin").unwrap())
    }

    #[test]
    fn test_client_construction() {
        let client = RestClient::new(&builder("https://10.0.0.1").build().unwrap()).unwrap();

        assert_eq!(client.base_url().origin(), "https://10.0.0.1");
        assert_eq!(client.path_prefix(), "/");
        assert!(client.default_timeout().is_none());
    }

    #[test]
    fn test_path_prefix_combines_host_path_and_api_path() {
        let config = builder("https://10.0.0.1/proxy").api_path("mgmt").build().unwrap();
        assert_eq!(RestClient::new(&config).unwrap().path_prefix(), "/proxy/mgmt");

        let config = builder("https://10.0.0.1/proxy/").build().unwrap();
        assert_eq!(RestClient::new(&config).unwrap().path_prefix(), "/proxy");
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = RestClient::new(&builder("https://10.0.0.1").build().unwrap()).unwrap();

        let user_agent = client.default_headers().get(USER_AGENT).unwrap().to_str().unwrap();
        assert!(user_agent.starts_with("BIG-IP REST Library v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = builder("https://10.0.0.1")
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();
        let client = RestClient::new(&config).unwrap();

        let user_agent = client.default_headers().get(USER_AGENT).unwrap().to_str().unwrap();
        assert!(user_agent.starts_with("MyApp/1.0 | BIG-IP REST Library"));
    }

    #[test]
    fn test_basic_auth_header_injection() {
        let client = RestClient::new(&builder("https://10.0.0.1").build().unwrap()).unwrap();

        let auth = client.default_headers().get(AUTHORIZATION).unwrap();
        assert_eq!(auth, "Basic YWRtaW46YWRtaW4=");
        assert!(auth.is_sensitive());
        assert!(client.default_headers().get(AUTH_TOKEN_HEADER).is_none());
    }

    #[test]
    fn test_token_auth_header_injection() {
        let config = BigIpConfig::builder()
            .host(HostUrl::new("https://10.0.0.1").unwrap())
            .auth_token(AuthToken::new("TOKEN123").unwrap())
            .build()
            .unwrap();
        let client = RestClient::new(&config).unwrap();

        assert_eq!(
            client.default_headers().get(AUTH_TOKEN_HEADER).unwrap(),
            "TOKEN123"
        );
        assert!(client.default_headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_accept_header_follows_content_config() {
        let client = RestClient::new(&builder("https://10.0.0.1").build().unwrap()).unwrap();
        assert_eq!(
            client.default_headers().get(ACCEPT).unwrap(),
            "application/json, */*"
        );

        let config = builder("https://10.0.0.1")
            .content(ContentConfig {
                accept: Some("application/json".to_string()),
                content_type: String::new(),
            })
            .build()
            .unwrap();
        let client = RestClient::new(&config).unwrap();
        assert_eq!(client.default_headers().get(ACCEPT).unwrap(), "application/json");
    }

    #[test]
    fn test_invalid_user_agent_prefix_is_rejected() {
        let config = builder("https://10.0.0.1")
            .user_agent_prefix("bad\nprefix")
            .build()
            .unwrap();
        assert!(matches!(
            RestClient::new(&config),
            Err(ConfigError::InvalidHeaderValue { header: "User-Agent" })
        ));
    }

    #[test]
    fn test_requests_inherit_client_defaults() {
        let config = builder("https://10.0.0.1")
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap();
        let client = RestClient::new(&config).unwrap();

        let request = client.delete();
        assert_eq!(request.method(), HttpMethod::Delete);
        assert_eq!(request.timeout_duration(), Duration::from_secs(10));
        assert!(request.headers().contains_key(AUTHORIZATION));
    }
}
