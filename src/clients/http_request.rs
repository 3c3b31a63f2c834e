//! Hierarchical request builder for the iControl REST API.
//!
//! This module provides the [`Request`] type, which accumulates the parts of
//! a management API call through chained setters and renders them into a
//! URL:
//!
//! ```text
//! <prefix>/<category>/<manager>/<resource>[/<instance>][/<sub-resource>[/<sub-instance>]][/stats]
//! ```
//!
//! Setters never fail directly. The first invalid value is stored on the
//! request, every later setter becomes a no-op, and the stored error is
//! returned by [`Request::error`] and by execution, which then performs no
//! I/O.

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::path::Path;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::clients::errors::{HttpError, InvalidRequestError, RequestField};
use crate::clients::http_client::RestClient;
use crate::clients::http_response::HttpResponse;
use crate::rest::{
    encode_full_path, escape_path, is_valid_path_segment_name, join_path,
    validate_full_path_component,
};

/// Query parameter carrying the server-side timeout.
pub const TIMEOUT_PARAM: &str = "timeout";

const NAME_MAY_NOT_BE_EMPTY: &str = "may not be empty";

/// HTTP methods supported by the management API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for reading objects.
    Get,
    /// HTTP POST method for creating objects.
    Post,
    /// HTTP PUT method for replacing objects.
    Put,
    /// HTTP PATCH method for modifying objects.
    Patch,
    /// HTTP DELETE method for removing objects.
    Delete,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Patch => Self::PATCH,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// The body of a request.
///
/// Exactly one form is held at a time; setting a body replaces the previous
/// one.
#[derive(Debug, Default)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// An in-memory body.
    Bytes(Vec<u8>),
    /// A streaming body, e.g. built with [`reqwest::Body::wrap_stream`].
    Stream(reqwest::Body),
}

impl RequestBody {
    /// Returns `true` if no body is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// The write-once hierarchy fields, in rendering order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Hierarchy {
    resource_category: String,
    manager_name: String,
    resource: String,
    resource_instance: String,
    sub_resource: String,
    sub_resource_instance: String,
    sub_stats_resource: String,
}

impl Hierarchy {
    fn slot_mut(&mut self, field: RequestField) -> &mut String {
        match field {
            RequestField::ResourceCategory => &mut self.resource_category,
            RequestField::ManagerName => &mut self.manager_name,
            RequestField::Resource => &mut self.resource,
            RequestField::ResourceInstance => &mut self.resource_instance,
            RequestField::SubResource => &mut self.sub_resource,
            RequestField::SubResourceInstance => &mut self.sub_resource_instance,
            RequestField::SubStatsResource => &mut self.sub_stats_resource,
        }
    }
}

/// A single management API call under construction.
///
/// Obtain one from [`RestClient::get`], [`RestClient::post`] and friends,
/// configure it through chained setters and consume it with one of the
/// execution methods ([`do_raw`](Self::do_raw), [`do_json`](Self::do_json),
/// [`do_empty`](Self::do_empty)).
///
/// # Example
///
/// ```rust,ignore
/// let body = client
///     .get()
///     .prefix(["mgmt"])
///     .resource_category("tm")
///     .manager_name("ltm")
///     .resource("pool")
///     .resource_instance(["Common", "my-pool"])
///     .do_raw()
///     .await?;
/// ```
#[must_use = "a request does nothing until it is executed"]
pub struct Request<'a> {
    pub(crate) client: &'a RestClient,
    pub(crate) verb: HttpMethod,
    pub(crate) timeout: Duration,
    pub(crate) headers: HeaderMap,
    pub(crate) body: RequestBody,
    pub(crate) err: Option<InvalidRequestError>,
    path_prefix: String,
    sub_path: String,
    hierarchy: Hierarchy,
    params: BTreeMap<String, Vec<String>>,
}

impl fmt::Debug for Request<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("verb", &self.verb)
            .field("url", &self.url())
            .field("timeout", &self.timeout)
            .field("body", &self.body)
            .field("err", &self.err)
            .finish_non_exhaustive()
    }
}

impl<'a> Request<'a> {
    /// Creates a request bound to `client`.
    ///
    /// The path prefix, default headers and default timeout are taken from
    /// the client.
    pub fn new(client: &'a RestClient, verb: HttpMethod) -> Self {
        Self {
            client,
            verb,
            timeout: client.default_timeout().unwrap_or(Duration::ZERO),
            headers: client.default_headers().clone(),
            body: RequestBody::Empty,
            err: None,
            path_prefix: client.path_prefix().to_string(),
            sub_path: String::new(),
            hierarchy: Hierarchy::default(),
            params: BTreeMap::new(),
        }
    }

    /// Returns the configuration error recorded so far, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&InvalidRequestError> {
        self.err.as_ref()
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.verb
    }

    /// Returns the effective timeout; zero means none.
    #[must_use]
    pub const fn timeout_duration(&self) -> Duration {
        self.timeout
    }

    /// Returns the headers that will be sent.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the body that will be sent.
    #[must_use]
    pub const fn body(&self) -> &RequestBody {
        &self.body
    }

    /// Sets the HTTP method.
    pub const fn verb(mut self, verb: HttpMethod) -> Self {
        self.verb = verb;
        self
    }

    /// Runs `apply` unless an error is already stored, storing its error.
    fn try_apply<F>(mut self, apply: F) -> Self
    where
        F: FnOnce(&mut Self) -> Result<(), InvalidRequestError>,
    {
        if self.err.is_none() {
            if let Err(e) = apply(&mut self) {
                self.err = Some(e);
            }
        }
        self
    }

    /// Joins `segments` onto the path prefix.
    pub fn prefix<I, S>(self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments = join_path(segments);
        self.try_apply(|r| {
            r.path_prefix = join_path([r.path_prefix.as_str(), segments.as_str()]);
            Ok(())
        })
    }

    /// Joins `segments` onto the free-form sub-path rendered after the
    /// resource instance.
    pub fn suffix<I, S>(self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments = join_path(segments);
        self.try_apply(|r| {
            r.sub_path = join_path([r.sub_path.as_str(), segments.as_str()]);
            Ok(())
        })
    }

    /// Replaces the path prefix with the host path followed by `segments`.
    ///
    /// A trailing `/` on a single segment is preserved when the host has a
    /// non-root path.
    pub fn abs_path<I, S>(self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments: Vec<String> = segments
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect();
        self.try_apply(|r| {
            let client = r.client;
            let base = client.base_url().path();
            r.path_prefix = join_path([base, join_path(&segments).as_str()]);
            if segments.len() == 1 && base.len() > 1 && segments[0].ends_with('/') {
                r.path_prefix.push('/');
            }
            Ok(())
        })
    }

    /// Stores `value` in a write-once field after full segment validation.
    fn set_segment(&mut self, field: RequestField, value: &str) -> Result<(), InvalidRequestError> {
        let slot = self.hierarchy.slot_mut(field);
        if !slot.is_empty() {
            return Err(InvalidRequestError::FieldAlreadySet {
                field,
                current: slot.clone(),
                attempted: value.to_string(),
            });
        }
        if value.is_empty() {
            return Err(empty_value(field));
        }
        let violations = is_valid_path_segment_name(value);
        if !violations.is_empty() {
            return Err(InvalidRequestError::InvalidSegment {
                field,
                value: value.to_string(),
                violations,
            });
        }
        *slot = value.to_string();
        Ok(())
    }

    /// Validates each fragment, joins them and stores the result once.
    fn set_fragments(
        &mut self,
        field: RequestField,
        fragments: Vec<String>,
    ) -> Result<(), InvalidRequestError> {
        let joined = join_path(&fragments);
        let slot = self.hierarchy.slot_mut(field);
        if !slot.is_empty() {
            return Err(InvalidRequestError::FieldAlreadySet {
                field,
                current: slot.clone(),
                attempted: joined,
            });
        }
        if joined.is_empty() {
            return Err(empty_value(field));
        }
        for fragment in fragments {
            let violations = is_valid_path_segment_name(&fragment);
            if !violations.is_empty() {
                return Err(InvalidRequestError::InvalidSegment {
                    field,
                    value: fragment,
                    violations,
                });
            }
        }
        *slot = joined;
        Ok(())
    }

    /// Encodes a full path and stores it once.
    fn set_full_path(
        &mut self,
        field: RequestField,
        fragments: Vec<String>,
    ) -> Result<(), InvalidRequestError> {
        for fragment in &fragments {
            let violations = validate_full_path_component(fragment);
            if !violations.is_empty() {
                return Err(InvalidRequestError::InvalidSegment {
                    field,
                    value: fragment.clone(),
                    violations,
                });
            }
        }
        let encoded = encode_full_path(&fragments);
        let slot = self.hierarchy.slot_mut(field);
        if !slot.is_empty() {
            return Err(InvalidRequestError::FieldAlreadySet {
                field,
                current: slot.clone(),
                attempted: encoded,
            });
        }
        if encoded.is_empty() {
            return Err(empty_value(field));
        }
        *slot = encoded;
        Ok(())
    }

    /// Sets the resource category, e.g. `tm`.
    pub fn resource_category(self, category: impl AsRef<str>) -> Self {
        let category = category.as_ref();
        self.try_apply(|r| r.set_segment(RequestField::ResourceCategory, category))
    }

    /// Sets the manager name, e.g. `ltm`. The name may not be empty.
    pub fn manager_name(self, manager: impl AsRef<str>) -> Self {
        let manager = manager.as_ref();
        self.try_apply(|r| {
            if manager.is_empty() {
                return Err(InvalidRequestError::EmptyManagerName);
            }
            r.set_segment(RequestField::ManagerName, manager)
        })
    }

    /// Sets the resource type, e.g. `pool`.
    pub fn resource(self, resource: impl AsRef<str>) -> Self {
        let resource = resource.as_ref();
        self.try_apply(|r| r.set_segment(RequestField::Resource, resource))
    }

    /// Sets the addressed object from the parts of its full path.
    ///
    /// `["Common", "my-pool"]` and `["Common/my-pool"]` both render as
    /// `Common~my-pool`; `["/Common/my-pool"]` renders as `~Common~my-pool`.
    pub fn resource_instance<I, S>(self, full_path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fragments = collect_fragments(full_path);
        self.try_apply(|r| r.set_full_path(RequestField::ResourceInstance, fragments))
    }

    /// Sets the nested object type, e.g. `members` or `monitor`/`tcp`.
    pub fn sub_resource<I, S>(self, sub_resources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fragments = collect_fragments(sub_resources);
        self.try_apply(|r| r.set_fragments(RequestField::SubResource, fragments))
    }

    /// Sets the nested object from the parts of its full path.
    pub fn sub_resource_instance<I, S>(self, full_path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fragments = collect_fragments(full_path);
        self.try_apply(|r| r.set_full_path(RequestField::SubResourceInstance, fragments))
    }

    /// Sets the stats sub-tree, usually `stats`.
    pub fn sub_stats_resource<I, S>(self, stats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fragments = collect_fragments(stats);
        self.try_apply(|r| r.set_fragments(RequestField::SubStatsResource, fragments))
    }

    /// Reads the whole file at `path` and uses it as the body.
    pub fn body_file(self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.try_apply(|r| {
            let data = std::fs::read(path).map_err(|source| InvalidRequestError::BodyFile {
                path: path.to_path_buf(),
                source,
            })?;
            r.body = RequestBody::Bytes(data);
            Ok(())
        })
    }

    /// Uses `data` as the body.
    pub fn body_bytes(self, data: impl Into<Vec<u8>>) -> Self {
        let data = data.into();
        self.try_apply(|r| {
            r.body = RequestBody::Bytes(data);
            Ok(())
        })
    }

    /// Uses a streaming body.
    pub fn body_stream(self, body: impl Into<reqwest::Body>) -> Self {
        let body = body.into();
        self.try_apply(|r| {
            r.body = RequestBody::Stream(body);
            Ok(())
        })
    }

    /// Serializes `value` as JSON, uses it as the body and sets
    /// `Content-Type: application/json`.
    pub fn body_json<T: Serialize + ?Sized>(self, value: &T) -> Self {
        let data = serde_json::to_vec(value);
        self.try_apply(|r| {
            let data = data.map_err(InvalidRequestError::BodySerialization)?;
            r.headers.insert(
                CONTENT_TYPE,
                HeaderValue::from_static(crate::config::DEFAULT_CONTENT_TYPE),
            );
            r.body = RequestBody::Bytes(data);
            Ok(())
        })
    }

    /// Replaces every value of header `key` with `values`.
    pub fn header<I, V>(self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: AsRef<str>,
    {
        let values: Vec<String> = values
            .into_iter()
            .map(|v| v.as_ref().to_string())
            .collect();
        self.try_apply(|r| {
            let invalid = || InvalidRequestError::InvalidHeader {
                name: key.to_string(),
            };
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|_| invalid())?;
            let values = values
                .iter()
                .map(|v| HeaderValue::from_str(v).map_err(|_| invalid()))
                .collect::<Result<Vec<HeaderValue>, InvalidRequestError>>()?;
            r.headers.remove(&name);
            for value in values {
                r.headers.append(name.clone(), value);
            }
            Ok(())
        })
    }

    /// Appends a query parameter value, keeping earlier values for `key`.
    pub fn param(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let (key, value) = (key.into(), value.into());
        self.try_apply(|r| {
            r.params.entry(key).or_default().push(value);
            Ok(())
        })
    }

    /// Sets the request timeout; zero disables it.
    ///
    /// A non-zero timeout bounds execution and is also sent as the
    /// `timeout` query parameter.
    pub fn timeout(self, timeout: Duration) -> Self {
        self.try_apply(|r| {
            r.timeout = timeout;
            Ok(())
        })
    }

    /// Renders the request path, without escaping.
    ///
    /// The prefix is returned untouched, trailing separator included, when
    /// none of category, manager, resource, sub-path, sub-resource or stats
    /// was set. Instances alone do not address anything below the prefix.
    #[must_use]
    pub fn path(&self) -> String {
        let h = &self.hierarchy;
        let untouched = [
            &h.resource_category,
            &h.manager_name,
            &h.resource,
            &self.sub_path,
            &h.sub_resource,
            &h.sub_stats_resource,
        ]
        .iter()
        .all(|field| field.is_empty());
        if untouched {
            return self.path_prefix.clone();
        }

        join_path([
            self.path_prefix.as_str(),
            &h.resource_category,
            &h.manager_name,
            &h.resource,
            &h.resource_instance,
            &self.sub_path,
            &h.sub_resource,
            &h.sub_resource_instance,
            &h.sub_stats_resource,
        ])
    }

    /// Renders the encoded query string, without the leading `?`.
    ///
    /// Keys are sorted; values keep insertion order. A non-zero timeout
    /// replaces any `timeout` values set by the caller.
    #[must_use]
    pub fn query(&self) -> String {
        let mut params = self.params.clone();
        if !self.timeout.is_zero() {
            params.insert(TIMEOUT_PARAM.to_string(), vec![format_duration(self.timeout)]);
        }

        params
            .iter()
            .flat_map(|(key, values)| {
                values.iter().map(move |value| {
                    format!(
                        "{}={}",
                        urlencoding::encode(key),
                        urlencoding::encode(value)
                    )
                })
            })
            .collect::<Vec<String>>()
            .join("&")
    }

    /// Renders the absolute URL of the request.
    ///
    /// Check [`error`](Self::error) before trusting the result.
    #[must_use]
    pub fn url(&self) -> String {
        let path = self.path();
        let separator = if path.starts_with('/') { "" } else { "/" };
        let mut url = format!(
            "{}{separator}{}",
            self.client.base_url().origin(),
            escape_path(&path)
        );
        let query = self.query();
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }
        url
    }
}

impl Request<'_> {
    /// Sends the request and returns the full response.
    ///
    /// # Errors
    ///
    /// See [`RestClient::execute`].
    pub async fn send(self) -> Result<HttpResponse, HttpError> {
        let client = self.client;
        client.execute(self).await
    }

    /// Sends the request and returns the raw success body.
    ///
    /// # Errors
    ///
    /// Returns the stored configuration error without sending anything,
    /// or any error described by [`RestClient::execute`].
    pub async fn do_raw(self) -> Result<Vec<u8>, HttpError> {
        Ok(self.send().await?.body)
    }

    /// Sends the request and decodes the success body as JSON.
    ///
    /// # Errors
    ///
    /// As [`do_raw`](Self::do_raw), plus [`HttpError::Decode`] if the body
    /// does not match `T`.
    pub async fn do_json<T: DeserializeOwned>(self) -> Result<T, HttpError> {
        self.send().await?.json()
    }

    /// Sends the request and discards the success body.
    ///
    /// # Errors
    ///
    /// As [`do_raw`](Self::do_raw).
    pub async fn do_empty(self) -> Result<(), HttpError> {
        self.send().await.map(drop)
    }

    /// Like [`do_raw`](Self::do_raw), but gives up with
    /// [`HttpError::Cancelled`] as soon as `cancel` completes.
    ///
    /// # Errors
    ///
    /// As [`do_raw`](Self::do_raw), plus [`HttpError::Cancelled`].
    pub async fn do_raw_until<F>(self, cancel: F) -> Result<Vec<u8>, HttpError>
    where
        F: Future<Output = ()>,
    {
        let method = self.verb;
        tokio::select! {
            biased;
            () = cancel => {
                tracing::debug!(%method, "Request cancelled");
                Err(HttpError::Cancelled)
            }
            result = self.do_raw() => result,
        }
    }
}

fn empty_value(field: RequestField) -> InvalidRequestError {
    InvalidRequestError::InvalidSegment {
        field,
        value: String::new(),
        violations: vec![NAME_MAY_NOT_BE_EMPTY.to_string()],
    }
}

fn collect_fragments<I, S>(fragments: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fragments
        .into_iter()
        .map(|fragment| fragment.as_ref().to_string())
        .collect()
}

/// Formats a duration the way the appliance parses the `timeout` parameter.
///
/// Whole units are written as `1h0m0s`, `1m30s` or `30s`; fractional seconds
/// keep their significant digits (`1.5s`) and sub-second values use `ms`,
/// `µs` or `ns`.
///
/// # Example
///
/// ```rust
/// use bigip_rest::clients::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::from_secs(30)), "30s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m30s");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
/// assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
/// ```
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }

    if nanos < 1_000 {
        return format!("{nanos}ns");
    }
    if nanos < 1_000_000 {
        return format!("{}µs", with_fraction(nanos, 3));
    }
    if nanos < 1_000_000_000 {
        return format!("{}ms", with_fraction(nanos, 6));
    }

    let secs = duration.as_secs();
    let (hours, minutes, seconds) = (secs / 3600, (secs / 60) % 60, secs % 60);
    let subsec = u128::from(duration.subsec_nanos());

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}h{minutes}m"));
    } else if minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    out.push_str(&with_fraction(u128::from(seconds) * 1_000_000_000 + subsec, 9));
    out.push('s');
    out
}

/// Writes `value / 10^digits` with trailing fractional zeros removed.
fn with_fraction(value: u128, digits: u32) -> String {
    let scale = 10u128.pow(digits);
    let (whole, frac) = (value / scale, value % scale);
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{frac:0width$}", width = digits as usize);
    format!("{whole}.{}", frac.trim_end_matches('0'))
}
