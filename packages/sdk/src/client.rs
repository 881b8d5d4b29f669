//! API Client
//!
//! HTTP client for the Beamlit control plane. Endpoint functions in
//! [`crate::api`] build a [`Request`], declare which statuses they document
//! and how to parse each one, and hand both to [`Client::execute`].

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::codec::{decode_list, JsonKind, JsonMap, Record};
use crate::error::{Error, Result};
use crate::settings::Settings;

// Header names must be lowercase for `HeaderName::from_static`
const API_KEY_HEADER: &str = "x-beamlit-api-key";
const WORKSPACE_HEADER: &str = "x-beamlit-workspace";

/// How requests authenticate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Sent as `X-Beamlit-Api-Key`
    ApiKey(String),
    /// Sent as `Authorization: Bearer`
    Jwt(String),
    /// Base64 `client_id:client_secret`, sent as `Authorization: Basic`
    ClientCredentials(String),
}

impl Credentials {
    pub fn client_credentials(client_id: &str, client_secret: &str) -> Self {
        Credentials::ClientCredentials(BASE64.encode(format!("{}:{}", client_id, client_secret)))
    }

    fn apply(&self, headers: &mut HeaderMap) -> Result<()> {
        let (name, value) = match self {
            Credentials::ApiKey(key) => (HeaderName::from_static(API_KEY_HEADER), key.clone()),
            Credentials::Jwt(token) => (AUTHORIZATION, format!("Bearer {}", token)),
            Credentials::ClientCredentials(encoded) => (AUTHORIZATION, format!("Basic {}", encoded)),
        };
        let value = HeaderValue::from_str(&value)
            .map_err(|_| Error::config("Credentials contain invalid header characters"))?;
        headers.insert(name, value);
        Ok(())
    }
}

/// Raw response plus the typed value, when the status is documented
#[derive(Debug, Clone)]
pub struct Response<T> {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub content: Bytes,
    /// `None` for undocumented statuses (when not raising) and for
    /// documented statuses that carry no value
    pub parsed: Option<T>,
}

impl<T> Response<T> {
    pub fn into_parsed(self) -> Option<T> {
        self.parsed
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// What a documented status turned into
pub enum Outcome<T> {
    Parsed(T),
    /// Documented, but without a body value
    Empty,
    /// Not a status this endpoint knows about
    Undocumented,
}

/// An outgoing call, relative to the client's base URL.
///
/// The path is given as segments, e.g. `["agents", name]`; each one is
/// percent-encoded, so a name containing `/` or `?` stays a single segment.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    segments: Vec<String>,
    query: Vec<(String, String)>,
    body: Option<Value>,
}

impl Request {
    pub fn new<I, S>(method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::GET, segments)
    }

    pub fn post<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::POST, segments)
    }

    pub fn put<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::PUT, segments)
    }

    pub fn delete<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::DELETE, segments)
    }

    /// Add a query parameter, skipped when `value` is `None`
    pub fn query(mut self, key: &str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.query.push((key.to_string(), value.to_string()));
        }
        self
    }

    pub fn json(mut self, body: JsonMap) -> Self {
        self.body = Some(Value::Object(body));
        self
    }
}

/// Builder for [`Client`]
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: String,
    run_url: String,
    environment: String,
    workspace: Option<String>,
    credentials: Option<Credentials>,
    timeout: Duration,
    raise_on_unexpected_status: bool,
}

impl ClientBuilder {
    pub fn run_url(mut self, url: impl Into<String>) -> Self {
        self.run_url = url.into();
        self
    }

    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    pub fn workspace(mut self, workspace: impl Into<String>) -> Self {
        self.workspace = Some(workspace.into());
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// When false, undocumented statuses yield a response with `parsed = None`
    /// instead of [`Error::UnexpectedStatus`]
    pub fn raise_on_unexpected_status(mut self, raise: bool) -> Self {
        self.raise_on_unexpected_status = raise;
        self
    }

    pub fn build(self) -> Result<Client> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(credentials) = &self.credentials {
            credentials.apply(&mut headers)?;
        }
        if let Some(workspace) = &self.workspace {
            let value = HeaderValue::from_str(workspace)
                .map_err(|_| Error::config(format!("Invalid workspace name: {}", workspace)))?;
            headers.insert(WORKSPACE_HEADER, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(self.timeout)
            .build()?;

        Ok(Client {
            http,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            run_url: self.run_url.trim_end_matches('/').to_string(),
            environment: self.environment,
            workspace: self.workspace,
            raise_on_unexpected_status: self.raise_on_unexpected_status,
        })
    }
}

/// Authenticated client for the control plane
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    run_url: String,
    environment: String,
    workspace: Option<String>,
    raise_on_unexpected_status: bool,
}

impl Client {
    pub fn builder(base_url: impl Into<String>) -> ClientBuilder {
        let defaults = Settings::default();
        ClientBuilder {
            base_url: base_url.into(),
            run_url: defaults.run_url,
            environment: defaults.environment,
            workspace: None,
            credentials: None,
            timeout: Duration::from_secs(defaults.timeout_secs),
            raise_on_unexpected_status: true,
        }
    }

    /// Create from loaded settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let mut builder = Self::builder(&settings.base_url)
            .run_url(&settings.run_url)
            .environment(&settings.environment)
            .timeout(Duration::from_secs(settings.timeout_secs));
        if let Some(workspace) = &settings.workspace {
            builder = builder.workspace(workspace);
        }
        if let Some(credentials) = settings.credentials() {
            builder = builder.credentials(credentials);
        }
        builder.build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn run_url(&self) -> &str {
        &self.run_url
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn workspace(&self) -> Option<&str> {
        self.workspace.as_deref()
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Send `request` and map the status through `parse`
    pub async fn execute<T, F>(&self, request: Request, parse: F) -> Result<Response<T>>
    where
        F: FnOnce(StatusCode, &[u8]) -> Result<Outcome<T>>,
    {
        let url = join_url(&self.base_url, &request.segments)?;
        debug!(method = %request.method, url = %url, "Sending request");

        let mut builder = self.http.request(request.method, url.clone());
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let content = response.bytes().await?;
        debug!(status = %status, bytes = content.len(), "Received response");

        let parsed = match parse(status, &content)? {
            Outcome::Parsed(value) => Some(value),
            Outcome::Empty => None,
            Outcome::Undocumented if self.raise_on_unexpected_status => {
                let body = String::from_utf8_lossy(&content).into_owned();
                warn!(status = %status, url = %url, "Unexpected status");
                return Err(Error::UnexpectedStatus { status, body });
            }
            Outcome::Undocumented => None,
        };

        Ok(Response {
            status,
            headers,
            content,
            parsed,
        })
    }
}

/// Append `segments` to the path of `base`, percent-encoding each one
pub(crate) fn join_url<I, S>(base: &str, segments: I) -> Result<Url>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut url =
        Url::parse(base).map_err(|e| Error::config(format!("Invalid URL {}: {}", base, e)))?;
    url.path_segments_mut()
        .map_err(|_| Error::config(format!("URL cannot have a path: {}", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn parse_json(content: &[u8]) -> Result<Value> {
    Ok(serde_json::from_slice(content)?)
}

/// Decode a body that must be a single record
pub fn parse_record<R: Record>(content: &[u8]) -> Result<R> {
    match parse_json(content)? {
        Value::Object(map) => Ok(R::decode(map)?),
        other => Err(Error::BodyShape {
            expected: "object",
            found: JsonKind::of(&other),
        }),
    }
}

/// Decode a body that must be a list of records; any bad element fails the list
pub fn parse_records<R: Record>(content: &[u8]) -> Result<Vec<R>> {
    match parse_json(content)? {
        Value::Array(items) => Ok(decode_list(items)?),
        other => Err(Error::BodyShape {
            expected: "array",
            found: JsonKind::of(&other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Workspace;

    #[test]
    fn test_client_credentials_encoding() {
        let creds = Credentials::client_credentials("id", "secret");
        assert_eq!(creds, Credentials::ClientCredentials("aWQ6c2VjcmV0".into()));
    }

    #[test]
    fn test_credentials_headers() {
        let mut headers = HeaderMap::new();
        Credentials::ApiKey("k".into()).apply(&mut headers).unwrap();
        assert_eq!(headers.get(API_KEY_HEADER).unwrap(), "k");

        let mut headers = HeaderMap::new();
        Credentials::Jwt("t".into()).apply(&mut headers).unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer t");
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let client = Client::builder("http://localhost:1234/v0/")
            .workspace("acme")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:1234/v0");
        assert_eq!(client.workspace(), Some("acme"));
        assert_eq!(client.environment(), "production");
    }

    #[test]
    fn test_join_url_encodes_each_segment() {
        let url = join_url("http://localhost:1234/v0", ["agents", "a/b c?#"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:1234/v0/agents/a%2Fb%20c%3F%23");
        assert_eq!(url.path_segments().map(|s| s.count()), Some(3));

        let url = join_url("http://localhost:1234", ["workspaces"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:1234/workspaces");

        assert!(join_url("not a url", ["agents"]).is_err());
    }

    #[test]
    fn test_parse_record_rejects_array_body() {
        let err = parse_record::<Workspace>(b"[]").unwrap_err();
        assert!(matches!(
            err,
            Error::BodyShape {
                expected: "object",
                found: JsonKind::Array
            }
        ));
    }

    #[test]
    fn test_parse_records_reports_index() {
        let err = parse_records::<Workspace>(br#"[{"name":"a"},{"name":1}]"#).unwrap_err();
        match err {
            Error::SchemaViolation(v) => assert_eq!(v.field, "[1].name"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
