//! Wistia HTTP Client
//!
//! Holds the access token and base endpoints and owns the JSON transport
//! shared by every resource.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT},
    Client, Method,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::trace;

use crate::customization::Customizations;
use crate::error::{bytes_with_limit, check_status, decode, WistiaError};
use crate::media::Medias;
use crate::project::Projects;

/// Client identifier sent as `User-Agent` on every request.
pub const USER_AGENT_VALUE: &str = concat!("wistia-rs/", env!("CARGO_PKG_VERSION"));

const PRODUCTION_API_ENDPOINT: &str = "https://api.wistia.com/v1/";
const PRODUCTION_UPLOAD_ENDPOINT: &str = "https://upload.wistia.com/";
const STAGING_API_ENDPOINT: &str = "https://api.wistia.st/v1/";
const STAGING_UPLOAD_ENDPOINT: &str = "https://upload-v2.wistia.st/";

/// Wistia deployment to talk to.
///
/// Deserializes through [`FromStr`], so names are case-insensitive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Environment {
    #[default]
    Production,
    Staging,
}

impl Environment {
    #[must_use]
    pub const fn api_endpoint(self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_API_ENDPOINT,
            Self::Staging => STAGING_API_ENDPOINT,
        }
    }

    #[must_use]
    pub const fn upload_endpoint(self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_UPLOAD_ENDPOINT,
            Self::Staging => STAGING_UPLOAD_ENDPOINT,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Staging => "staging",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = WistiaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            other => Err(WistiaError::InvalidConfig(format!(
                "unknown Wistia environment '{other}' (expected production or staging)"
            ))),
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = WistiaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Read-only client configuration.
#[derive(Clone)]
pub struct ClientConfig {
    access_token: String,
    api_endpoint: String,
    upload_endpoint: String,
}

impl ClientConfig {
    #[must_use]
    pub fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    #[must_use]
    pub fn upload_endpoint(&self) -> &str {
        &self.upload_endpoint
    }

    pub(crate) fn access_token(&self) -> &str {
        &self.access_token
    }
}

// The token never shows up in logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("access_token", &"<redacted>")
            .field("api_endpoint", &self.api_endpoint)
            .field("upload_endpoint", &self.upload_endpoint)
            .finish()
    }
}

/// Builder for [`WistiaClient`].
#[derive(Debug)]
pub struct ClientBuilder {
    access_token: String,
    environment: Environment,
    api_endpoint: Option<String>,
    upload_endpoint: Option<String>,
    http: Option<Client>,
}

impl ClientBuilder {
    fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            environment: Environment::default(),
            api_endpoint: None,
            upload_endpoint: None,
            http: None,
        }
    }

    /// Select both endpoints from a deployment.
    #[must_use]
    pub const fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Override the API base endpoint.
    #[must_use]
    pub fn api_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api_endpoint = Some(endpoint.into());
        self
    }

    /// Override the upload base endpoint.
    #[must_use]
    pub fn upload_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.upload_endpoint = Some(endpoint.into());
        self
    }

    /// Use a caller-configured [`reqwest::Client`] (timeouts, proxies, ...).
    #[must_use]
    pub fn http_client(mut self, client: Client) -> Self {
        self.http = Some(client);
        self
    }

    pub fn build(self) -> Result<WistiaClient, WistiaError> {
        if self.access_token.trim().is_empty() {
            return Err(WistiaError::InvalidConfig("access token must not be empty".to_string()));
        }
        // Fail here rather than on the first request.
        HeaderValue::from_str(&format!("Bearer {}", self.access_token))?;

        let http = match self.http {
            Some(client) => client,
            None => Client::builder()
                .connect_timeout(Duration::from_secs(10))
                .read_timeout(Duration::from_secs(10))
                .build()
                .map_err(|e| WistiaError::InvalidConfig(format!("failed to build HTTP client: {e}")))?,
        };

        let api_endpoint = with_trailing_slash(
            self.api_endpoint
                .unwrap_or_else(|| self.environment.api_endpoint().to_string()),
        );
        let upload_endpoint = self
            .upload_endpoint
            .unwrap_or_else(|| self.environment.upload_endpoint().to_string());

        Ok(WistiaClient {
            inner: Arc::new(ClientInner {
                config: ClientConfig {
                    access_token: self.access_token,
                    api_endpoint,
                    upload_endpoint,
                },
                http,
            }),
        })
    }
}

fn with_trailing_slash(mut endpoint: String) -> String {
    if !endpoint.ends_with('/') {
        endpoint.push('/');
    }
    endpoint
}

struct ClientInner {
    config: ClientConfig,
    http: Client,
}

/// Wistia Data API client
///
/// Cheap to clone; every clone shares the same connection pool and
/// configuration. Resource operations live on the views returned by
/// [`projects`](Self::projects), [`medias`](Self::medias) and
/// [`customizations`](Self::customizations).
#[derive(Clone)]
pub struct WistiaClient {
    inner: Arc<ClientInner>,
}

impl fmt::Debug for WistiaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WistiaClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl WistiaClient {
    /// Production client with default HTTP settings.
    pub fn new(access_token: impl Into<String>) -> Result<Self, WistiaError> {
        Self::builder(access_token).build()
    }

    #[must_use]
    pub fn builder(access_token: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(access_token)
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    #[must_use]
    pub const fn projects(&self) -> Projects<'_> {
        Projects::new(self)
    }

    #[must_use]
    pub const fn medias(&self) -> Medias<'_> {
        Medias::new(self)
    }

    #[must_use]
    pub const fn customizations(&self) -> Customizations<'_> {
        Customizations::new(self)
    }

    /// Absolute URL of a path under the API endpoint.
    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.inner.config.api_endpoint, path.trim_start_matches('/'))
    }

    #[must_use]
    pub fn upload_url(&self) -> &str {
        &self.inner.config.upload_endpoint
    }

    pub(crate) fn http(&self) -> &Client {
        &self.inner.http
    }

    pub(crate) fn access_token(&self) -> &str {
        self.inner.config.access_token()
    }

    /// Headers sent on every call.
    pub(crate) fn build_headers(&self) -> Result<HeaderMap, WistiaError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.access_token()))?,
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        Ok(headers)
    }

    /// Send a request and decode the JSON answer into `T`.
    pub(crate) async fn request<B, T>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<T, WistiaError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let bytes = self.execute(method, url, body).await?;
        decode(&bytes)
    }

    /// Send a request whose answer body is not needed.
    pub(crate) async fn request_empty<B>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<(), WistiaError>
    where
        B: Serialize + ?Sized,
    {
        self.execute(method, url, body).await.map(|_| ())
    }

    async fn execute<B>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<bytes::Bytes, WistiaError>
    where
        B: Serialize + ?Sized,
    {
        let mut builder = self
            .http()
            .request(method.clone(), url)
            .headers(self.build_headers()?);

        if let Some(body) = body {
            let payload =
                serde_json::to_vec(body).map_err(|e| WistiaError::Serialize(e.to_string()))?;
            trace!(
                method = %method,
                url,
                body = %String::from_utf8_lossy(&payload),
                "Wistia request"
            );
            builder = builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(payload);
        } else {
            trace!(method = %method, url, "Wistia request");
        }

        let response = builder.send().await?;
        read_response(response).await
    }
}

/// Log, size-check and status-check a response, returning its body.
pub(crate) async fn read_response(
    response: reqwest::Response,
) -> Result<bytes::Bytes, WistiaError> {
    let status = response.status();
    let url = response.url().to_string();
    let bytes = bytes_with_limit(response).await?;
    trace!(
        status = status.as_u16(),
        url,
        body = %String::from_utf8_lossy(&bytes),
        "Wistia response"
    );
    check_status(status, &bytes)?;
    Ok(bytes)
}

/// Percent-encode an identifier for use as a single path segment.
pub(crate) fn path_segment(id: &str) -> String {
    percent_encoding::utf8_percent_encode(id, percent_encoding::NON_ALPHANUMERIC).to_string()
}
