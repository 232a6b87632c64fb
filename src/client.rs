//! Mailosaur async client and HTTP request executor.

use crate::decode;
use crate::resources::{Analysis, Devices, Files, Messages, Previews, Servers, Usage};
use crate::{Error, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

const BASE_URL: &str = "https://mailosaur.com/";
const SMTP_HOST: &str = "mailosaur.net";
const USER_AGENT_VALUE: &str = concat!("mailosaur-rust/", env!("CARGO_PKG_VERSION"));

const ENV_API_KEY: &str = "MAILOSAUR_API_KEY";
const ENV_BASE_URL: &str = "MAILOSAUR_BASE_URL";
const ENV_SMTP_HOST: &str = "MAILOSAUR_SMTP_HOST";

/// Async client for the Mailosaur API.
///
/// Use [`Client::new`] with an API key for defaults, or [`Client::builder`] for
/// custom settings like the base URL, proxies, or a shared `reqwest::Client`.
/// Cloning is cheap and clones share one connection pool.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    api_key: String,
    base_url: Url,
    smtp_host: String,
    user_agent: String,
}

/// How a response body is expected to look.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RequestKind {
    /// JSON in and out; `204 No Content` is a valid empty answer.
    Json,
    /// Raw bytes out; an empty `204` means there is nothing to download.
    Binary,
}

/// Status, headers and body of a response the executor accepted.
#[derive(Debug)]
pub(crate) struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client for `api_key` with default settings.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailosaur_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), mailosaur_client::Error> {
    /// let client = Client::new("your-api-key")?;
    /// let servers = client.servers().list().await?;
    /// println!("{} servers", servers.items.len());
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new().api_key(api_key).build()
    }

    /// Create a client configured from `MAILOSAUR_*` environment variables.
    pub fn from_env() -> Result<Self> {
        ClientBuilder::from_env().build()
    }

    /// Base URL every request path is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Host used when generating email addresses for a server.
    pub fn smtp_host(&self) -> &str {
        &self.smtp_host
    }

    /// Server (inbox) management.
    pub fn servers(&self) -> Servers<'_> {
        Servers::new(self)
    }

    /// Message retrieval, search and sending.
    pub fn messages(&self) -> Messages<'_> {
        Messages::new(self)
    }

    /// Attachment, raw email and preview downloads.
    pub fn files(&self) -> Files<'_> {
        Files::new(self)
    }

    /// Spam and deliverability analysis.
    pub fn analysis(&self) -> Analysis<'_> {
        Analysis::new(self)
    }

    /// Virtual security devices and one-time passwords.
    pub fn devices(&self) -> Devices<'_> {
        Devices::new(self)
    }

    /// Account usage and limits.
    pub fn usage(&self) -> Usage<'_> {
        Usage::new(self)
    }

    /// Email clients available for previews.
    pub fn previews(&self) -> Previews<'_> {
        Previews::new(self)
    }

    /// Send one authenticated request and classify the response status.
    ///
    /// `200` is returned as-is, as is any other `2xx` for binary requests so that
    /// callers can tell a rendering preview (`202`) apart. `204` is an empty
    /// success for JSON and an error for binary requests. Every other status
    /// becomes [`Error::Server`].
    pub(crate) async fn execute<P>(
        &self,
        method: Method,
        path: &str,
        kind: RequestKind,
        query: &[(&str, String)],
        payload: Option<&P>,
    ) -> Result<RawResponse>
    where
        P: Serialize + ?Sized,
    {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| Error::InvalidUrl(format!("{path}: {e}")))?;

        debug!(%method, %url, "sending request");

        let mut request = self
            .http
            .request(method.clone(), url)
            .basic_auth(&self.api_key, Some(""))
            .headers(self.headers(kind));

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(payload) = payload {
            request = request.json(payload);
        }

        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        debug!(%method, path, status = status.as_u16(), "received response");

        classify(kind, RawResponse {
            status,
            headers,
            body,
        })
    }

    /// Send a request without a body.
    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        kind: RequestKind,
        query: &[(&str, String)],
    ) -> Result<RawResponse> {
        self.execute::<()>(method, path, kind, query, None).await
    }

    /// `GET` a JSON resource.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self.send(Method::GET, path, RequestKind::Json, query).await?;
        decode::json(&response)
    }

    /// Send a JSON payload and decode the JSON answer.
    pub(crate) async fn send_json<T, P>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        payload: &P,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let response = self
            .execute(method, path, RequestKind::Json, query, Some(payload))
            .await?;
        decode::json(&response)
    }

    /// Send a request whose answer carries no value, such as a delete.
    pub(crate) async fn send_empty(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<()> {
        self.send(method, path, RequestKind::Json, query).await?;
        Ok(())
    }

    /// Download a file that is available immediately.
    pub(crate) async fn get_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let response = self.send(Method::GET, path, RequestKind::Binary, &[]).await?;
        if response.status != StatusCode::OK {
            return Err(Error::Server(format!(
                "Unexpected status code: {}",
                response.status.as_u16()
            )));
        }
        Ok(response.body)
    }

    /// Build headers for API requests.
    fn headers(&self, kind: RequestKind) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&self.user_agent) {
            headers.insert(USER_AGENT, value);
        }
        if kind == RequestKind::Json {
            headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        headers
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("smtp_host", &self.smtp_host)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Body of a `400 Bad Request` response.
#[derive(Debug, Deserialize)]
struct BadRequest {
    #[serde(default)]
    errors: Vec<FieldError>,
}

#[derive(Debug, Deserialize)]
struct FieldError {
    field: String,
    #[serde(default)]
    detail: Vec<FieldErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct FieldErrorDetail {
    description: String,
}

/// Map an HTTP status onto success or one of the API error messages.
fn classify(kind: RequestKind, response: RawResponse) -> Result<RawResponse> {
    match response.status {
        StatusCode::OK => Ok(response),
        StatusCode::NO_CONTENT => match kind {
            RequestKind::Json => Ok(RawResponse {
                body: Vec::new(),
                ..response
            }),
            RequestKind::Binary => Err(Error::InvalidResponse(
                "no content returned for a file download".into(),
            )),
        },
        status if kind == RequestKind::Binary && status.is_success() => Ok(response),
        StatusCode::BAD_REQUEST => {
            let parsed: BadRequest = serde_json::from_slice(&response.body).map_err(|e| {
                Error::InvalidResponse(format!("unreadable bad request body: {e}"))
            })?;
            let message = parsed
                .errors
                .iter()
                .map(|error| {
                    let detail = error
                        .detail
                        .first()
                        .map(|d| d.description.as_str())
                        .unwrap_or_default();
                    format!("({}) {}", error.field, detail)
                })
                .collect::<Vec<_>>()
                .join("\r\n");
            Err(Error::Server(message))
        }
        StatusCode::UNAUTHORIZED => Err(Error::Server(
            "Authentication failed, check your API key.".into(),
        )),
        StatusCode::FORBIDDEN => Err(Error::Server(
            "Insufficient permission to perform that task.".into(),
        )),
        StatusCode::NOT_FOUND => Err(Error::Server("Not found, check input parameters.".into())),
        status => {
            warn!(status = status.as_u16(), "unexpected API status");
            Err(Error::Server(format!(
                "An API error occurred ({})",
                status.as_u16()
            )))
        }
    }
}

/// Builder for configuring a Mailosaur client.
///
/// Start with [`Client::builder`] or [`ClientBuilder::from_env`].
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    api_key: Option<String>,
    base_url: String,
    smtp_host: String,
    proxy: Option<String>,
    danger_accept_invalid_certs: bool,
    user_agent: String,
    timeout: Option<Duration>,
    http: Option<reqwest::Client>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - No API key (must be set before [`build`](Self::build))
    /// - Base URL `https://mailosaur.com/`
    /// - SMTP host `mailosaur.net`
    /// - No proxy, strict TLS validation, no request timeout
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: BASE_URL.to_string(),
            smtp_host: SMTP_HOST.to_string(),
            proxy: None,
            danger_accept_invalid_certs: false,
            user_agent: USER_AGENT_VALUE.to_string(),
            timeout: None,
            http: None,
        }
    }

    /// Builder seeded from `MAILOSAUR_API_KEY`, `MAILOSAUR_BASE_URL` and
    /// `MAILOSAUR_SMTP_HOST`. Unset variables keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut builder = Self::new();
        if let Some(api_key) = lookup(ENV_API_KEY) {
            builder = builder.api_key(api_key);
        }
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            builder = builder.base_url(base_url);
        }
        if let Some(smtp_host) = lookup(ENV_SMTP_HOST) {
            builder = builder.smtp_host(smtp_host);
        }
        builder
    }

    /// Set the API key used for HTTP basic authentication.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the API base URL.
    ///
    /// Useful for testing against a mock server.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the host used by [`Servers::generate_email_address`].
    pub fn smtp_host(mut self, smtp_host: impl Into<String>) -> Self {
        self.smtp_host = smtp_host.into();
        self
    }

    /// Set a proxy URL (e.g., "http://127.0.0.1:8080").
    ///
    /// Ignored when a client is supplied with [`http_client`](Self::http_client).
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Control whether to accept invalid TLS certificates (default: false).
    pub fn danger_accept_invalid_certs(mut self, value: bool) -> Self {
        self.danger_accept_invalid_certs = value;
        self
    }

    /// Override the default user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Per-request transport timeout. Polling timeouts are configured per call.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use an existing `reqwest::Client` (and its connection pool).
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Build the client.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailosaur_client::Client;
    /// # fn main() -> Result<(), mailosaur_client::Error> {
    /// let client = Client::builder()
    ///     .api_key("your-api-key")
    ///     .base_url("https://mailosaur.com/")
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(self) -> Result<Client> {
        let api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(Error::ClientUninitialized("an API key is required"))?;

        let base_url = parse_base_url(&self.base_url)?;

        let http = match self.http {
            Some(http) => http,
            None => {
                let mut builder = reqwest::Client::builder()
                    .danger_accept_invalid_certs(self.danger_accept_invalid_certs);
                if let Some(proxy_url) = &self.proxy {
                    builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
                }
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(Client {
            http,
            api_key,
            base_url,
            smtp_host: self.smtp_host,
            user_agent: self.user_agent,
        })
    }
}

/// Parse the base URL, making sure relative paths resolve beneath it.
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut normalized = raw.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    let url = Url::parse(&normalized).map_err(|e| Error::InvalidUrl(format!("{raw}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(Error::InvalidUrl(format!("{raw}: cannot be used as a base")));
    }
    Ok(url)
}
