//! HTTP client
//!
//! [`HttpClient`] is the context object passed to every API call. It owns
//! the base URL, the credentials and the transport, and it:
//! - Builds URLs (absolute URIs pass through untouched)
//! - Merges default, credential and per-request headers
//! - Turns statuses >= 400 into `Error::Server`
//! - Decodes JSON bodies

use super::options::RequestOptions;
use super::transport::{set_header, HttpRequest, HttpResponse, ReqwestTransport, Transport};
use crate::auth::Credentials;
use crate::error::{Error, Result};
use crate::pagination::PageFetcher;
use crate::types::{JsonValue, Method, QueryParams, StringMap};
use bytes::Bytes;
use reqwest::header::{HeaderMap, ACCEPT, CONTENT_TYPE, LOCATION};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default server address of a local Kill Bill
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for relative paths
    pub base_url: String,
    /// Request timeout, enforced by the transport
    pub timeout: Duration,
    /// Credentials sent with every request
    pub credentials: Credentials,
    /// Default headers for all requests
    pub default_headers: StringMap,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            credentials: Credentials::none(),
            default_headers: StringMap::new(),
            user_agent: format!("killbill-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for client config
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set basic auth credentials
    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        let tenant = self.config.credentials.tenant.take();
        self.config.credentials = Credentials::basic(username, password);
        self.config.credentials.tenant = tenant;
        self
    }

    /// Set tenant API key and secret
    pub fn tenant(mut self, api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        self.config.credentials = self.config.credentials.with_tenant(api_key, api_secret);
        self
    }

    /// Replace all credentials
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.config.credentials = credentials;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters, in order
    pub query: QueryParams,
    /// Request headers
    pub headers: StringMap,
    /// Request body (JSON)
    pub body: Option<JsonValue>,
    /// Per-call credential overrides and audit metadata
    pub options: RequestOptions,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }

    /// Set per-call options
    #[must_use]
    pub fn options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// Same headers and options, no query parameters and no body
    #[must_use]
    pub fn without_query(&self) -> Self {
        Self {
            query: QueryParams::new(),
            headers: self.headers.clone(),
            body: None,
            options: self.options.clone(),
        }
    }
}

/// Client context: base URL, credentials and transport
#[derive(Clone)]
pub struct HttpClient {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
}

impl HttpClient {
    /// Create a client backed by reqwest
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout, &config.user_agent)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client with a custom transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Pagination helper bound to this client
    pub fn fetcher(&self) -> PageFetcher {
        PageFetcher::new(self.clone())
    }

    /// Make a GET request
    pub async fn get(&self, path: &str, config: &RequestConfig) -> Result<HttpResponse> {
        self.send(Method::GET, path, config).await
    }

    /// Make a GET request and decode the JSON response
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        config: &RequestConfig,
    ) -> Result<T> {
        let response = self.get(path, config).await?;
        decode_json(&response)
    }

    /// Make a POST request with a JSON body
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        config: &RequestConfig,
    ) -> Result<HttpResponse> {
        let config = config.clone().json(encode_json(body)?);
        self.send(Method::POST, path, &config).await
    }

    /// Make a PUT request with a JSON body
    pub async fn put_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        config: &RequestConfig,
    ) -> Result<HttpResponse> {
        let config = config.clone().json(encode_json(body)?);
        self.send(Method::PUT, path, &config).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str, config: &RequestConfig) -> Result<HttpResponse> {
        self.send(Method::DELETE, path, config).await
    }

    /// POST a new resource, then GET it back from the `Location` header
    pub async fn create_and_follow<B, T>(
        &self,
        path: &str,
        body: &B,
        config: &RequestConfig,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.post_json(path, body, config).await?;
        self.follow_location(&response, config).await
    }

    /// POST without a body (query parameters only), then GET the `Location`
    pub async fn post_and_follow<T: DeserializeOwned>(
        &self,
        path: &str,
        config: &RequestConfig,
    ) -> Result<T> {
        let response = self.send(Method::POST, path, config).await?;
        self.follow_location(&response, config).await
    }

    async fn follow_location<T: DeserializeOwned>(
        &self,
        response: &HttpResponse,
        config: &RequestConfig,
    ) -> Result<T> {
        let location = response
            .header(LOCATION.as_str())
            .ok_or_else(|| Error::missing_header(LOCATION.as_str()))?
            .to_string();

        debug!("Created resource at {}", location);
        self.get_json(&location, &config.without_query()).await
    }

    /// Send a request and classify the response status
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        config: &RequestConfig,
    ) -> Result<HttpResponse> {
        let request = self.build_request(method, path, config)?;
        let url = request.url.clone();

        let response = self.transport.send(request).await?;

        if response.is_error() {
            debug!("Request failed: {} {} -> {}", method, url, response.status);
            return Err(Error::server(response.status, &response.body));
        }

        debug!("Request succeeded: {} {} -> {}", method, url, response.status);
        Ok(response)
    }

    /// Build the full request: URL, merged headers, encoded body
    pub fn build_request(
        &self,
        method: Method,
        path: &str,
        config: &RequestConfig,
    ) -> Result<HttpRequest> {
        let url = self.build_url(path, &config.query)?;

        let mut headers = HeaderMap::new();
        set_header(&mut headers, ACCEPT.as_str(), "application/json")?;
        for (key, value) in &self.config.default_headers {
            set_header(&mut headers, key, value)?;
        }
        self.config.credentials.apply(&mut headers)?;
        for (key, value) in &config.headers {
            set_header(&mut headers, key, value)?;
        }
        config.options.apply(&mut headers)?;

        let body = match &config.body {
            Some(json) => {
                set_header(&mut headers, CONTENT_TYPE.as_str(), "application/json")?;
                Some(Bytes::from(json.to_string()))
            }
            None => None,
        };

        Ok(HttpRequest {
            method,
            url,
            headers,
            body,
        })
    }

    /// Build full URL from a path or absolute URI, appending query parameters
    pub fn build_url(&self, path: &str, query: &[(String, String)]) -> Result<Url> {
        let mut url = if path.starts_with("http://") || path.starts_with("https://") {
            Url::parse(path)?
        } else {
            let base = self.config.base_url.trim_end_matches('/');
            let path = path.trim_start_matches('/');
            Url::parse(&format!("{base}/{path}"))?
        };

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        Ok(url)
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Decode a JSON response body
pub(crate) fn decode_json<T: DeserializeOwned>(response: &HttpResponse) -> Result<T> {
    serde_json::from_slice(&response.body)
        .map_err(|e| Error::decode(format!("Failed to parse JSON: {e}")))
}

fn encode_json<B: Serialize + ?Sized>(body: &B) -> Result<JsonValue> {
    serde_json::to_value(body).map_err(|e| Error::encode(e.to_string()))
}
