//! Broker HTTP client for API interactions

use log::debug;
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::error::{NgsiError, Result};
use crate::ngsi::credentials::Auth;
use crate::ngsi::dialect::{Dialect, DialectKind};

/// Status, headers and full body of one exchange
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Body as (lossy) text for diagnostics
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Turn a non-success status into an API error carrying the body
    pub fn error_for_status(self, context: &str) -> Result<Self> {
        if self.status.is_success() {
            return Ok(self);
        }
        Err(NgsiError::Api {
            status: self.status.as_u16(),
            message: format!("Failed to fetch {}: {} {}", context, self.status, self.body_text()),
        })
    }
}

/// Context broker API client
pub struct NgsiClient {
    client: Client,
    base_url: String,
    dialect: DialectKind,
    auth: Auth,
    tenant: Option<String>,
    scope: Option<String>,
    accept: Option<String>,
    safe_string: bool,
}

impl NgsiClient {
    /// Create a new client with connection timeouts
    pub fn new(base_url: &str, dialect: DialectKind, auth: Auth) -> Self {
        let client = Client::builder()
            .tcp_keepalive(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: normalize_base_url(base_url),
            dialect,
            auth,
            tenant: None,
            scope: None,
            accept: None,
            safe_string: false,
        }
    }

    /// Set the tenant (FIWARE-Service / NGSILD-Tenant)
    pub fn set_tenant(&mut self, tenant: Option<String>) {
        self.tenant = tenant;
    }

    /// Set the scope (FIWARE-ServicePath, NGSIv2 only)
    pub fn set_scope(&mut self, scope: Option<String>) {
        self.scope = scope;
    }

    /// Override the Accept header for subsequent requests
    pub fn set_accept(&mut self, accept: Option<&str>) {
        self.accept = accept.map(str::to_string);
    }

    /// Enable decoding of forbidden characters in responses
    pub fn set_safe_string(&mut self, enabled: bool) {
        self.safe_string = enabled;
    }

    pub fn is_safe_string(&self) -> bool {
        self.safe_string
    }

    pub fn dialect_kind(&self) -> DialectKind {
        self.dialect
    }

    /// Request/response mapping for the configured dialect
    pub fn dialect(&self) -> &'static dyn Dialect {
        self.dialect.adapter()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full URL with an encoded query string
    fn url(&self, path: &str, query: &[(String, String)]) -> String {
        let mut url = format!("{}{}", self.base_url, path);
        if !query.is_empty() {
            let pairs: Vec<String> = query
                .iter()
                .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                .collect();
            url.push('?');
            url.push_str(&pairs.join("&"));
        }
        url
    }

    /// Add standard headers to a request builder
    fn with_headers(&self, mut builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(value) = self.auth.header_value() {
            builder = builder.header("Authorization", value);
        }
        for (name, value) in self
            .dialect()
            .tenant_headers(self.tenant.as_deref(), self.scope.as_deref())
        {
            builder = builder.header(name, value);
        }
        if let Some(accept) = &self.accept {
            builder = builder.header("Accept", accept);
        }
        builder
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<RawResponse> {
        let response = self.with_headers(builder).send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();
        debug!("Response status {} ({} bytes)", status, body.len());
        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }

    /// GET with query parameters
    pub async fn get(&self, path: &str, query: &[(String, String)]) -> Result<RawResponse> {
        let url = self.url(path, query);
        debug!("GET {}", url);
        self.send(self.client.get(&url)).await
    }

    /// POST a JSON body with query parameters
    pub async fn post(
        &self,
        path: &str,
        query: &[(String, String)],
        body: Vec<u8>,
    ) -> Result<RawResponse> {
        let url = self.url(path, query);
        debug!("POST {}", url);
        let builder = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .body(body);
        self.send(builder).await
    }

    /// PUT with query parameters and an empty body
    pub async fn put(&self, path: &str, query: &[(String, String)]) -> Result<RawResponse> {
        let url = self.url(path, query);
        debug!("PUT {}", url);
        self.send(self.client.put(&url)).await
    }

    /// DELETE a resource
    pub async fn delete(&self, path: &str) -> Result<RawResponse> {
        let url = self.url(path, &[]);
        debug!("DELETE {}", url);
        self.send(self.client.delete(&url)).await
    }
}

/// Add a scheme to bare hosts and drop any trailing slash
fn normalize_base_url(host: &str) -> String {
    let trimmed = host.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}

#[cfg(test)]
impl NgsiClient {
    /// Create a test client pointing at a mock server
    pub fn test_client(base_url: &str, dialect: DialectKind) -> Self {
        Self::new(base_url, dialect, Auth::Anonymous)
    }
}
