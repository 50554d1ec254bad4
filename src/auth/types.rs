//! Credential types
//!
//! Credentials are plain values; `apply` renders them into a header map.
//! Debug output never shows passwords or API secrets.

use crate::error::Result;
use crate::http::set_header;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::header::{HeaderMap, AUTHORIZATION};
use std::fmt;

/// Header carrying the tenant API key
pub const API_KEY_HEADER: &str = "X-Killbill-ApiKey";

/// Header carrying the tenant API secret
pub const API_SECRET_HEADER: &str = "X-Killbill-ApiSecret";

/// HTTP basic authentication
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    /// Username
    pub username: String,
    /// Password
    pub password: String,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Value of the `Authorization` header
    pub fn header_value(&self) -> String {
        let token = STANDARD.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {token}")
    }

    pub fn apply(&self, headers: &mut HeaderMap) -> Result<()> {
        set_header(headers, AUTHORIZATION.as_str(), &self.header_value())
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Tenant API key and secret
#[derive(Clone, PartialEq, Eq)]
pub struct TenantKeys {
    /// Tenant API key
    pub api_key: String,
    /// Tenant API secret
    pub api_secret: String,
}

impl TenantKeys {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    pub fn apply(&self, headers: &mut HeaderMap) -> Result<()> {
        set_header(headers, API_KEY_HEADER, &self.api_key)?;
        set_header(headers, API_SECRET_HEADER, &self.api_secret)
    }
}

impl fmt::Debug for TenantKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TenantKeys")
            .field("api_key", &self.api_key)
            .field("api_secret", &"***")
            .finish()
    }
}

/// Credentials attached to every request made by a client
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Basic auth user
    pub basic: Option<BasicAuth>,
    /// Tenant selection (multi-tenant deployments)
    pub tenant: Option<TenantKeys>,
}

impl Credentials {
    /// No credentials
    pub fn none() -> Self {
        Self::default()
    }

    /// Credentials with basic auth only
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            basic: Some(BasicAuth::new(username, password)),
            tenant: None,
        }
    }

    /// Add tenant keys
    #[must_use]
    pub fn with_tenant(mut self, api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        self.tenant = Some(TenantKeys::new(api_key, api_secret));
        self
    }

    /// Whether tenant keys are configured
    pub fn is_multi_tenant(&self) -> bool {
        self.tenant.is_some()
    }

    /// Write the credential headers into `headers`, replacing existing ones
    pub fn apply(&self, headers: &mut HeaderMap) -> Result<()> {
        if let Some(basic) = &self.basic {
            basic.apply(headers)?;
        }
        if let Some(tenant) = &self.tenant {
            tenant.apply(headers)?;
        }
        Ok(())
    }
}
