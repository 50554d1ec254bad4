//! Per-call request options
//!
//! Options override the client's credentials for a single call and carry
//! the audit metadata the server records on mutating calls.

use crate::auth::{BasicAuth, TenantKeys};
use crate::error::Result;
use crate::types::StringMap;
use reqwest::header::HeaderMap;

use super::transport::set_header;

/// Header naming the user behind a mutating call
pub const CREATED_BY_HEADER: &str = "X-Killbill-CreatedBy";

/// Header carrying the reason code of a mutating call
pub const REASON_HEADER: &str = "X-Killbill-Reason";

/// Header carrying a free-form comment on a mutating call
pub const COMMENT_HEADER: &str = "X-Killbill-Comment";

/// Audit metadata recorded by the server on mutating calls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditContext {
    /// User performing the change
    pub created_by: Option<String>,
    /// Reason code
    pub reason: Option<String>,
    /// Free-form comment
    pub comment: Option<String>,
}

impl AuditContext {
    pub fn new(created_by: impl Into<String>) -> Self {
        Self {
            created_by: Some(created_by.into()),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.created_by.is_none() && self.reason.is_none() && self.comment.is_none()
    }

    pub fn apply(&self, headers: &mut HeaderMap) -> Result<()> {
        let fields = [
            (CREATED_BY_HEADER, &self.created_by),
            (REASON_HEADER, &self.reason),
            (COMMENT_HEADER, &self.comment),
        ];
        for (name, value) in fields {
            if let Some(value) = value {
                set_header(headers, name, value)?;
            }
        }
        Ok(())
    }
}

/// Options for a single API call
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Override the client's basic credentials
    pub basic: Option<BasicAuth>,
    /// Override the client's tenant keys
    pub tenant: Option<TenantKeys>,
    /// Audit metadata
    pub audit: AuditContext,
    /// Extra headers
    pub headers: StringMap,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for a mutating call made on behalf of `user`
    pub fn audited(user: impl Into<String>) -> Self {
        Self {
            audit: AuditContext::new(user),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.basic = Some(BasicAuth::new(username, password));
        self
    }

    #[must_use]
    pub fn tenant(mut self, api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        self.tenant = Some(TenantKeys::new(api_key, api_secret));
        self
    }

    #[must_use]
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.audit.reason = Some(reason.into());
        self
    }

    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.audit.comment = Some(comment.into());
        self
    }

    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Render all options into headers, replacing existing values
    pub fn apply(&self, headers: &mut HeaderMap) -> Result<()> {
        for (key, value) in &self.headers {
            set_header(headers, key, value)?;
        }
        if let Some(basic) = &self.basic {
            basic.apply(headers)?;
        }
        if let Some(tenant) = &self.tenant {
            tenant.apply(headers)?;
        }
        self.audit.apply(headers)
    }
}
