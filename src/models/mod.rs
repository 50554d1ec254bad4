//! Resource models
//!
//! Each resource is a plain serde struct mirroring the server's JSON
//! (camelCase on the wire) plus associated functions for its endpoints.
//! Every call takes the [`HttpClient`](crate::http::HttpClient) explicitly.

mod account;
mod catalog;
mod custom_field;
mod tag;
mod tag_definition;
mod tenant;

pub use account::Account;
pub use catalog::{Catalog, Phase, Plan, PlanDetail, Price, Product};
pub use custom_field::CustomField;
pub use tag::Tag;
pub use tag_definition::TagDefinition;
pub use tenant::Tenant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prefix of every API path
pub const API_PREFIX: &str = "/1.0/kb";

/// Audit log entry attached to resources fetched with audit info
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_token: Option<String>,
}

#[cfg(test)]
mod tests;
