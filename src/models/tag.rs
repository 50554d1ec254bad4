//! Tags attached to objects

use super::AuditLog;
use serde::{Deserialize, Serialize};

/// A tag instance: a tag definition applied to one object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_definition_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_definition_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audit_logs: Vec<AuditLog>,
}
