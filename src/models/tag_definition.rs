//! Tag definition resource

use super::{AuditLog, API_PREFIX};
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig, RequestOptions};
use serde::{Deserialize, Serialize};

fn tag_definitions_path() -> String {
    format!("{API_PREFIX}/tagDefinitions")
}

/// Definition of a tag that can be attached to objects
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_control_tag: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub applicable_object_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audit_logs: Vec<AuditLog>,
}

impl TagDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            description: Some(description.into()),
            ..Default::default()
        }
    }

    /// All tag definitions, control tags included
    pub async fn all(client: &HttpClient, options: &RequestOptions) -> Result<Vec<Self>> {
        let config = RequestConfig::new().options(options.clone());
        client.get_json(&tag_definitions_path(), &config).await
    }

    /// Find a tag definition by name; `None` if no definition has that name
    pub async fn find_by_name(
        client: &HttpClient,
        name: &str,
        options: &RequestOptions,
    ) -> Result<Option<Self>> {
        let definitions = Self::all(client, options).await?;
        Ok(definitions
            .into_iter()
            .find(|d| d.name.as_deref() == Some(name)))
    }

    /// Create this tag definition on the server and return the stored copy
    pub async fn create(&self, client: &HttpClient, options: &RequestOptions) -> Result<Self> {
        let config = RequestConfig::new().options(options.clone());
        client
            .create_and_follow(&tag_definitions_path(), self, &config)
            .await
    }
}
