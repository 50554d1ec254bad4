//! Tenant resource

use super::API_PREFIX;
use crate::error::Result;
use crate::http::{encode_path_segment, HttpClient, RequestConfig, RequestOptions};
use serde::{Deserialize, Serialize};

fn tenants_path() -> String {
    format!("{API_PREFIX}/tenants")
}

/// A tenant of a multi-tenant deployment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_secret: Option<String>,
}

impl Tenant {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            api_secret: Some(api_secret.into()),
            ..Default::default()
        }
    }

    /// Create this tenant on the server and return the stored copy
    pub async fn create(&self, client: &HttpClient, options: &RequestOptions) -> Result<Self> {
        let config = RequestConfig::new().options(options.clone());
        client.create_and_follow(&tenants_path(), self, &config).await
    }

    pub async fn find_by_id(
        client: &HttpClient,
        tenant_id: &str,
        options: &RequestOptions,
    ) -> Result<Self> {
        let path = format!("{}/{}", tenants_path(), encode_path_segment(tenant_id));
        let config = RequestConfig::new().options(options.clone());
        client.get_json(&path, &config).await
    }

    pub async fn find_by_api_key(
        client: &HttpClient,
        api_key: &str,
        options: &RequestOptions,
    ) -> Result<Self> {
        let config = RequestConfig::new()
            .query("apiKey", api_key)
            .options(options.clone());
        client.get_json(&tenants_path(), &config).await
    }
}
