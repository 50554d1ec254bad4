//! Account resource

use super::{AuditLog, CustomField, Tag, TagDefinition, API_PREFIX};
use crate::error::{Error, Result};
use crate::http::{encode_path_segment, HttpClient, RequestConfig, RequestOptions};
use crate::pagination::{Page, PaginatedList, RecordStream};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn accounts_path() -> String {
    format!("{API_PREFIX}/accounts")
}

fn account_path(account_id: &str) -> String {
    format!("{}/{}", accounts_path(), encode_path_segment(account_id))
}

/// A customer account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name_length: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_cycle_day_local: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_payment_delegated_to_parent: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_migrated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_notified_for_invoices: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_balance: Option<f64>,
    #[serde(
        rename = "accountCBA",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub account_cba: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audit_logs: Vec<AuditLog>,
}

impl Account {
    /// Handle on an existing account, for calls that only need its id
    pub fn with_id(account_id: impl Into<String>) -> Self {
        Self {
            account_id: Some(account_id.into()),
            ..Default::default()
        }
    }

    fn id(&self) -> Result<&str> {
        self.account_id
            .as_deref()
            .ok_or(Error::MissingId { resource: "Account" })
    }

    /// Create this account on the server and return the stored copy
    pub async fn create(&self, client: &HttpClient, options: &RequestOptions) -> Result<Self> {
        let config = RequestConfig::new().options(options.clone());
        client
            .create_and_follow(&accounts_path(), self, &config)
            .await
    }

    /// Find an account by id, optionally with its balance and CBA
    pub async fn find_by_id(
        client: &HttpClient,
        account_id: &str,
        with_balance: bool,
        options: &RequestOptions,
    ) -> Result<Self> {
        let path = account_path(account_id);
        let mut config = RequestConfig::new().options(options.clone());
        if with_balance {
            config = config
                .query("accountWithBalance", true)
                .query("accountWithBalanceAndCBA", true);
        }
        client.get_json(&path, &config).await
    }

    /// Find an account by its external key
    pub async fn find_by_external_key(
        client: &HttpClient,
        external_key: &str,
        options: &RequestOptions,
    ) -> Result<Self> {
        let config = RequestConfig::new()
            .query("externalKey", external_key)
            .options(options.clone());
        client.get_json(&accounts_path(), &config).await
    }

    /// Fetch one page of accounts
    pub async fn find_in_batches(
        client: &HttpClient,
        offset: u64,
        limit: u64,
        options: &RequestOptions,
    ) -> Result<Page<Self>> {
        let config = page_request(offset, limit, options);
        client
            .fetcher()
            .fetch_page(&format!("{}/pagination", accounts_path()), &config)
            .await
    }

    /// Fetch one page of accounts matching a search key
    pub async fn find_in_batches_by_search_key(
        client: &HttpClient,
        search_key: &str,
        offset: u64,
        limit: u64,
        options: &RequestOptions,
    ) -> Result<Page<Self>> {
        let path = format!(
            "{}/search/{}",
            accounts_path(),
            encode_path_segment(search_key)
        );
        let config = page_request(offset, limit, options);
        client.fetcher().fetch_page(&path, &config).await
    }

    /// Lazily walk every account, `limit` records per page
    pub fn each_in_batches(
        client: &HttpClient,
        limit: u64,
        options: &RequestOptions,
    ) -> RecordStream<Self> {
        let config = page_request(0, limit, options);
        client
            .fetcher()
            .iterate(&format!("{}/pagination", accounts_path()), config)
    }

    /// Load every account from `offset` on into memory, `limit` records per page
    pub async fn find_all(
        client: &HttpClient,
        offset: u64,
        limit: u64,
        options: &RequestOptions,
    ) -> Result<PaginatedList<Self>> {
        let config = page_request(offset, limit, options);
        client
            .fetcher()
            .fetch_all(&format!("{}/pagination", accounts_path()), config)
            .await
    }

    // ========================================================================
    // Tags
    // ========================================================================

    /// Tags currently set on this account
    pub async fn tags(&self, client: &HttpClient, options: &RequestOptions) -> Result<Vec<Tag>> {
        let path = format!("{}/tags", account_path(self.id()?));
        let config = RequestConfig::new()
            .query("includedDeleted", false)
            .query("audit", "NONE")
            .options(options.clone());
        client.get_json(&path, &config).await
    }

    /// Tag this account with the definition called `tag_name`.
    ///
    /// Returns the account's tags after the change.
    pub async fn add_tag(
        &self,
        client: &HttpClient,
        tag_name: &str,
        options: &RequestOptions,
    ) -> Result<Vec<Tag>> {
        let path = format!("{}/tags", account_path(self.id()?));
        let definition_id = tag_definition_id(client, tag_name, options).await?;
        let config = RequestConfig::new()
            .query("tagDef", definition_id)
            .options(options.clone());
        client.post_and_follow(&path, &config).await
    }

    /// Remove the tag called `tag_name` from this account
    pub async fn remove_tag(
        &self,
        client: &HttpClient,
        tag_name: &str,
        options: &RequestOptions,
    ) -> Result<()> {
        let path = format!("{}/tags", account_path(self.id()?));
        let definition_id = tag_definition_id(client, tag_name, options).await?;
        let config = RequestConfig::new()
            .query("tagDef", definition_id)
            .options(options.clone());
        client.delete(&path, &config).await?;
        Ok(())
    }

    // ========================================================================
    // Custom fields
    // ========================================================================

    /// Custom fields stored on this account
    pub async fn custom_fields(
        &self,
        client: &HttpClient,
        options: &RequestOptions,
    ) -> Result<Vec<CustomField>> {
        let path = format!("{}/customFields", account_path(self.id()?));
        let config = RequestConfig::new()
            .query("audit", "NONE")
            .options(options.clone());
        client.get_json(&path, &config).await
    }

    /// Store a custom field on this account; returns the account's fields after the change
    pub async fn add_custom_field(
        &self,
        client: &HttpClient,
        custom_field: &CustomField,
        options: &RequestOptions,
    ) -> Result<Vec<CustomField>> {
        let path = format!("{}/customFields", account_path(self.id()?));
        let config = RequestConfig::new().options(options.clone());
        client
            .create_and_follow(&path, std::slice::from_ref(custom_field), &config)
            .await
    }

    pub async fn remove_custom_field(
        &self,
        client: &HttpClient,
        custom_field_id: &str,
        options: &RequestOptions,
    ) -> Result<()> {
        let path = format!("{}/customFields", account_path(self.id()?));
        let config = RequestConfig::new()
            .query("customField", custom_field_id)
            .options(options.clone());
        client.delete(&path, &config).await?;
        Ok(())
    }
}

/// Resolve a tag definition name to its id
async fn tag_definition_id(
    client: &HttpClient,
    tag_name: &str,
    options: &RequestOptions,
) -> Result<String> {
    TagDefinition::find_by_name(client, tag_name, options)
        .await?
        .and_then(|definition| definition.id)
        .ok_or_else(|| Error::not_found("Tag definition", tag_name))
}

fn page_request(offset: u64, limit: u64, options: &RequestOptions) -> RequestConfig {
    RequestConfig::new()
        .query("offset", offset)
        .query("limit", limit)
        .options(options.clone())
}
