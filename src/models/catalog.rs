//! Catalog queries
//!
//! Only the JSON endpoints are covered; the XML catalog is not.

use super::API_PREFIX;
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig, RequestOptions};
use serde::{Deserialize, Serialize};

fn catalog_path(endpoint: &str) -> String {
    format!("{API_PREFIX}/catalog/{endpoint}")
}

/// Price in one currency
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub currency: String,
    pub value: f64,
}

/// Summary of a plan as listed by the catalog endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_list: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_phase_billing_period: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub final_phase_recurring_price: Vec<Price>,
}

/// Phase of a plan with its prices
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub phase_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prices: Vec<Price>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fixed_prices: Vec<Price>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pretty_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_period: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phases: Vec<Phase>,
}

/// Product of the simplified catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// BASE, ADD_ON or STANDALONE
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pretty_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plans: Vec<Plan>,
    /// Add-ons included with this product
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included: Vec<String>,
    /// Add-ons available for this product
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub available: Vec<String>,
}

/// One version of the simplified catalog; also hosts the catalog endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub currencies: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub products: Vec<Product>,
}

/// Older servers return a single catalog, newer ones every version
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogVersions {
    Many(Vec<Catalog>),
    One(Box<Catalog>),
}

impl Catalog {
    /// The simplified catalog, one entry per catalog version
    pub async fn simple_catalog(
        client: &HttpClient,
        options: &RequestOptions,
    ) -> Result<Vec<Self>> {
        let config = RequestConfig::new().options(options.clone());
        let versions: CatalogVersions = client
            .get_json(&catalog_path("simpleCatalog"), &config)
            .await?;

        Ok(match versions {
            CatalogVersions::Many(catalogs) => catalogs,
            CatalogVersions::One(catalog) => vec![*catalog],
        })
    }

    /// Find a product by name
    pub fn product(&self, name: &str) -> Option<&Product> {
        self.products
            .iter()
            .find(|product| product.name.as_deref() == Some(name))
    }

    /// Add-ons available for a base product
    pub async fn available_addons(
        client: &HttpClient,
        base_product_name: &str,
        options: &RequestOptions,
    ) -> Result<Vec<PlanDetail>> {
        let config = RequestConfig::new()
            .query("baseProductName", base_product_name)
            .options(options.clone());
        client
            .get_json(&catalog_path("availableAddons"), &config)
            .await
    }

    /// Base plans available for new subscriptions
    pub async fn available_base_plans(
        client: &HttpClient,
        options: &RequestOptions,
    ) -> Result<Vec<PlanDetail>> {
        let config = RequestConfig::new().options(options.clone());
        client
            .get_json(&catalog_path("availableBasePlans"), &config)
            .await
    }
}
