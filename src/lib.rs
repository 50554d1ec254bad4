//! # Kill Bill client
//!
//! A Rust client for the Kill Bill billing platform REST API.
//!
//! ## Features
//!
//! - **Typed resources**: accounts, tenants, tag definitions, catalog plans
//! - **Explicit context**: one `HttpClient` carries base URL, credentials and transport
//! - **Pagination**: eager `fetch_all` or lazy record-at-a-time streams that stop
//!   fetching as soon as the consumer stops reading
//! - **Audit metadata**: per-call `created_by`/`reason`/`comment` headers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::TryStreamExt;
//! use killbill_client::http::{ClientConfig, HttpClient, RequestOptions};
//! use killbill_client::models::Account;
//!
//! #[tokio::main]
//! async fn main() -> killbill_client::Result<()> {
//!     let config = ClientConfig::builder()
//!         .base_url("http://127.0.0.1:8080")
//!         .basic_auth("admin", "password")
//!         .tenant("bob", "lazar")
//!         .build();
//!     let client = HttpClient::new(config)?;
//!     let options = RequestOptions::new();
//!
//!     // Walk every account, 100 per page, stopping at the first match
//!     let mut accounts = Account::each_in_batches(&client, 100, &options);
//!     while let Some(account) = accounts.try_next().await? {
//!         if account.external_key.as_deref() == Some("my-key") {
//!             println!("{account:?}");
//!             break;
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  models: Account (tags, custom fields) · Tenant · Catalog │
//! └──────────────────────────────┬───────────────────────────┘
//!                                │
//! ┌──────────────────┬───────────┴──────────┬────────────────┐
//! │   pagination     │        http          │      auth      │
//! ├──────────────────┼──────────────────────┼────────────────┤
//! │ fetch_page       │ HttpClient (context) │ Basic          │
//! │ fetch_all        │ RequestOptions       │ Tenant keys    │
//! │ iterate (Stream) │ Transport (reqwest)  │                │
//! └──────────────────┴──────────────────────┴────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Common types and type aliases
pub mod types;

/// Credentials
pub mod auth;

/// HTTP client and transport
pub mod http;

/// Paginated collection fetcher
pub mod pagination;

/// Resource models
pub mod models;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use http::{ClientConfig, HttpClient, RequestConfig, RequestOptions};
pub use pagination::{Page, PageFetcher, PaginatedList, RecordStream};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
