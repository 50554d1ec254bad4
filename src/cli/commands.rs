//! CLI commands and argument parsing

use clap::{Parser, Subcommand};

/// Kill Bill command-line client
#[derive(Parser, Debug)]
#[command(name = "killbill")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Server base URL
    #[arg(long, global = true, default_value = "http://127.0.0.1:8080")]
    pub url: String,

    /// Basic auth username
    #[arg(short, long, global = true, default_value = "admin")]
    pub username: String,

    /// Basic auth password
    #[arg(short, long, global = true, default_value = "password")]
    pub password: String,

    /// Tenant API key
    #[arg(long, global = true, requires = "api_secret")]
    pub api_key: Option<String>,

    /// Tenant API secret
    #[arg(long, global = true, requires = "api_key")]
    pub api_secret: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value = "30")]
    pub timeout: u64,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Account queries
    #[command(subcommand)]
    Accounts(AccountCommands),

    /// Tenant queries
    #[command(subcommand)]
    Tenants(TenantCommands),

    /// List tag definitions
    TagDefinitions,

    /// Catalog queries
    #[command(subcommand)]
    Catalog(CatalogCommands),
}

/// Account subcommands
#[derive(Subcommand, Debug)]
pub enum AccountCommands {
    /// List accounts page by page
    List {
        /// Offset of the first account
        #[arg(long, default_value = "0")]
        offset: u64,

        /// Accounts per page
        #[arg(long, default_value = "100")]
        limit: u64,

        /// Stop after this many accounts
        #[arg(long)]
        max_records: Option<usize>,

        /// Load every page before printing (prints totals too)
        #[arg(long, conflicts_with = "max_records")]
        all: bool,
    },

    /// Search accounts by name, email, external key...
    Search {
        /// Search key
        key: String,

        /// Offset of the first account
        #[arg(long, default_value = "0")]
        offset: u64,

        /// Accounts per page
        #[arg(long, default_value = "100")]
        limit: u64,
    },

    /// Get an account by id
    Get {
        /// Account id
        id: String,

        /// Include balance and CBA
        #[arg(long)]
        with_balance: bool,
    },

    /// Get an account by external key
    GetByKey {
        /// External key
        external_key: String,
    },

    /// List the tags set on an account
    Tags {
        /// Account id
        id: String,
    },

    /// List the custom fields stored on an account
    CustomFields {
        /// Account id
        id: String,
    },
}

/// Tenant subcommands
#[derive(Subcommand, Debug)]
pub enum TenantCommands {
    /// Get a tenant by id
    Get {
        /// Tenant id
        id: String,
    },

    /// Get a tenant by API key
    GetByApiKey {
        /// Tenant API key
        api_key: String,
    },
}

/// Catalog subcommands
#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// Show the simplified catalog
    Show,

    /// List available base plans
    BasePlans,

    /// List add-ons available for a base product
    Addons {
        /// Base product name
        product: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one document per line)
    Json,
    /// Indented JSON
    Pretty,
}
