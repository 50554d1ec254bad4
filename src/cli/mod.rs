//! CLI module
//!
//! Command-line interface for querying a Kill Bill server.
//!
//! # Commands
//!
//! - `accounts` - List, search and look up accounts, their tags and custom fields
//! - `tenants` - Look up tenants
//! - `tag-definitions` - List tag definitions
//! - `catalog` - Show the catalog, list base plans and add-ons

mod commands;
mod runner;

pub use commands::{AccountCommands, CatalogCommands, Cli, Commands, OutputFormat, TenantCommands};
pub use runner::Runner;
