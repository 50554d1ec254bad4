//! CLI runner - executes commands

use crate::cli::commands::{AccountCommands, CatalogCommands, Cli, Commands, OutputFormat, TenantCommands};
use crate::error::{Error, Result};
use crate::http::{ClientConfig, HttpClient, RequestConfig, RequestOptions};
use crate::models::{Account, Catalog, TagDefinition, Tenant};
use futures::StreamExt;
use serde::Serialize;
use serde_json::json;
use std::io::Write;
use std::time::Duration;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let client = self.client()?;
        let options = RequestOptions::new();

        match &self.cli.command {
            Commands::Accounts(command) => self.accounts(&client, command, &options).await,
            Commands::Tenants(command) => self.tenants(&client, command, &options).await,
            Commands::TagDefinitions => {
                let definitions = TagDefinition::all(&client, &options).await?;
                self.emit_all(&definitions)
            }
            Commands::Catalog(command) => self.catalog(&client, command, &options).await,
        }
    }

    /// Build the client from global flags
    fn client(&self) -> Result<HttpClient> {
        let mut builder = ClientConfig::builder()
            .base_url(&self.cli.url)
            .timeout(Duration::from_secs(self.cli.timeout))
            .basic_auth(&self.cli.username, &self.cli.password);

        if let (Some(key), Some(secret)) = (&self.cli.api_key, &self.cli.api_secret) {
            builder = builder.tenant(key, secret);
        }

        HttpClient::new(builder.build())
    }

    async fn accounts(
        &self,
        client: &HttpClient,
        command: &AccountCommands,
        options: &RequestOptions,
    ) -> Result<()> {
        match command {
            AccountCommands::List {
                offset,
                limit,
                max_records,
                all,
            } => {
                if *all {
                    let accounts = Account::find_all(client, *offset, *limit, options).await?;
                    info!(
                        "Fetched {} accounts in {} pages (server reports {})",
                        accounts.len(),
                        accounts.pages_fetched,
                        accounts.pagination_total_nb_records
                    );
                    self.emit(&json!({
                        "pagination_total_nb_records": accounts.pagination_total_nb_records,
                        "pagination_max_nb_records": accounts.pagination_max_nb_records,
                    }))?;
                    return self.emit_all(&accounts.records);
                }

                let first = Account::find_in_batches(client, *offset, *limit, options).await?;
                info!(
                    "Listing accounts from offset {} ({} in total)",
                    offset,
                    first.total_nb_records()
                );

                let request = RequestConfig::new().options(options.clone());
                let stream = client.fetcher().iterate_from(first, &request);
                let mut stream = match max_records {
                    Some(max) => stream.take(*max).boxed(),
                    None => stream,
                };

                let mut count = 0usize;
                while let Some(account) = stream.next().await {
                    self.emit(&account?)?;
                    count += 1;
                }
                info!("Listed {} accounts", count);
                Ok(())
            }

            AccountCommands::Search { key, offset, limit } => {
                let page =
                    Account::find_in_batches_by_search_key(client, key, *offset, *limit, options)
                        .await?;
                info!(
                    "Found {} accounts matching '{}' ({} in total)",
                    page.len(),
                    key,
                    page.total_nb_records()
                );
                self.emit_all(&page.records)
            }

            AccountCommands::Get { id, with_balance } => {
                let account = Account::find_by_id(client, id, *with_balance, options).await?;
                self.emit(&account)
            }

            AccountCommands::GetByKey { external_key } => {
                let account = Account::find_by_external_key(client, external_key, options).await?;
                self.emit(&account)
            }

            AccountCommands::Tags { id } => {
                let tags = Account::with_id(id.as_str()).tags(client, options).await?;
                self.emit_all(&tags)
            }

            AccountCommands::CustomFields { id } => {
                let fields = Account::with_id(id.as_str())
                    .custom_fields(client, options)
                    .await?;
                self.emit_all(&fields)
            }
        }
    }

    async fn tenants(
        &self,
        client: &HttpClient,
        command: &TenantCommands,
        options: &RequestOptions,
    ) -> Result<()> {
        let tenant = match command {
            TenantCommands::Get { id } => Tenant::find_by_id(client, id, options).await?,
            TenantCommands::GetByApiKey { api_key } => {
                Tenant::find_by_api_key(client, api_key, options).await?
            }
        };
        self.emit(&tenant)
    }

    async fn catalog(
        &self,
        client: &HttpClient,
        command: &CatalogCommands,
        options: &RequestOptions,
    ) -> Result<()> {
        let plans = match command {
            CatalogCommands::Show => {
                let catalogs = Catalog::simple_catalog(client, options).await?;
                return self.emit_all(&catalogs);
            }
            CatalogCommands::BasePlans => Catalog::available_base_plans(client, options).await?,
            CatalogCommands::Addons { product } => {
                Catalog::available_addons(client, product, options).await?
            }
        };
        self.emit_all(&plans)
    }

    /// Write one document to stdout
    fn emit<T: Serialize>(&self, value: &T) -> Result<()> {
        let line = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value),
            OutputFormat::Pretty => serde_json::to_string_pretty(value),
        }
        .map_err(|e| Error::encode(e.to_string()))?;

        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{line}")?;
        Ok(())
    }

    fn emit_all<T: Serialize>(&self, values: &[T]) -> Result<()> {
        for value in values {
            self.emit(value)?;
        }
        Ok(())
    }
}
