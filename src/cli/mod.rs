//! Command-line interface for tna-range.

pub mod args;
mod commands;

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::client::{
    ClientError, DirectoryClient, HttpDirectoryClient, RetryingDirectoryClient,
};
use crate::config::{read_config, ConfigError, DiscoveryConfig};
use crate::query::RangeSearchService;
use crate::walk::WalkError;

pub use args::{GlobalArgs, OutputSink};

/// Wait between retry attempts after a transport failure.
const RETRY_DELAY: Duration = Duration::from_millis(500);

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur during CLI execution.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument processing error.
    #[error("{0}")]
    Args(#[from] args::ArgsError),

    /// Configuration error.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Directory client error.
    #[error("{0}")]
    Client(#[from] ClientError),

    /// Traversal error.
    #[error("{0}")]
    Walk(#[from] WalkError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

// =============================================================================
// CLI Definition
// =============================================================================

/// tna-range - Range retrieval from the Discovery catalogue.
#[derive(Parser, Debug)]
#[command(name = "tna-range", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Retrieve a range of records as citable reference/description pairs.
    Range(commands::range::RangeArgs),

    /// Fetch one record's details (debugging aid).
    Details(commands::details::DetailsArgs),
}

// =============================================================================
// CLI Execution
// =============================================================================

impl Cli {
    /// Parse command-line arguments and return the CLI instance.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Run the CLI command.
    pub async fn run(self) -> Result<()> {
        let config = read_config(&self.global.to_config_source())?;
        let client = build_client(&config.discovery)?;

        match self.command {
            Command::Range(args) => {
                let service = RangeSearchService::new(client, config.discovery.page_size);
                args.run(&service, &self.global).await?;
            }
            Command::Details(args) => {
                args.run(client.as_ref(), &self.global).await?;
            }
        }

        Ok(())
    }
}

/// Build the client stack from configuration: HTTP transport, wrapped in a
/// retrying client when retries are enabled.
fn build_client(config: &DiscoveryConfig) -> Result<Arc<dyn DirectoryClient>> {
    let http = HttpDirectoryClient::with_timeout(
        &config.details_url,
        &config.children_url,
        Duration::from_secs(config.request_timeout_secs),
    )?;

    if config.max_retries == 0 {
        Ok(Arc::new(http))
    } else {
        Ok(Arc::new(RetryingDirectoryClient::new(
            http,
            config.max_retries,
            RETRY_DELAY,
        )))
    }
}

/// Main entry point for the CLI.
pub async fn main() -> Result<()> {
    let cli = Cli::parse_args();
    cli.run().await
}
