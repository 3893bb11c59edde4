//! Command-line definitions

use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use infrastructure::{CatalogClientConfig, RetryConfig};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Default catalog service URL
pub const DEFAULT_URL: &str = "http://localhost:5000";

/// Play catalog CLI
#[derive(Debug, Parser)]
#[command(name = "catalog-cli")]
#[command(author, version, about = "Client for the Play catalog service", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Catalog service URL
    #[arg(short, long, env = "CATALOG_URL", default_value = DEFAULT_URL, global = true)]
    pub url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10, global = true)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List all items, retrying while the service warms up
    List {
        #[command(flatten)]
        retry: RetryArgs,

        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show a single item
    Get {
        /// Item ID
        id: Uuid,

        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },

    /// Create an item
    Create {
        #[arg(short, long)]
        name: String,

        #[arg(short, long, default_value = "")]
        description: String,

        #[arg(short, long)]
        price: Decimal,
    },

    /// Replace an item's name, description and price
    Update {
        /// Item ID
        id: Uuid,

        #[arg(short, long)]
        name: String,

        #[arg(short, long, default_value = "")]
        description: String,

        #[arg(short, long)]
        price: Decimal,
    },

    /// Delete an item
    Delete {
        /// Item ID
        id: Uuid,
    },

    /// Check service liveness (usable as a container healthcheck)
    Health,

    /// Show fault injection counters
    ChaosStats,
}

/// Backoff flags for `list`
#[derive(Debug, Clone, Args)]
pub struct RetryArgs {
    /// Retries after the first attempt
    #[arg(long, default_value_t = 5)]
    pub retries: u32,

    /// Delay before the first retry, in milliseconds
    #[arg(long, default_value_t = 500)]
    pub initial_delay_ms: u64,

    /// Upper bound for a single delay, in milliseconds
    #[arg(long, default_value_t = 8_000)]
    pub max_delay_ms: u64,

    /// Disable random jitter
    #[arg(long)]
    pub no_jitter: bool,
}

impl RetryArgs {
    pub fn to_config(&self) -> RetryConfig {
        let config = RetryConfig::new(self.initial_delay_ms, self.max_delay_ms, self.retries);
        if self.no_jitter {
            config.without_jitter()
        } else {
            config
        }
    }
}

impl Cli {
    /// Log filter for the chosen verbosity
    pub const fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Client settings; only `list` carries retry flags
    pub fn client_config(&self) -> CatalogClientConfig {
        let retry = match &self.command {
            Commands::List { retry, .. } => retry.to_config(),
            _ => RetryConfig::none(),
        };
        CatalogClientConfig {
            base_url: self.url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            retry,
        }
    }
}
