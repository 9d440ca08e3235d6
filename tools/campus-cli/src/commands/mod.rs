//! CLI command implementations.

pub mod config;
pub mod search;
pub mod stats;
pub mod validate;

use clap::{Args, Subcommand};

/// Arguments for the search command.
#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Search text matched against title, description and category.
    pub query: Option<String>,

    /// Catalog file (default: store.catalog from the config).
    #[arg(long)]
    pub catalog: Option<String>,

    /// Start from a search page URL, e.g. "/search-results?q=bike".
    #[arg(long)]
    pub url: Option<String>,

    /// Category id, or "all".
    #[arg(short = 'C', long)]
    pub category: Option<String>,

    /// Minimum price in whole currency units.
    #[arg(long)]
    pub min: Option<i64>,

    /// Maximum price in whole currency units.
    #[arg(long)]
    pub max: Option<i64>,

    /// Accepted condition; repeat for several.
    #[arg(long = "condition")]
    pub conditions: Vec<String>,

    /// Posted within: 24h, 7d, 30d or all.
    #[arg(short, long)]
    pub timeframe: Option<String>,

    /// Sort mode: relevance, price-low, price-high, newest or popularity.
    #[arg(short, long)]
    pub sort: Option<String>,

    /// Page to show.
    #[arg(short, long, default_value = "1")]
    pub page: u32,

    /// Results per page.
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Reveal pages cumulatively instead of one at a time.
    #[arg(long)]
    pub infinite: bool,

    /// Show category and condition facets.
    #[arg(long)]
    pub facets: bool,
}

/// Arguments for the stats command.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Catalog file (default: store.catalog from the config).
    #[arg(long)]
    pub catalog: Option<String>,
}

/// Arguments for the validate command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Listing draft JSON file.
    pub draft: String,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
