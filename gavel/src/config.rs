//! Application configuration management.
//!
//! This module handles loading and merging configuration from multiple sources
//! with a clear precedence order. Configuration can come from default values,
//! configuration files, and environment variables.

use crate::Cli;
use gavel_core::models::FeeSchedule;
use serde::{Deserialize, Serialize};

/// The main application configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct AppConfig {
    /// Generated marketplace contents
    #[serde(default)]
    pub demo: DemoConfig,

    /// Taxes and auction house fees applied at settlement
    #[serde(default)]
    pub fees: FeeSchedule,
}

/// How much demo data to generate, and whether to generate it at all.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct DemoConfig {
    /// Seed the stores at startup (also switched on by `--demo`)
    pub enabled: bool,
    /// Number of demo clients
    pub clients: usize,
    /// Products listed per demo client
    pub products_per_client: usize,
    /// Upper bound (exclusive) on the bids placed on each product
    pub max_bids_per_product: usize,
    /// Upper bound (exclusive) on a product's initial cost, in dollars
    pub max_initial_cost: i64,
    /// Upper bound (exclusive) on a demo bid, in dollars
    pub max_bid: i64,
    /// Password shared by every demo client
    pub password: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            clients: 8,
            products_per_client: 3,
            max_bids_per_product: 10,
            max_initial_cost: 500,
            max_bid: 9999,
            password: "Pass123$".to_owned(),
        }
    }
}

impl AppConfig {
    /// Resolve the settings for this run.
    ///
    /// The built-in defaults are read first. A TOML file named with
    /// `--config` is layered over them, and `APP_*` variables win over both.
    /// A double underscore separates a table from its key, so
    /// `APP_FEES__GOVERNMENT_TAX_BPS=1000` sets `fees.government_tax_bps`.
    ///
    /// ```bash
    /// APP_DEMO__CLIENTS=20 gavel --demo
    /// ```
    ///
    /// `--demo` turns seeding on whatever the other sources say. A missing
    /// config file is an error rather than being skipped.
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let mut sources =
            config::Config::builder().add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = &cli.config {
            anyhow::ensure!(path.exists(), "no config file at {}", path.display());
            sources = sources.add_source(config::File::from(path.as_path()));
        }

        let mut loaded: Self = sources
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        loaded.demo.enabled |= cli.demo;
        Ok(loaded)
    }
}
