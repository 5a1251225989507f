//! Seed data loading from config.toml
//!
//! The dashboard has no durable storage. Every run starts from the products,
//! sales and users listed in `config.toml`, which are loaded into the
//! in-memory store at startup.

use crate::{
    config::users::{SessionConfig, UserConfig},
    core::aggregation::Period,
    errors::{Error, Result},
};
use serde::Deserialize;
use std::path::Path;

/// Default seed file location.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Environment variable overriding the seed file location.
pub const CONFIG_PATH_ENV: &str = "STOCK_BUDDY_CONFIG";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Display settings
    #[serde(default)]
    pub settings: Settings,
    /// Who is signed in at startup
    #[serde(default)]
    pub session: SessionConfig,
    /// Products to load into the inventory
    #[serde(default)]
    pub products: Vec<ProductSeed>,
    /// Historical sales
    #[serde(default)]
    pub sales: Vec<SaleSeed>,
    /// Mock user directory
    #[serde(default)]
    pub users: Vec<UserConfig>,
}

/// `[settings]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Rows in the recent sales table
    pub recent_sales_limit: u64,
    /// Chart tab selected when the sales view opens
    pub default_period: Period,
    /// Fixed UTC offset in minutes for charts and dates; the system's local
    /// offset is used when absent
    pub utc_offset_minutes: Option<i32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            recent_sales_limit: 10,
            default_period: Period::default(),
            utc_offset_minutes: None,
        }
    }
}

/// A product in the seed inventory.
#[derive(Debug, Deserialize, Clone)]
pub struct ProductSeed {
    /// Fixed ID so seed sales can refer to it
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub stock: i64,
    pub threshold: i64,
    #[serde(default)]
    pub image: Option<String>,
}

/// A historical sale, positioned relative to startup time.
#[derive(Debug, Deserialize, Clone)]
pub struct SaleSeed {
    /// ID of a seed product; its name and price are snapshotted
    pub product_id: i64,
    pub quantity: i64,
    /// How long before startup the sale happened
    pub hours_ago: i64,
}

/// Loads seed configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path_ref = path.as_ref();
    tracing::debug!("Loading seed configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    parse_config(&contents)
}

/// Parses seed configuration from TOML text.
///
/// # Errors
/// Returns [`Error::Config`] when the text is not a valid seed file.
pub fn parse_config(contents: &str) -> Result<Config> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the seed file named by `STOCK_BUDDY_CONFIG`, or `./config.toml`.
pub fn load_default_config() -> Result<Config> {
    let path =
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    load_config(path)
}
