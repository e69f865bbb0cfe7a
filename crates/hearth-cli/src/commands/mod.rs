//! Command modules, one per household domain.

pub mod badges;
pub mod config;
pub mod expense;
pub mod household;
pub mod inventory;
pub mod plant;
pub mod recurring;
pub mod search;
pub mod shopping;
pub mod task;
pub mod vendor;

use chrono::NaiveDate;
use hearth_core::Config;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// The household the CLI operates on, from configuration.
pub fn active_household(config: &Config) -> Result<String, Box<dyn std::error::Error>> {
    config
        .active_household
        .clone()
        .ok_or_else(|| "no active household; run `hearth household create <name>` or `hearth config set active_household <id>`".into())
}

/// The user id recorded on created records, from configuration.
pub fn active_user(config: &Config) -> Result<String, Box<dyn std::error::Error>> {
    config
        .active_user
        .clone()
        .ok_or_else(|| "no active user; run `hearth config set active_user <id>`".into())
}

/// Parse a `YYYY-MM-DD` argument.
pub fn parse_date(raw: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{raw}', expected YYYY-MM-DD").into())
}
