mod config;
pub mod db;

pub use config::Config;
pub use db::HouseholdDb;

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/hearth[-dev]/` based on HEARTH_ENV.
///
/// Set HEARTH_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("HEARTH_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("hearth-dev")
    } else {
        base_dir.join("hearth")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
