//! Configuration loading.
//!
//! The TOML file supplies everything; the three credentials can also come
//! from the environment so they never need to be written to disk.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use cardsync_model::SyncConfig;
use tracing::{debug, info};

/// Configuration file used when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "cardsync.toml";

/// Environment variable overriding `board.api_key`.
pub const BOARD_API_KEY_ENV_VAR: &str = "CARDSYNC_BOARD_API_KEY";

/// Environment variable overriding `board.token`.
pub const BOARD_TOKEN_ENV_VAR: &str = "CARDSYNC_BOARD_TOKEN";

/// Environment variable overriding `store.api_key`.
pub const STORE_API_KEY_ENV_VAR: &str = "CARDSYNC_STORE_API_KEY";

/// Read, parse, apply environment overrides and validate.
pub fn load_config(path: &Path) -> Result<SyncConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read configuration {}", path.display()))?;
    let mut config =
        parse_config(&raw).with_context(|| format!("parse configuration {}", path.display()))?;
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    config.validate()?;
    info!(
        path = %path.display(),
        board_id = %config.board.board_id,
        target_list = %config.board.target_list,
        table = %config.store.table,
        mapped_fields = config.fields.len(),
        "loaded configuration"
    );
    Ok(config)
}

/// Parse configuration text without validating it.
pub fn parse_config(raw: &str) -> Result<SyncConfig> {
    Ok(toml::from_str(raw)?)
}

/// Replace credentials with values from `lookup` where it yields a
/// non-empty string.
pub fn apply_env_overrides(config: &mut SyncConfig, lookup: impl Fn(&str) -> Option<String>) {
    let targets = [
        (BOARD_API_KEY_ENV_VAR, &mut config.board.api_key),
        (BOARD_TOKEN_ENV_VAR, &mut config.board.token),
        (STORE_API_KEY_ENV_VAR, &mut config.store.api_key),
    ];
    for (name, slot) in targets {
        if let Some(value) = lookup(name).filter(|value| !value.trim().is_empty()) {
            debug!(variable = name, "credential taken from environment");
            *slot = value;
        }
    }
}
