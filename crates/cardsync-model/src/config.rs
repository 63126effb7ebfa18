//! Sync configuration.
//!
//! A [`SyncConfig`] is deserialized once at startup and handed to the driver
//! by reference. Nothing mutates it afterwards.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::field::FieldDefinitions;

/// Default board API base URL.
pub const DEFAULT_BOARD_URL: &str = "https://api.trello.com/1";

/// Default record store API base URL.
pub const DEFAULT_STORE_URL: &str = "https://api.airtable.com/v0";

/// Default pause between sync cycles, in seconds.
pub const DEFAULT_INTERVAL_SECS: u64 = 300;

/// Complete sync configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
    pub board: BoardSettings,
    pub store: StoreSettings,
    #[serde(default)]
    pub sync: SyncSettings,
    #[serde(default)]
    pub fields: FieldDefinitions,
}

/// Board service credentials and the list to mirror.
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoardSettings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub token: String,
    pub board_id: String,
    /// Exact, case-sensitive name of the list whose cards are mirrored.
    pub target_list: String,
    #[serde(default = "default_board_url")]
    pub base_url: String,
}

/// Record store credentials and the destination table.
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSettings {
    #[serde(default)]
    pub api_key: String,
    pub base_id: String,
    pub table: String,
    #[serde(default = "default_store_url")]
    pub base_url: String,
}

/// Loop timing and optional per-cycle checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncSettings {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Log the destination table's columns at the start of every cycle.
    #[serde(default = "default_true")]
    pub inspect_schema: bool,
}

fn default_board_url() -> String {
    DEFAULT_BOARD_URL.to_string()
}

fn default_store_url() -> String {
    DEFAULT_STORE_URL.to_string()
}

fn default_interval_secs() -> u64 {
    DEFAULT_INTERVAL_SECS
}

fn default_true() -> bool {
    true
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_INTERVAL_SECS,
            inspect_schema: true,
        }
    }
}

impl SyncSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl SyncConfig {
    /// Check that every required value is present and every mapped field
    /// name is one the record builder understands.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidConfig`] listing every problem found.
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();
        let required = [
            ("board.api_key", &self.board.api_key),
            ("board.token", &self.board.token),
            ("board.board_id", &self.board.board_id),
            ("board.target_list", &self.board.target_list),
            ("board.base_url", &self.board.base_url),
            ("store.api_key", &self.store.api_key),
            ("store.base_id", &self.store.base_id),
            ("store.table", &self.store.table),
            ("store.base_url", &self.store.base_url),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                problems.push(format!("{key} must not be empty"));
            }
        }
        if self.sync.interval_secs == 0 {
            problems.push("sync.interval_secs must be greater than zero".to_string());
        }
        for name in self.fields.unknown_names() {
            problems.push(format!("fields.{name} is not a known field name"));
        }
        for (name, id) in self.fields.iter() {
            if id.trim().is_empty() {
                problems.push(format!("fields.{name} has an empty identifier"));
            }
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ModelError::InvalidConfig(problems))
        }
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "<unset>" } else { "<redacted>" }
}

impl fmt::Debug for BoardSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardSettings")
            .field("api_key", &redact(&self.api_key))
            .field("token", &redact(&self.token))
            .field("board_id", &self.board_id)
            .field("target_list", &self.target_list)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl fmt::Debug for StoreSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreSettings")
            .field("api_key", &redact(&self.api_key))
            .field("base_id", &self.base_id)
            .field("table", &self.table)
            .field("base_url", &self.base_url)
            .finish()
    }
}
