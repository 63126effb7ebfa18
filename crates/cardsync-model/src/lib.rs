//! Data model for mirroring board cards into a tabular record store.
//!
//! The types here are shared by the normalization, client and CLI crates:
//!
//! - [`FieldDefinitions`]: logical field name to remote custom-field id
//! - [`FieldItem`]: one card's raw value for one custom field
//! - [`ExtractedFields`]: per-card map of field id to extracted string value
//! - [`DestinationRecord`]: the column-keyed row appended to the record store
//! - [`SyncConfig`]: immutable settings handed to the sync driver

pub mod config;
pub mod error;
pub mod field;
pub mod record;

pub use config::{BoardSettings, StoreSettings, SyncConfig, SyncSettings};
pub use error::{ModelError, Result};
pub use field::{ExtractedFields, FieldDefinitions, FieldItem, FieldPayload, names};
pub use record::{DestinationRecord, RecordValue, columns};
