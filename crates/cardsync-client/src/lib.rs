//! HTTP clients for the board service and the record store.
//!
//! Both clients are blocking; the sync loop processes one request at a time.
//!
//! - [`BoardClient`]: lists, cards, card custom-field items and board field
//!   definitions, authenticated with `key`/`token` query parameters
//! - [`StoreClient`]: reachability probe, table schema and record creation,
//!   authenticated with a bearer token
//!
//! The sync driver depends on the [`BoardApi`] and [`RecordStoreApi`] traits
//! rather than on the concrete clients.

#![warn(clippy::all)]

pub mod api;
pub mod board;
pub mod error;
mod http;
pub mod store;

pub use api::{BoardApi, RecordStoreApi};
pub use board::{BoardClient, BoardList, Card, CustomFieldDefinition, find_list};
pub use error::{ClientError, Result, Service};
pub use store::{BaseSchema, ColumnSchema, CreatedRecord, StoreClient, TableSchema};
