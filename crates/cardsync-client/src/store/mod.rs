//! Record store client and types.

pub mod client;
pub mod types;

pub use client::StoreClient;
pub use types::{BaseSchema, ColumnSchema, CreateRecordRequest, CreatedRecord, TableSchema};
