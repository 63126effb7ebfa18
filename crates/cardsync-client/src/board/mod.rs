//! Board service client and types.

pub mod client;
pub mod types;

pub use client::BoardClient;
pub use types::{BoardList, Card, CustomFieldDefinition, find_list};
