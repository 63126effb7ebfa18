//! Record store API types.

use cardsync_model::DestinationRecord;
use serde::{Deserialize, Serialize};

/// Base metadata: every table in the base.
#[derive(Debug, Clone, Deserialize)]
pub struct BaseSchema {
    #[serde(default)]
    pub tables: Vec<TableSchema>,
}

impl BaseSchema {
    /// Find a table by its exact name.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&TableSchema> {
        self.tables.iter().find(|table| table.name == name)
    }
}

/// One table and its columns.
#[derive(Debug, Clone, Deserialize)]
pub struct TableSchema {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub fields: Vec<ColumnSchema>,
}

impl TableSchema {
    /// Look up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnSchema> {
        self.fields.iter().find(|column| column.name == name)
    }
}

/// One column of a table.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    /// Column type as reported by the store (`date`, `number`, `singleLineText`, ...).
    #[serde(rename = "type")]
    pub column_type: String,
}

/// Request body for appending one record.
#[derive(Debug, Serialize)]
pub struct CreateRecordRequest<'a> {
    pub fields: &'a DestinationRecord,
}

/// Response body for an appended record.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedRecord {
    pub id: String,
    #[serde(default, rename = "createdTime")]
    pub created_time: Option<String>,
}

impl CreatedRecord {
    /// Id reported for a record the store accepted without a readable reply.
    pub const UNCONFIRMED_ID: &'static str = "unconfirmed";

    #[must_use]
    pub fn unconfirmed() -> Self {
        Self {
            id: Self::UNCONFIRMED_ID.to_string(),
            created_time: None,
        }
    }
}
