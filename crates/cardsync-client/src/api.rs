//! Service traits the sync driver is written against.
//!
//! [`BoardClient`](crate::BoardClient) and [`StoreClient`](crate::StoreClient)
//! implement these over HTTP; tests substitute in-memory fakes.

use cardsync_model::DestinationRecord;
use serde_json::Value;

use crate::board::{BoardList, Card};
use crate::error::Result;
use crate::store::{CreatedRecord, TableSchema};

/// Read access to the board service.
pub trait BoardApi {
    /// Every list on the board, in board order.
    fn lists(&self, board_id: &str) -> Result<Vec<BoardList>>;

    /// Every card in a list, in list order.
    fn cards(&self, list_id: &str) -> Result<Vec<Card>>;

    /// Raw custom-field items of one card. Items are left as JSON because
    /// their payload shape varies by field type.
    fn card_field_items(&self, card_id: &str) -> Result<Vec<Value>>;
}

/// Access to the destination table.
pub trait RecordStoreApi {
    /// Cheap reachability and credential check.
    fn probe(&self) -> Result<()>;

    /// Columns of the destination table.
    fn table_schema(&self) -> Result<TableSchema>;

    /// Append one record.
    fn create_record(&self, record: &DestinationRecord) -> Result<CreatedRecord>;
}

impl<T: BoardApi + ?Sized> BoardApi for &T {
    fn lists(&self, board_id: &str) -> Result<Vec<BoardList>> {
        (**self).lists(board_id)
    }

    fn cards(&self, list_id: &str) -> Result<Vec<Card>> {
        (**self).cards(list_id)
    }

    fn card_field_items(&self, card_id: &str) -> Result<Vec<Value>> {
        (**self).card_field_items(card_id)
    }
}

impl<T: RecordStoreApi + ?Sized> RecordStoreApi for &T {
    fn probe(&self) -> Result<()> {
        (**self).probe()
    }

    fn table_schema(&self) -> Result<TableSchema> {
        (**self).table_schema()
    }

    fn create_record(&self, record: &DestinationRecord) -> Result<CreatedRecord> {
        (**self).create_record(record)
    }
}
