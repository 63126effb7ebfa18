//! Destination records and the column names of the target table.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// Column names of the destination table. Matching is exact and case-sensitive.
pub mod columns {
    pub const MONTH_REPORTING: &str = "Month Reporting";
    pub const SITE_NAME: &str = "Site name";
    pub const APP_DATE: &str = "App Date";
    pub const APPROVED_OR_DECLINED: &str = "Approved or Declined";
    pub const PAYOUT_DATE: &str = "Payout Date";
    pub const STATUS: &str = "Status";
    pub const LOAN_NO: &str = "Loan No";
    pub const APPLIED_AMOUNT: &str = "# Applied Amount";
    pub const APPROVED_AMOUNT: &str = "Approved Amount";
    pub const PAID_AMOUNT: &str = "Paid Amount";
    pub const SCORE: &str = "Score";
    pub const SALES_PERSON: &str = "Sales Person";
    pub const CLIENT_TYPE: &str = "Client Type";
    pub const REGION: &str = "Region";

    pub const ALL: [&str; 14] = [
        MONTH_REPORTING,
        SITE_NAME,
        APP_DATE,
        APPROVED_OR_DECLINED,
        PAYOUT_DATE,
        STATUS,
        LOAN_NO,
        APPLIED_AMOUNT,
        APPROVED_AMOUNT,
        PAID_AMOUNT,
        SCORE,
        SALES_PERSON,
        CLIENT_TYPE,
        REGION,
    ];
}

/// A typed cell value. Dates serialize as `YYYY-MM-DD` strings.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl RecordValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            _ => None,
        }
    }
}

impl Serialize for RecordValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Number(number) => serializer.serialize_f64(*number),
            Self::Date(date) => serializer.collect_str(&date.format("%Y-%m-%d")),
        }
    }
}

/// One row for the destination table, keyed by column name.
///
/// Absent values are never stored; there is no null placeholder.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DestinationRecord(BTreeMap<String, RecordValue>);

impl DestinationRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: RecordValue) {
        self.0.insert(column.into(), value);
    }

    /// Insert only when a value is present.
    pub fn insert_opt(&mut self, column: &str, value: Option<RecordValue>) {
        if let Some(value) = value {
            self.insert(column, value);
        }
    }

    pub fn get(&self, column: &str) -> Option<&RecordValue> {
        self.0.get(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RecordValue)> {
        self.0.iter().map(|(column, value)| (column.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The card name stamped into the record, used for log lines.
    pub fn site_name(&self) -> &str {
        self.get(columns::SITE_NAME)
            .and_then(RecordValue::as_text)
            .unwrap_or("No Name")
    }
}
