//! Custom-field definitions and the raw values attached to cards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Logical field names understood by the record builder and the config file.
pub mod names {
    pub const LEAD_TYPE: &str = "lead_type";
    pub const SALES_PERSON: &str = "sales_person";
    pub const YEARS_IN_BUSINESS: &str = "years_in_business";
    pub const APPLIED_AMOUNT: &str = "applied_amount";
    pub const APPROVED_AMOUNT: &str = "approved_amount";
    pub const PAID_AMOUNT: &str = "paid_amount";
    pub const SCORE: &str = "score";
    pub const CLIENT_TYPE: &str = "client_type";
    pub const STATUS: &str = "status";
    pub const APP_DATE: &str = "app_date";
    pub const APPROVED_OR_DECLINED: &str = "approved_or_declined";
    pub const PAYOUT_DATE: &str = "payout_date";
    pub const PRIORITY: &str = "priority";
    pub const SITE_NAME: &str = "site_name";
    pub const LOAN_NO: &str = "loan_no";
    pub const REGION: &str = "region";

    /// Every accepted logical name.
    pub const ALL: [&str; 16] = [
        LEAD_TYPE,
        SALES_PERSON,
        YEARS_IN_BUSINESS,
        APPLIED_AMOUNT,
        APPROVED_AMOUNT,
        PAID_AMOUNT,
        SCORE,
        CLIENT_TYPE,
        STATUS,
        APP_DATE,
        APPROVED_OR_DECLINED,
        PAYOUT_DATE,
        PRIORITY,
        SITE_NAME,
        LOAN_NO,
        REGION,
    ];

    /// Returns true if `name` is one of the accepted logical names.
    pub fn is_known(name: &str) -> bool {
        ALL.contains(&name)
    }
}

/// Mapping from logical field name to remote custom-field identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldDefinitions(BTreeMap<String, String>);

impl FieldDefinitions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, id: impl Into<String>) {
        self.0.insert(name.into(), id.into());
    }

    /// Remote identifier configured for a logical name.
    pub fn id_for(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Reverse lookup: the logical name that maps to a remote identifier.
    pub fn name_for(&self, id: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(_, field_id)| field_id.as_str() == id)
            .map(|(name, _)| name.as_str())
    }

    /// Logical names in the mapping that the record builder does not know.
    pub fn unknown_names(&self) -> Vec<&str> {
        self.0
            .keys()
            .map(String::as_str)
            .filter(|name| !names::is_known(name))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, id)| (name.as_str(), id.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N: Into<String>, I: Into<String>> FromIterator<(N, I)> for FieldDefinitions {
    fn from_iter<T: IntoIterator<Item = (N, I)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, id)| (name.into(), id.into()))
                .collect(),
        )
    }
}

/// Payload carried by a custom-field item.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldPayload {
    /// An object keyed by value kind (`text`, `number`, `date`, `checked`, ...).
    Structured(Map<String, Value>),
    /// A bare JSON scalar.
    Scalar(Value),
}

impl FieldPayload {
    /// Classify a raw `value` entry. `null` carries no payload.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Object(map) => Some(Self::Structured(map.clone())),
            other => Some(Self::Scalar(other.clone())),
        }
    }
}

/// One card's value for one custom field, parsed leniently from the board API.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldItem {
    pub field_id: String,
    pub payload: Option<FieldPayload>,
}

impl FieldItem {
    pub fn new(field_id: impl Into<String>, payload: Option<FieldPayload>) -> Self {
        Self {
            field_id: field_id.into(),
            payload,
        }
    }

    /// Parse a raw item. Items that are not objects or lack a non-empty
    /// `idCustomField` are malformed and yield `None`.
    pub fn from_json(raw: &Value) -> Option<Self> {
        let object = raw.as_object()?;
        let field_id = object
            .get("idCustomField")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())?;
        let payload = object.get("value").and_then(FieldPayload::from_json);
        Some(Self::new(field_id, payload))
    }
}

/// Extracted values for one card, keyed by remote field identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields(BTreeMap<String, String>);

impl ExtractedFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value; a repeated identifier replaces the earlier value.
    pub fn insert(&mut self, field_id: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field_id.into(), value.into());
    }

    pub fn get(&self, field_id: &str) -> Option<&str> {
        self.0.get(field_id).map(String::as_str)
    }

    /// Value for a logical name, resolved through the field definitions.
    pub fn get_named<'a>(&'a self, definitions: &FieldDefinitions, name: &str) -> Option<&'a str> {
        definitions.id_for(name).and_then(|id| self.get(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(id, value)| (id.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<I: Into<String>, V: Into<String>> FromIterator<(I, V)> for ExtractedFields {
    fn from_iter<T: IntoIterator<Item = (I, V)>>(iter: T) -> Self {
        let mut fields = Self::new();
        for (id, value) in iter {
            fields.insert(id, value);
        }
        fields
    }
}
