//! Normalization of loosely-typed custom-field values.
//!
//! The pipeline for one card is:
//!
//! 1. [`extract::extract_fields`] turns raw field items into an
//!    [`ExtractedFields`](cardsync_model::ExtractedFields) map of strings.
//! 2. [`record::build_record`] coerces known fields with
//!    [`coerce::parse_number`] and [`coerce::parse_date`] and assembles the
//!    [`DestinationRecord`](cardsync_model::DestinationRecord).
//!
//! Nothing here fails: a value that cannot be extracted or coerced is logged
//! and left out of the record.

pub mod coerce;
pub mod extract;
pub mod record;

pub use coerce::{format_date, parse_date, parse_number};
pub use extract::{extract_fields, extract_json, extract_value};
pub use record::{build_record, build_record_today, column_sources};
