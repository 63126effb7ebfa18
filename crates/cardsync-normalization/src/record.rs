//! Assembly of destination records from extracted card fields.

use cardsync_model::{
    DestinationRecord, ExtractedFields, FieldDefinitions, RecordValue, columns, names,
};
use chrono::{Local, NaiveDate};

use crate::coerce::{parse_date, parse_number};

/// Name stamped into records for cards that have none.
pub const UNNAMED_CARD: &str = "No Name";

/// Date-bearing fields and their destination columns.
const DATE_FIELDS: [(&str, &str); 3] = [
    (names::APP_DATE, columns::APP_DATE),
    (names::APPROVED_OR_DECLINED, columns::APPROVED_OR_DECLINED),
    (names::PAYOUT_DATE, columns::PAYOUT_DATE),
];

/// Numeric fields and their destination columns.
const NUMBER_FIELDS: [(&str, &str); 5] = [
    (names::LOAN_NO, columns::LOAN_NO),
    (names::APPLIED_AMOUNT, columns::APPLIED_AMOUNT),
    (names::APPROVED_AMOUNT, columns::APPROVED_AMOUNT),
    (names::PAID_AMOUNT, columns::PAID_AMOUNT),
    (names::SCORE, columns::SCORE),
];

/// Text fields copied verbatim.
const TEXT_FIELDS: [(&str, &str); 4] = [
    (names::STATUS, columns::STATUS),
    (names::SALES_PERSON, columns::SALES_PERSON),
    (names::CLIENT_TYPE, columns::CLIENT_TYPE),
    (names::REGION, columns::REGION),
];

/// Logical field feeding each typed destination column, as
/// `(field name, column)`. `Month Reporting` and `Site name` are always
/// written and have no source field.
pub fn column_sources() -> impl Iterator<Item = (&'static str, &'static str)> {
    DATE_FIELDS
        .into_iter()
        .chain(NUMBER_FIELDS)
        .chain(TEXT_FIELDS)
}

/// Build the destination record for one card.
///
/// `today` becomes the `Month Reporting` stamp. Fields missing from the card,
/// missing from `definitions`, or failing coercion are left out.
pub fn build_record(
    card_name: &str,
    fields: &ExtractedFields,
    definitions: &FieldDefinitions,
    today: NaiveDate,
) -> DestinationRecord {
    let mut record = DestinationRecord::new();
    record.insert(columns::MONTH_REPORTING, RecordValue::Date(today));
    let site_name = if card_name.is_empty() {
        UNNAMED_CARD
    } else {
        card_name
    };
    record.insert(columns::SITE_NAME, RecordValue::Text(site_name.to_string()));

    let lookup = |name: &str| fields.get_named(definitions, name);

    for (name, column) in DATE_FIELDS {
        record.insert_opt(column, parse_date(lookup(name)).map(RecordValue::Date));
    }
    for (name, column) in NUMBER_FIELDS {
        record.insert_opt(column, parse_number(lookup(name)).map(RecordValue::Number));
    }
    for (name, column) in TEXT_FIELDS {
        let text = lookup(name).filter(|text| !text.trim().is_empty());
        record.insert_opt(column, text.map(|text| RecordValue::Text(text.to_string())));
    }
    record
}

/// [`build_record`] stamped with the current local date.
pub fn build_record_today(
    card_name: &str,
    fields: &ExtractedFields,
    definitions: &FieldDefinitions,
) -> DestinationRecord {
    build_record(card_name, fields, definitions, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definitions() -> FieldDefinitions {
        names::ALL
            .iter()
            .map(|name| (*name, format!("id-{name}")))
            .collect()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
    }

    #[test]
    fn empty_fields_give_stamp_and_name_only() {
        let record = build_record("Acme", &ExtractedFields::new(), &definitions(), today());
        let keys: Vec<_> = record.columns().collect();
        assert_eq!(keys, vec![columns::MONTH_REPORTING, columns::SITE_NAME]);
    }

    #[test]
    fn unnamed_card_gets_placeholder_name() {
        let record = build_record("", &ExtractedFields::new(), &definitions(), today());
        assert_eq!(record.site_name(), UNNAMED_CARD);
    }

    #[test]
    fn failed_coercions_are_omitted() {
        let fields: ExtractedFields = [
            ("id-score", "high"),
            ("id-payout_date", "someday"),
            ("id-status", "   "),
        ]
        .into_iter()
        .collect();
        let record = build_record("Acme", &fields, &definitions(), today());
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn unmapped_logical_fields_are_ignored() {
        let defs: FieldDefinitions = [("status", "id-status")].into_iter().collect();
        let fields: ExtractedFields = [("id-status", "Open"), ("id-region", "North")]
            .into_iter()
            .collect();
        let record = build_record("Acme", &fields, &defs, today());
        assert_eq!(
            record.get(columns::STATUS),
            Some(&RecordValue::Text("Open".into()))
        );
        assert!(!record.contains(columns::REGION));
    }

    #[test]
    fn every_typed_column_has_one_source() {
        let mut targets: Vec<_> = column_sources().map(|(_, column)| column).collect();
        targets.sort_unstable();
        targets.dedup();
        assert_eq!(targets.len(), columns::ALL.len() - 2);
        assert!(column_sources().all(|(name, _)| names::is_known(name)));
    }

    #[test]
    fn unused_logical_fields_never_reach_the_record() {
        let fields: ExtractedFields = [("id-priority", "High"), ("id-lead_type", "Web")]
            .into_iter()
            .collect();
        let record = build_record("Acme", &fields, &definitions(), today());
        assert_eq!(record.len(), 2);
    }
}
