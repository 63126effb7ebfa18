//! Integration tests for field extraction, coercion and record assembly.

use cardsync_model::{DestinationRecord, FieldDefinitions, RecordValue, columns};
use cardsync_normalization::{
    build_record, build_record_today, extract_fields, extract_json, format_date, parse_number,
};
use chrono::{Local, NaiveDate};
use proptest::prelude::*;
use serde_json::{Value, json};

fn definitions() -> FieldDefinitions {
    [
        ("status", "6909bb2c9b555e045cfa4ba6"),
        ("applied_amount", "6909ba8dfe57159a70c43261"),
        ("app_date", "6909bbbf0eab791fc5569fe8"),
        ("approved_or_declined", "6909bbd2e10eeac93f022031"),
        ("payout_date", "6909bbe374c02324b20d61bc"),
        ("loan_no", "6909bc0a0420f856c7a7fbdd"),
        ("approved_amount", "6909baa119e54a1a6161fd15"),
        ("paid_amount", "6909baaee9e44ffed21f4f95"),
        ("score", "6909babb73188ab3320ec574"),
        ("sales_person", "6909b9641be83c1ad89eaeb9"),
        ("client_type", "6909baf946844a254713a3e4"),
        ("region", "6909bcae0f2ef8e8daba8d2c"),
    ]
    .into_iter()
    .collect()
}

fn pretty(record: &DestinationRecord) -> String {
    serde_json::to_string_pretty(record).expect("serialize record")
}

fn acme_items() -> Vec<Value> {
    vec![
        json!({
            "id": "item-1",
            "idCustomField": "6909bb2c9b555e045cfa4ba6",
            "idModel": "card-1",
            "value": {"text": "Approved"}
        }),
        json!({
            "id": "item-2",
            "idCustomField": "6909ba8dfe57159a70c43261",
            "idModel": "card-1",
            "value": {"text": "10,000"}
        }),
        json!({
            "id": "item-3",
            "idCustomField": "6909bbbf0eab791fc5569fe8",
            "idModel": "card-1",
            "value": {"date": "2025-01-15"}
        }),
    ]
}

#[test]
fn acme_site_end_to_end() {
    let fields = extract_fields(&acme_items());
    let record = build_record_today("Acme Site", &fields, &definitions());
    let today = Local::now().date_naive();

    assert_eq!(record.len(), 5);
    let stamp = record
        .get(columns::MONTH_REPORTING)
        .and_then(RecordValue::as_date)
        .expect("month stamp");
    // Tolerate the test straddling midnight.
    assert!(stamp == today || stamp.succ_opt() == Some(today));
    assert_eq!(record.site_name(), "Acme Site");
    assert_eq!(
        record.get(columns::APP_DATE),
        Some(&RecordValue::Date(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()))
    );
    assert_eq!(
        record.get(columns::STATUS),
        Some(&RecordValue::Text("Approved".into()))
    );
    assert_eq!(
        record.get(columns::APPLIED_AMOUNT),
        Some(&RecordValue::Number(10000.0))
    );
}

#[test]
fn acme_site_payload_snapshot() {
    let fields = extract_fields(&acme_items());
    let today = NaiveDate::from_ymd_opt(2025, 11, 4).unwrap();
    let record = build_record("Acme Site", &fields, &definitions(), today);

    insta::assert_snapshot!(pretty(&record), @r###"
    {
      "# Applied Amount": 10000.0,
      "App Date": "2025-01-15",
      "Month Reporting": "2025-11-04",
      "Site name": "Acme Site",
      "Status": "Approved"
    }
    "###);
}

#[test]
fn fully_populated_card() {
    let items = vec![
        json!({"idCustomField": "6909bb2c9b555e045cfa4ba6", "value": {"text": "Paid"}}),
        json!({"idCustomField": "6909ba8dfe57159a70c43261", "value": {"number": "25000"}}),
        json!({"idCustomField": "6909baa119e54a1a6161fd15", "value": {"number": "20,000"}}),
        json!({"idCustomField": "6909baaee9e44ffed21f4f95", "value": {"number": "19 500"}}),
        json!({"idCustomField": "6909babb73188ab3320ec574", "value": {"number": "712"}}),
        json!({"idCustomField": "6909bc0a0420f856c7a7fbdd", "value": {"number": "1042"}}),
        json!({"idCustomField": "6909bbbf0eab791fc5569fe8", "value": {"date": "2025-01-15T09:00:00.000Z"}}),
        json!({"idCustomField": "6909bbd2e10eeac93f022031", "value": {"date": "2025-01-20T17:30:00.000Z"}}),
        json!({"idCustomField": "6909bbe374c02324b20d61bc", "value": {"date": "2025-02-01T12:00:00.000Z"}}),
        json!({"idCustomField": "6909b9641be83c1ad89eaeb9", "value": {"text": "Dana"}}),
        json!({"idCustomField": "6909baf946844a254713a3e4", "value": {"text": "Returning"}}),
        json!({"idCustomField": "6909bcae0f2ef8e8daba8d2c", "value": {"text": "West"}}),
    ];
    let fields = extract_fields(&items);
    let today = NaiveDate::from_ymd_opt(2025, 2, 3).unwrap();
    let record = build_record("Harbor Works", &fields, &definitions(), today);

    assert_eq!(record.len(), columns::ALL.len());
    insta::assert_snapshot!(pretty(&record), @r###"
    {
      "# Applied Amount": 25000.0,
      "App Date": "2025-01-15",
      "Approved Amount": 20000.0,
      "Approved or Declined": "2025-01-20",
      "Client Type": "Returning",
      "Loan No": 1042.0,
      "Month Reporting": "2025-02-03",
      "Paid Amount": 19500.0,
      "Payout Date": "2025-02-01",
      "Region": "West",
      "Sales Person": "Dana",
      "Score": 712.0,
      "Site name": "Harbor Works",
      "Status": "Paid"
    }
    "###);
}

#[test]
fn partial_data_still_builds() {
    let items = vec![
        json!({"idCustomField": "6909bb2c9b555e045cfa4ba6", "value": {"text": "Declined"}}),
        json!({"idCustomField": "6909babb73188ab3320ec574", "value": {"text": "n/a"}}),
        json!({"idCustomField": "6909bbbf0eab791fc5569fe8", "value": {"text": "last Tuesday"}}),
    ];
    let fields = extract_fields(&items);
    let today = NaiveDate::from_ymd_opt(2025, 2, 3).unwrap();
    let record = build_record("Partial", &fields, &definitions(), today);

    let keys: Vec<_> = record.columns().collect();
    assert_eq!(keys, vec!["Month Reporting", "Site name", "Status"]);
}

#[test]
fn documented_coercions() {
    assert_eq!(parse_number(Some("1,234")), Some(1234.0));
    assert_eq!(parse_number(Some("")), None);
    assert_eq!(parse_number(Some("abc")), None);
    assert_eq!(
        format_date(Some("2025-11-04T10:00:00.000Z")).as_deref(),
        Some("2025-11-04")
    );
    assert_eq!(format_date(Some("11/04/2025")).as_deref(), Some("2025-11-04"));
}

fn with_separators(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::new();
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

proptest! {
    #[test]
    fn separated_integers_parse_exactly(value in 0u64..1_000_000_000_000) {
        prop_assert_eq!(parse_number(Some(&with_separators(value))), Some(value as f64));
    }

    #[test]
    fn parse_number_never_yields_non_finite(raw in ".*") {
        if let Some(number) = parse_number(Some(&raw)) {
            prop_assert!(number.is_finite());
        }
    }

    #[test]
    fn text_sub_field_is_returned_unchanged(text in ".*") {
        let raw = json!({"idCustomField": "f", "value": {"text": text.clone(), "number": "1"}});
        prop_assert_eq!(extract_json(&raw), Some(text));
    }
}
