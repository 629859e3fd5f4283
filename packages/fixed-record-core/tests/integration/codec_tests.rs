//! Whole-record codec behaviour.

use anyhow::Result;
use chrono::NaiveDate;
use ntest::timeout;

use fixed_record_core::{Field, FieldError, Numeric, Record, RecordType, Value, Zoned};

use super::helpers::{eastern, header};

fn created() -> Value {
    let at = NaiveDate::from_ymd_opt(2024, 2, 29)
        .unwrap()
        .and_hms_opt(23, 5, 9)
        .unwrap();
    Value::from(Zoned::with_zone(at, eastern()))
}

#[test]
fn test_header_round_trip() -> Result<()> {
    let record_type = header();
    assert_eq!(record_type.length(), 80);

    let record = Record::new(
        &record_type,
        [
            ("sender", Value::from("BANKCO")),
            ("batch", Value::from(17)),
            ("created", created()),
        ],
    )?;
    let raw = record.dump()?;
    assert_eq!(raw.len(), 80);
    assert!(raw.starts_with("HDRBANKCO    000017O20240229230509EST"));
    assert!(raw.ends_with(&" ".repeat(43)));

    let loaded = Record::load(&record_type, &raw)?;
    assert_eq!(loaded, record);
    assert_eq!(loaded.get("record_type")?, Value::from("HDR"));
    Ok(())
}

#[test]
fn test_slot_text_and_native_values_are_interchangeable() -> Result<()> {
    let record_type = header();
    let native = Record::new(
        &record_type,
        [
            ("sender", Value::from("BANKCO")),
            ("batch", Value::from(17)),
            ("created", created()),
        ],
    )?;
    let textual = Record::new(
        &record_type,
        [
            ("sender", "BANKCO"),
            ("batch", "000017"),
            ("created", "20240229230509EST"),
        ],
    )?;
    assert_eq!(native, textual);
    Ok(())
}

#[test]
fn test_enumeration_is_enforced() -> Result<()> {
    let record_type = header();
    let status = record_type.field("status")?;
    let closed = status.enum_value("CLOSED").cloned().unwrap_or_default();

    let mut record = Record::new(&record_type, [("sender", "BANKCO"), ("batch", "1")])?;
    record.set("status", closed.clone())?;
    assert_eq!(record.get("status")?, closed);

    let err = record.set("status", "X").unwrap_err();
    assert!(matches!(err, FieldError::Validation { .. }));
    Ok(())
}

#[test]
#[timeout(1000)]
fn test_batch_minimum() {
    let record_type = header();
    let err = Record::new(&record_type, [("batch", 0)]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid Header.batch value 0 - must be >= 1"
    );
}

#[test]
fn test_filler_ignores_corruption() -> Result<()> {
    let record_type = header();
    let record = Record::new(
        &record_type,
        [
            ("sender", Value::from("BANKCO")),
            ("batch", Value::from(3)),
            ("created", created()),
        ],
    )?;
    let raw = record.dump()?;
    let filler = record_type.field("filler")?;
    let start = filler.offset().unwrap_or_default();
    let corrupted = format!("{}{}", &raw[..start], "#".repeat(filler.length()));

    let loaded = Record::load(&record_type, &corrupted)?;
    assert_eq!(loaded, record);
    assert_eq!(loaded.dump()?, raw);
    Ok(())
}

#[test]
fn test_numeric_bounds() {
    let field = Field::new(2, Numeric::new().min_value(0).max_value(99));
    assert!(field.pack(&Value::from(-1)).is_err());
    assert!(field.pack(&Value::from(100)).is_err());
    assert_eq!(field.unpack("07"), Ok(Value::from(7)));
}

#[test]
fn test_padding_examples() {
    assert_eq!(
        Field::alphanumeric(10).pack(&Value::from("hiya")),
        Ok("hiya      ".to_string())
    );
    assert_eq!(Field::numeric(5).pack(&Value::from(42)), Ok("00042".to_string()));
}

#[test]
fn test_records_of_different_types_differ() -> Result<()> {
    let a = RecordType::builder("A").field("x", Field::numeric(1)).build()?;
    let b = RecordType::builder("B").field("x", Field::numeric(1)).build()?;
    assert_ne!(Record::new(&a, [("x", 1)])?, Record::new(&b, [("x", 1)])?);
    Ok(())
}

#[test]
fn test_dump_bytes_match_dump() -> Result<()> {
    let record_type = header();
    let record = Record::new(
        &record_type,
        [
            ("sender", Value::from("BANKCO")),
            ("batch", Value::from(9)),
            ("created", created()),
        ],
    )?;
    assert_eq!(record.dump_bytes()?, record.dump()?.into_bytes());
    assert_eq!(Record::load_bytes(&record_type, &record.dump_bytes()?)?, record);
    Ok(())
}
