//! Datetime-family patterns and timezone regions.

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};

use fixed_record_core::{
    Datetime, Field, FieldError, Record, RecordType, Time, TimeZone, Value, Zoned,
};

use super::helpers::{eastern, zones};

#[test]
fn test_date_pattern_round_trip() -> Result<()> {
    let field = Field::date("YYYYMMDD");
    assert_eq!(field.length(), 8);
    let date = NaiveDate::from_ymd_opt(1999, 12, 31).unwrap();
    let raw = field.pack(&Value::from(date))?;
    assert_eq!(raw, "19991231");
    assert_eq!(field.unpack(&raw)?, Value::from(date));
    Ok(())
}

#[test]
fn test_julian_and_two_digit_year() -> Result<()> {
    let julian = Field::date("YYYYDDD");
    assert_eq!(
        julian.unpack("2024060")?,
        Value::from(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
    );

    let short = Field::date("YYMMDD");
    assert_eq!(
        short.unpack("690101")?,
        Value::from(NaiveDate::from_ymd_opt(2069, 1, 1).unwrap())
    );
    assert_eq!(
        short.unpack("700101")?,
        Value::from(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap())
    );
    Ok(())
}

#[test]
fn test_twelve_hour_clock() -> Result<()> {
    let field = Field::time("HH:mm pp");
    let value = field.unpack("07:30 PM")?;
    assert_eq!(value, Value::from(NaiveTime::from_hms_opt(19, 30, 0).unwrap()));
    assert_eq!(field.pack(&value)?, "07:30 PM");
    Ok(())
}

#[test]
fn test_zone_region_round_trip() -> Result<()> {
    let field = Field::from(Datetime::new("YYYYMMDDhhmmZZZ").time_zones(zones()));
    assert_eq!(field.length(), 15);
    let at = NaiveDate::from_ymd_opt(2024, 1, 31)
        .unwrap()
        .and_hms_opt(8, 15, 0)
        .unwrap();
    let value = Value::from(Zoned::with_zone(at, eastern()));

    let raw = field.pack(&value)?;
    assert_eq!(raw, "202401310815EST");
    assert_eq!(field.unpack(&raw)?, value);
    Ok(())
}

#[test]
fn test_unknown_zone_code_fails_to_load() {
    let field = Field::from(Datetime::new("YYYYMMDDhhmmZZZ").time_zones(zones()));
    match field.unpack("202401310815PST") {
        Err(FieldError::UnsupportedTimeZone { code, expected, .. }) => {
            assert_eq!(code, "PST");
            assert_eq!(expected, vec!["EST".to_string(), "UTC".to_string()]);
        }
        other => panic!("expected UnsupportedTimeZone, got {:?}", other),
    }
}

#[test]
fn test_zone_width_mismatch_fails_to_dump() {
    let field = Field::from(Time::new("hhmmZZZ"));
    let wide = TimeZone::new("CEST", chrono::FixedOffset::east_opt(2 * 3600).unwrap());
    let value = Value::from(Zoned::with_zone(NaiveTime::from_hms_opt(9, 0, 0).unwrap(), wide));
    assert!(matches!(
        field.pack(&value),
        Err(FieldError::TimeZoneWidth { width: 3, .. })
    ));
}

#[test]
fn test_record_level_zone_table() -> Result<()> {
    let record_type = RecordType::builder("Stamp")
        .field("at", Field::time("hh:mm ZZZ"))
        .config(fixed_record_core::CodecConfig {
            time_zones: zones(),
            ..Default::default()
        })
        .build()?;

    let record = Record::load(&record_type, "12:00 UTC")?;
    let at = record.get("at")?;
    assert_eq!(at.as_time().and_then(|t| t.zone.clone()), Some(TimeZone::utc()));
    assert_eq!(record.dump()?, "12:00 UTC");
    Ok(())
}

#[test]
fn test_pattern_length_mismatch_is_a_schema_error() {
    let err = RecordType::builder("Bad")
        .field("d", Field::new(6, fixed_record_core::Date::new("YYYYMMDD")))
        .build()
        .unwrap_err();
    assert!(matches!(err, FieldError::InvalidSchema { .. }));
}
