//! Shared record types for integration tests.

use std::sync::Arc;

use chrono::FixedOffset;
use fixed_record_core::{
    CodecConfig, Enumeration, Field, Numeric, RecordType, TimeZone, ZoneTable,
};

pub fn eastern() -> TimeZone {
    TimeZone::new("EST", FixedOffset::west_opt(5 * 3600).unwrap())
}

pub fn zones() -> ZoneTable {
    ZoneTable::new().with(eastern()).with(TimeZone::utc())
}

/// Header record of a settlement file: 80 characters wide.
pub fn header() -> Arc<RecordType> {
    RecordType::builder("Header")
        .field("record_type", Field::alphanumeric(3).constant("HDR").unwrap())
        .field("sender", Field::alphanumeric(10))
        .field("batch", Field::new(6, Numeric::new().min_value(1)))
        .field(
            "status",
            Field::alphanumeric(1)
                .enumeration(Enumeration::pairs([("OPEN", "O"), ("CLOSED", "C")]))
                .with_default("O"),
        )
        .field("created", Field::datetime("YYYYMMDDhhmmssZZZ"))
        .field("filler", Field::alphanumeric(43).reserved().unwrap())
        .config(CodecConfig {
            time_zones: zones(),
            ..Default::default()
        })
        .build()
        .unwrap()
}
