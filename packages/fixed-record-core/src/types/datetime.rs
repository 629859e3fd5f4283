//! Calendar and clock slots driven by a symbolic pattern.

use chrono::{NaiveDate, NaiveTime};

use super::pattern::{CompiledPattern, DATETIME_TOKENS, DATE_TOKENS, TIME_TOKENS};
use super::{CodecError, FieldType, ZoneTable};
use crate::config::CodecConfig;
use crate::field::{Alignment, Enumeration};
use crate::value::{Value, Zoned};

/// Combined date and time, optionally with a spliced timezone code.
#[derive(Debug, Clone, PartialEq)]
pub struct Datetime {
    pattern: CompiledPattern,
    time_zones: Option<ZoneTable>,
}

impl Datetime {
    pub fn new(pattern: &str) -> Self {
        Self {
            pattern: CompiledPattern::compile(pattern, DATETIME_TOKENS),
            time_zones: None,
        }
    }

    /// Codes accepted in the pattern's `ZZZ` region.
    pub fn time_zones(mut self, time_zones: ZoneTable) -> Self {
        self.time_zones = Some(time_zones);
        self
    }

    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }
}

/// Calendar date without time of day.
#[derive(Debug, Clone, PartialEq)]
pub struct Date {
    pattern: CompiledPattern,
}

impl Date {
    pub fn new(pattern: &str) -> Self {
        Self {
            pattern: CompiledPattern::compile(pattern, DATE_TOKENS),
        }
    }

    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }
}

/// Time of day without calendar date.
///
/// The zone resolved from a `ZZZ` region stays attached after load so the
/// value can be dumped back into the same pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct Time {
    pattern: CompiledPattern,
    time_zones: Option<ZoneTable>,
}

impl Time {
    pub fn new(pattern: &str) -> Self {
        Self {
            pattern: CompiledPattern::compile(pattern, TIME_TOKENS),
            time_zones: None,
        }
    }

    /// Codes accepted in the pattern's `ZZZ` region.
    pub fn time_zones(mut self, time_zones: ZoneTable) -> Self {
        self.time_zones = Some(time_zones);
        self
    }

    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }
}

static NO_ZONES: ZoneTable = ZoneTable::empty();

fn zones_or_empty(zones: &Option<ZoneTable>) -> &ZoneTable {
    zones.as_ref().unwrap_or(&NO_ZONES)
}

impl FieldType for Datetime {
    fn type_name(&self) -> &'static str {
        "Datetime"
    }

    fn default_pad(&self) -> Option<char> {
        None
    }

    fn default_align(&self) -> Alignment {
        Alignment::Strip
    }

    fn implied_length(&self) -> Option<usize> {
        Some(self.pattern.width())
    }

    fn validate(
        &self,
        value: &Value,
        _length: usize,
        _allowed: &Enumeration,
    ) -> Result<(), String> {
        match value {
            Value::DateTime(_) => Ok(()),
            _ => Err("must be a datetime".to_string()),
        }
    }

    fn load(&self, raw: &str) -> Result<Value, CodecError> {
        let (value, zone) = self.pattern.parse(raw, zones_or_empty(&self.time_zones))?;
        Ok(Value::DateTime(Zoned { value, zone }))
    }

    fn dump(&self, value: &Value) -> Result<String, CodecError> {
        let dt = value.as_datetime().ok_or(CodecError::WrongKind {
            expected: "a datetime",
            got: value.kind_name(),
        })?;
        self.pattern.render(&dt.value, dt.zone.as_ref())
    }

    fn apply_config(&mut self, config: &CodecConfig) {
        if self.time_zones.is_none() {
            self.time_zones = Some(config.time_zones.clone());
        }
    }
}

impl FieldType for Date {
    fn type_name(&self) -> &'static str {
        "Date"
    }

    fn default_pad(&self) -> Option<char> {
        None
    }

    fn default_align(&self) -> Alignment {
        Alignment::Strip
    }

    fn implied_length(&self) -> Option<usize> {
        Some(self.pattern.width())
    }

    fn validate(
        &self,
        value: &Value,
        _length: usize,
        _allowed: &Enumeration,
    ) -> Result<(), String> {
        match value {
            Value::Date(_) => Ok(()),
            _ => Err("must be a date".to_string()),
        }
    }

    fn load(&self, raw: &str) -> Result<Value, CodecError> {
        let (value, _) = self.pattern.parse(raw, &NO_ZONES)?;
        Ok(Value::Date(value.date()))
    }

    fn dump(&self, value: &Value) -> Result<String, CodecError> {
        let date = value.as_date().ok_or(CodecError::WrongKind {
            expected: "a date",
            got: value.kind_name(),
        })?;
        self.pattern.render(&date.and_time(NaiveTime::default()), None)
    }
}

impl FieldType for Time {
    fn type_name(&self) -> &'static str {
        "Time"
    }

    fn default_pad(&self) -> Option<char> {
        None
    }

    fn default_align(&self) -> Alignment {
        Alignment::Strip
    }

    fn implied_length(&self) -> Option<usize> {
        Some(self.pattern.width())
    }

    fn validate(
        &self,
        value: &Value,
        _length: usize,
        _allowed: &Enumeration,
    ) -> Result<(), String> {
        match value {
            Value::Time(_) => Ok(()),
            _ => Err("must be a time".to_string()),
        }
    }

    fn load(&self, raw: &str) -> Result<Value, CodecError> {
        let (value, zone) = self.pattern.parse(raw, zones_or_empty(&self.time_zones))?;
        Ok(Value::Time(Zoned {
            value: value.time(),
            zone,
        }))
    }

    fn dump(&self, value: &Value) -> Result<String, CodecError> {
        let time = value.as_time().ok_or(CodecError::WrongKind {
            expected: "a time",
            got: value.kind_name(),
        })?;
        self.pattern
            .render(&NaiveDate::default().and_time(time.value), time.zone.as_ref())
    }

    fn apply_config(&mut self, config: &CodecConfig) {
        if self.time_zones.is_none() {
            self.time_zones = Some(config.time_zones.clone());
        }
    }
}
