//! Typed values held by records.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::types::TimeZone;

/// A date/time value with an optional attached zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zoned<T> {
    pub value: T,
    pub zone: Option<TimeZone>,
}

impl<T> Zoned<T> {
    /// A value without zone information.
    pub fn naive(value: T) -> Self {
        Self { value, zone: None }
    }

    pub fn with_zone(value: T, zone: TimeZone) -> Self {
        Self {
            value,
            zone: Some(zone),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Zoned<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.zone {
            Some(zone) => write!(f, "{} {}", self.value, zone.abbreviation()),
            None => write!(f, "{}", self.value),
        }
    }
}

/// Value stored in a record slot.
///
/// `Null` is the explicit "unset" marker: reading a slot that holds it
/// yields the field's default.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Value {
    #[default]
    Null,
    Integer(i64),
    Text(String),
    DateTime(Zoned<NaiveDateTime>),
    Date(NaiveDate),
    Time(Zoned<NaiveTime>),
}

impl Value {
    /// Short name of the variant, used in messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Integer(_) => "integer",
            Value::Text(_) => "text",
            Value::DateTime(_) => "datetime",
            Value::Date(_) => "date",
            Value::Time(_) => "time",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<&Zoned<NaiveDateTime>> {
        match self {
            Value::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<&Zoned<NaiveTime>> {
        match self {
            Value::Time(t) => Some(t),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
            Value::DateTime(dt) => write!(f, "{}", dt),
            Value::Date(d) => write!(f, "{}", d),
            Value::Time(t) => write!(f, "{}", t),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::DateTime(Zoned::naive(value))
    }
}

impl From<NaiveTime> for Value {
    fn from(value: NaiveTime) -> Self {
        Value::Time(Zoned::naive(value))
    }
}

impl From<Zoned<NaiveDateTime>> for Value {
    fn from(value: Zoned<NaiveDateTime>) -> Self {
        Value::DateTime(value)
    }
}

impl From<Zoned<NaiveTime>> for Value {
    fn from(value: Zoned<NaiveTime>) -> Self {
        Value::Time(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
