//! Typed slot codecs.
//!
//! Each leaf type refines validation, loading (slot text → value) and
//! dumping (value → slot text). Padding, alignment and constraints shared by
//! all slots live on [`crate::field::Field`].

mod alphanumeric;
mod datetime;
mod error;
mod numeric;
mod pattern;
mod zone;

pub use alphanumeric::Alphanumeric;
pub use datetime::{Date, Datetime, Time};
pub use error::CodecError;
pub use numeric::Numeric;
pub use pattern::{CompiledPattern, Token, ZoneRegion, DATETIME_TOKENS, DATE_TOKENS, TIME_TOKENS};
pub use zone::{TimeZone, ZoneTable};

use crate::config::CodecConfig;
use crate::field::{Alignment, Enumeration};
use crate::value::Value;

/// Behaviour a slot type contributes to a field descriptor.
pub trait FieldType {
    /// Type name used in messages and layout descriptions.
    fn type_name(&self) -> &'static str;

    /// Pad character used when the field doesn't override it.
    fn default_pad(&self) -> Option<char>;

    /// Alignment used when the field doesn't override it.
    fn default_align(&self) -> Alignment;

    /// Value a `reserved()` field is fixed to.
    fn builtin_default(&self) -> Option<Value> {
        None
    }

    /// Slot width dictated by the type itself (datetime patterns).
    fn implied_length(&self) -> Option<usize> {
        None
    }

    /// Checks a value against the type and the field's constraints.
    ///
    /// Returns the reason on failure.
    fn validate(&self, value: &Value, length: usize, allowed: &Enumeration) -> Result<(), String>;

    /// Parses stripped slot text.
    fn load(&self, raw: &str) -> Result<Value, CodecError>;

    /// Renders a value before padding.
    fn dump(&self, value: &Value) -> Result<String, CodecError>;

    /// Normalizes a value that passed validation into its stored form.
    fn canonicalize(&self, value: Value) -> Value {
        value
    }

    /// Fills settings left unset on the type from a record-level config.
    fn apply_config(&mut self, _config: &CodecConfig) {}
}

/// The closed set of slot types.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Numeric(Numeric),
    Alphanumeric(Alphanumeric),
    Datetime(Datetime),
    Date(Date),
    Time(Time),
}

impl FieldKind {
    pub(crate) fn codec(&self) -> &dyn FieldType {
        match self {
            FieldKind::Numeric(t) => t,
            FieldKind::Alphanumeric(t) => t,
            FieldKind::Datetime(t) => t,
            FieldKind::Date(t) => t,
            FieldKind::Time(t) => t,
        }
    }

    pub(crate) fn codec_mut(&mut self) -> &mut dyn FieldType {
        match self {
            FieldKind::Numeric(t) => t,
            FieldKind::Alphanumeric(t) => t,
            FieldKind::Datetime(t) => t,
            FieldKind::Date(t) => t,
            FieldKind::Time(t) => t,
        }
    }

    /// The symbolic pattern of a datetime-family kind.
    pub fn pattern(&self) -> Option<&CompiledPattern> {
        match self {
            FieldKind::Datetime(t) => Some(t.pattern()),
            FieldKind::Date(t) => Some(t.pattern()),
            FieldKind::Time(t) => Some(t.pattern()),
            FieldKind::Numeric(_) | FieldKind::Alphanumeric(_) => None,
        }
    }
}

impl From<Numeric> for FieldKind {
    fn from(value: Numeric) -> Self {
        FieldKind::Numeric(value)
    }
}

impl From<Alphanumeric> for FieldKind {
    fn from(value: Alphanumeric) -> Self {
        FieldKind::Alphanumeric(value)
    }
}

impl From<Datetime> for FieldKind {
    fn from(value: Datetime) -> Self {
        FieldKind::Datetime(value)
    }
}

impl From<Date> for FieldKind {
    fn from(value: Date) -> Self {
        FieldKind::Date(value)
    }
}

impl From<Time> for FieldKind {
    fn from(value: Time) -> Self {
        FieldKind::Time(value)
    }
}
