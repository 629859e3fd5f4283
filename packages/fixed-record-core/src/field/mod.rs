//! Field descriptors: one fixed-width slot of a record.
//!
//! A [`Field`] pairs a typed codec ([`FieldKind`]) with the slot metadata
//! every type shares: length, pad character, alignment, required/default
//! state, an optional constant, an optional enumeration and, once a record
//! layout has been computed, its byte offset.

mod enumeration;

pub use enumeration::Enumeration;

use std::fmt;
use std::io::{Read, Seek};

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::CodecConfig;
use crate::error::{FieldError, Result};
use crate::record::Record;
use crate::stream;
use crate::types::{Alphanumeric, CodecError, Date, Datetime, FieldKind, Numeric, Time};
use crate::value::Value;

/// Padding rule applied when packing and stripped when unpacking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Value first, pad on the right
    Left,
    /// Pad on the left, value last
    Right,
    /// Pad on the left; strip pad from both ends when unpacking
    #[default]
    Strip,
}

/// Ordered coercion attempts for values assigned to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Coercion {
    /// The value as given
    AsIs,
    /// Text value parsed as slot text
    LoadText,
    /// Non-text value stringified, then parsed as slot text
    LoadStringified,
}

impl Coercion {
    const ORDER: [Coercion; 3] = [Coercion::AsIs, Coercion::LoadText, Coercion::LoadStringified];
}

/// Result of one coercion attempt.
enum Outcome {
    Accepted(Value),
    Rejected(String),
    Skipped,
}

/// Schema descriptor for one fixed-width slot.
#[derive(Debug, Clone)]
pub struct Field {
    name: Option<String>,
    length: usize,
    pad: Option<char>,
    align: Alignment,
    required: bool,
    default: Option<Value>,
    constant: Option<Value>,
    enumeration: Enumeration,
    order: Option<usize>,
    offset: Option<usize>,
    pattern: Option<Regex>,
    kind: FieldKind,
}

impl Field {
    /// Creates a required field of `length` characters.
    ///
    /// Pad and alignment come from the kind and can be overridden.
    pub fn new(length: usize, kind: impl Into<FieldKind>) -> Self {
        let kind = kind.into();
        let codec = kind.codec();
        Self {
            name: None,
            length,
            pad: codec.default_pad(),
            align: codec.default_align(),
            required: true,
            default: None,
            constant: None,
            enumeration: Enumeration::default(),
            order: None,
            offset: None,
            pattern: None,
            kind,
        }
    }

    pub fn numeric(length: usize) -> Self {
        Self::new(length, Numeric::new())
    }

    pub fn alphanumeric(length: usize) -> Self {
        Self::new(length, Alphanumeric::new())
    }

    /// Datetime slot as wide as `pattern`.
    pub fn datetime(pattern: &str) -> Self {
        Self::from(Datetime::new(pattern))
    }

    /// Date slot as wide as `pattern`.
    pub fn date(pattern: &str) -> Self {
        Self::from(Date::new(pattern))
    }

    /// Time slot as wide as `pattern`.
    pub fn time(pattern: &str) -> Self {
        Self::from(Time::new(pattern))
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Overrides the pad character; `None` disables padding.
    pub fn pad(mut self, pad: impl Into<Option<char>>) -> Self {
        self.pad = pad.into();
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Declares a default, which makes the field optional.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        let value = value.into();
        if !value.is_null() {
            self.required = false;
            self.default = Some(value);
        }
        self
    }

    /// Makes the field optional, defaulting to the type's built-in default.
    pub fn optional(mut self) -> Self {
        self.required = false;
        if self.default.is_none() {
            self.default = self.kind.codec().builtin_default();
        }
        self
    }

    /// Explicit declaration order; fields without one use their position.
    pub fn order(mut self, order: usize) -> Self {
        self.order = Some(order);
        self
    }

    pub fn enumeration(mut self, enumeration: Enumeration) -> Self {
        self.enumeration = enumeration;
        self
    }

    /// Regex the stripped slot text must match (anchored at the start).
    pub fn pattern(mut self, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| FieldError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        self.pattern = Some(regex);
        Ok(self)
    }

    /// Copy fixed to the type's built-in default.
    pub fn reserved(&self) -> Result<Self> {
        let value = self
            .kind
            .codec()
            .builtin_default()
            .ok_or_else(|| FieldError::NoBuiltinDefault {
                field: self.name().to_string(),
                kind: self.type_name(),
            })?;
        self.constant(value)
    }

    /// Copy fixed to `value`, which also becomes its default.
    pub fn constant(&self, value: impl Into<Value>) -> Result<Self> {
        let value = value.into();
        self.validate(&value)
            .map_err(|reason| self.invalid(&value, reason))?;
        let value = self.kind.codec().canonicalize(value);
        let mut other = self.clone();
        other.default = Some(value.clone());
        other.constant = Some(value);
        Ok(other)
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn pad_char(&self) -> Option<char> {
        self.pad
    }

    pub fn alignment(&self) -> Alignment {
        self.align
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn is_constant(&self) -> bool {
        self.constant.is_some()
    }

    /// The fixed value of a constant field.
    pub fn value(&self) -> Result<&Value> {
        self.constant.as_ref().ok_or_else(|| FieldError::NotConstant {
            field: self.name().to_string(),
        })
    }

    /// Resolves a symbolic enumeration key to its value.
    pub fn enum_value(&self, key: &str) -> Option<&Value> {
        self.enumeration.get(key)
    }

    pub fn declared_order(&self) -> Option<usize> {
        self.order
    }

    /// Byte offset within the record; `None` until a layout assigns it.
    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    pub fn end_offset(&self) -> Option<usize> {
        self.offset.map(|offset| offset + self.length)
    }

    pub fn validation_pattern(&self) -> Option<&str> {
        self.pattern.as_ref().map(Regex::as_str)
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.codec().type_name()
    }

    pub(crate) fn assign_offset(&mut self, offset: usize) {
        self.offset = Some(offset);
    }

    pub(crate) fn apply_config(&mut self, config: &CodecConfig) {
        self.kind.codec_mut().apply_config(config);
    }

    /// Checks `value` against the type and this field's constraints.
    ///
    /// Returns the reason on failure.
    pub fn validate(&self, value: &Value) -> std::result::Result<(), String> {
        self.kind
            .codec()
            .validate(value, self.length, &self.enumeration)
    }

    /// Reads this field from a record.
    pub fn get(&self, record: &Record) -> Result<Value> {
        if let Some(constant) = &self.constant {
            return Ok(constant.clone());
        }
        match record.values.get(self.name()) {
            Some(Value::Null) => Ok(self.default.clone().unwrap_or_default()),
            Some(value) => Ok(value.clone()),
            None => match &self.default {
                Some(default) if !self.required => Ok(default.clone()),
                _ => Err(FieldError::MissingValue {
                    record: record.type_name().to_string(),
                    field: self.name().to_string(),
                }),
            },
        }
    }

    /// Coerces and stores `value`; a constant field rejects anything else.
    pub fn set(&self, record: &mut Record, value: impl Into<Value>) -> Result<()> {
        let value = self.coerce(record.type_name(), value.into())?;
        if let Some(constant) = &self.constant {
            if *constant != value {
                return Err(FieldError::ConstantConflict {
                    field: self.name().to_string(),
                    constant: constant.to_string(),
                    value: value.to_string(),
                });
            }
            return Ok(());
        }
        record.values.insert(self.name().to_string(), value);
        Ok(())
    }

    /// Coerces and stores `value`; a constant field ignores it.
    pub fn fill(&self, record: &mut Record, value: impl Into<Value>) -> Result<()> {
        let value = self.coerce(record.type_name(), value.into())?;
        if self.constant.is_none() {
            record.values.insert(self.name().to_string(), value);
        }
        Ok(())
    }

    /// Turns a native value or its slot text into a validated value.
    ///
    /// Tries the value as given, then parsed from its text, then parsed
    /// from its stringified form; the first attempt that validates wins.
    /// `Null` passes through untouched.
    pub fn coerce(&self, record: &str, value: Value) -> Result<Value> {
        if value.is_null() {
            return Ok(value);
        }
        let mut reason = String::new();
        for coercion in Coercion::ORDER {
            match self.attempt(coercion, &value) {
                Outcome::Accepted(coerced) => return Ok(coerced),
                Outcome::Rejected(why) => {
                    trace!(
                        field = self.name(),
                        ?coercion,
                        reason = %why,
                        "coercion attempt rejected"
                    );
                    reason = why;
                }
                Outcome::Skipped => {}
            }
        }
        Err(FieldError::Validation {
            record: record.to_string(),
            field: self.name().to_string(),
            value: value.to_string(),
            reason,
        })
    }

    fn attempt(&self, coercion: Coercion, value: &Value) -> Outcome {
        let candidate = match coercion {
            Coercion::AsIs => value.clone(),
            Coercion::LoadText => match value.as_text() {
                Some(text) => match self.kind.codec().load(text) {
                    Ok(loaded) => loaded,
                    Err(_) => return Outcome::Skipped,
                },
                None => return Outcome::Skipped,
            },
            Coercion::LoadStringified => {
                if value.as_text().is_some() {
                    return Outcome::Skipped;
                }
                match self.kind.codec().load(&value.to_string()) {
                    Ok(loaded) => loaded,
                    Err(_) => return Outcome::Skipped,
                }
            }
        };
        match self.validate(&candidate) {
            Ok(()) => Outcome::Accepted(self.kind.codec().canonicalize(candidate)),
            Err(reason) => Outcome::Rejected(reason),
        }
    }

    /// Renders a value without padding.
    pub fn dump(&self, value: &Value) -> Result<String> {
        self.kind
            .codec()
            .dump(value)
            .map_err(|e| self.dump_error(value, e))
    }

    /// Parses stripped slot text.
    pub fn load(&self, raw: &str) -> Result<Value> {
        self.kind
            .codec()
            .load(raw)
            .map_err(|e| self.load_error(raw, e))
    }

    /// Encodes a value into exactly `length` ASCII characters.
    pub fn pack(&self, value: &Value) -> Result<String> {
        self.validate(value)
            .map_err(|reason| self.invalid(value, reason))?;
        let text = match (self.align, self.pad) {
            (Alignment::Strip, Some(pad)) => self.dump(value)?.trim_matches(pad).to_string(),
            _ => self.dump(value)?,
        };
        let width = text.chars().count();
        let packed = match self.pad {
            _ if width == self.length => text,
            Some(pad) if width < self.length => {
                let fill: String = std::iter::repeat_n(pad, self.length - width).collect();
                match self.align {
                    Alignment::Left => text + &fill,
                    Alignment::Right | Alignment::Strip => fill + &text,
                }
            }
            _ => {
                return Err(FieldError::Width {
                    field: self.name().to_string(),
                    value: value.to_string(),
                    width,
                    length: self.length,
                })
            }
        };
        if !packed.is_ascii() {
            return Err(FieldError::Encoding {
                field: self.name().to_string(),
                value: packed,
            });
        }
        Ok(packed)
    }

    /// Decodes the first `length` characters of `raw`.
    pub fn unpack(&self, raw: &str) -> Result<Value> {
        let actual = raw.chars().count();
        if actual < self.length {
            return Err(FieldError::InsufficientInput {
                field: self.name().to_string(),
                expected: self.length,
                actual,
            });
        }
        let slot: String = raw.chars().take(self.length).collect();
        let text = self.strip(&slot);
        if let Some(pattern) = &self.pattern {
            if !pattern.find(text).is_some_and(|m| m.start() == 0) {
                return Err(FieldError::PatternMismatch {
                    field: self.name().to_string(),
                    value: text.to_string(),
                    pattern: pattern.as_str().to_string(),
                });
            }
        }
        let value = self.load(text)?;
        self.validate(&value)
            .map_err(|reason| self.invalid(&value, reason))?;
        Ok(value)
    }

    /// Decodes the first `length` bytes of a single-byte encoded buffer.
    pub fn unpack_bytes(&self, raw: &[u8]) -> Result<Value> {
        let window = &raw[..raw.len().min(self.length)];
        self.unpack(&stream::decode_single_byte(window))
    }

    /// Reads this field `offset` bytes past the stream's position.
    ///
    /// Returns `Ok(None)` when the slot can't be unpacked or the field has no
    /// offset. The stream position is left unchanged on every path.
    pub fn probe<S: Read + Seek>(&self, stream: &mut S) -> Result<Option<Value>> {
        let Some(offset) = self.offset else {
            debug!(field = self.name(), "probe on field without an offset");
            return Ok(None);
        };
        let outcome = stream::with_restored_position(stream, |s| {
            stream::read_window(s, offset, self.length).and_then(|bytes| self.unpack_bytes(&bytes))
        })?;
        match outcome {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                debug!(field = self.name(), error = %err, "probe found no value");
                Ok(None)
            }
        }
    }

    fn strip<'a>(&self, slot: &'a str) -> &'a str {
        match self.pad {
            None => slot,
            Some(pad) => match self.align {
                Alignment::Left => slot.trim_end_matches(pad),
                Alignment::Right => slot.trim_start_matches(pad),
                Alignment::Strip => slot.trim_matches(pad),
            },
        }
    }

    fn invalid(&self, value: &Value, reason: String) -> FieldError {
        FieldError::InvalidValue {
            field: self.to_string(),
            value: value.to_string(),
            reason,
        }
    }

    fn load_error(&self, raw: &str, error: CodecError) -> FieldError {
        match error {
            CodecError::UnsupportedTimeZone { code, expected } => FieldError::UnsupportedTimeZone {
                field: self.name().to_string(),
                code,
                expected,
            },
            other => FieldError::Load {
                field: self.name().to_string(),
                value: raw.to_string(),
                reason: other.to_string(),
            },
        }
    }

    fn dump_error(&self, value: &Value, error: CodecError) -> FieldError {
        match error {
            CodecError::TimeZoneWidth { zone, width } => FieldError::TimeZoneWidth {
                field: self.name().to_string(),
                zone,
                width,
            },
            other => FieldError::Dump {
                field: self.name().to_string(),
                value: value.to_string(),
                reason: other.to_string(),
            },
        }
    }
}

impl From<Datetime> for Field {
    fn from(kind: Datetime) -> Self {
        Self::new(kind.pattern().width(), kind)
    }
}

impl From<Date> for Field {
    fn from(kind: Date) -> Self {
        Self::new(kind.pattern().width(), kind)
    }
}

impl From<Time> for Field {
    fn from(kind: Time) -> Self {
        Self::new(kind.pattern().width(), kind)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(name={}, length={}, required={}, default=",
            self.type_name(),
            self.name(),
            self.length,
            if self.required { "True" } else { "False" },
        )?;
        match &self.default {
            Some(default) => write!(f, "{:?})", default.to_string()),
            None => f.write_str("None)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Cursor;

    #[test]
    fn test_alphanumeric_pads_right() {
        let field = Field::alphanumeric(10);
        assert_eq!(field.pack(&Value::from("hiya")).unwrap(), "hiya      ");
        assert_eq!(field.unpack("hiya      ").unwrap(), Value::from("hiya"));
    }

    #[test]
    fn test_numeric_pads_left_with_zeros() {
        let field = Field::numeric(5);
        assert_eq!(field.pack(&Value::from(42)).unwrap(), "00042");
        assert_eq!(field.unpack("00042").unwrap(), Value::from(42));
        assert_eq!(field.unpack("00000").unwrap(), Value::from(0));
    }

    #[test]
    fn test_numeric_bounds() {
        let field = Field::new(2, Numeric::new().min_value(0).max_value(99));
        assert!(field.pack(&Value::from(-1)).is_err());
        assert!(field.pack(&Value::from(100)).is_err());
        assert_eq!(field.unpack("07").unwrap(), Value::from(7));
        assert_eq!(field.coerce("Rec", Value::from("07")).unwrap(), Value::from(7));
    }

    #[test]
    fn test_strip_alignment_and_custom_pad() {
        let field = Field::alphanumeric(6).pad('*').align(Alignment::Strip);
        assert_eq!(field.pack(&Value::from("ab")).unwrap(), "****ab");
        assert_eq!(field.unpack("**ab**").unwrap(), Value::from("ab"));

        let right = Field::alphanumeric(4).align(Alignment::Right);
        assert_eq!(right.pack(&Value::from("ab")).unwrap(), "  ab");
    }

    #[test]
    fn test_strip_alignment_strips_before_padding() {
        let field = Field::alphanumeric(6).pad('*').align(Alignment::Strip);
        assert_eq!(field.pack(&Value::from("ab*")).unwrap(), "****ab");
        assert_eq!(field.pack(&Value::from("*ab")).unwrap(), "****ab");
        assert_eq!(field.unpack("***ab*").unwrap(), Value::from("ab"));
    }

    #[test]
    fn test_constant_from_slot_text_is_canonical() {
        let field = Field::numeric(2).constant("07").unwrap();
        assert_eq!(field.value().unwrap(), &Value::from(7));
        assert_eq!(field.default_value(), Some(&Value::from(7)));
    }

    #[test]
    fn test_unpack_insufficient_input() {
        let err = Field::numeric(5).named("n").unpack("123").unwrap_err();
        assert_eq!(
            err,
            FieldError::InsufficientInput {
                field: "n".to_string(),
                expected: 5,
                actual: 3,
            }
        );
    }

    #[test]
    fn test_unpack_takes_only_its_slot() {
        assert_eq!(Field::numeric(2).unpack("12345").unwrap(), Value::from(12));
    }

    #[test]
    fn test_unpack_load_failure() {
        let err = Field::numeric(3).unpack("1x3").unwrap_err();
        assert!(matches!(err, FieldError::Load { .. }));
    }

    #[test]
    fn test_validation_pattern() {
        let field = Field::alphanumeric(4).pattern("[A-Z]+").unwrap();
        assert_eq!(field.unpack("ABC ").unwrap(), Value::from("ABC"));
        assert!(matches!(
            field.unpack("abc ").unwrap_err(),
            FieldError::PatternMismatch { .. }
        ));
        assert!(matches!(
            Field::alphanumeric(4).pattern("(").unwrap_err(),
            FieldError::InvalidPattern { .. }
        ));
    }

    #[test]
    fn test_pack_rejects_non_ascii() {
        let field = Field::new(4, Alphanumeric::new().alphabet("é"));
        assert!(matches!(
            field.pack(&Value::from("é")).unwrap_err(),
            FieldError::Encoding { .. }
        ));
    }

    #[test]
    fn test_pack_without_pad_needs_exact_width() {
        let field = Field::alphanumeric(4).pad(None);
        assert_eq!(field.pack(&Value::from("abcd")).unwrap(), "abcd");
        assert!(matches!(
            field.pack(&Value::from("ab")).unwrap_err(),
            FieldError::Width { width: 2, length: 4, .. }
        ));
    }

    #[test]
    fn test_reserved_and_constant() {
        let reserved = Field::numeric(3).reserved().unwrap();
        assert_eq!(reserved.value().unwrap(), &Value::from(0));
        assert_eq!(reserved.default_value(), Some(&Value::from(0)));

        let err = Field::date("YYYYMMDD").named("d").reserved().unwrap_err();
        assert!(matches!(err, FieldError::NoBuiltinDefault { kind: "Date", .. }));

        assert!(Field::numeric(2).constant(100).is_err());
        assert!(matches!(
            Field::numeric(2).value().unwrap_err(),
            FieldError::NotConstant { .. }
        ));
    }

    #[test]
    fn test_default_makes_optional() {
        let field = Field::alphanumeric(10).with_default("abc123");
        assert!(!field.is_required());
        assert_eq!(field.default_value(), Some(&Value::from("abc123")));

        let optional = Field::numeric(3).optional();
        assert!(!optional.is_required());
        assert_eq!(optional.default_value(), Some(&Value::from(0)));

        let required = Field::numeric(3).with_default(Value::Null);
        assert!(required.is_required());
    }

    #[test]
    fn test_enumeration_keys() {
        let field = Field::alphanumeric(1)
            .enumeration(Enumeration::pairs([("ACTIVE", "A"), ("CLOSED", "C")]));
        assert_eq!(field.enum_value("CLOSED"), Some(&Value::from("C")));
        assert!(field.pack(&Value::from("A")).is_ok());
        assert!(field.pack(&Value::from("X")).is_err());
    }

    #[test]
    fn test_coerce_from_slot_text() {
        let field = Field::date("YYYYMMDD");
        let coerced = field.coerce("Rec", Value::from("20240131")).unwrap();
        assert_eq!(coerced, Value::from(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()));

        let text = Field::alphanumeric(5);
        assert_eq!(text.coerce("Rec", Value::from(42)).unwrap(), Value::from("42"));
    }

    #[test]
    fn test_coerce_failure_names_record_and_field() {
        let field = Field::numeric(2).named("count");
        let err = field.coerce("Invoice", Value::from("abc")).unwrap_err();
        assert_eq!(
            err,
            FieldError::Validation {
                record: "Invoice".to_string(),
                field: "count".to_string(),
                value: "abc".to_string(),
                reason: "must be a whole number".to_string(),
            }
        );
    }

    #[test]
    fn test_coerce_keeps_null() {
        assert_eq!(Field::numeric(2).coerce("Rec", Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn test_probe_restores_position() {
        let mut field = Field::numeric(3);
        field.assign_offset(2);
        let mut cursor = Cursor::new(b"xx042yy".to_vec());
        assert_eq!(field.probe(&mut cursor).unwrap(), Some(Value::from(42)));
        assert_eq!(cursor.position(), 0);

        cursor.set_position(1);
        assert_eq!(field.probe(&mut cursor).unwrap(), None);
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn test_probe_without_offset_is_absent() {
        let mut cursor = Cursor::new(b"123".to_vec());
        assert_eq!(Field::numeric(3).probe(&mut cursor).unwrap(), None);
    }

    #[test]
    fn test_display() {
        let field = Field::alphanumeric(10).named("c").with_default("abc123");
        assert_eq!(
            field.to_string(),
            "Alphanumeric(name=c, length=10, required=False, default=\"abc123\")"
        );
        assert_eq!(
            Field::numeric(2).named("n").to_string(),
            "Numeric(name=n, length=2, required=True, default=None)"
        );
    }
}
