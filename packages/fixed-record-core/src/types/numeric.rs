//! Right-aligned, zero-padded whole numbers.

use super::{CodecError, FieldType};
use crate::field::{Alignment, Enumeration};
use crate::value::Value;

/// Whole-number slot with optional bounds.
///
/// Defaults: pad `'0'`, right aligned, built-in default `0`, minimum `0`,
/// no maximum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Numeric {
    min_value: Option<i64>,
    max_value: Option<i64>,
}

impl Default for Numeric {
    fn default() -> Self {
        Self {
            min_value: Some(0),
            max_value: None,
        }
    }
}

impl Numeric {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the inclusive lower bound.
    pub fn min_value(mut self, min_value: i64) -> Self {
        self.min_value = Some(min_value);
        self
    }

    /// Sets the inclusive upper bound.
    pub fn max_value(mut self, max_value: i64) -> Self {
        self.max_value = Some(max_value);
        self
    }

    /// Removes the lower bound, allowing negative numbers.
    pub fn unbounded_min(mut self) -> Self {
        self.min_value = None;
        self
    }
}

/// Integer view of a value; plain digit strings count as integers.
fn whole_number(value: &Value) -> Option<i64> {
    match value {
        Value::Integer(n) => Some(*n),
        Value::Text(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => s.parse().ok(),
        _ => None,
    }
}

impl FieldType for Numeric {
    fn type_name(&self) -> &'static str {
        "Numeric"
    }

    fn default_pad(&self) -> Option<char> {
        Some('0')
    }

    fn default_align(&self) -> Alignment {
        Alignment::Right
    }

    fn builtin_default(&self) -> Option<Value> {
        Some(Value::Integer(0))
    }

    fn validate(
        &self,
        value: &Value,
        length: usize,
        allowed: &Enumeration,
    ) -> Result<(), String> {
        let number = whole_number(value).ok_or_else(|| "must be a whole number".to_string())?;
        if !allowed.is_empty() && !allowed.contains(&Value::Integer(number)) {
            return Err(format!("must be one of {}, got \"{}\"", allowed, number));
        }
        if number.to_string().len() > length {
            return Err(format!("must have length <= {}", length));
        }
        if let Some(min) = self.min_value {
            if number < min {
                return Err(format!("must be >= {}", min));
            }
        }
        if let Some(max) = self.max_value {
            if number > max {
                return Err(format!("must be <= {}", max));
            }
        }
        Ok(())
    }

    fn load(&self, raw: &str) -> Result<Value, CodecError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(Value::Integer(0));
        }
        raw.parse::<i64>()
            .map(Value::Integer)
            .map_err(|e| CodecError::Parse(format!("\"{}\" is not a whole number: {}", raw, e)))
    }

    fn dump(&self, value: &Value) -> Result<String, CodecError> {
        whole_number(value)
            .map(|n| n.to_string())
            .ok_or(CodecError::WrongKind {
                expected: "a whole number",
                got: value.kind_name(),
            })
    }

    fn canonicalize(&self, value: Value) -> Value {
        match whole_number(&value) {
            Some(n) => Value::Integer(n),
            None => value,
        }
    }
}
