//! Left-aligned, space-padded text.

use super::{CodecError, FieldType};
use crate::config::{CodecConfig, PRINTABLE};
use crate::field::{Alignment, Enumeration};
use crate::value::Value;

/// Text slot restricted to an alphabet (printable ASCII unless configured).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alphanumeric {
    alphabet: Option<String>,
}

impl Alphanumeric {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts accepted characters.
    pub fn alphabet(mut self, alphabet: impl Into<String>) -> Self {
        self.alphabet = Some(alphabet.into());
        self
    }

    fn accepted(&self) -> &str {
        self.alphabet.as_deref().unwrap_or(PRINTABLE)
    }
}

impl FieldType for Alphanumeric {
    fn type_name(&self) -> &'static str {
        "Alphanumeric"
    }

    fn default_pad(&self) -> Option<char> {
        Some(' ')
    }

    fn default_align(&self) -> Alignment {
        Alignment::Left
    }

    fn builtin_default(&self) -> Option<Value> {
        Some(Value::Text(String::new()))
    }

    fn validate(
        &self,
        value: &Value,
        length: usize,
        allowed: &Enumeration,
    ) -> Result<(), String> {
        let text = value.as_text().ok_or_else(|| "must be a string".to_string())?;
        if !allowed.is_empty() && !allowed.contains(value) {
            return Err(format!("must be one of {}, got \"{}\"", allowed, text));
        }
        if text.chars().count() > length {
            return Err(format!("must have length <= {}", length));
        }
        let alphabet = self.accepted();
        if let Some((i, c)) = text.chars().enumerate().find(|(_, c)| !alphabet.contains(*c)) {
            return Err(format!("has invalid character {:?} @ {}", c, i));
        }
        Ok(())
    }

    fn load(&self, raw: &str) -> Result<Value, CodecError> {
        Ok(Value::Text(raw.to_string()))
    }

    fn dump(&self, value: &Value) -> Result<String, CodecError> {
        value
            .as_text()
            .map(str::to_string)
            .ok_or(CodecError::WrongKind {
                expected: "a string",
                got: value.kind_name(),
            })
    }

    fn apply_config(&mut self, config: &CodecConfig) {
        if self.alphabet.is_none() {
            self.alphabet = Some(config.alphabet.clone());
        }
    }
}
