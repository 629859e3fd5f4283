//! Enumerated-value constraints.

use std::fmt;

use crate::value::Value;

/// Allowed values for a field, keyed by symbolic name.
///
/// Built from plain values (each value is its own key) or explicit
/// `(key, value)` pairs. An empty enumeration constrains nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enumeration {
    entries: Vec<(String, Value)>,
}

impl Enumeration {
    /// Identity mapping: every value is keyed by its own text.
    pub fn values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::pairs(values.into_iter().map(|v| {
            let value = v.into();
            (value.to_string(), value)
        }))
    }

    /// Explicit mapping. A repeated key keeps the last value.
    pub fn pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut entries: Vec<(String, Value)> = Vec::new();
        for (key, value) in pairs {
            let key = key.into();
            let value = value.into();
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some(entry) => entry.1 = value,
                None => entries.push((key, value)),
            }
        }
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.entries.iter().any(|(_, v)| v == value)
    }

    /// Value registered under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl fmt::Display for Enumeration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, (_, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", value)?;
        }
        f.write_str("]")
    }
}
