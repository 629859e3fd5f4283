//! Record instances bound to a record type.

use std::collections::BTreeMap;
use std::io::{Read, Seek};
use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::stream;
use crate::value::Value;

use super::layout::RecordType;

/// Field values of one record.
///
/// Constant fields are never stored; their value comes from the descriptor.
/// Every stored value has passed its field's validation.
#[derive(Debug, Clone)]
pub struct Record {
    record_type: Arc<RecordType>,
    pub(crate) values: BTreeMap<String, Value>,
}

impl Record {
    /// Creates a record from the type's defaults overlaid with `values`.
    ///
    /// # Arguments
    /// * `record_type` - Schema the record belongs to
    /// * `values` - Field name / value pairs, native or slot text
    ///
    /// # Returns
    /// `Result<Record, FieldError>` containing the record, `UnknownField` for
    /// an undeclared name, or `Validation` for a value no coercion accepts.
    pub fn new<I, K, V>(record_type: &Arc<RecordType>, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut merged = record_type.defaults().clone();
        for (name, value) in values {
            merged.insert(name.into(), value.into());
        }

        let mut record = Self {
            record_type: Arc::clone(record_type),
            values: BTreeMap::new(),
        };
        for (name, value) in merged {
            record_type.field(&name)?.fill(&mut record, value)?;
        }
        Ok(record)
    }

    /// Record with only the type's defaults.
    pub fn with_defaults(record_type: &Arc<RecordType>) -> Result<Self> {
        Self::new(record_type, std::iter::empty::<(String, Value)>())
    }

    pub fn record_type(&self) -> &Arc<RecordType> {
        &self.record_type
    }

    pub fn type_name(&self) -> &str {
        self.record_type.name()
    }

    /// Reads a field value, falling back to the field's default or constant.
    pub fn get(&self, name: &str) -> Result<Value> {
        self.record_type.field(name)?.get(self)
    }

    /// Assigns a field value; a constant field rejects any other value.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let record_type = Arc::clone(&self.record_type);
        record_type.field(name)?.set(self, value)
    }

    /// Assigns a field value; a constant field ignores it.
    pub fn fill(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let record_type = Arc::clone(&self.record_type);
        record_type.field(name)?.fill(self, value)
    }

    /// Stored (non-constant) entries, sorted by name.
    pub fn values(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Decodes a record from the first `length` characters of `raw`.
    pub fn load(record_type: &Arc<RecordType>, raw: &str) -> Result<Self> {
        let mut values = Vec::with_capacity(record_type.fields().len());
        let mut rest = raw;
        for field in record_type.fields() {
            values.push((field.name().to_string(), field.unpack(rest)?));
            rest = rest
                .char_indices()
                .nth(field.length())
                .map_or("", |(at, _)| &rest[at..]);
        }
        Self::new(record_type, values)
    }

    /// Decodes a record from a single-byte encoded buffer.
    pub fn load_bytes(record_type: &Arc<RecordType>, raw: &[u8]) -> Result<Self> {
        Self::load(record_type, &stream::decode_single_byte(raw))
    }

    /// Reads one record at the stream's current position.
    ///
    /// Returns `Ok(None)` when the bytes there don't decode. The stream
    /// position is left unchanged on every path; only a failure to query or
    /// restore it is an error.
    pub fn probe<S: Read + Seek>(
        record_type: &Arc<RecordType>,
        stream: &mut S,
    ) -> Result<Option<Self>> {
        let outcome = stream::with_restored_position(stream, |s| {
            stream::read_window(s, 0, record_type.length())
                .and_then(|bytes| Self::load_bytes(record_type, &bytes))
        })?;
        match outcome {
            Ok(record) => Ok(Some(record)),
            Err(err) => {
                debug!(record = record_type.name(), error = %err, "probe found no record");
                Ok(None)
            }
        }
    }

    /// Encodes every field in offset order.
    pub fn dump(&self) -> Result<String> {
        let mut raw = String::with_capacity(self.record_type.length());
        for field in self.record_type.fields() {
            raw.push_str(&field.pack(&field.get(self)?)?);
        }
        Ok(raw)
    }

    /// [`dump`](Self::dump) as single-byte encoded bytes.
    pub fn dump_bytes(&self) -> Result<Vec<u8>> {
        self.dump().map(String::into_bytes)
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.record_type.name() == other.record_type.name() && self.values == other.values
    }
}
