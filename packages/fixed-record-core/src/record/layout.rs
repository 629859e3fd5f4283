//! Record type schema and layout computation.
//!
//! A record type is an ordered list of field descriptors with contiguous
//! offsets:
//! - Declared order, or an explicit `order`, decides slot position
//! - Offsets start at 0 and each slot follows the previous one
//! - Width is the sum of field lengths
//! - Defaults (constants included) are captured once

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::CodecConfig;
use crate::error::{FieldError, Result};
use crate::field::Field;
use crate::value::Value;

use super::schema::{LayoutDescription, SlotDescription};
use super::validation;

/// Immutable record schema, shared by every record of the type.
#[derive(Debug)]
pub struct RecordType {
    /// Record type name
    name: String,
    /// Field definitions in offset order
    fields: Vec<Field>,
    /// Total width in characters
    length: usize,
    /// Defaults applied when a record is constructed
    defaults: BTreeMap<String, Value>,
}

impl RecordType {
    /// Starts a schema definition.
    pub fn builder(name: impl Into<String>) -> RecordTypeBuilder {
        RecordTypeBuilder {
            name: name.into(),
            fields: Vec::new(),
            inherited: HashSet::new(),
            config: CodecConfig::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total width of a dumped record.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Fields in offset order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Looks up a field by name.
    ///
    /// # Arguments
    /// * `name` - Field name
    ///
    /// # Returns
    /// `Result<&Field, FieldError>` containing the field or `UnknownField`.
    pub fn field(&self, name: &str) -> Result<&Field> {
        self.fields
            .iter()
            .find(|f| f.name() == name)
            .ok_or_else(|| FieldError::UnknownField {
                record: self.name.clone(),
                field: name.to_string(),
            })
    }

    /// Name → default map, constants included.
    pub fn defaults(&self) -> &BTreeMap<String, Value> {
        &self.defaults
    }

    /// Describes every slot with its packed default and constant.
    pub fn describe(&self) -> Result<LayoutDescription> {
        let fields = self
            .fields
            .iter()
            .map(|field| {
                let packed = |value: Option<&Value>| value.map(|v| field.pack(v)).transpose();
                Ok(SlotDescription {
                    name: field.name().to_string(),
                    kind: field.type_name().to_string(),
                    offset: field.offset().unwrap_or_default(),
                    length: field.length(),
                    pad: field.pad_char(),
                    alignment: field.alignment(),
                    required: field.is_required(),
                    default: packed(field.default_value())?,
                    constant: packed(field.value().ok())?,
                    pattern: field.kind().pattern().map(|p| p.source().to_string()),
                    validation: field.validation_pattern().map(str::to_string),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(LayoutDescription {
            record: self.name.clone(),
            length: self.length,
            fields,
        })
    }

    /// [`describe`](Self::describe) rendered as pretty JSON.
    pub fn describe_json(&self) -> Result<String> {
        let description = self.describe()?;
        serde_json::to_string_pretty(&description)
            .map_err(|e| FieldError::Serialization(e.to_string()))
    }
}

/// Collects field declarations for a [`RecordType`].
#[derive(Debug, Clone)]
pub struct RecordTypeBuilder {
    name: String,
    fields: Vec<Field>,
    inherited: HashSet<String>,
    config: CodecConfig,
}

impl RecordTypeBuilder {
    /// Declares a field; the builder name replaces any name on the field.
    ///
    /// Redeclaring an inherited name replaces the inherited field and moves
    /// it to this declaration's position.
    pub fn field(mut self, name: impl Into<String>, field: Field) -> Self {
        let name = name.into();
        if self.inherited.remove(&name) {
            warn!(record = %self.name, field = %name, "overriding inherited field");
            self.fields.retain(|f| f.name() != name);
        }
        self.fields.push(field.named(name));
        self
    }

    /// Copies every field of `parent`, ahead of fields declared later.
    pub fn inherit(mut self, parent: &RecordType) -> Self {
        for field in parent.fields() {
            self.inherited.insert(field.name().to_string());
            self.fields.push(field.clone());
        }
        self
    }

    /// Defaults for settings the fields leave unset.
    pub fn config(mut self, config: CodecConfig) -> Self {
        self.config = config;
        self
    }

    /// Computes offsets and width and freezes the schema.
    ///
    /// # Returns
    /// `Result<Arc<RecordType>, FieldError>` containing the record type or
    /// `InvalidSchema`.
    pub fn build(self) -> Result<Arc<RecordType>> {
        let RecordTypeBuilder {
            name,
            fields,
            config,
            ..
        } = self;

        let mut ordered: Vec<(usize, Field)> = fields
            .into_iter()
            .enumerate()
            .map(|(position, field)| (field.declared_order().unwrap_or(position), field))
            .collect();
        ordered.sort_by_key(|(order, _)| *order);
        let mut fields: Vec<Field> = ordered.into_iter().map(|(_, field)| field).collect();

        validation::validate_field_names(&name, &fields)?;
        validation::validate_field_lengths(&name, &fields)?;

        let mut offset: usize = 0;
        for field in &mut fields {
            field.apply_config(&config);
            field.assign_offset(offset);
            offset = offset
                .checked_add(field.length())
                .ok_or_else(|| FieldError::InvalidSchema {
                    record: name.clone(),
                    reason: "record width overflows".to_string(),
                })?;
        }

        validation::validate_field_layout(&name, &fields)?;
        let length = offset;

        let defaults = fields
            .iter()
            .filter_map(|field| {
                field
                    .default_value()
                    .map(|value| (field.name().to_string(), value.clone()))
            })
            .collect();

        debug!(record = %name, fields = fields.len(), length, "record layout computed");

        Ok(Arc::new(RecordType {
            name,
            fields,
            length,
            defaults,
        }))
    }
}
