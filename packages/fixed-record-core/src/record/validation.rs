//! Validation methods for record layouts.

use std::collections::HashSet;

use crate::error::FieldError;
use crate::field::Field;

fn invalid(record: &str, reason: String) -> FieldError {
    FieldError::InvalidSchema {
        record: record.to_string(),
        reason,
    }
}

/// Validates that every field has a non-empty, unique name.
///
/// # Arguments
/// * `record` - Record type name, for error context
/// * `fields` - Field definitions to validate
///
/// # Returns
/// `Result<(), FieldError>` indicating success or validation failure.
pub(crate) fn validate_field_names(record: &str, fields: &[Field]) -> Result<(), FieldError> {
    let mut seen_names = HashSet::new();
    for field in fields {
        if field.name().is_empty() {
            return Err(invalid(record, "field name must not be empty".to_string()));
        }
        if !seen_names.insert(field.name()) {
            return Err(invalid(
                record,
                format!("field '{}' is declared more than once", field.name()),
            ));
        }
    }
    Ok(())
}

/// Validates field lengths against zero and against pattern-implied widths.
///
/// # Arguments
/// * `record` - Record type name, for error context
/// * `fields` - Field definitions to validate
///
/// # Returns
/// `Result<(), FieldError>` indicating success or validation failure.
pub(crate) fn validate_field_lengths(record: &str, fields: &[Field]) -> Result<(), FieldError> {
    for field in fields {
        if field.length() == 0 {
            return Err(invalid(
                record,
                format!("field '{}' has zero length", field.name()),
            ));
        }
        if let Some(implied) = field.kind().codec().implied_length() {
            if implied != field.length() {
                return Err(invalid(
                    record,
                    format!(
                        "field '{}' has length {} but its pattern is {} characters wide",
                        field.name(),
                        field.length(),
                        implied
                    ),
                ));
            }
        }
    }
    Ok(())
}

/// Validates that offsets are assigned, contiguous and non-overlapping.
///
/// # Arguments
/// * `record` - Record type name, for error context
/// * `fields` - Field definitions in offset order
///
/// # Returns
/// `Result<(), FieldError>` indicating success or validation failure.
pub(crate) fn validate_field_layout(record: &str, fields: &[Field]) -> Result<(), FieldError> {
    let mut ranges = Vec::with_capacity(fields.len());
    for field in fields {
        let (Some(start), Some(end)) = (field.offset(), field.end_offset()) else {
            return Err(invalid(
                record,
                format!("field '{}' has no offset", field.name()),
            ));
        };
        ranges.push((start, end));
    }
    ranges.sort_by_key(|&(start, _)| start);

    let mut expected = 0;
    for &(start, end) in &ranges {
        if start < expected {
            return Err(invalid(record, "overlapping field ranges detected".to_string()));
        }
        if start > expected {
            return Err(invalid(
                record,
                format!("gap in field ranges at offset {}", expected),
            ));
        }
        expected = end;
    }
    Ok(())
}
