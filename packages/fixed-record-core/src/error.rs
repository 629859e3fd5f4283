//! Field and record error types.

use thiserror::Error;

/// Errors raised by field descriptors, record layouts and records.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    /// Input shorter than the slot being unpacked
    #[error("Field '{field}' needs {expected} characters, got {actual}")]
    InsufficientInput {
        field: String,
        expected: usize,
        actual: usize,
    },

    /// Unpacked text doesn't match the field's validation pattern
    #[error("Field '{field}': \"{value}\" does not match pattern \"{pattern}\"")]
    PatternMismatch {
        field: String,
        value: String,
        pattern: String,
    },

    /// Validation pattern failed to compile
    #[error("Invalid validation pattern \"{pattern}\": {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Text could not be parsed into the field's type
    #[error("Field '{field}' cannot load \"{value}\": {reason}")]
    Load {
        field: String,
        value: String,
        reason: String,
    },

    /// Value could not be rendered by the field's type
    #[error("Field '{field}' cannot dump {value}: {reason}")]
    Dump {
        field: String,
        value: String,
        reason: String,
    },

    /// Value assigned to a record failed every coercion attempt
    #[error("Invalid {record}.{field} value {value} - {reason}")]
    Validation {
        record: String,
        field: String,
        value: String,
        reason: String,
    },

    /// Value rejected by a field outside of any record
    #[error("Invalid {field} value {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// Assignment of a different value to a constant field
    #[error("Field '{field}' is constant ({constant}) and cannot be set to {value}")]
    ConstantConflict {
        field: String,
        constant: String,
        value: String,
    },

    /// Constant value requested from a non-constant field
    #[error("Field '{field}' is not constant and has no fixed value")]
    NotConstant { field: String },

    /// reserved() on a field type without a built-in default
    #[error("{kind} field '{field}' does not have a default and so cannot be reserved")]
    NoBuiltinDefault { field: String, kind: &'static str },

    /// Timezone code not present in the field's zone table
    #[error("Field '{field}': unsupported time-zone \"{code}\", expected one of {expected:?}")]
    UnsupportedTimeZone {
        field: String,
        code: String,
        expected: Vec<String>,
    },

    /// Zone abbreviation doesn't fit the carved timezone region
    #[error("Field '{field}': time-zone \"{zone}\" length != {width}")]
    TimeZoneWidth {
        field: String,
        zone: String,
        width: usize,
    },

    /// Encoded slot text doesn't fit the declared length
    #[error("Field '{field}' encodes {value} as {width} characters, slot length is {length}")]
    Width {
        field: String,
        value: String,
        width: usize,
        length: usize,
    },

    /// Encoded text is not single-byte ASCII
    #[error("Field '{field}' value \"{value}\" is not ASCII encodable")]
    Encoding { field: String, value: String },

    /// Required value absent from record storage
    #[error("{record}.{field} value is missing")]
    MissingValue { record: String, field: String },

    /// Record constructor given a name the record type doesn't declare
    #[error("{record} does not have field {field}")]
    UnknownField { record: String, field: String },

    /// Record type definition rejected at layout computation
    #[error("Invalid layout for record '{record}': {reason}")]
    InvalidSchema { record: String, reason: String },

    /// Layout description could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Stream position could not be queried or restored
    #[error("I/O error: {0}")]
    Io(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FieldError>;
