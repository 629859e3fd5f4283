/// Error type for type-level load and dump.
///
/// Carries no field context; [`crate::field::Field`] attaches the field name
/// when converting into [`crate::error::FieldError`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodecError {
    #[error("{0}")]
    Parse(String),

    #[error("must be {expected}, got {got}")]
    WrongKind {
        expected: &'static str,
        got: &'static str,
    },

    #[error("unsupported time-zone \"{code}\", expected one of {expected:?}")]
    UnsupportedTimeZone { code: String, expected: Vec<String> },

    #[error("time-zone \"{zone}\" length != {width}")]
    TimeZoneWidth { zone: String, width: usize },

    #[error("value has no time-zone for pattern \"{pattern}\"")]
    MissingTimeZone { pattern: String },

    #[error("pattern \"{0}\" produced an invalid format")]
    Format(String),
}
