//! Serializable layout descriptions.

use serde::{Deserialize, Serialize};

use crate::field::Alignment;

/// Layout of one record type, as written to JSON by
/// [`RecordType::describe_json`](super::RecordType::describe_json).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutDescription {
    /// Record type name
    pub record: String,
    /// Total width in characters
    pub length: usize,
    /// Slots in offset order
    pub fields: Vec<SlotDescription>,
}

/// One slot of a [`LayoutDescription`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotDescription {
    /// Field name
    pub name: String,
    /// Type name
    pub kind: String,
    /// Offset within the record
    pub offset: usize,
    /// Slot width
    pub length: usize,
    /// Pad character, if any
    pub pad: Option<char>,
    /// Padding rule
    pub alignment: Alignment,
    /// Required flag
    pub required: bool,
    /// Packed default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Packed constant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant: Option<String>,
    /// Symbolic datetime pattern
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Validation regex
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<String>,
}
