//! Fixed-width timezone codes.

use std::collections::BTreeMap;

use chrono::{FixedOffset, Offset, Utc};

/// A named UTC offset.
///
/// `abbreviation` is the text spliced into a datetime slot when the value is
/// dumped, so its length must match the pattern's `ZZZ` region.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimeZone {
    abbreviation: String,
    offset: FixedOffset,
}

impl TimeZone {
    pub fn new(abbreviation: impl Into<String>, offset: FixedOffset) -> Self {
        Self {
            abbreviation: abbreviation.into(),
            offset,
        }
    }

    /// Coordinated Universal Time.
    pub fn utc() -> Self {
        Self::new("UTC", Utc.fix())
    }

    /// Abbreviation written into the timezone region.
    pub fn abbreviation(&self) -> &str {
        &self.abbreviation
    }

    /// Offset from UTC.
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }
}

/// Code → zone table consulted when loading a pattern with a `ZZZ` region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneTable {
    zones: BTreeMap<String, TimeZone>,
}

impl ZoneTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) const fn empty() -> Self {
        Self {
            zones: BTreeMap::new(),
        }
    }

    /// Adds a zone under its own abbreviation.
    pub fn with(mut self, zone: TimeZone) -> Self {
        self.insert(zone.abbreviation().to_string(), zone);
        self
    }

    /// Adds a zone under an explicit code.
    pub fn insert(&mut self, code: impl Into<String>, zone: TimeZone) {
        self.zones.insert(code.into(), zone);
    }

    pub fn get(&self, code: &str) -> Option<&TimeZone> {
        self.zones.get(code)
    }

    /// Known codes, sorted.
    pub fn codes(&self) -> Vec<String> {
        self.zones.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}
