//! Codec configuration.

use crate::types::ZoneTable;

/// Printable ASCII plus whitespace; the default alphabet.
pub const PRINTABLE: &str = "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~ \t\n\r\x0b\x0c";

/// Defaults applied to the fields of a record type when its layout is
/// computed. Settings declared on a field always win.
#[derive(Debug, Clone)]
pub struct CodecConfig {
    /// Timezone codes accepted by datetime and time fields without their own table
    pub time_zones: ZoneTable,
    /// Characters accepted by alphanumeric fields without their own alphabet
    pub alphabet: String,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            time_zones: ZoneTable::new(),
            alphabet: PRINTABLE.to_string(),
        }
    }
}
