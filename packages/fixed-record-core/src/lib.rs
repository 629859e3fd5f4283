//! Schema-driven codec for fixed-width positional text records.
//!
//! Provides typed field descriptors, record layouts with contiguous offsets,
//! whole-record pack/unpack, and position-preserving stream probes.

pub mod config;
pub mod error;
pub mod field;
pub mod record;
pub mod types;
pub mod value;

mod stream;

pub use config::CodecConfig;
pub use error::{FieldError, Result};
pub use field::{Alignment, Enumeration, Field};
pub use record::{LayoutDescription, Record, RecordType, RecordTypeBuilder, SlotDescription};
pub use types::{Alphanumeric, Date, Datetime, FieldKind, Numeric, Time, TimeZone, ZoneTable};
pub use value::{Value, Zoned};
