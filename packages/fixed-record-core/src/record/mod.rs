//! Record types, layouts and record instances.

mod layout;
#[allow(clippy::module_inception)]
mod record;
mod schema;
pub(crate) mod validation;

pub use layout::{RecordType, RecordTypeBuilder};
pub use record::Record;
pub use schema::{LayoutDescription, SlotDescription};
