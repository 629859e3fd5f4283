//! Integration test suite.
//!
//! Exercises the public API end to end:
//! 1. Record codec round trips and schema rules
//! 2. Datetime-family patterns and timezone splicing
//! 3. Stream probes over in-memory and on-disk streams

pub mod codec_tests;
pub mod datetime_tests;
pub mod helpers;
pub mod probe_tests;
