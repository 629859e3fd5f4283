//! Position-preserving probes over in-memory and on-disk streams.

use std::fs::File;
use std::io::{Cursor, Seek, SeekFrom, Write};

use anyhow::Result;
use tempfile::tempfile;

use fixed_record_core::{Record, Value};

use super::helpers::header;

fn header_bytes(batch: i64) -> Result<Vec<u8>> {
    let record = Record::new(
        &header(),
        [
            ("sender", Value::from("BANKCO")),
            ("batch", Value::from(batch)),
            ("created", Value::from("20240101000000UTC")),
        ],
    )?;
    Ok(record.dump_bytes()?)
}

#[test]
fn test_probe_file_of_records() -> Result<()> {
    let record_type = header();
    let mut file: File = tempfile()?;
    for batch in 1..=3 {
        file.write_all(&header_bytes(batch)?)?;
    }

    let width = record_type.length() as u64;
    for batch in 1..=3 {
        let start = (batch as u64 - 1) * width;
        file.seek(SeekFrom::Start(start))?;
        let record = Record::probe(&record_type, &mut file)?;
        assert_eq!(
            record.map(|r| r.get("batch")).transpose()?,
            Some(Value::from(batch))
        );
        assert_eq!(file.stream_position()?, start);
    }
    Ok(())
}

#[test]
fn test_probe_at_end_of_input() -> Result<()> {
    let record_type = header();
    let mut cursor = Cursor::new(header_bytes(1)?);
    cursor.seek(SeekFrom::End(0))?;
    let end = cursor.position();

    assert!(Record::probe(&record_type, &mut cursor)?.is_none());
    assert_eq!(cursor.position(), end);

    let field = record_type.field("batch")?;
    assert_eq!(field.probe(&mut cursor)?, None);
    assert_eq!(cursor.position(), end);
    Ok(())
}

#[test]
fn test_probe_malformed_bytes() -> Result<()> {
    let record_type = header();
    let mut bytes = header_bytes(1)?;
    bytes[13..19].copy_from_slice(b"12x456");
    let mut cursor = Cursor::new(bytes);
    cursor.set_position(0);

    assert!(Record::probe(&record_type, &mut cursor)?.is_none());
    assert_eq!(cursor.position(), 0);

    let sender = record_type.field("sender")?;
    assert_eq!(sender.probe(&mut cursor)?, Some(Value::from("BANKCO")));
    assert_eq!(cursor.position(), 0);

    let batch = record_type.field("batch")?;
    assert_eq!(batch.probe(&mut cursor)?, None);
    assert_eq!(cursor.position(), 0);
    Ok(())
}

#[test]
fn test_probe_non_ascii_bytes() -> Result<()> {
    let record_type = header();
    let mut bytes = header_bytes(1)?;
    bytes[3] = 0xE9;
    let mut cursor = Cursor::new(bytes);
    assert!(Record::probe(&record_type, &mut cursor)?.is_none());
    assert_eq!(cursor.position(), 0);
    Ok(())
}
