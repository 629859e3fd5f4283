//! Position-preserving reads for `probe`.

use std::io::{ErrorKind, Read, Seek, SeekFrom};

use crate::error::FieldError;

/// Converts an I/O error into a [`FieldError::Io`] with context.
pub(crate) fn classify_io_error(error: std::io::Error, context: &str) -> FieldError {
    match error.kind() {
        ErrorKind::UnexpectedEof => {
            FieldError::Io(format!("{}: unexpected end of stream", context))
        }
        ErrorKind::Unsupported => FieldError::Io(format!("{}: stream is not seekable", context)),
        _ => FieldError::Io(format!("{}: {}", context, error)),
    }
}

/// Runs `read` against `stream`, then seeks back to where the stream was.
///
/// The position is restored whatever `read` returns. Only failures to query
/// or restore the position are reported as errors.
pub(crate) fn with_restored_position<S, T, F>(stream: &mut S, read: F) -> Result<T, FieldError>
where
    S: Seek,
    F: FnOnce(&mut S) -> T,
{
    let restore = stream
        .stream_position()
        .map_err(|e| classify_io_error(e, "querying stream position"))?;
    let outcome = read(stream);
    stream
        .seek(SeekFrom::Start(restore))
        .map_err(|e| classify_io_error(e, "restoring stream position"))?;
    Ok(outcome)
}

/// Reads up to `length` bytes starting `skip` bytes past the current position.
///
/// A short read near end-of-stream returns fewer bytes, not an error.
pub(crate) fn read_window<S>(
    stream: &mut S,
    skip: usize,
    length: usize,
) -> Result<Vec<u8>, FieldError>
where
    S: Read + Seek,
{
    if skip > 0 {
        let skip = i64::try_from(skip)
            .map_err(|_| FieldError::Io(format!("offset {} exceeds stream range", skip)))?;
        stream
            .seek(SeekFrom::Current(skip))
            .map_err(|e| classify_io_error(e, "seeking to field offset"))?;
    }
    let mut buf = Vec::with_capacity(length);
    stream
        .by_ref()
        .take(length as u64)
        .read_to_end(&mut buf)
        .map_err(|e| classify_io_error(e, "reading slot"))?;
    Ok(buf)
}

/// Decodes a single-byte (Latin-1) buffer, one char per byte.
pub(crate) fn decode_single_byte(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}
