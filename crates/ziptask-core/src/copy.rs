//! Buffered copy of archive entry data to disk.
//!
//! Read and write failures are reported differently: a failed read while
//! decompressing an entry means the archive is damaged, a failed write is
//! a plain I/O error on the destination.

use std::io;
use std::io::Read;
use std::io::Write;

use crate::Result;
use crate::TaskError;

/// Size of the reusable copy buffer (64KB).
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Heap buffer reused across every entry of one extraction.
#[derive(Debug)]
pub struct CopyBuffer {
    buf: Box<[u8]>,
}

impl CopyBuffer {
    /// Creates a new zeroed copy buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: vec![0u8; COPY_BUFFER_SIZE].into_boxed_slice(),
        }
    }
}

impl Default for CopyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies the data of archive entry `name` from `reader` into `writer`.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// Returns [`TaskError::CorruptArchive`] if the entry data cannot be
/// decoded (bad CRC, truncated stream) and [`TaskError::Io`] for any other
/// read failure or for a failed write.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use ziptask_core::copy::CopyBuffer;
/// use ziptask_core::copy::copy_entry;
///
/// let mut buffer = CopyBuffer::new();
/// let mut output = Vec::new();
/// let written = copy_entry("notes.txt", &mut Cursor::new(b"hello"), &mut output, &mut buffer)?;
/// assert_eq!(written, 5);
/// # Ok::<(), ziptask_core::TaskError>(())
/// ```
pub fn copy_entry<R: Read, W: Write>(
    name: &str,
    reader: &mut R,
    writer: &mut W,
    buffer: &mut CopyBuffer,
) -> Result<u64> {
    let mut total: u64 = 0;

    loop {
        let bytes_read = match reader.read(&mut buffer.buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(read_error(name, e)),
        };

        writer.write_all(&buffer.buf[..bytes_read])?;
        total += bytes_read as u64;
    }

    writer.flush()?;
    Ok(total)
}

fn read_error(name: &str, err: io::Error) -> TaskError {
    match err.kind() {
        io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof => {
            TaskError::CorruptArchive(format!("entry '{name}' cannot be decoded: {err}"))
        }
        _ => TaskError::Io(err),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Cursor;

    struct FailingReader(io::ErrorKind);

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(self.0, "reader failed"))
        }
    }

    #[test]
    fn test_copy_empty_entry() {
        let mut buffer = CopyBuffer::new();
        let mut output = Vec::new();

        let written = copy_entry("empty", &mut Cursor::new(Vec::new()), &mut output, &mut buffer)
            .unwrap();
        assert_eq!(written, 0);
        assert!(output.is_empty());
    }

    #[test]
    fn test_copy_spans_several_buffers() {
        let mut buffer = CopyBuffer::new();
        let data: Vec<u8> = (0..COPY_BUFFER_SIZE * 3 + 17).map(|i| (i % 251) as u8).collect();
        let mut output = Vec::new();

        let written = copy_entry("big.bin", &mut Cursor::new(&data), &mut output, &mut buffer)
            .unwrap();
        assert_eq!(written, data.len() as u64);
        assert_eq!(output, data);
    }

    #[test]
    fn test_invalid_data_is_corrupt_archive() {
        let mut buffer = CopyBuffer::new();
        let mut output = Vec::new();

        let err = copy_entry(
            "broken.txt",
            &mut FailingReader(io::ErrorKind::InvalidData),
            &mut output,
            &mut buffer,
        )
        .unwrap_err();

        assert!(matches!(err, TaskError::CorruptArchive(ref msg) if msg.contains("broken.txt")));
    }

    #[test]
    fn test_other_read_failure_is_io() {
        let mut buffer = CopyBuffer::new();
        let mut output = Vec::new();

        let err = copy_entry(
            "a.txt",
            &mut FailingReader(io::ErrorKind::PermissionDenied),
            &mut output,
            &mut buffer,
        )
        .unwrap_err();

        assert!(matches!(err, TaskError::Io(_)));
    }

    #[test]
    fn test_write_failure_is_io() {
        struct FullDisk;

        impl Write for FullDisk {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::other("no space left"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut buffer = CopyBuffer::new();
        let err = copy_entry("a.txt", &mut Cursor::new(b"data"), &mut FullDisk, &mut buffer)
            .unwrap_err();

        assert!(matches!(err, TaskError::Io(_)));
    }
}
