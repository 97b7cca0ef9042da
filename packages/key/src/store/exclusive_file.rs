//! Exclusive file writer
//!
//! Artifacts are only ever written to brand-new files. Permission bits are
//! applied by the `open` call that creates the file, so a private key is never
//! readable by other users, not even briefly.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use jwkgen_common::LoggingTransformer;

use super::naming::{Artifact, Visibility};
use crate::{KeyError, Result};

/// Write `artifact` into `directory`, returning the created path
///
/// # Errors
///
/// See [`write_new_file`].
pub fn write_artifact(directory: &Path, artifact: &Artifact) -> Result<PathBuf> {
    let path = directory.join(&artifact.file_name);
    write_new_file(&path, &artifact.bytes, artifact.visibility)?;
    Ok(path)
}

/// Create `path` and write `data` to it
///
/// # Errors
///
/// - [`KeyError::FileAlreadyExists`] if `path` exists; nothing is written
/// - [`KeyError::ShortWrite`] if fewer than `data.len()` bytes were accepted
/// - [`KeyError::Io`] for any other open, write or sync failure, including
///   deferred write-back failures reported when the data is synced to storage
///
/// The file is synced before it is closed, so write-back errors the kernel
/// would otherwise report at `close(2)` surface here. An error returned by
/// `close(2)` itself after a successful sync is not observable: the standard
/// library discards it when the `File` is dropped.
pub fn write_new_file(path: &Path, data: &[u8], visibility: Visibility) -> Result<()> {
    let result = write_exclusive(path, data, visibility);
    match &result {
        Ok(()) => LoggingTransformer::log_artifact_written(path, visibility.mode()),
        Err(e) => LoggingTransformer::log_artifact_failed(path, e),
    }
    result
}

fn write_exclusive(path: &Path, data: &[u8], visibility: Visibility) -> Result<()> {
    let mut file = open_new(path, visibility).map_err(|e| match e.kind() {
        io::ErrorKind::AlreadyExists => KeyError::FileAlreadyExists {
            path: path.to_path_buf(),
        },
        _ => KeyError::Io(e),
    })?;

    write_complete(&mut file, path, data)?;

    // Errors the kernel defers to close surface here; the descriptor itself is
    // released when `file` drops on every path.
    file.sync_all()?;
    Ok(())
}

#[cfg(unix)]
fn open_new(path: &Path, visibility: Visibility) -> io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;

    OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(visibility.mode())
        .open(path)
}

#[cfg(not(unix))]
fn open_new(path: &Path, _visibility: Visibility) -> io::Result<File> {
    OpenOptions::new().write(true).create_new(true).open(path)
}

/// Write all of `data` to `sink`, treating a partial write as a failure
fn write_complete<W: Write>(sink: &mut W, path: &Path, data: &[u8]) -> Result<()> {
    let written = write_payload(sink, data)?;
    if written < data.len() {
        return Err(KeyError::ShortWrite {
            path: path.to_path_buf(),
            written,
            expected: data.len(),
        });
    }
    Ok(())
}

/// Write as much of `data` as the sink accepts, returning the byte count
///
/// Stops at the first zero-length write instead of failing, so the caller can
/// report the short write with its byte counts.
fn write_payload<W: Write>(sink: &mut W, data: &[u8]) -> io::Result<usize> {
    let mut written = 0;
    while written < data.len() {
        match sink.write(&data[written..]) {
            Ok(0) => break,
            Ok(n) => written += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sink that accepts a fixed number of bytes, then reports zero-length writes
    struct TruncatingSink {
        capacity: usize,
        received: Vec<u8>,
    }

    impl Write for TruncatingSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let n = buf.len().min(self.capacity - self.received.len()).min(3);
            self.received.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Sink that fails once with `Interrupted` before accepting data
    struct InterruptedOnce {
        interrupted: bool,
        received: Vec<u8>,
    }

    impl Write for InterruptedOnce {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
            self.received.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_partial_sink_reports_bytes_accepted() {
        let mut sink = TruncatingSink {
            capacity: 10,
            received: Vec::new(),
        };
        let written = write_payload(&mut sink, b"0123456789abcdef").unwrap();
        assert_eq!(written, 10);
        assert_eq!(sink.received, b"0123456789");
    }

    #[test]
    fn test_small_writes_are_accumulated() {
        let mut sink = TruncatingSink {
            capacity: 64,
            received: Vec::new(),
        };
        let written = write_payload(&mut sink, b"{\"kty\":\"EC\"}").unwrap();
        assert_eq!(written, 12);
        assert_eq!(sink.received, b"{\"kty\":\"EC\"}");
    }

    #[test]
    fn test_partial_write_is_short_write_error() {
        let mut sink = TruncatingSink {
            capacity: 4,
            received: Vec::new(),
        };
        let path = Path::new("jwk_sig_ES256_k.json");
        match write_complete(&mut sink, path, b"{\"kty\":\"EC\"}") {
            Err(KeyError::ShortWrite {
                path: reported,
                written,
                expected,
            }) => {
                assert_eq!(reported, path);
                assert_eq!(written, 4);
                assert_eq!(expected, 12);
            }
            other => panic!("expected ShortWrite, got {other:?}"),
        }
    }

    #[test]
    fn test_complete_write_succeeds() {
        let mut sink = TruncatingSink {
            capacity: 64,
            received: Vec::new(),
        };
        write_complete(&mut sink, Path::new("out.pem"), b"payload").unwrap();
        assert_eq!(sink.received, b"payload");
    }

    #[test]
    fn test_interrupted_write_is_retried() {
        let mut sink = InterruptedOnce {
            interrupted: false,
            received: Vec::new(),
        };
        let written = write_payload(&mut sink, b"payload").unwrap();
        assert_eq!(written, 7);
        assert_eq!(sink.received, b"payload");
    }
}
