//! Manifest loading into padded buffers.
//!
//! Both loaders hand back a [`PaddedBytes`] region with the full trailing
//! margin in place, so the bytes can go straight to the parser with no
//! further copying. [`read_chunked`] streams the file in fixed-size blocks
//! without asking for its length up front; [`read_two_pass`] measures the
//! file first and reads it in one call. They are functionally equivalent,
//! and the benchmark harness races them against each other.
//!
//! The file handle is closed on every exit path by `File`'s drop.

use std::{
    fs::File,
    io::{self, Read, Seek, SeekFrom},
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::buffer::{PADDING, PaddedBytes};

// Node.js streams package files in 32 KiB blocks; the chunked loader mirrors
// that I/O pattern.
const BLOCK_SIZE: usize = 32 << 10;

/// Errors produced while loading a manifest into a padded buffer.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened.
    #[error("could not open {}: {source}", .path.display())]
    Open {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// An I/O error surfaced mid-read.
    #[error("could not read {}: {source}", .path.display())]
    Read {
        /// Path being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The file held zero bytes.
    #[error("{} is empty", .path.display())]
    Empty {
        /// Path of the empty file.
        path: PathBuf,
    },
    /// Fewer bytes arrived than the measured file length.
    #[error(
        "{} truncated while reading: expected {expected} bytes, got {actual}",
        .path.display()
    )]
    ShortRead {
        /// Path being read.
        path: PathBuf,
        /// Length reported by the initial seek.
        expected: usize,
        /// Bytes actually obtained.
        actual: usize,
    },
}

/// Read `path` incrementally in 32 KiB blocks.
///
/// The buffer is grown by a block plus the trailing margin before every
/// read, so the destination is always valid and the finished region needs no
/// copy. A zero-byte read ends the loop; the region is then trimmed to
/// content plus [`PADDING`].
///
/// # Errors
///
/// [`LoadError::Open`] if the file cannot be opened, [`LoadError::Read`] if
/// a read fails, and [`LoadError::Empty`] if the file held zero bytes.
pub fn read_chunked(path: impl AsRef<Path>) -> Result<PaddedBytes, LoadError> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_owned(),
        source,
    })?;

    let mut bytes = Vec::new();
    let mut content_len = 0;
    loop {
        bytes.resize(content_len + BLOCK_SIZE + PADDING, 0);
        match file.read(&mut bytes[content_len..content_len + BLOCK_SIZE]) {
            Ok(0) => break,
            Ok(n) => content_len += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(source) => {
                return Err(LoadError::Read {
                    path: path.to_owned(),
                    source,
                });
            }
        }
    }

    if content_len == 0 {
        return Err(LoadError::Empty {
            path: path.to_owned(),
        });
    }
    bytes.truncate(content_len + PADDING);
    Ok(PaddedBytes::from_parts(bytes, content_len))
}

/// Read `path` in one call after measuring its length with a seek.
///
/// Seeks to the end to learn the length, allocates content plus [`PADDING`]
/// once, rewinds, and reads the content in full.
///
/// # Errors
///
/// [`LoadError::Open`] if the file cannot be opened, [`LoadError::Empty`] if
/// it measures zero bytes, [`LoadError::Read`] if a seek or read fails, and
/// [`LoadError::ShortRead`] if the file yields fewer bytes than measured.
pub fn read_two_pass(path: impl AsRef<Path>) -> Result<PaddedBytes, LoadError> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_owned(),
        source,
    })?;

    let read_error = |source| LoadError::Read {
        path: path.to_owned(),
        source,
    };

    let len = file.seek(SeekFrom::End(0)).map_err(read_error)?;
    if len == 0 {
        return Err(LoadError::Empty {
            path: path.to_owned(),
        });
    }
    let expected = usize::try_from(len)
        .map_err(|_| read_error(io::Error::other("file does not fit in memory")))?;

    let mut bytes = vec![0u8; expected + PADDING];
    file.rewind().map_err(read_error)?;

    let mut filled = 0;
    while filled < expected {
        match file.read(&mut bytes[filled..expected]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(source) => return Err(read_error(source)),
        }
    }

    if filled < expected {
        return Err(LoadError::ShortRead {
            path: path.to_owned(),
            expected,
            actual: filled,
        });
    }
    Ok(PaddedBytes::from_parts(bytes, expected))
}
