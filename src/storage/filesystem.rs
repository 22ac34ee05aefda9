//! File system primitives
//!
//! Thin wrappers over `std::fs` used by the storage operations.

use std::fs::{self, DirBuilder, File, OpenOptions};
use std::io::{self, Read};
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt};

/// Size of the chunk buffer used by [`read_all`].
pub const READ_CHUNK_SIZE: usize = 10_000;

#[cfg(unix)]
const ENTRY_MODE: u32 = 0o740;

/// Create a single directory; the parent must already exist.
pub fn create_directory(path: &Path) -> io::Result<()> {
    let mut builder = DirBuilder::new();
    #[cfg(unix)]
    builder.mode(ENTRY_MODE);
    builder.create(path)
}

/// Remove a directory with everything under it.
pub fn remove_directory(path: &Path) -> io::Result<()> {
    fs::remove_dir_all(path)
}

/// Remove a single file.
pub fn remove_file(path: &Path) -> io::Result<()> {
    fs::remove_file(path)
}

/// Open a file for writing, creating it or truncating what was there.
pub fn open_for_replace(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.read(true).write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(ENTRY_MODE);
    options.open(path)
}

/// Reads `source` to the end in `READ_CHUNK_SIZE` chunks.
///
/// Short reads keep the loop going; only `Ok(0)` ends it. Any error aborts
/// the read, including `Interrupted`.
pub fn read_all<R: Read>(source: &mut R) -> io::Result<Vec<u8>> {
    let mut data = Vec::with_capacity(READ_CHUNK_SIZE);
    let mut buffer = [0u8; READ_CHUNK_SIZE];

    loop {
        let n = source.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buffer[..n]);
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Yields its payload one byte per read.
    struct Trickle {
        payload: Vec<u8>,
        pos: usize,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.pos >= self.payload.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.payload[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    /// Returns a few bytes, then fails.
    struct Broken {
        served: bool,
    }

    impl Read for Broken {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.served {
                return Err(io::Error::new(io::ErrorKind::Other, "disk on fire"));
            }
            self.served = true;
            buf[..3].copy_from_slice(b"abc");
            Ok(3)
        }
    }

    #[test]
    fn test_remove_file_leaves_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("a.txt");
        std::fs::write(&file, b"x").unwrap();

        remove_file(&file).unwrap();
        assert!(!file.exists());
        assert_eq!(
            remove_file(&file).unwrap_err().kind(),
            io::ErrorKind::NotFound
        );
        assert!(remove_file(tmp.path()).is_err());
        assert!(tmp.path().is_dir());
    }

    #[test]
    fn test_read_all_single_byte_chunks() {
        let payload: Vec<u8> = (0..=255u8).cycle().take(25_003).collect();
        let mut source = Trickle {
            payload: payload.clone(),
            pos: 0,
        };
        assert_eq!(read_all(&mut source).unwrap(), payload);
    }

    #[test]
    fn test_read_all_across_chunk_boundary() {
        let payload = vec![7u8; READ_CHUNK_SIZE * 2 + 1];
        let mut source = io::Cursor::new(payload.clone());
        assert_eq!(read_all(&mut source).unwrap(), payload);
    }

    #[test]
    fn test_read_all_empty_source() {
        let mut source = io::empty();
        assert!(read_all(&mut source).unwrap().is_empty());
    }

    #[test]
    fn test_read_all_aborts_on_error() {
        let mut source = Broken { served: false };
        let err = read_all(&mut source).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
    }
}
