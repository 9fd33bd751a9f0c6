//! Version-1 binary layout of the database file.
//!
//! All integers are little-endian:
//!
//! ```text
//! u32 magic = 0x5A4F494E ("ZOIN")
//! u32 version = 1
//! u32 entry_count
//! entry_count times:
//!     u32 path_len
//!     [u8; path_len] path (UTF-8, no terminator)
//!     u32 visit_count
//!     i64 last_visited
//!     i64 first_visited
//! ```
//!
//! Loading is all-or-nothing: any short read fails the whole decode. Saving
//! goes through a sibling `<path>.tmp` file that is renamed over the target,
//! so the target only ever holds a complete old or new image.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use super::error::{DatabaseError, Result};
use crate::models::DirectoryEntry;

pub const MAGIC: u32 = 0x5A4F_494E;
pub const FORMAT_VERSION: u32 = 1;

/// Bytes taken by magic, version and entry count
pub const HEADER_LEN: usize = 12;
/// Fixed bytes per entry besides the path itself
pub const ENTRY_FIXED_LEN: usize = 4 + 4 + 8 + 8;

/// Serialize `entries` in the version-1 layout
pub fn encode_entries<'a, W, I>(writer: &mut W, entries: I) -> Result<()>
where
    W: Write,
    I: ExactSizeIterator<Item = &'a DirectoryEntry>,
{
    let count = u32::try_from(entries.len()).map_err(|_| DatabaseError::TooLarge { what: "entry count" })?;

    writer.write_u32::<LittleEndian>(MAGIC)?;
    writer.write_u32::<LittleEndian>(FORMAT_VERSION)?;
    writer.write_u32::<LittleEndian>(count)?;

    for entry in entries {
        encode_entry(writer, entry)?;
    }

    Ok(())
}

fn encode_entry<W: Write>(writer: &mut W, entry: &DirectoryEntry) -> Result<()> {
    let path = entry.path.as_bytes();
    let path_len = u32::try_from(path.len()).map_err(|_| DatabaseError::TooLarge { what: "path length" })?;

    writer.write_u32::<LittleEndian>(path_len)?;
    writer.write_all(path)?;
    writer.write_u32::<LittleEndian>(entry.visit_count)?;
    writer.write_i64::<LittleEndian>(entry.last_visited)?;
    writer.write_i64::<LittleEndian>(entry.first_visited)?;
    Ok(())
}

/// Deserialize a version-1 image
pub fn decode_entries<R: Read>(reader: &mut R) -> Result<Vec<DirectoryEntry>> {
    let magic = reader.read_u32::<LittleEndian>()?;
    if magic != MAGIC {
        return Err(DatabaseError::InvalidMagic { found: magic });
    }

    let version = reader.read_u32::<LittleEndian>()?;
    if version != FORMAT_VERSION {
        return Err(DatabaseError::UnsupportedVersion { found: version });
    }

    let count = reader.read_u32::<LittleEndian>()?;

    // The count comes from disk; don't trust it for a large up-front allocation
    let mut entries = Vec::with_capacity(count.min(4096) as usize);
    for index in 0..count {
        entries.push(decode_entry(reader, index)?);
    }

    Ok(entries)
}

fn decode_entry<R: Read>(reader: &mut R, index: u32) -> Result<DirectoryEntry> {
    let path_len = reader.read_u32::<LittleEndian>()?;

    let mut path_bytes = Vec::new();
    (&mut *reader).take(u64::from(path_len)).read_to_end(&mut path_bytes)?;
    if path_bytes.len() != path_len as usize {
        return Err(io::Error::new(ErrorKind::UnexpectedEof, "truncated entry path").into());
    }
    let path = String::from_utf8(path_bytes).map_err(|_| DatabaseError::InvalidPath { index })?;

    let visit_count = reader.read_u32::<LittleEndian>()?;
    let last_visited = reader.read_i64::<LittleEndian>()?;
    let first_visited = reader.read_i64::<LittleEndian>()?;

    Ok(DirectoryEntry { path, visit_count, last_visited, first_visited })
}

/// Sibling temp path used while saving `path`
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Read the database file at `path`. A missing file is an empty database.
pub fn read_file(path: &Path) -> Result<Vec<DirectoryEntry>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    decode_entries(&mut BufReader::new(file))
}

/// Atomically replace the database file at `path` with `entries`.
///
/// Returns the number of bytes written. On failure the temp file is removed
/// and the existing file is left as it was.
pub fn write_file<'a, I>(path: &Path, entries: I) -> Result<u64>
where
    I: ExactSizeIterator<Item = &'a DirectoryEntry>,
{
    let temp = temp_path(path);

    let result = write_temp(&temp, entries).and_then(|written| {
        fs::rename(&temp, path)?;
        Ok(written)
    });

    if result.is_err() {
        // Best effort; the temp file may never have been created
        let _ = fs::remove_file(&temp);
    }

    result
}

fn write_temp<'a, I>(temp: &Path, entries: I) -> Result<u64>
where
    I: ExactSizeIterator<Item = &'a DirectoryEntry>,
{
    let file = File::create(temp)?;
    let mut writer = BufWriter::new(CountingWriter::new(file));

    encode_entries(&mut writer, entries)?;

    let counting = writer.into_inner().map_err(|e| e.into_error())?;
    let written = counting.written;
    counting.inner.sync_all()?;
    Ok(written)
}

struct CountingWriter<W> {
    inner: W,
    written: u64,
}

impl<W> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn sample() -> DirectoryEntry {
        DirectoryEntry {
            path: "/ab".to_string(),
            visit_count: 3,
            last_visited: 0x0102_0304_0506_0708,
            first_visited: -1,
        }
    }

    fn encode(entries: &[DirectoryEntry]) -> Vec<u8> {
        let mut bytes = Vec::new();
        encode_entries(&mut bytes, entries.iter()).unwrap();
        bytes
    }

    #[test]
    fn test_empty_image_is_header_only() {
        let bytes = encode(&[]);
        assert_eq!(bytes, vec![0x4E, 0x49, 0x4F, 0x5A, 1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(bytes.len(), HEADER_LEN);
    }

    #[test]
    fn test_entry_layout_is_little_endian() {
        let bytes = encode(&[sample()]);
        let body = &bytes[HEADER_LEN..];

        let mut expected = Vec::new();
        expected.extend_from_slice(&[3, 0, 0, 0]);
        expected.extend_from_slice(b"/ab");
        expected.extend_from_slice(&[3, 0, 0, 0]);
        expected.extend_from_slice(&[0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]);
        expected.extend_from_slice(&[0xFF; 8]);

        assert_eq!(&bytes[8..12], &[1, 0, 0, 0]);
        assert_eq!(body, expected.as_slice());
        assert_eq!(body.len(), ENTRY_FIXED_LEN + 3);
    }

    #[test]
    fn test_decode_reads_back_entries() {
        let entries = vec![sample(), DirectoryEntry::new("/home/user/日本語", 42)];
        let decoded = decode_entries(&mut Cursor::new(encode(&entries))).unwrap();
        assert_eq!(decoded, entries);
    }

    #[test]
    fn test_decode_rejects_bad_magic() {
        let mut bytes = encode(&[sample()]);
        bytes[0] = b'X';
        let err = decode_entries(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidMagic { .. }));
        assert!(err.is_format_error());
    }

    #[test]
    fn test_decode_rejects_other_versions() {
        let mut bytes = encode(&[]);
        bytes[4] = 2;
        let err = decode_entries(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, DatabaseError::UnsupportedVersion { found: 2 }));
    }

    #[test]
    fn test_decode_fails_on_every_truncation() {
        let bytes = encode(&[sample(), sample()]);
        for len in 0..bytes.len() {
            let err = decode_entries(&mut Cursor::new(&bytes[..len])).unwrap_err();
            match err {
                DatabaseError::Io(e) => assert_eq!(e.kind(), ErrorKind::UnexpectedEof, "len {}", len),
                other => panic!("expected I/O error at len {}, got {:?}", len, other),
            }
        }
    }

    #[test]
    fn test_decode_does_not_trust_huge_path_length() {
        let mut bytes = encode(&[]);
        bytes[8] = 1; // one entry
        bytes.extend_from_slice(&u32::MAX.to_le_bytes());
        bytes.extend_from_slice(b"short");
        let err = decode_entries(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, DatabaseError::Io(_)));
    }

    #[test]
    fn test_decode_rejects_non_utf8_path() {
        let mut bytes = encode(&[sample()]);
        bytes[HEADER_LEN + 5] = 0xFF;
        let err = decode_entries(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidPath { index: 0 }));
    }

    #[test]
    fn test_temp_path_is_sibling() {
        assert_eq!(temp_path(Path::new("/data/zoink.db")), PathBuf::from("/data/zoink.db.tmp"));
    }

    #[test]
    fn test_write_file_reports_bytes_and_leaves_no_temp() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("zoink.db");
        let entries = vec![sample()];

        let written = write_file(&path, entries.iter()).unwrap();
        assert_eq!(written, (HEADER_LEN + ENTRY_FIXED_LEN + 3) as u64);
        assert!(!temp_path(&path).exists());
        assert_eq!(read_file(&path).unwrap(), entries);
    }

    #[test]
    fn test_read_missing_file_is_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(read_file(&dir.path().join("absent.db")).unwrap().is_empty());
    }
}
