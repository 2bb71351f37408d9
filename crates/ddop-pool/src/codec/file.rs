//! Pool file I/O.
//!
//! Object pools travel as `.iop` files: the raw binary table and nothing
//! else — no header, no trailer, no compression.

use std::fs;
use std::io;
use std::path::Path;

/// Returns true when the path carries an `.iop` extension, matched
/// case-insensitively.
pub fn has_iop_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("iop"))
}

/// Reads a pool file into memory.
pub fn read_iop_file(path: &Path) -> io::Result<Vec<u8>> {
    fs::read(path)
}

/// Writes encoded pool bytes to a file.
///
/// Propagates the write result untouched so callers can report "saved" only
/// after it succeeded.
pub fn write_iop_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    fs::write(path, bytes)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_extension_check_is_case_insensitive() {
        assert!(has_iop_extension(&PathBuf::from("pool.iop")));
        assert!(has_iop_extension(&PathBuf::from("pool.IOP")));
        assert!(has_iop_extension(&PathBuf::from("pool.Iop")));
        assert!(!has_iop_extension(&PathBuf::from("pool.txt")));
        assert!(!has_iop_extension(&PathBuf::from("pool")));
    }

    #[test]
    fn test_write_then_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pool.iop");
        let bytes = vec![1u8, 2, 3, 4];
        write_iop_file(&path, &bytes).unwrap();
        assert_eq!(read_iop_file(&path).unwrap(), bytes);
    }

    #[test]
    fn test_read_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_iop_file(&dir.path().join("absent.iop")).is_err());
    }
}
