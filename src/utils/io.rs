//! File I/O primitives with consistent error handling.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Read file contents as UTF-8 text.
///
/// Wraps `fs::read_to_string` with consistent `Error::internal_io` formatting.
/// Invalid UTF-8 surfaces as an IO error of kind `InvalidData`.
pub fn read_file(path: &Path, operation: &str) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// Overwrite a file in place.
///
/// The file is truncated and rewritten; its inode and permissions are kept.
pub fn write_file(path: &Path, content: &str, operation: &str) -> Result<()> {
    fs::write(path, content)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// Read a file only if it decodes as UTF-8 text; any failure yields `None`.
pub fn read_text_lossless(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn read_file_succeeds_for_existing_file() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "test content").unwrap();

        let content = read_file(temp.path(), "test read").unwrap();
        assert!(content.contains("test content"));
    }

    #[test]
    fn read_file_returns_error_for_missing_file() {
        let result = read_file(Path::new("/nonexistent/path.txt"), "test read");
        let err = result.unwrap_err();
        assert_eq!(err.code.as_str(), "internal.io_error");
    }

    #[test]
    fn write_file_overwrites_content() {
        let mut temp = NamedTempFile::new().unwrap();
        write!(temp, "old content that is longer").unwrap();

        write_file(temp.path(), "new", "test write").unwrap();
        assert_eq!(fs::read_to_string(temp.path()).unwrap(), "new");
    }

    #[test]
    fn read_text_lossless_rejects_binary() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(&[0xff, 0xfe, 0x00, 0x80]).unwrap();

        assert!(read_text_lossless(temp.path()).is_none());
    }
}
