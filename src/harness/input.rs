//! Input file loading
//!
//! A `-f` file holds exactly one record. The record runs up to the first NUL
//! byte (or end of file); a single trailing line ending is dropped. Only
//! padding (more NULs or whitespace) may follow the terminator.

use std::fs;
use std::path::Path;

use crate::error::{HarnessError, HarnessResult};

/// Read the single input record from a file
pub fn load_record<P: AsRef<Path>>(path: P) -> HarnessResult<Vec<u8>> {
    let path = path.as_ref();

    let contents =
        fs::read(path).map_err(|e| HarnessError::bad_filename(path.display(), e))?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "read input file");

    parse_record(&contents)
}

/// Extract the record from raw file contents
pub fn parse_record(contents: &[u8]) -> HarnessResult<Vec<u8>> {
    if contents.is_empty() {
        return Err(HarnessError::File("empty file".to_string()));
    }

    let mut record = match contents.iter().position(|&b| b == 0) {
        Some(nul) => {
            let trailing = &contents[nul + 1..];
            if !trailing.iter().all(|&b| b == 0 || b.is_ascii_whitespace()) {
                return Err(HarnessError::File(format!(
                    "embedded NUL byte at offset {} before end of record",
                    nul
                )));
            }
            &contents[..nul]
        }
        None => contents,
    };

    if let Some(stripped) = record.strip_suffix(b"\n") {
        record = stripped.strip_suffix(b"\r").unwrap_or(stripped);
    }

    Ok(record.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_plain_record() {
        assert_eq!(parse_record(b"hello world").unwrap(), b"hello world");
    }

    #[test]
    fn test_trailing_newline_stripped() {
        assert_eq!(parse_record(b"hello\n").unwrap(), b"hello");
        assert_eq!(parse_record(b"hello\r\n").unwrap(), b"hello");
        assert_eq!(parse_record(b"line one\nline two\n").unwrap(), b"line one\nline two");
    }

    #[test]
    fn test_only_one_line_ending_stripped() {
        assert_eq!(parse_record(b"hello\n\n").unwrap(), b"hello\n");
    }

    #[test]
    fn test_nul_terminator() {
        assert_eq!(parse_record(b"hello\0").unwrap(), b"hello");
        assert_eq!(parse_record(b"hello\n\0\n").unwrap(), b"hello");
    }

    #[test]
    fn test_repeated_terminators_accepted() {
        assert_eq!(parse_record(b"abc\0\0").unwrap(), b"abc");
        assert_eq!(parse_record(b"abc\0\0\n\0").unwrap(), b"abc");
    }

    #[test]
    fn test_embedded_nul_rejected() {
        let result = parse_record(b"hel\0lo\0");
        assert!(matches!(result, Err(HarnessError::File(_))));
    }

    #[test]
    fn test_empty_contents_rejected() {
        let err = parse_record(b"").unwrap_err();
        assert_eq!(err.to_string(), "File error: empty file");
    }

    #[test]
    fn test_load_record_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"from a file\n").unwrap();

        let record = load_record(file.path()).unwrap();
        assert_eq!(record, b"from a file");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = load_record(dir.path().join("missing.txt")).unwrap_err();
        assert!(err.is_file());
        assert!(err.to_string().contains("bad filename"));
    }

    #[test]
    fn test_load_empty_file() {
        let file = NamedTempFile::new().unwrap();
        let err = load_record(file.path()).unwrap_err();
        assert!(err.to_string().contains("empty file"));
    }
}
