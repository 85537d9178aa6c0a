//! Bounded input reading.
//!
//! Every input is size-checked before it reaches the extractors, so the
//! amount of parsing work is capped by `--max-bytes`.

use std::io::Read;
use std::path::Path;

use crate::prelude::*;

/// 16 MiB, the largest accepted upload.
pub const DEFAULT_MAX_BYTES: u64 = 16 * 1024 * 1024;

/// What a file on disk is expected to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// A PDF document, read page by page.
    Pdf,
    /// Plain text, pages separated by form feeds.
    Text,
}

impl SourceKind {
    /// Pick the source kind from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> std::result::Result<Self, Error> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase());

        match extension.as_deref() {
            Some("pdf") => Ok(SourceKind::Pdf),
            Some("txt") => Ok(SourceKind::Text),
            _ => Err(Error::UnsupportedFile(path.display().to_string())),
        }
    }
}

pub fn check_size(size: u64, limit: u64) -> std::result::Result<(), Error> {
    if size > limit {
        return Err(Error::InputTooLarge { size, limit });
    }
    Ok(())
}

/// Read a whole file, refusing anything larger than `limit` bytes.
pub fn read_bounded(path: &Path, limit: u64) -> Result<Vec<u8>> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Failed to read file '{}'", path.display()))?;
    check_size(metadata.len(), limit)?;

    std::fs::read(path).with_context(|| format!("Failed to read file '{}'", path.display()))
}

/// Read UTF-8 text from `source`, where `-` means stdin.
pub fn read_text(source: &str, limit: u64) -> Result<String> {
    let bytes = if source == "-" {
        let mut buffer = Vec::new();
        std::io::stdin()
            .lock()
            .take(limit.saturating_add(1))
            .read_to_end(&mut buffer)
            .context("Failed to read stdin")?;
        check_size(buffer.len() as u64, limit)?;
        buffer
    } else {
        read_bounded(Path::new(source), limit)?
    };

    String::from_utf8(bytes).map_err(|e| eyre!("Input is not valid UTF-8: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_source_kind_from_extension() {
        assert_eq!(
            SourceKind::from_path(Path::new("form.pdf")).unwrap(),
            SourceKind::Pdf
        );
        assert_eq!(
            SourceKind::from_path(Path::new("FORM.PDF")).unwrap(),
            SourceKind::Pdf
        );
        assert_eq!(
            SourceKind::from_path(Path::new("dump.txt")).unwrap(),
            SourceKind::Text
        );
    }

    #[test]
    fn test_source_kind_rejects_other_files() {
        let err = SourceKind::from_path(Path::new("notes.docx")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFile(_)));
        assert!(SourceKind::from_path(Path::new("no_extension")).is_err());
    }

    #[test]
    fn test_check_size() {
        assert!(check_size(10, 10).is_ok());
        let err = check_size(11, 10).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Input too large: 11 bytes exceeds the 10 byte limit"
        );
    }

    #[test]
    fn test_read_bounded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"Pick a color?\n(a) Red").unwrap();

        let bytes = read_bounded(file.path(), 1024).unwrap();
        assert_eq!(bytes, b"Pick a color?\n(a) Red");

        let err = read_bounded(file.path(), 4).unwrap_err();
        assert!(err.to_string().contains("Input too large"));
    }

    #[test]
    fn test_read_text_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all("Survey\n  Basics\n".as_bytes()).unwrap();

        let path = file.path().to_str().unwrap();
        assert_eq!(read_text(path, 1024).unwrap(), "Survey\n  Basics\n");
    }

    #[test]
    fn test_read_text_rejects_invalid_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0x00]).unwrap();

        let path = file.path().to_str().unwrap();
        assert!(read_text(path, 1024).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = read_bounded(Path::new("/definitely/not/here.pdf"), 1024).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
