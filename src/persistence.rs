// File: src/persistence.rs
use crate::errors::{DictError, Result};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16BE_BOM: &[u8] = &[0xFE, 0xFF];

/// Reads a whole text file into memory.
///
/// UTF-8 is the default; a UTF-8 BOM is dropped and a UTF-16 BOM switches to
/// UTF-16 decoding (the Android raw dictionary ships that way).
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| DictError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "read input");
    decode_text(&bytes).ok_or_else(|| DictError::Encoding { path: path.to_path_buf() })
}

fn decode_text(bytes: &[u8]) -> Option<String> {
    if let Some(rest) = bytes.strip_prefix(UTF16LE_BOM) {
        decode_utf16(rest, u16::from_le_bytes)
    } else if let Some(rest) = bytes.strip_prefix(UTF16BE_BOM) {
        decode_utf16(rest, u16::from_be_bytes)
    } else {
        let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        String::from_utf8(body.to_vec()).ok()
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Option<String> {
    if bytes.len() % 2 != 0 {
        return None;
    }
    let units: Vec<u16> = bytes.chunks_exact(2).map(|pair| unit([pair[0], pair[1]])).collect();
    String::from_utf16(&units).ok()
}

/// Writes `contents` to `path` in one go: the bytes land in a temporary file
/// next to the destination which is then renamed over it.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let write_err = |source: std::io::Error| DictError::Write {
        path: path.to_path_buf(),
        source,
    };

    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir).map_err(write_err)?;

    let temp_file = NamedTempFile::new_in(parent_dir).map_err(write_err)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        writer.write_all(contents).map_err(write_err)?;
        writer.flush().map_err(write_err)?;
    }

    temp_file.persist(path).map_err(|e| write_err(e.error))?;
    debug!(path = %path.display(), bytes = contents.len(), "wrote output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_plain_and_bom_prefixed_utf8() {
        assert_eq!(decode_text("甲\n".as_bytes()).as_deref(), Some("甲\n"));
        let mut with_bom = UTF8_BOM.to_vec();
        with_bom.extend_from_slice("乙".as_bytes());
        assert_eq!(decode_text(&with_bom).as_deref(), Some("乙"));
    }

    #[test]
    fn decodes_utf16_with_bom() {
        let text = "阿 1.5 0 a\n";
        let mut le = UTF16LE_BOM.to_vec();
        let mut be = UTF16BE_BOM.to_vec();
        for unit in text.encode_utf16() {
            le.extend_from_slice(&unit.to_le_bytes());
            be.extend_from_slice(&unit.to_be_bytes());
        }
        assert_eq!(decode_text(&le).as_deref(), Some(text));
        assert_eq!(decode_text(&be).as_deref(), Some(text));
    }

    #[test]
    fn rejects_invalid_text() {
        assert_eq!(decode_text(&[0xC3, 0x28]), None);
        assert_eq!(decode_text(&[0xFF, 0xFE, 0x41]), None);
    }

    #[test]
    fn write_atomic_creates_parents_and_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.txt");

        write_atomic(&path, b"first\n").unwrap();
        write_atomic(&path, b"second\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second\n");
    }

    #[test]
    fn missing_input_is_an_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_text(&dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, DictError::Open { .. }));
    }
}
