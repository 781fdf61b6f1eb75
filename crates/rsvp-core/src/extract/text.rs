use crate::error::ExtractError;
use std::fs;
use std::path::Path;
use tracing::info;

const BOM: char = '\u{feff}';

/// Read a plain text file as strict UTF-8. Invalid byte sequences are rejected
/// rather than replaced.
pub(super) fn read_text(path: &Path) -> Result<String, ExtractError> {
    info!(path = %path.display(), "Loading plain text content");
    let bytes = fs::read(path).map_err(|err| ExtractError::failed(path, err))?;
    let text = String::from_utf8(bytes).map_err(|err| ExtractError::EncodingError {
        path: path.to_path_buf(),
        reason: err.utf8_error().to_string(),
    })?;
    Ok(match text.strip_prefix(BOM) {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn rejects_invalid_utf8() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("latin1.txt");
        fs::write(&path, [b'c', b'a', b'f', 0xe9, b' ', b'x']).expect("write");

        let err = read_text(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EncodingError);
    }

    #[test]
    fn strips_byte_order_mark() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bom.txt");
        fs::write(&path, "\u{feff}First words").expect("write");

        assert_eq!(read_text(&path).expect("read"), "First words");
    }
}
