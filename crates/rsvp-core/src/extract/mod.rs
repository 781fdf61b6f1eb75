//! Document extraction.
//!
//! A source file is resolved to a [`DocumentFormat`] once, by extension, and
//! that format's strategy produces the flattened text. Tokenization and
//! chapter splitting operate on that text and are format-independent.

mod chapters;
mod epub;
mod pdf;
mod text;

pub use chapters::{ChapterMap, ChapterSplitter, HeadingRules};

use crate::error::ExtractError;
use crate::tokens::TokenSequence;
use once_cell::sync::Lazy;
use std::path::Path;
use tracing::{debug, info};

static DEFAULT_SPLITTER: Lazy<ChapterSplitter> =
    Lazy::new(|| ChapterSplitter::new(&HeadingRules::default()));

/// Supported source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Text,
    Pdf,
    Epub,
    /// `.pub` archives share the EPUB container layout.
    Pub,
}

impl DocumentFormat {
    /// Resolve the format from the file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self, ExtractError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "txt" => Ok(DocumentFormat::Text),
            "pdf" => Ok(DocumentFormat::Pdf),
            "epub" => Ok(DocumentFormat::Epub),
            "pub" => Ok(DocumentFormat::Pub),
            _ => Err(ExtractError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DocumentFormat::Text => "text",
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Epub => "epub",
            DocumentFormat::Pub => "pub",
        }
    }

    /// Run this format's extraction strategy and return flattened text.
    pub fn extract_text(self, path: &Path) -> Result<String, ExtractError> {
        match self {
            DocumentFormat::Text => text::read_text(path),
            DocumentFormat::Pdf => pdf::read_pdf_text(path),
            DocumentFormat::Epub | DocumentFormat::Pub => epub::read_epub_text(path),
        }
    }
}

/// Check existence, resolve the format, and extract the document text.
pub fn extract_document_text(path: &Path) -> Result<String, ExtractError> {
    if !path.exists() {
        return Err(ExtractError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let format = DocumentFormat::from_path(path)?;
    info!(path = %path.display(), format = format.label(), "Extracting document text");
    let text = format.extract_text(path)?;
    debug!(path = %path.display(), chars = text.len(), "Extracted document text");
    Ok(text)
}

/// Parse a document into one flat token sequence. Empty documents yield an
/// empty sequence.
pub fn parse(path: &Path) -> Result<TokenSequence, ExtractError> {
    let text = extract_document_text(path)?;
    let tokens = TokenSequence::from_text(&text);
    info!(path = %path.display(), tokens = tokens.len(), "Parsed document");
    Ok(tokens)
}

/// Like [`parse`], but an empty result is reported as
/// [`ExtractError::EmptyDocument`].
pub fn load_document(path: &Path) -> Result<TokenSequence, ExtractError> {
    let tokens = parse(path)?;
    if tokens.is_empty() {
        return Err(ExtractError::EmptyDocument {
            path: path.to_path_buf(),
        });
    }
    Ok(tokens)
}

/// Parse a document into chapters using the default heading rules.
pub fn parse_chapters(path: &Path) -> Result<ChapterMap, ExtractError> {
    parse_chapters_with(path, &DEFAULT_SPLITTER)
}

pub fn parse_chapters_with(
    path: &Path,
    splitter: &ChapterSplitter,
) -> Result<ChapterMap, ExtractError> {
    let text = extract_document_text(path)?;
    let chapters = splitter.split(&text);
    info!(
        path = %path.display(),
        chapters = chapters.len(),
        "Split document into chapters"
    );
    Ok(chapters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::fs;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).expect("write fixture");
        path
    }

    #[test]
    fn resolves_formats_case_insensitively() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("a/B.TXT")).ok(),
            Some(DocumentFormat::Text)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("book.Epub")).ok(),
            Some(DocumentFormat::Epub)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("book.pub")).ok(),
            Some(DocumentFormat::Pub)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("scan.PDF")).ok(),
            Some(DocumentFormat::Pdf)
        );
    }

    #[test]
    fn rejects_unknown_and_missing_extensions() {
        let err = DocumentFormat::from_path(Path::new("report.docx")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
        let err = DocumentFormat::from_path(Path::new("README")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
    }

    #[test]
    fn parses_plain_text_keeping_punctuation() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_file(&dir, "hello.txt", b"Hello, world! Foo-bar.");
        let tokens = parse(&path).expect("parse text");
        assert_eq!(tokens.as_slice(), ["Hello,", "world!", "Foo-bar."]);
    }

    #[test]
    fn missing_file_is_reported_before_format() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = parse(&dir.path().join("nope.docx")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
    }

    #[test]
    fn existing_docx_is_unsupported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_file(&dir, "notes.docx", b"PK");
        assert_eq!(parse(&path).unwrap_err().kind(), ErrorKind::UnsupportedFormat);
    }

    #[test]
    fn empty_file_parses_empty_but_loads_as_empty_document() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_file(&dir, "blank.txt", b"   \n\t ");
        assert!(parse(&path).expect("parse").is_empty());
        assert_eq!(
            load_document(&path).unwrap_err().kind(),
            ErrorKind::EmptyDocument
        );
    }

    #[test]
    fn parse_chapters_reads_headings_from_text_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_file(
            &dir,
            "novel.txt",
            b"Chapter 1\nIt was dark.\nChapter 2\nIt was light.\n",
        );
        let chapters = parse_chapters(&path).expect("chapters");
        let labels: Vec<&str> = chapters.keys().map(String::as_str).collect();
        assert_eq!(labels, ["Chapter 1", "Chapter 2"]);
        assert_eq!(chapters["Chapter 2"].as_slice(), ["It", "was", "light."]);
    }
}
