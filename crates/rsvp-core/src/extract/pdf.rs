use crate::error::ExtractError;
use pdf_oxide::PdfDocument;
use std::path::Path;
use tracing::{debug, info, warn};

/// Extract the text layer page by page. Pages are joined with a newline so a
/// page boundary always separates tokens and starts a new line for heading
/// detection. Pages without a text layer (or that fail to decode) contribute
/// nothing.
pub(super) fn read_pdf_text(path: &Path) -> Result<String, ExtractError> {
    info!(path = %path.display(), "Loading PDF content");
    let mut doc = PdfDocument::open(path).map_err(|err| ExtractError::failed(path, err))?;
    let page_count = doc
        .page_count()
        .map_err(|err| ExtractError::failed(path, err))?;

    let mut pages = Vec::with_capacity(page_count);
    let mut empty_pages = 0usize;
    for page_index in 0..page_count {
        match doc.extract_text(page_index) {
            Ok(text) => {
                if text.trim().is_empty() {
                    empty_pages += 1;
                }
                debug!(page = page_index + 1, chars = text.len(), "Parsed PDF page");
                pages.push(text);
            }
            Err(err) => {
                empty_pages += 1;
                warn!(page = page_index + 1, "PDF page text extraction failed: {err}");
                pages.push(String::new());
            }
        }
    }

    info!(
        pages = page_count,
        empty_pages, "Finished loading PDF content"
    );
    Ok(pages.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::tokens::tokenize;
    use pdf_oxide::writer::{DocumentBuilder, PageSize};

    fn write_pdf(path: &Path, pages: &[&str]) {
        let mut builder = DocumentBuilder::new();
        for body in pages {
            let page = builder.page(PageSize::Letter);
            if body.is_empty() {
                page.done();
            } else {
                page.at(72.0, 720.0).text(body).done();
            }
        }
        builder.save(path).expect("write pdf");
    }

    #[test]
    fn pages_are_joined_in_order_and_blank_pages_add_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("book.pdf");
        write_pdf(&path, &["Alpha", "", "Omega"]);

        let text = read_pdf_text(&path).expect("read pdf");
        assert_eq!(tokenize(&text), ["Alpha", "Omega"]);

        let start = text.find("Alpha").expect("first page text");
        let end = text.find("Omega").expect("last page text");
        assert!(start < end);
        assert!(text[start..end].matches('\n').count() >= 2);
    }

    #[test]
    fn garbage_bytes_fail_extraction() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf at all").expect("write");

        let err = read_pdf_text(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ExtractionFailed);
    }
}
