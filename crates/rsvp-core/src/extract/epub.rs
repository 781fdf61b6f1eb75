//! EPUB/PUB loading.
//!
//! The package manifest and spine decide reading order when the container is
//! well formed. Otherwise the file is treated as a bare zip archive and every
//! HTML-like entry is read in sorted name order.

use crate::error::ExtractError;
use ::epub::doc::EpubDoc;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Wide enough that html2text never inserts hard line breaks.
const TEXT_WIDTH: usize = 10_000;

static SCRIPT_STYLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>")
        .expect("script/style pattern is valid")
});

pub(super) fn read_epub_text(path: &Path) -> Result<String, ExtractError> {
    match EpubDoc::new(path) {
        Ok(doc) => {
            let text = read_spine(doc);
            if !text.trim().is_empty() {
                return Ok(text);
            }
            warn!(
                path = %path.display(),
                "EPUB spine produced no text, falling back to archive order"
            );
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "EPUB package unreadable, falling back to archive order: {err}"
            );
        }
    }
    read_archive(path)
}

fn read_spine<R: std::io::Read + std::io::Seek>(mut doc: EpubDoc<R>) -> String {
    let mut combined = String::new();
    let mut documents = 0usize;

    loop {
        if let Some((content, _mime)) = doc.get_current_str() {
            documents += 1;
            push_document(&mut combined, &content, documents);
        }
        if !doc.go_next() {
            break;
        }
    }

    info!(
        documents,
        total_chars = combined.len(),
        "Finished loading EPUB spine"
    );
    combined
}

fn read_archive(path: &Path) -> Result<String, ExtractError> {
    let file = File::open(path).map_err(|err| ExtractError::failed(path, err))?;
    let mut archive = zip::ZipArchive::new(file).map_err(|err| ExtractError::failed(path, err))?;

    let mut names: Vec<String> = archive
        .file_names()
        .filter(|name| is_content_document(name))
        .map(str::to_string)
        .collect();
    names.sort();

    let mut combined = String::new();
    let mut documents = 0usize;
    for name in &names {
        let mut raw = Vec::new();
        let read = archive
            .by_name(name)
            .map_err(|err| err.to_string())
            .and_then(|mut entry| entry.read_to_end(&mut raw).map_err(|err| err.to_string()));
        if let Err(err) = read {
            warn!(entry = %name, "Skipping unreadable archive entry: {err}");
            continue;
        }
        let Ok(content) = String::from_utf8(raw) else {
            warn!(entry = %name, "Skipping non-UTF-8 archive entry");
            continue;
        };
        documents += 1;
        push_document(&mut combined, &content, documents);
    }

    info!(
        path = %path.display(),
        documents,
        total_chars = combined.len(),
        "Finished loading archive content"
    );
    Ok(combined)
}

fn is_content_document(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    let is_html = lower.ends_with(".xhtml") || lower.ends_with(".html") || lower.ends_with(".htm");
    let file_name = lower.rsplit('/').next().unwrap_or(&lower);
    is_html && !file_name.contains("toc") && !file_name.contains("nav")
}

fn push_document(combined: &mut String, markup: &str, index: usize) {
    let plain = markup_to_text(markup);
    if plain.trim().is_empty() {
        return;
    }
    if !combined.is_empty() {
        combined.push_str("\n\n");
    }
    debug!(
        document = index,
        added_chars = plain.len(),
        "Parsed content document"
    );
    combined.push_str(&plain);
}

/// Strip tags and decode entities. Falls back to the raw markup if the HTML
/// pass fails so no document is silently dropped.
pub(crate) fn markup_to_text(markup: &str) -> String {
    let cleaned = SCRIPT_STYLE_RE.replace_all(markup, " ");
    match html2text::config::plain_no_decorate().string_from_read(cleaned.as_bytes(), TEXT_WIDTH) {
        Ok(text) => text,
        Err(err) => {
            warn!("html2text failed: {err}");
            cleaned.into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::tokens::tokenize;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn write_archive(path: &Path, entries: &[(&str, &str)]) {
        let file = File::create(path).expect("create archive");
        let mut writer = zip::ZipWriter::new(file);
        for (name, body) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .expect("start entry");
            writer.write_all(body.as_bytes()).expect("write entry");
        }
        writer.finish().expect("finish archive");
    }

    fn xhtml(body: &str) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
             <html xmlns=\"http://www.w3.org/1999/xhtml\"><head></head><body>{body}</body></html>"
        )
    }

    #[test]
    fn strips_markup_and_decodes_entities() {
        let text = markup_to_text(&xhtml(
            "<p>Fish &amp; chips</p><script>var x = 1;</script><p>at <em>noon</em>.</p>",
        ));
        assert_eq!(tokenize(&text), vec!["Fish", "&", "chips", "at", "noon."]);
    }

    #[test]
    fn reads_packaged_epub_in_spine_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("book.epub");
        let container = r#"<?xml version="1.0"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#;
        let opf = r#"<?xml version="1.0" encoding="utf-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="2.0" unique-identifier="id">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
    <dc:title>Sample</dc:title>
    <dc:identifier id="id">sample-book</dc:identifier>
    <dc:language>en</dc:language>
  </metadata>
  <manifest>
    <item id="c1" href="c1.xhtml" media-type="application/xhtml+xml"/>
    <item id="c2" href="c2.xhtml" media-type="application/xhtml+xml"/>
  </manifest>
  <spine>
    <itemref idref="c1"/>
    <itemref idref="c2"/>
  </spine>
</package>"#;
        let first = xhtml("<p>Call me Ishmael.</p>");
        let second = xhtml("<p>Some years ago.</p>");
        write_archive(
            &path,
            &[
                ("mimetype", "application/epub+zip"),
                ("META-INF/container.xml", container),
                ("OEBPS/content.opf", opf),
                ("OEBPS/c1.xhtml", &first),
                ("OEBPS/c2.xhtml", &second),
            ],
        );

        let text = read_epub_text(&path).expect("read epub");
        assert_eq!(
            tokenize(&text),
            vec!["Call", "me", "Ishmael.", "Some", "years", "ago."]
        );
    }

    #[test]
    fn falls_back_to_sorted_archive_entries_without_manifest() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("loose.pub");
        let second = xhtml("<p>second part</p>");
        let first = xhtml("<p>first part</p>");
        let toc = xhtml("<p>table of contents</p>");
        write_archive(
            &path,
            &[
                ("text/02.html", &second),
                ("text/01.xhtml", &first),
                ("text/toc.xhtml", &toc),
                ("styles/main.css", "p { color: red; }"),
            ],
        );

        let text = read_epub_text(&path).expect("read archive");
        assert_eq!(tokenize(&text), vec!["first", "part", "second", "part"]);
    }

    #[test]
    fn corrupt_archive_fails_extraction() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.epub");
        std::fs::write(&path, b"definitely not a zip archive").expect("write");

        assert_eq!(
            read_epub_text(&path).unwrap_err().kind(),
            ErrorKind::ExtractionFailed
        );
    }
}
