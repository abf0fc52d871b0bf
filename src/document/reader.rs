/*!
 * Paragraph extraction from `.docx` packages.
 *
 * Only the top-level paragraphs of the document body are read, in document
 * order. Paragraphs nested in tables, text boxes or drawings are not part of
 * the sequence. Run text is concatenated, tabs become `\t` and line breaks
 * become `\n`.
 */

use std::io::{Cursor, Read};
use std::path::Path;

use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::ZipArchive;
use zip::result::ZipError;

use super::DOCUMENT_PART;
use super::model::SourceDocument;
use crate::errors::DocumentError;

/// Elements whose content never contributes to paragraph text
const SKIPPED_SUBTREES: &[&[u8]] = &[
    b"pPr",
    b"drawing",
    b"pict",
    b"object",
    b"AlternateContent",
];

/// Read a Word document from disk
pub fn read_document<P: AsRef<Path>>(path: P) -> Result<SourceDocument, DocumentError> {
    let path = path.as_ref();

    let bytes = std::fs::read(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let blocks = parse_docx(&bytes)?;
    debug!("Read {} paragraphs from {}", blocks.len(), path.display());

    Ok(SourceDocument::new(path, blocks))
}

/// Extract paragraph texts from the bytes of a `.docx` package
pub fn parse_docx(bytes: &[u8]) -> Result<Vec<String>, DocumentError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    let mut xml = String::new();
    let mut part = archive.by_name(DOCUMENT_PART).map_err(|e| match e {
        ZipError::FileNotFound => DocumentError::Parse(format!("missing {}", DOCUMENT_PART)),
        other => DocumentError::from(other),
    })?;
    part.read_to_string(&mut xml)
        .map_err(|e| DocumentError::Parse(format!("unreadable {}: {}", DOCUMENT_PART, e)))?;

    extract_paragraphs(&xml)
}

/// Extract paragraph texts from the XML of the main document part
pub fn extract_paragraphs(xml: &str) -> Result<Vec<String>, DocumentError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut scanner = ParagraphScanner::default();

    loop {
        match reader.read_event()? {
            Event::Start(element) => scanner.open(&element)?,
            Event::Empty(element) => {
                scanner.open(&element)?;
                scanner.close(element.local_name().as_ref());
            },
            Event::End(element) => scanner.close(element.local_name().as_ref()),
            Event::Text(text) => {
                if scanner.in_text() {
                    let unescaped = text.unescape()?;
                    scanner.push_str(&unescaped);
                }
            },
            Event::Eof => break,
            _ => {}
        }
    }

    if !scanner.saw_body {
        return Err(DocumentError::Parse("document has no body".to_string()));
    }

    Ok(scanner.paragraphs)
}

/// Element-depth tracker collecting body paragraphs
#[derive(Default)]
struct ParagraphScanner {
    /// Number of currently open elements
    depth: usize,
    /// Depth of the open `w:body` element
    body_depth: Option<usize>,
    /// Depth of the open top-level paragraph
    paragraph_depth: Option<usize>,
    /// Depth of the subtree currently being ignored
    skip_depth: Option<usize>,
    /// Depth of the open `w:t` element
    text_depth: Option<usize>,
    /// Text of the paragraph being read
    current: String,
    saw_body: bool,
    paragraphs: Vec<String>,
}

impl ParagraphScanner {
    fn open(&mut self, element: &BytesStart<'_>) -> Result<(), DocumentError> {
        self.depth += 1;
        let name = element.local_name();
        let name = name.as_ref();

        if self.skip_depth.is_some() {
            return Ok(());
        }

        match self.paragraph_depth {
            None => {
                if name == b"body" && self.body_depth.is_none() {
                    self.body_depth = Some(self.depth);
                    self.saw_body = true;
                } else if name == b"p" && self.body_depth.is_some_and(|d| d + 1 == self.depth) {
                    self.paragraph_depth = Some(self.depth);
                    self.current.clear();
                }
            },
            Some(_) => {
                if SKIPPED_SUBTREES.contains(&name) {
                    self.skip_depth = Some(self.depth);
                } else if name == b"t" {
                    self.text_depth = Some(self.depth);
                } else if name == b"tab" {
                    self.current.push('\t');
                } else if (name == b"br" && is_line_break(element)?) || name == b"cr" {
                    self.current.push('\n');
                }
            },
        }

        Ok(())
    }

    fn close(&mut self, name: &[u8]) {
        if self.skip_depth == Some(self.depth) {
            self.skip_depth = None;
        } else if self.text_depth == Some(self.depth) {
            self.text_depth = None;
        } else if self.paragraph_depth == Some(self.depth) {
            self.paragraph_depth = None;
            self.paragraphs.push(std::mem::take(&mut self.current));
        } else if self.body_depth == Some(self.depth) && name == b"body" {
            self.body_depth = None;
        }

        self.depth = self.depth.saturating_sub(1);
    }

    fn in_text(&self) -> bool {
        self.text_depth.is_some() && self.skip_depth.is_none()
    }

    fn push_str(&mut self, text: &str) {
        self.current.push_str(text);
    }
}

/// Page and column breaks do not produce text
fn is_line_break(element: &BytesStart<'_>) -> Result<bool, DocumentError> {
    let break_type = element.try_get_attribute("w:type")?;
    Ok(match break_type {
        Some(attr) => attr.value.as_ref() == b"textWrapping",
        None => true,
    })
}
