/*!
 * Generation of translated `.docx` packages.
 *
 * The produced package is the minimal set of parts Word needs to open a
 * document: content types, package relationships and the main document
 * part, with one paragraph per translated block.
 */

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use log::debug;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::model::TranslatedDocument;
use super::{DOCUMENT_PART, DOCX_EXTENSION, WORDML_NAMESPACE};
use crate::errors::DocumentError;
use crate::file_utils::FileManager;
use crate::language_utils::TargetLanguage;

const CONTENT_TYPES_PART: &str = "[Content_Types].xml";
const PACKAGE_RELS_PART: &str = "_rels/.rels";

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

/// Deterministic output file name for a language, e.g. `translated_es.docx`
pub fn output_file_name(language: &TargetLanguage) -> String {
    format!("translated_{}.{}", language.code, DOCX_EXTENSION)
}

/// Persist a translated document into `output_dir` and return its path
///
/// The directory is created if needed; an existing file is overwritten.
pub fn write_document<P: AsRef<Path>>(document: &TranslatedDocument, output_dir: P) -> Result<PathBuf, DocumentError> {
    let bytes = render_docx(document.blocks())?;
    let output_path = write_package(&document.language, &bytes, output_dir)?;

    debug!("Wrote {} paragraphs to {}", document.len(), output_path.display());
    Ok(output_path)
}

/// Persist an already rendered package for a language into `output_dir`
pub fn write_package<P: AsRef<Path>>(language: &TargetLanguage, package: &[u8], output_dir: P) -> Result<PathBuf, DocumentError> {
    let output_dir = output_dir.as_ref();
    let output_path = output_dir.join(output_file_name(language));

    FileManager::ensure_dir(output_dir).map_err(|e| DocumentError::Write {
        path: output_dir.to_path_buf(),
        message: format!("{:#}", e),
    })?;

    FileManager::write_bytes(&output_path, package).map_err(|e| DocumentError::Write {
        path: output_path.clone(),
        message: format!("{:#}", e),
    })?;

    Ok(output_path)
}

/// Assemble a `.docx` package containing the given paragraphs
pub fn render_docx<S: AsRef<str>>(blocks: &[S]) -> Result<Vec<u8>, DocumentError> {
    let document_xml = render_document_xml(blocks)?;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let parts: [(&str, &[u8]); 3] = [
        (CONTENT_TYPES_PART, CONTENT_TYPES_XML.as_bytes()),
        (PACKAGE_RELS_PART, PACKAGE_RELS_XML.as_bytes()),
        (DOCUMENT_PART, &document_xml),
    ];

    for (name, content) in parts {
        zip.start_file(name, options)
            .map_err(|e| DocumentError::Encode(e.to_string()))?;
        zip.write_all(content)
            .map_err(|e| DocumentError::Encode(e.to_string()))?;
    }

    let cursor = zip.finish()
        .map_err(|e| DocumentError::Encode(e.to_string()))?;

    Ok(cursor.into_inner())
}

/// Render the main document part for the given paragraphs
pub fn render_document_xml<S: AsRef<str>>(blocks: &[S]) -> Result<Vec<u8>, DocumentError> {
    let mut writer = Writer::new(Vec::new());

    write_event(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    write_event(
        &mut writer,
        Event::Start(BytesStart::new("w:document").with_attributes([("xmlns:w", WORDML_NAMESPACE)])),
    )?;
    write_event(&mut writer, Event::Start(BytesStart::new("w:body")))?;

    for block in blocks {
        write_paragraph(&mut writer, block.as_ref())?;
    }

    write_event(&mut writer, Event::Empty(BytesStart::new("w:sectPr")))?;
    write_event(&mut writer, Event::End(BytesEnd::new("w:body")))?;
    write_event(&mut writer, Event::End(BytesEnd::new("w:document")))?;

    Ok(writer.into_inner())
}

fn write_paragraph(writer: &mut Writer<Vec<u8>>, text: &str) -> Result<(), DocumentError> {
    if text.is_empty() {
        return write_event(writer, Event::Empty(BytesStart::new("w:p")));
    }

    write_event(writer, Event::Start(BytesStart::new("w:p")))?;
    write_event(writer, Event::Start(BytesStart::new("w:r")))?;

    // Tabs and line breaks are run content, not text
    let mut segment = String::new();
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        let marker = match ch {
            '\t' => "w:tab",
            '\r' => {
                chars.next_if_eq(&'\n');
                "w:br"
            },
            '\n' => "w:br",
            c if !is_xml_char(c) => continue,
            c => {
                segment.push(c);
                continue;
            },
        };
        write_text(writer, &segment)?;
        segment.clear();
        write_event(writer, Event::Empty(BytesStart::new(marker)))?;
    }
    write_text(writer, &segment)?;

    write_event(writer, Event::End(BytesEnd::new("w:r")))?;
    write_event(writer, Event::End(BytesEnd::new("w:p")))
}

/// Characters allowed in XML 1.0 text content, tab and line breaks aside
fn is_xml_char(c: char) -> bool {
    !matches!(c, '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}')
}

fn write_text(writer: &mut Writer<Vec<u8>>, text: &str) -> Result<(), DocumentError> {
    if text.is_empty() {
        return Ok(());
    }

    write_event(
        writer,
        Event::Start(BytesStart::new("w:t").with_attributes([("xml:space", "preserve")])),
    )?;
    write_event(writer, Event::Text(BytesText::new(text)))?;
    write_event(writer, Event::End(BytesEnd::new("w:t")))
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), DocumentError> {
    writer.write_event(event)
        .map_err(|e| DocumentError::Encode(e.to_string()))
}
