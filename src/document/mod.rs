/*!
 * Word document handling.
 *
 * This module reads paragraphs out of `.docx` packages and writes translated
 * paragraphs back into new packages:
 *
 * - `model`: Source and translated document types
 * - `reader`: Paragraph extraction from WordprocessingML
 * - `writer`: Minimal `.docx` package generation
 */

pub mod model;
pub mod reader;
pub mod writer;

// Re-export main types for easier usage
pub use model::{SourceDocument, TranslatedDocument};
pub use reader::{parse_docx, read_document};
pub use writer::{output_file_name, render_docx, write_document, write_package};

/// Path of the main document part inside a `.docx` package
pub(crate) const DOCUMENT_PART: &str = "word/document.xml";

/// WordprocessingML main namespace
pub(crate) const WORDML_NAMESPACE: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// File extension of produced documents
pub const DOCX_EXTENSION: &str = "docx";
