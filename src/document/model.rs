/*!
 * Document model types for paragraph translation.
 *
 * A document is reduced to its ordered paragraph texts. Block `i` of a
 * translated document always corresponds to block `i` of its source.
 */

use std::path::{Path, PathBuf};

use crate::language_utils::TargetLanguage;

/// Paragraphs read from an input document
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDocument {
    /// File the document was read from
    pub source_file: PathBuf,

    /// Paragraph texts in document order, blank paragraphs included
    blocks: Vec<String>,
}

impl SourceDocument {
    /// Create a source document from already extracted paragraphs
    pub fn new(source_file: impl Into<PathBuf>, blocks: Vec<String>) -> Self {
        Self {
            source_file: source_file.into(),
            blocks,
        }
    }

    /// Paragraph texts in document order
    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Number of paragraphs that contain something other than whitespace
    pub fn non_blank_count(&self) -> usize {
        self.blocks.iter().filter(|b| !b.trim().is_empty()).count()
    }

    /// Total number of characters across all paragraphs
    pub fn char_count(&self) -> usize {
        self.blocks.iter().map(|b| b.chars().count()).sum()
    }

    pub fn source_file(&self) -> &Path {
        &self.source_file
    }
}

/// Translated paragraphs for one target language
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedDocument {
    /// Language the blocks were translated into
    pub language: TargetLanguage,

    /// Translated paragraphs, appended in source order
    blocks: Vec<String>,
}

impl TranslatedDocument {
    /// Create an empty translated document with room for `capacity` blocks
    pub fn with_capacity(language: TargetLanguage, capacity: usize) -> Self {
        Self {
            language,
            blocks: Vec::with_capacity(capacity),
        }
    }

    /// Append the translation of the next source paragraph
    pub fn push_block(&mut self, text: String) {
        self.blocks.push(text);
    }

    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
