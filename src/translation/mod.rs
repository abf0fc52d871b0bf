/*!
 * Paragraph translation for Word documents.
 *
 * This module contains the functionality for translating documents using
 * an external translation capability. It is split into several submodules:
 *
 * - `core`: Backend traits, the configured service and per-language sessions
 * - `orchestrator`: Running sessions over a document for each language
 * - `cache`: Caching of repeated paragraph translations
 */

// Re-export main types for easier usage
pub use self::core::{LanguageSession, LanguageTranslator, TranslationBackend, TranslationService};
pub use self::orchestrator::{DocumentTranslator, LanguageOutcome};

// Submodules
pub mod cache;
pub mod core;
pub mod orchestrator;
