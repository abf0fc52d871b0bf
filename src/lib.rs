/*!
 * # docxlate - Word document translator
 *
 * A Rust library for translating Word documents paragraph by paragraph
 * into several target languages.
 *
 * ## Features
 *
 * - Read paragraphs from `.docx` files
 * - Translate each paragraph through a pluggable translation backend:
 *   - Ollama (local LLM)
 *   - OpenAI API
 *   - LM Studio (OpenAI-compatible)
 * - Write one `translated_<code>.docx` per selected language
 * - Order-preserving, one output paragraph per input paragraph
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `document`: `.docx` reading and writing
 * - `translation`: Translation backends and the per-language orchestrator:
 *   - `translation::core`: Backend traits and the configured service
 *   - `translation::orchestrator`: Document translation per language
 *   - `translation::cache`: Caching of repeated paragraphs
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: Supported target languages
 * - `providers`: Client implementations for inference servers
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod document;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, TranslationReport, TranslationRequest};
pub use document::{SourceDocument, TranslatedDocument};
pub use translation::{DocumentTranslator, TranslationBackend, TranslationService};
pub use language_utils::{resolve_language, resolve_selection, TargetLanguage};
pub use errors::{AppError, DocumentError, ProviderError, TranslationError};
