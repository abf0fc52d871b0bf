/*!
 * Error types for the docxlate application.
 *
 * This module contains custom error types for the different stages of the
 * pipeline (document codec, translation, providers), using the thiserror
 * crate for ergonomic error definitions.
 */

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

impl ProviderError {
    /// Whether a request failing with this error may succeed when sent again
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RequestFailed(_) | Self::ConnectionError(_) => true,
            Self::ApiError { status_code, .. } => *status_code >= 500 || *status_code == 429,
            Self::ParseError(_) | Self::AuthenticationError(_) => false,
        }
    }
}

/// Errors that can occur while reading or writing Word documents
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The input file could not be opened or read
    #[error("Failed to read document {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input is not a valid Word document container
    #[error("Invalid Word document: {0}")]
    Parse(String),

    /// The output package could not be assembled in memory
    #[error("Failed to encode document: {0}")]
    Encode(String),

    /// The output document could not be persisted
    #[error("Failed to write document {}: {message}", .path.display())]
    Write {
        path: PathBuf,
        message: String,
    },
}

impl From<zip::result::ZipError> for DocumentError {
    fn from(error: zip::result::ZipError) -> Self {
        Self::Parse(error.to_string())
    }
}

impl From<quick_xml::Error> for DocumentError {
    fn from(error: quick_xml::Error) -> Self {
        Self::Parse(error.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for DocumentError {
    fn from(error: quick_xml::events::attributes::AttrError) -> Self {
        Self::Parse(error.to_string())
    }
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// The selected language is not part of the supported language table
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    /// The translation backend is unavailable or failed for a block
    #[error("Translation service error ({language}): {message}")]
    Service {
        /// Code of the language being translated when the failure happened
        language: String,
        message: String,
    },
}

impl TranslationError {
    /// Build a service error for the given language code
    pub fn service(language: &str, message: impl Into<String>) -> Self {
        Self::Service {
            language: language.to_string(),
            message: message.into(),
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// No input document was given
    #[error("document required")]
    DocumentRequired,

    /// The language selection is empty
    #[error("at least one language required")]
    NoLanguages,

    /// The configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the document codec
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}
