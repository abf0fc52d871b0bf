/*!
 * Tests for error types
 */

use docxlate::errors::{AppError, DocumentError, ProviderError, TranslationError};

#[test]
fn test_app_error_messages_shouldMatchUserFacingText() {
    assert_eq!(AppError::DocumentRequired.to_string(), "document required");
    assert_eq!(AppError::NoLanguages.to_string(), "at least one language required");
}

#[test]
fn test_translation_error_service_shouldCarryLanguage() {
    let error = TranslationError::service("de", "timeout");
    match &error {
        TranslationError::Service { language, message } => {
            assert_eq!(language, "de");
            assert_eq!(message, "timeout");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(error.to_string().contains("(de)"));
}

#[test]
fn test_app_error_from_translation_error_shouldWrap() {
    let error: AppError = TranslationError::UnknownLanguage("Klingon".to_string()).into();
    assert!(matches!(error, AppError::Translation(TranslationError::UnknownLanguage(_))));
    assert!(error.to_string().contains("Klingon"));
}

#[test]
fn test_app_error_from_document_error_shouldWrap() {
    let error: AppError = DocumentError::Parse("missing word/document.xml".to_string()).into();
    assert!(matches!(error, AppError::Document(DocumentError::Parse(_))));
}

#[test]
fn test_provider_error_is_retryable_shouldSeparateTransientFailures() {
    assert!(ProviderError::ConnectionError("refused".into()).is_retryable());
    assert!(ProviderError::RequestFailed("timeout".into()).is_retryable());
    assert!(ProviderError::ApiError { status_code: 503, message: "busy".into() }.is_retryable());
    assert!(ProviderError::ApiError { status_code: 429, message: "slow down".into() }.is_retryable());

    assert!(!ProviderError::ApiError { status_code: 400, message: "bad".into() }.is_retryable());
    assert!(!ProviderError::AuthenticationError("key".into()).is_retryable());
    assert!(!ProviderError::ParseError("json".into()).is_retryable());
}
