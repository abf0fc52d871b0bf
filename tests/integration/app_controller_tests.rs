/*!
 * Integration tests for request validation and failure handling
 */

use anyhow::Result;
use std::path::PathBuf;

use docxlate::app_config::Config;
use docxlate::app_controller::{Controller, TranslationRequest};
use docxlate::errors::{AppError, DocumentError, TranslationError};
use crate::common;
use crate::common::mock_backend::MockBackend;

fn request(document: Option<PathBuf>, languages: &[&str], output_dir: PathBuf) -> TranslationRequest {
    TranslationRequest {
        document,
        languages: languages.iter().map(|l| l.to_string()).collect(),
        output_dir,
    }
}

/// Number of entries written into a directory
fn file_count(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}

#[test]
fn test_controller_with_config_withInvalidConfig_shouldFail() {
    let mut config = Config::default();
    config.translation.common.temperature = 3.0;
    assert!(Controller::with_config(config).is_err());
}

#[test]
fn test_validate_request_withNothing_shouldRequireDocumentFirst() {
    let result = Controller::validate_request(&request(None, &[], PathBuf::from(".")));
    assert!(matches!(result, Err(AppError::DocumentRequired)));
}

#[test]
fn test_validate_request_withNoLanguages_shouldFail() {
    let result = Controller::validate_request(&request(Some("in.docx".into()), &[], PathBuf::from(".")));
    assert!(matches!(result, Err(AppError::NoLanguages)));
}

#[test]
fn test_validate_request_withUnknownLanguage_shouldFail() {
    let result = Controller::validate_request(&request(Some("in.docx".into()), &["Spanish", "Latin"], PathBuf::from(".")));
    assert!(matches!(result, Err(AppError::Translation(TranslationError::UnknownLanguage(_)))));
}

#[tokio::test]
async fn test_run_withoutDocument_shouldNotTouchBackendOrDisk() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_config(common::test_config(false))?;
    let backend = MockBackend::new();
    let tracker = backend.tracker();

    let result = controller
        .run_with_backend(&backend, request(None, &["Spanish"], temp_dir.path().to_path_buf()))
        .await;

    assert!(matches!(result, Err(AppError::DocumentRequired)));
    assert_eq!(tracker.total_loads(), 0);
    assert_eq!(file_count(temp_dir.path()), 0);
    Ok(())
}

#[tokio::test]
async fn test_run_withoutLanguages_shouldFailBeforeReading() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_config(common::test_config(false))?;

    // The document does not exist, the language check must come first
    let result = controller
        .run_with_backend(&MockBackend::new(), request(Some(temp_dir.path().join("missing.docx")), &[], temp_dir.path().to_path_buf()))
        .await;

    assert!(matches!(result, Err(AppError::NoLanguages)));
    Ok(())
}

#[tokio::test]
async fn test_run_withUnknownLanguage_shouldNotLoadAnyLanguage() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_sample_docx(temp_dir.path())?;
    let output_dir = temp_dir.path().join("out");
    let controller = Controller::with_config(common::test_config(false))?;
    let backend = MockBackend::new();
    let tracker = backend.tracker();

    let result = controller
        .run_with_backend(&backend, request(Some(input), &["Spanish", "Klingon"], output_dir.clone()))
        .await;

    assert!(matches!(result, Err(AppError::Translation(TranslationError::UnknownLanguage(_)))));
    assert_eq!(tracker.total_loads(), 0);
    assert!(!output_dir.exists());
    Ok(())
}

#[tokio::test]
async fn test_run_withInvalidDocument_shouldFailWithParseError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "broken.docx", b"not a zip")?;
    let controller = Controller::with_config(common::test_config(false))?;

    let result = controller
        .run_with_backend(&MockBackend::new(), request(Some(input), &["German"], temp_dir.path().join("out")))
        .await;

    assert!(matches!(result, Err(AppError::Document(DocumentError::Parse(_)))));
    Ok(())
}

#[tokio::test]
async fn test_run_withLegacyDoc_shouldBeRejected() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "old.doc", b"\xD0\xCF\x11\xE0")?;
    let controller = Controller::with_config(common::test_config(false))?;

    let result = controller
        .run_with_backend(&MockBackend::new(), request(Some(input), &["German"], temp_dir.path().join("out")))
        .await;

    match result {
        Err(AppError::Document(DocumentError::Parse(message))) => assert!(message.contains(".docx")),
        other => panic!("unexpected result: {:?}", other.map(|r| r.outputs)),
    }
    Ok(())
}

#[tokio::test]
async fn test_run_withFailingLanguage_shouldWriteNothing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_sample_docx(temp_dir.path())?;
    let output_dir = temp_dir.path().join("out");
    let controller = Controller::with_config(common::test_config(false))?;
    let backend = MockBackend::new().fail_translate_for("de");

    let result = controller
        .run_with_backend(&backend, request(Some(input), &["Spanish", "German"], output_dir.clone()))
        .await;

    assert!(matches!(result, Err(AppError::Translation(TranslationError::Service { .. }))));
    assert!(!output_dir.join("translated_es.docx").exists());
    assert!(!output_dir.join("translated_de.docx").exists());
    Ok(())
}

#[tokio::test]
async fn test_run_withSecondWriteFailing_shouldRemoveFirstOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_sample_docx(temp_dir.path())?;
    let output_dir = temp_dir.path().join("out");
    // A directory in place of the German output makes that write fail
    std::fs::create_dir_all(output_dir.join("translated_de.docx"))?;
    let controller = Controller::with_config(common::test_config(false))?;
    let backend = MockBackend::new();
    let tracker = backend.tracker();

    let result = controller
        .run_with_backend(&backend, request(Some(input), &["Spanish", "German"], output_dir.clone()))
        .await;

    match result {
        Err(AppError::Document(DocumentError::Write { path, .. })) => {
            assert_eq!(path, output_dir.join("translated_de.docx"));
        },
        other => panic!("unexpected result: {:?}", other.map(|r| r.outputs)),
    }
    assert_eq!(tracker.translation_count(), 6);
    assert!(!output_dir.join("translated_es.docx").exists());
    Ok(())
}

#[tokio::test]
async fn test_run_withIsolatedFailures_shouldWriteSucceededLanguages() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_sample_docx(temp_dir.path())?;
    let output_dir = temp_dir.path().join("out");
    let controller = Controller::with_config(common::test_config(true))?;
    let backend = MockBackend::new().fail_load_for("de");

    let report = controller
        .run_with_backend(&backend, request(Some(input), &["Spanish", "German", "Italian"], output_dir.clone()))
        .await?;

    assert!(!report.is_complete());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0.code, "de");
    assert!(output_dir.join("translated_es.docx").exists());
    assert!(output_dir.join("translated_it.docx").exists());
    assert!(!output_dir.join("translated_de.docx").exists());
    Ok(())
}

#[tokio::test]
async fn test_run_withIsolatedFailuresAndAllFailing_shouldReturnError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_sample_docx(temp_dir.path())?;
    let controller = Controller::with_config(common::test_config(true))?;
    let backend = MockBackend::new().fail_translate_for("fr");

    let result = controller
        .run_with_backend(&backend, request(Some(input), &["French"], temp_dir.path().join("out")))
        .await;

    assert!(matches!(result, Err(AppError::Translation(TranslationError::Service { .. }))));
    Ok(())
}

#[test]
fn test_run_withConfiguredService_shouldValidateBeforeConnecting() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;

    // No server is running, validation must fail before any connection attempt
    let result = tokio_test::block_on(async {
        controller.run(request(None, &["Spanish"], PathBuf::from("."))).await
    });

    assert!(matches!(result, Err(AppError::DocumentRequired)));
    Ok(())
}

#[test]
fn test_prepare_withoutDocument_shouldNotCreateConfigFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config_path = temp_dir.path().join("conf.json");

    let result = Controller::prepare(
        &request(None, &["Spanish"], PathBuf::new()),
        || Config::load_or_create(&config_path),
    );

    assert!(matches!(result, Err(AppError::DocumentRequired)));
    assert!(!config_path.exists());
    Ok(())
}

#[test]
fn test_prepare_withoutDocumentAndInvalidConfig_shouldReportDocumentRequired() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config_path = common::create_test_file(
        temp_dir.path(), "conf.json", br#"{"translation":{"provider":"openai"}}"#)?;

    let result = Controller::prepare(
        &request(None, &["Spanish"], PathBuf::new()),
        || Config::load_or_create(&config_path),
    );

    assert!(matches!(result, Err(AppError::DocumentRequired)));
    Ok(())
}

#[test]
fn test_prepare_withoutLanguages_shouldNotCreateConfigFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config_path = temp_dir.path().join("conf.json");

    let result = Controller::prepare(
        &request(Some("in.docx".into()), &[], PathBuf::new()),
        || Config::load_or_create(&config_path),
    );

    assert!(matches!(result, Err(AppError::NoLanguages)));
    assert!(!config_path.exists());
    Ok(())
}

#[test]
fn test_prepare_withValidRequest_shouldCreateDefaultConfig() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config_path = temp_dir.path().join("conf.json");

    let controller = Controller::prepare(
        &request(Some("in.docx".into()), &["German"], PathBuf::new()),
        || Config::load_or_create(&config_path),
    )?;

    assert!(config_path.exists());
    assert_eq!(controller.config().source_language, "en");
    Ok(())
}

#[test]
fn test_prepare_withValidRequestAndInvalidConfig_shouldFailWithConfigError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config_path = common::create_test_file(
        temp_dir.path(), "conf.json", br#"{"translation":{"provider":"openai"}}"#)?;

    let result = Controller::prepare(
        &request(Some("in.docx".into()), &["German"], PathBuf::new()),
        || Config::load_or_create(&config_path),
    );

    assert!(matches!(result, Err(AppError::Config(ref message)) if message.contains("API key")));
    Ok(())
}
