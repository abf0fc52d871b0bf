/*!
 * Tests for application configuration
 */

use anyhow::Result;
use docxlate::app_config::{Config, LogLevel, TranslationProvider};
use crate::common;

#[test]
fn test_default_config_shouldBeValid() {
    let config = Config::default();
    assert_eq!(config.source_language, "en");
    assert_eq!(config.translation.provider, TranslationProvider::Ollama);
    assert_eq!(config.translation.common.retry_count, 0);
    assert_eq!(config.translation.common.concurrent_languages, 1);
    assert!(!config.translation.common.isolate_failures);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validate_withInvalidSourceLanguage_shouldFail() {
    let mut config = Config::default();
    config.source_language = "zz".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validate_withZeroConcurrency_shouldFail() {
    let mut config = Config::default();
    config.translation.common.concurrent_languages = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validate_withOpenAIAndNoKey_shouldFail() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::OpenAI;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validate_withLMStudioAndNoKey_shouldSucceed() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::LMStudio;
    assert!(config.validate().is_ok());
}

#[test]
fn test_get_model_for_language_withPlaceholder_shouldSubstituteCode() {
    let mut config = Config::default();
    config.translation.set_model("opus-mt-en-{code}");
    assert_eq!(config.translation.get_model_for_language("de"), "opus-mt-en-de");
    assert_eq!(config.translation.get_model_for_language("jap"), "opus-mt-en-jap");
}

#[test]
fn test_provider_defaults_withoutProviderEntry_shouldFallBack() {
    let mut config = Config::default();
    config.translation.available_providers.clear();
    config.translation.provider = TranslationProvider::LMStudio;
    assert_eq!(config.translation.get_endpoint(), "http://localhost:1234/v1");
    assert_eq!(config.translation.get_model(), "local-model");
    assert_eq!(config.translation.get_timeout_secs(), 60);
}

#[test]
fn test_provider_from_str_shouldBeCaseInsensitive() {
    assert_eq!("OpenAI".parse::<TranslationProvider>().unwrap(), TranslationProvider::OpenAI);
    assert_eq!("lmstudio".parse::<TranslationProvider>().unwrap(), TranslationProvider::LMStudio);
    assert!("deepl".parse::<TranslationProvider>().is_err());
}

#[test]
fn test_config_save_and_load_shouldPreserveSettings() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let mut config = Config::default();
    config.log_level = LogLevel::Debug;
    config.translation.common.isolate_failures = true;
    config.translation.set_model("mistral");
    config.save(&path)?;

    let loaded = Config::load(&path)?;
    assert_eq!(loaded.log_level, LogLevel::Debug);
    assert!(loaded.translation.common.isolate_failures);
    assert_eq!(loaded.translation.get_model(), "mistral");
    Ok(())
}

#[test]
fn test_config_load_withPartialJson_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", br#"{ "source_language": "fr" }"#)?;

    let config = Config::load(&path)?;
    assert_eq!(config.source_language, "fr");
    assert_eq!(config.translation.common.temperature, 0.1);
    assert!(config.translation.common.cache_enabled);
    Ok(())
}

#[test]
fn test_config_load_withMissingFile_shouldFail() {
    assert!(Config::load("/nonexistent/conf.json").is_err());
}
