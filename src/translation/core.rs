/*!
 * Core translation service implementation.
 *
 * The translation capability is acquired once per target language through
 * [`TranslationBackend::load`] and the resulting session is reused for every
 * paragraph of that language. [`TranslationService`] is the configured
 * backend talking to an inference server.
 */

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;
use url::Url;

use crate::app_config::{TranslationConfig, TranslationProvider as ConfigTranslationProvider};
use crate::errors::TranslationError;
use crate::language_utils::{self, TargetLanguage};
use crate::providers::ollama::{GenerationRequest, Ollama};
use crate::providers::openai::{OpenAI, OpenAIRequest};
use crate::providers::{Provider, RetryPolicy};
use super::cache::TranslationCache;

/// A translation capability bound to one target language
#[async_trait]
pub trait LanguageTranslator: Send + Sync {
    /// Language this session translates into
    fn language(&self) -> &TargetLanguage;

    /// Translate one paragraph
    async fn translate(&self, text: &str) -> Result<String, TranslationError>;
}

/// Source of per-language translation sessions
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    type Session: LanguageTranslator;

    /// Acquire the translation capability for a language
    async fn load(&self, language: &TargetLanguage) -> Result<Self::Session, TranslationError>;
}

/// Parse an endpoint string into host and port
fn parse_endpoint(endpoint: &str) -> Result<(String, u16)> {
    if endpoint.is_empty() {
        return Err(anyhow!("Endpoint cannot be empty"));
    }

    let url = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        Url::parse(endpoint)?
    } else {
        Url::parse(&format!("http://{}", endpoint))?
    };

    let host = url.host_str()
        .ok_or_else(|| anyhow!("Invalid host in endpoint: {}", endpoint))?;
    let host = format!("{}://{}", url.scheme(), host);

    let port = url.port().unwrap_or(if url.scheme() == "https" { 443 } else { 80 });

    Ok((host, port))
}

/// Translation provider implementation variants
#[derive(Debug)]
enum TranslationProviderImpl {
    /// Ollama LLM service
    Ollama(Ollama),
    /// OpenAI API or an OpenAI-compatible local server
    OpenAI(OpenAI),
}

/// Configured translation backend for document translation
pub struct TranslationService {
    /// Provider implementation shared with every session
    provider: Arc<TranslationProviderImpl>,

    /// Configuration for the translation service
    pub config: TranslationConfig,

    /// Language code of the input documents
    source_language: String,

    /// Translation cache for storing and retrieving translations
    pub cache: TranslationCache,
}

impl TranslationService {
    /// Create a new translation service with the given configuration
    pub fn new(config: TranslationConfig, source_language: &str) -> Result<Self> {
        let retry = RetryPolicy {
            max_retries: config.common.retry_count,
            backoff_base_ms: config.common.retry_backoff_ms,
        };
        let timeout_secs = config.get_timeout_secs();

        let provider = match config.provider {
            ConfigTranslationProvider::Ollama => {
                let (host, port) = parse_endpoint(&config.get_endpoint())?;
                TranslationProviderImpl::Ollama(Ollama::new_with_config(host, port, timeout_secs, retry))
            },
            ConfigTranslationProvider::OpenAI => {
                TranslationProviderImpl::OpenAI(OpenAI::new_with_config(
                    config.get_api_key(),
                    config.get_endpoint(),
                    timeout_secs,
                    retry,
                ))
            },
            ConfigTranslationProvider::LMStudio => {
                // LM Studio often doesn't require an API key; use a default if empty
                let api_key = {
                    let k = config.get_api_key();
                    if k.is_empty() { "lm-studio".to_string() } else { k }
                };
                TranslationProviderImpl::OpenAI(OpenAI::new_with_config(
                    api_key,
                    config.get_endpoint(),
                    timeout_secs,
                    retry,
                ))
            },
        };

        let cache = TranslationCache::new(config.common.cache_enabled);

        Ok(Self {
            provider: Arc::new(provider),
            config,
            source_language: source_language.to_string(),
            cache,
        })
    }

    /// Render the system prompt for a target language
    pub fn system_prompt_for(&self, language: &TargetLanguage) -> String {
        let source_name = language_utils::get_language_name(&self.source_language)
            .unwrap_or_else(|_| self.source_language.clone());

        self.config.common.system_prompt
            .replace("{source_language}", &source_name)
            .replace("{target_language}", language.name)
    }

    /// Test the connection to the translation provider
    pub async fn test_connection(&self) -> Result<(), TranslationError> {
        let result = match self.provider.as_ref() {
            TranslationProviderImpl::Ollama(client) => client.test_connection().await,
            TranslationProviderImpl::OpenAI(client) => client.test_connection().await,
        };

        result.map_err(|e| TranslationError::service(
            "-",
            format!("Failed to connect to {}: {}", self.config.provider.display_name(), e),
        ))
    }
}

#[async_trait]
impl TranslationBackend for TranslationService {
    type Session = LanguageSession;

    async fn load(&self, language: &TargetLanguage) -> Result<Self::Session, TranslationError> {
        // Sessions are only handed out for languages of the fixed table
        let language = language_utils::resolve_language(language.code)?;

        if !language_utils::has_standard_code(&language) {
            warn!("Language code '{}' is not the ISO 639 code for {}", language.code, language.name);
        }

        self.test_connection().await.map_err(|e| match e {
            TranslationError::Service { message, .. } => TranslationError::service(language.code, message),
            other => other,
        })?;

        let model = self.config.get_model_for_language(language.code);
        debug!("Loaded {} session for {} with model {}", self.config.provider.display_name(), language, model);

        Ok(LanguageSession {
            language,
            model,
            system_prompt: self.system_prompt_for(&language),
            temperature: self.config.common.temperature,
            source_language: self.source_language.clone(),
            provider: Arc::clone(&self.provider),
            cache: self.cache.clone(),
        })
    }
}

/// Translation capability for one target language
pub struct LanguageSession {
    language: TargetLanguage,
    model: String,
    system_prompt: String,
    temperature: f32,
    source_language: String,
    provider: Arc<TranslationProviderImpl>,
    cache: TranslationCache,
}

impl LanguageSession {
    /// Model this session sends requests to
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Rendered system prompt sent with every paragraph
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }
}

#[async_trait]
impl LanguageTranslator for LanguageSession {
    fn language(&self) -> &TargetLanguage {
        &self.language
    }

    async fn translate(&self, text: &str) -> Result<String, TranslationError> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        if let Some(cached) = self.cache.get(text, &self.source_language, self.language.code) {
            return Ok(cached);
        }

        let result = match self.provider.as_ref() {
            TranslationProviderImpl::Ollama(client) => {
                let request = GenerationRequest::new(&self.model, text)
                    .system(&self.system_prompt)
                    .temperature(self.temperature);
                client.complete(request).await.map(|response| Ollama::extract_text(&response))
            },
            TranslationProviderImpl::OpenAI(client) => {
                let request = OpenAIRequest::new(&self.model)
                    .add_message("system", &self.system_prompt)
                    .add_message("user", text)
                    .temperature(self.temperature);
                client.complete(request).await.map(|response| OpenAI::extract_text(&response))
            },
        };

        let translated = result.map_err(|e| TranslationError::service(self.language.code, e.to_string()))?;

        if translated.is_empty() {
            return Err(TranslationError::service(self.language.code, "Provider returned an empty translation"));
        }

        self.cache.store(text, &self.source_language, self.language.code, &translated);
        Ok(translated)
    }
}
