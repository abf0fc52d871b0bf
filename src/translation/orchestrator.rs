/*!
 * Per-language document translation.
 *
 * Every target language gets its own session and its own output document.
 * Blocks within a language are translated strictly in source order; languages
 * are independent and may run concurrently up to a configured limit.
 */

use futures::stream::{self, StreamExt, TryStreamExt};
use log::{debug, info};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use crate::document::{SourceDocument, TranslatedDocument};
use crate::errors::TranslationError;
use crate::language_utils::TargetLanguage;
use super::core::{LanguageTranslator, TranslationBackend};

/// Outcome of translating a document into one language
pub type LanguageOutcome = (TargetLanguage, Result<TranslatedDocument, TranslationError>);

/// Drives a backend over a source document for a set of languages
pub struct DocumentTranslator<'a, B: TranslationBackend> {
    backend: &'a B,
    concurrent_languages: usize,
}

impl<'a, B: TranslationBackend> DocumentTranslator<'a, B> {
    /// Create a translator that processes one language at a time
    pub fn new(backend: &'a B) -> Self {
        Self {
            backend,
            concurrent_languages: 1,
        }
    }

    /// Allow up to `limit` languages to be translated at the same time
    pub fn with_concurrency(mut self, limit: usize) -> Self {
        self.concurrent_languages = limit.max(1);
        self
    }

    /// Translate the document into every language, stopping at the first failure
    ///
    /// Documents are returned in the order of `languages`.
    pub async fn translate_all(
        &self,
        document: &SourceDocument,
        languages: &[TargetLanguage],
        progress_callback: impl Fn(usize, usize) + Send + Sync,
    ) -> Result<Vec<TranslatedDocument>, TranslationError> {
        let progress = ProgressCounter::new(document.len() * languages.len(), &progress_callback);

        let mut translated: Vec<(usize, TranslatedDocument)> = stream::iter(languages.iter().enumerate())
            .map(|(index, language)| {
                let progress = &progress;
                async move {
                    self.translate_language(document, language, progress)
                        .await
                        .map(|doc| (index, doc))
                }
            })
            .buffer_unordered(self.concurrent_languages)
            .try_collect()
            .await?;

        translated.sort_by_key(|(index, _)| *index);
        Ok(translated.into_iter().map(|(_, doc)| doc).collect())
    }

    /// Translate the document into every language, keeping going after failures
    ///
    /// One outcome per language is returned, in the order of `languages`.
    pub async fn translate_each(
        &self,
        document: &SourceDocument,
        languages: &[TargetLanguage],
        progress_callback: impl Fn(usize, usize) + Send + Sync,
    ) -> Vec<LanguageOutcome> {
        let progress = ProgressCounter::new(document.len() * languages.len(), &progress_callback);

        let mut outcomes: Vec<(usize, LanguageOutcome)> = stream::iter(languages.iter().enumerate())
            .map(|(index, language)| {
                let progress = &progress;
                async move {
                    let result = self.translate_language(document, language, progress).await;
                    (index, (*language, result))
                }
            })
            .buffer_unordered(self.concurrent_languages)
            .collect()
            .await;

        outcomes.sort_by_key(|(index, _)| *index);
        outcomes.into_iter().map(|(_, outcome)| outcome).collect()
    }

    async fn translate_language(
        &self,
        document: &SourceDocument,
        language: &TargetLanguage,
        progress: &ProgressCounter<'_>,
    ) -> Result<TranslatedDocument, TranslationError> {
        let start_time = Instant::now();
        let session = self.backend.load(language).await?;

        let mut translated = TranslatedDocument::with_capacity(*language, document.len());

        for (index, block) in document.blocks().iter().enumerate() {
            let text = if block.trim().is_empty() {
                block.clone()
            } else {
                session.translate(block).await.map_err(|e| {
                    debug!("Paragraph {} failed for {}: {}", index + 1, language, e);
                    e
                })?
            };

            translated.push_block(text);
            progress.tick();
        }

        info!("Translated {} paragraphs into {} in {:.1}s", translated.len(), language, start_time.elapsed().as_secs_f64());
        Ok(translated)
    }
}

/// Shared completed-block counter feeding the progress callback
struct ProgressCounter<'a> {
    completed: AtomicUsize,
    total: usize,
    callback: &'a (dyn Fn(usize, usize) + Send + Sync),
}

impl<'a> ProgressCounter<'a> {
    fn new(total: usize, callback: &'a (dyn Fn(usize, usize) + Send + Sync)) -> Self {
        Self {
            completed: AtomicUsize::new(0),
            total,
            callback,
        }
    }

    fn tick(&self) {
        let current = self.completed.fetch_add(1, Ordering::SeqCst) + 1;
        (self.callback)(current, self.total);
    }
}
