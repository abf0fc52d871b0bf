use log::{error, warn, info, debug};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::document::{self, SourceDocument, TranslatedDocument};
use crate::errors::{AppError, DocumentError};
use crate::file_utils::{FileManager, FileType};
use crate::language_utils::{self, TargetLanguage};
use crate::translation::{DocumentTranslator, TranslationBackend, TranslationService};

// @module: Application controller for document translation

/// What the user asked for: a document, languages and a destination
#[derive(Debug, Clone, Default)]
pub struct TranslationRequest {
    // @field: Uploaded document, if any
    pub document: Option<PathBuf>,
    // @field: Selected language names (or codes)
    pub languages: Vec<String>,
    // @field: Directory the translated documents are written to
    pub output_dir: PathBuf,
}

/// Result of a translation run
#[derive(Debug, Clone, Default)]
pub struct TranslationReport {
    // @field: Written documents per language, in selection order
    pub outputs: Vec<(TargetLanguage, PathBuf)>,
    // @field: Languages that failed when failures are isolated
    pub failures: Vec<(TargetLanguage, String)>,
    // @field: Wall time of the whole run
    pub elapsed: Duration,
}

impl TranslationReport {
    /// Path written for a language code
    pub fn output_for(&self, code: &str) -> Option<&PathBuf> {
        self.outputs.iter()
            .find(|(language, _)| language.code == code)
            .map(|(_, path)| path)
    }

    /// Whether every selected language was written
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Main application controller for document translation
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Validate the request, then load the configuration and build a controller
    ///
    /// The configuration is only touched once the request is known to be
    /// complete, so a missing document never creates or reads a config file.
    pub fn prepare<F>(request: &TranslationRequest, load_config: F) -> Result<Self, AppError>
    where
        F: FnOnce() -> anyhow::Result<Config>,
    {
        Self::validate_request(request)?;

        let config = load_config().map_err(|e| AppError::Config(format!("{:#}", e)))?;
        Self::with_config(config).map_err(|e| AppError::Config(format!("validation failed: {:#}", e)))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Validate a request without touching the file system
    ///
    /// Checks run in this order: document present, at least one language,
    /// every language known.
    pub fn validate_request(request: &TranslationRequest) -> Result<(PathBuf, Vec<TargetLanguage>), AppError> {
        let document_path = request.document.clone().ok_or(AppError::DocumentRequired)?;

        if request.languages.is_empty() {
            return Err(AppError::NoLanguages);
        }

        let languages = language_utils::resolve_selection(&request.languages)?;

        Ok((document_path, languages))
    }

    /// Run the main workflow with the configured translation service
    pub async fn run(&self, request: TranslationRequest) -> Result<TranslationReport, AppError> {
        Self::validate_request(&request)?;

        let service = TranslationService::new(self.config.translation.clone(), &self.config.source_language)?;

        info!("docxlate: {} - {}",
            self.config.translation.provider.display_name(),
            self.config.translation.get_model());

        let report = self.run_with_backend(&service, request).await?;

        let stats = service.cache.stats();
        if stats.hits > 0 {
            debug!("Reused {} cached paragraph translations ({:.0}% hit rate)", stats.hits, stats.hit_rate() * 100.0);
        }

        Ok(report)
    }

    /// Run the main workflow with any translation backend
    pub async fn run_with_backend<B: TranslationBackend>(&self, backend: &B, request: TranslationRequest) -> Result<TranslationReport, AppError> {
        let start_time = Instant::now();
        let (document_path, languages) = Self::validate_request(&request)?;

        for language in &languages {
            if !language_utils::has_standard_code(language) {
                warn!("{} uses the non-standard code '{}', output will be named {}",
                    language.name, language.code, document::output_file_name(language));
            }
        }

        let source = Self::load_source(&document_path)?;
        info!("Loaded {} paragraphs ({} non-blank) from {}",
            source.len(), source.non_blank_count(), document_path.display());

        let progress_bar = Self::create_progress_bar((source.len() * languages.len()) as u64);
        let pb = progress_bar.clone();
        let on_progress = move |completed: usize, _total: usize| pb.set_position(completed as u64);

        let common = &self.config.translation.common;
        let translator = DocumentTranslator::new(backend)
            .with_concurrency(common.concurrent_languages);

        let mut report = TranslationReport::default();

        if common.isolate_failures {
            let outcomes = translator.translate_each(&source, &languages, on_progress).await;
            progress_bar.finish_and_clear();

            let mut first_error: Option<AppError> = None;
            for (language, outcome) in outcomes {
                let written = outcome
                    .map_err(AppError::from)
                    .and_then(|doc| Self::save_translated_document(&doc, &request.output_dir));

                match written {
                    Ok(path) => report.outputs.push((language, path)),
                    Err(e) => {
                        error!("{} failed: {}", language, e);
                        report.failures.push((language, e.to_string()));
                        first_error.get_or_insert(e);
                    }
                }
            }

            if report.outputs.is_empty() {
                if let Some(e) = first_error {
                    return Err(e);
                }
            }
        } else {
            let translated = translator.translate_all(&source, &languages, on_progress).await;
            progress_bar.finish_and_clear();

            report.outputs = Self::save_all_or_nothing(&translated?, &request.output_dir)?;
        }

        report.elapsed = start_time.elapsed();

        for (language, path) in &report.outputs {
            info!("Translated {}: {}", language.name, path.display());
        }
        if report.is_complete() {
            info!("Translation completed in {}. Output files saved successfully.", Self::format_duration(report.elapsed));
        } else {
            warn!("Translation completed in {} with {} failed language(s).",
                Self::format_duration(report.elapsed), report.failures.len());
        }

        Ok(report)
    }

    /// Read the input document, rejecting formats that cannot be parsed
    fn load_source(path: &Path) -> Result<SourceDocument, AppError> {
        match FileManager::detect_file_type(path) {
            Ok(FileType::LegacyWordDocument) => {
                return Err(DocumentError::Parse(format!(
                    "{} is a legacy .doc file, save it as .docx first", path.display()
                )).into());
            },
            Ok(FileType::Unknown) => {
                warn!("{} does not look like a .docx file, trying anyway", path.display());
            },
            Ok(FileType::WordDocument) | Err(_) => {}
        }

        Ok(document::read_document(path)?)
    }

    /// Save one translated document into the output directory
    fn save_translated_document(doc: &TranslatedDocument, output_dir: &Path) -> Result<PathBuf, AppError> {
        let path = document::write_document(doc, output_dir)?;
        Ok(path)
    }

    /// Save every translated document, or none of them
    ///
    /// All packages are rendered before the first write. If a write fails,
    /// the files already written by this call are removed again.
    fn save_all_or_nothing(docs: &[TranslatedDocument], output_dir: &Path) -> Result<Vec<(TargetLanguage, PathBuf)>, AppError> {
        let packages = docs.iter()
            .map(|doc| document::render_docx(doc.blocks()).map(|bytes| (doc.language, bytes)))
            .collect::<Result<Vec<_>, DocumentError>>()?;

        let mut written: Vec<(TargetLanguage, PathBuf)> = Vec::with_capacity(packages.len());
        for (language, bytes) in &packages {
            match document::write_package(language, bytes, output_dir) {
                Ok(path) => {
                    debug!("Wrote {} to {}", language, path.display());
                    written.push((*language, path));
                },
                Err(e) => {
                    for (_, path) in &written {
                        if let Err(remove_error) = FileManager::remove_file(path) {
                            warn!("Could not remove partial output {}: {:#}", path.display(), remove_error);
                        }
                    }
                    return Err(e.into());
                }
            }
        }

        Ok(written)
    }

    fn create_progress_bar(total_blocks: u64) -> ProgressBar {
        let progress_bar = ProgressBar::new(total_blocks);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} paragraphs ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.set_message("Translating");
        progress_bar
    }

    // Format duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
