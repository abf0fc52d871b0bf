// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use docxlate::app_config::{self, Config, TranslationProvider};
use docxlate::app_controller::{Controller, TranslationRequest};
use docxlate::language_utils;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Ollama,
    #[value(name = "openai")]
    OpenAI,
    #[value(name = "lmstudio")]
    LMStudio,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Ollama => TranslationProvider::Ollama,
            CliTranslationProvider::OpenAI => TranslationProvider::OpenAI,
            CliTranslationProvider::LMStudio => TranslationProvider::LMStudio,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a Word document (default command)
    Translate(TranslateArgs),

    /// List the supported target languages
    Languages,

    /// Generate shell completions for docxlate
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
struct TranslateArgs {
    /// Word document (.docx) to translate
    #[arg(value_name = "DOCUMENT")]
    document: Option<PathBuf>,

    /// Target language name or code, repeat or comma-separate for several
    #[arg(short, long = "language", value_delimiter = ',')]
    languages: Vec<String>,

    /// Directory the translated documents are written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use, `{code}` is replaced by the language code
    #[arg(short, long)]
    model: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Write the languages that succeeded even if another one failed
    #[arg(short, long)]
    keep_going: bool,
}

/// docxlate - Word document translator
///
/// Translates every paragraph of a Word document into one or more languages
/// and writes one translated_<code>.docx per language.
#[derive(Parser, Debug)]
#[command(name = "docxlate")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
#[command(about = "Translate Word documents into several languages")]
#[command(long_about = "docxlate reads the paragraphs of a .docx file, translates them with an AI provider and writes one document per language.

EXAMPLES:
    docxlate report.docx -l Spanish -l German        # translated_es.docx, translated_de.docx
    docxlate report.docx -l es,fr -o out/             # Write into out/
    docxlate -p openai -m gpt-4o-mini report.docx -l Italian
    docxlate languages                                # List supported languages
    docxlate completions bash > docxlate.bash         # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    translate: TranslateArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        // Trace here so later set_max_level calls can raise verbosity
        log::set_boxed_logger(Box::new(CustomLogger::new(LevelFilter::Trace)))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                Self::get_color_for_level(record.level()),
                now, Self::get_emoji_for_level(record.level()), record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Level is lowered or raised once the config is known
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "docxlate", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Languages) => {
            print_languages();
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => run_translate(cli.translate).await,
    }
}

fn print_languages() {
    for language in language_utils::supported_languages() {
        let note = if language_utils::has_standard_code(&language) {
            ""
        } else {
            "  (not the ISO 639 code)"
        };
        println!("{:<10} {}{}", language.name, language.code, note);
    }
}

/// Load the config file or create it with defaults, then apply CLI overrides
fn load_config(options: &TranslateArgs) -> Result<Config> {
    let mut config = Config::load_or_create(Path::new(&options.config_path))?;

    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }

    if let Some(model) = &options.model {
        config.translation.set_model(model);
    }

    if let Some(output_dir) = &options.output_dir {
        config.output_directory = output_dir.clone();
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    if options.keep_going {
        config.translation.common.isolate_failures = true;
    }

    Ok(config)
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    // If log level is set via command line, apply it before loading the config
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut request = TranslationRequest {
        document: options.document.clone(),
        languages: options.languages.clone(),
        output_dir: PathBuf::new(),
    };

    // The request is validated before the config file is read or created
    let controller = Controller::prepare(&request, || load_config(&options))?;
    log::set_max_level(controller.config().log_level.to_level_filter());
    request.output_dir = controller.config().output_directory.clone();

    let report = controller.run(request).await?;

    for (language, reason) in &report.failures {
        eprintln!("Failed {}: {}", language.name, reason);
    }

    if !report.is_complete() {
        return Err(anyhow!("{} of {} languages failed",
            report.failures.len(), report.failures.len() + report.outputs.len()));
    }

    Ok(())
}
