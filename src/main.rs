// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::app_config::{Config, LlmProvider};
use app_controller::Controller;

mod app_config;
mod timecode;
mod intervals;
mod subtitle;
mod llm;
mod providers;
mod extraction;
mod translation;
mod transcribe;
mod media;
mod app_controller;
mod file_utils;
mod language_utils;
mod errors;

/// CLI Wrapper for LlmProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLlmProvider {
    OpenAI,
    Gemini,
}

impl From<CliLlmProvider> for LlmProvider {
    fn from(cli_provider: CliLlmProvider) -> Self {
        match cli_provider {
            CliLlmProvider::OpenAI => LlmProvider::OpenAI,
            CliLlmProvider::Gemini => LlmProvider::Gemini,
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
    /// Cut a video down to its important scenes and burn on subtitles (default command)
    #[command(alias = "process")]
    Clip(ClipArgs),

    /// Transcribe a video to SRT with whisper
    Transcribe(TranscribeArgs),

    /// Generate shell completions for clipsift
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ClipArgs {
    /// Input video file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// LLM provider to use for scene extraction
    #[arg(short, long, value_enum)]
    provider: Option<CliLlmProvider>,

    /// Model name to use with the provider
    #[arg(short, long)]
    model: Option<String>,

    /// Target language for subtitle translation (e.g. 'en', 'ja', 'ko')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Output directory for trimmed and subtitled clips
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Subtitle font size
    #[arg(long)]
    font_size: Option<u32>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct TranscribeArgs {
    /// Input video file to transcribe
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Whisper model name (tiny, base, small, medium, large)
    #[arg(short, long)]
    whisper_model: Option<String>,

    /// Spoken language hint (e.g. 'en', 'ja'); omit for auto-detection
    #[arg(long)]
    language: Option<String>,

    /// Output directory for the SRT file
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// clipsift - LLM-assisted video clipping
///
/// Asks an LLM which scenes of a video matter, trims the video down to the
/// span covering them, and burns the scene text back on as subtitles.
#[derive(Parser, Debug)]
#[command(name = "clipsift")]
#[command(version)]
#[command(about = "Cut a video down to its important scenes with an LLM")]
#[command(long_about = "clipsift asks an LLM for the important scenes of a video, trims the video \
down to the span covering them, optionally translates the scene texts, and burns them back on as subtitles.

EXAMPLES:
    clipsift talk.mp4                           # Clip using default config
    clipsift -p openai -m gpt-4o talk.mp4       # Use specific provider and model
    clipsift -t en talk.mp4                     # Translate subtitles to English
    clipsift transcribe talk.mp4                # Whisper transcription to SRT
    clipsift --log-level debug /videos/         # Process entire directory with debug logging
    clipsift completions bash > clipsift.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.

SUPPORTED PROVIDERS:
    openai - OpenAI API (requires OPENAI_API_KEY)
    gemini - Google Gemini API, sees the actual footage (requires GOOGLE_API_KEY)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input video file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// LLM provider to use for scene extraction
    #[arg(short, long, value_enum)]
    provider: Option<CliLlmProvider>,

    /// Model name to use with the provider
    #[arg(short, long)]
    model: Option<String>,

    /// Target language for subtitle translation (e.g. 'en', 'ja', 'ko')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Output directory for trimmed and subtitled clips
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Subtitle font size
    #[arg(long)]
    font_size: Option<u32>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
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
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "clipsift", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Clip(args)) => run_clip(args).await,
        Some(Commands::Transcribe(args)) => run_transcribe(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;

            let clip_args = ClipArgs {
                input_path,
                provider: cli.provider,
                model: cli.model,
                target_language: cli.target_language,
                output_dir: cli.output_dir,
                font_size: cli.font_size,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_clip(clip_args).await
        }
    }
}

/// Load the config file (creating a default one when missing) and apply the
/// CLI log-level override
fn load_config(config_path: &str, log_level: &Option<CliLogLevel>) -> Result<Config> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    let config = if Path::new(config_path).exists() {
        Config::from_file(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();
        config.save(config_path)
            .with_context(|| format!("Failed to write default config to file: {}", config_path))?;
        config
    };

    Ok(config)
}

/// Map a config log level onto the log crate's filter
fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

async fn run_clip(options: ClipArgs) -> Result<()> {
    let mut config = load_config(&options.config_path, &options.log_level)?;

    // Override config with CLI options if provided
    if let Some(provider) = &options.provider {
        config.llm.provider = provider.clone().into();
    }

    if let Some(model) = &options.model {
        // Find the provider config and update the model
        let provider_str = config.llm.provider.to_lowercase_string();
        if let Some(provider_config) = config.llm.available_providers.iter_mut()
            .find(|p| p.provider_type == provider_str) {
            provider_config.model = model.clone();
        }
    }

    if let Some(target_language) = &options.target_language {
        config.target_language = Some(target_language.clone());
    }

    if let Some(output_dir) = &options.output_dir {
        config.output_dir = output_dir.clone();
    }

    if let Some(font_size) = options.font_size {
        config.subtitle_style.font_size = font_size;
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    let controller = Controller::with_config(config)?;

    if options.input_path.is_file() {
        controller.run_clip(&options.input_path).await?;
    } else if options.input_path.is_dir() {
        controller.run_clip_folder(&options.input_path).await?;
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    Ok(())
}

async fn run_transcribe(options: TranscribeArgs) -> Result<()> {
    let mut config = load_config(&options.config_path, &options.log_level)?;

    if let Some(whisper_model) = &options.whisper_model {
        config.transcription.model = whisper_model.clone();
    }

    if let Some(language) = &options.language {
        config.transcription.language = Some(language.clone());
    }

    if let Some(output_dir) = &options.output_dir {
        config.output_dir = output_dir.clone();
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Transcription does not need an LLM API key; only the whisper model
    // name needs checking
    config.transcription.validate()?;

    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    let controller = Controller::with_config(config)?;

    if !options.input_path.is_file() {
        return Err(anyhow!("Input path is not a file: {:?}", options.input_path));
    }
    controller.run_transcribe(&options.input_path).await?;

    Ok(())
}
