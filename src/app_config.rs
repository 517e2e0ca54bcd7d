use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::{Path, PathBuf};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// LLM config used for scene extraction and translation
    #[serde(default)]
    pub llm: LlmConfig,

    /// Subtitle rendering style
    #[serde(default)]
    pub subtitle_style: SubtitleStyle,

    /// Whisper transcription config
    #[serde(default)]
    pub transcription: TranscriptionConfig,

    /// Target language for segment translation (ISO 639-1); None disables translation
    #[serde(default)]
    pub target_language: Option<String>,

    /// Directory where trimmed and subtitled clips are written
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// LLM provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    // @provider: OpenAI
    OpenAI,
    // @provider: Google Gemini (can look at the video itself)
    #[default]
    Gemini,
}

impl LlmProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::OpenAI => "OpenAI",
            Self::Gemini => "Gemini",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::OpenAI => "openai".to_string(),
            Self::Gemini => "gemini".to_string(),
        }
    }

    /// Whether the provider accepts the video file itself as request media
    pub fn supports_media(&self) -> bool {
        matches!(self, Self::Gemini)
    }

    /// Environment variable holding the API key for this provider
    pub fn api_key_env_var(&self) -> &str {
        match self {
            Self::OpenAI => "OPENAI_API_KEY",
            Self::Gemini => "GOOGLE_API_KEY",
        }
    }
}

// Implement Display trait for LlmProvider
impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for LlmProvider
impl std::str::FromStr for LlmProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "gemini" => Ok(Self::Gemini),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key (falls back to the provider env var when blank)
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Request timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Max tokens the model may generate
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: LlmProvider) -> Self {
        match provider_type {
            LlmProvider::OpenAI => Self {
                provider_type: "openai".to_string(),
                model: default_openai_model(),
                api_key: String::new(),
                endpoint: default_openai_endpoint(),
                timeout_secs: default_timeout_secs(),
                max_output_tokens: default_max_output_tokens(),
            },
            LlmProvider::Gemini => Self {
                provider_type: "gemini".to_string(),
                model: default_gemini_model(),
                api_key: String::new(),
                endpoint: default_gemini_endpoint(),
                timeout_secs: default_gemini_timeout_secs(),
                max_output_tokens: default_max_output_tokens(),
            },
        }
    }
}

/// LLM service configuration shared by scene extraction and translation
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LlmConfig {
    /// LLM provider to use
    #[serde(default)]
    pub provider: LlmProvider,

    /// Available provider configurations
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// Temperature parameter for generation (0.0 to 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl LlmConfig {
    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        let provider_str = self.provider.to_lowercase_string();
        self.available_providers.iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.model.is_empty() {
                return provider_config.model.clone();
            }
        }

        match self.provider {
            LlmProvider::OpenAI => default_openai_model(),
            LlmProvider::Gemini => default_gemini_model(),
        }
    }

    /// Get the API key for the active provider, falling back to the
    /// provider's environment variable when the config value is blank
    pub fn get_api_key(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.api_key.is_empty() {
                return provider_config.api_key.clone();
            }
        }

        std::env::var(self.provider.api_key_env_var()).unwrap_or_default()
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.endpoint.is_empty() {
                return provider_config.endpoint.clone();
            }
        }

        match self.provider {
            LlmProvider::OpenAI => default_openai_endpoint(),
            LlmProvider::Gemini => default_gemini_endpoint(),
        }
    }

    /// Get the request timeout for the active provider
    pub fn get_timeout_secs(&self) -> u64 {
        if let Some(provider_config) = self.get_active_provider_config() {
            if provider_config.timeout_secs > 0 {
                return provider_config.timeout_secs;
            }
        }

        match self.provider {
            LlmProvider::OpenAI => default_timeout_secs(),
            LlmProvider::Gemini => default_gemini_timeout_secs(),
        }
    }

    /// Get the max output tokens for the active provider
    pub fn get_max_output_tokens(&self) -> u32 {
        if let Some(provider_config) = self.get_active_provider_config() {
            if provider_config.max_output_tokens > 0 {
                return provider_config.max_output_tokens;
            }
        }

        default_max_output_tokens()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        let mut config = Self {
            provider: LlmProvider::default(),
            available_providers: Vec::new(),
            temperature: default_temperature(),
        };

        // Add default providers
        config.available_providers.push(ProviderConfig::new(LlmProvider::OpenAI));
        config.available_providers.push(ProviderConfig::new(LlmProvider::Gemini));

        config
    }
}

/// Style applied when burning subtitles onto the clip
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SubtitleStyle {
    /// Font size in points
    #[serde(default = "default_font_size")]
    pub font_size: u32,

    /// Font color (CSS color name or hex)
    #[serde(default = "default_font_color")]
    pub font_color: String,

    /// Outline color
    #[serde(default = "default_stroke_color")]
    pub stroke_color: String,

    /// Outline width in pixels
    #[serde(default = "default_stroke_width")]
    pub stroke_width: u32,

    /// Sentence-break character after whose second occurrence a line break
    /// is inserted
    #[serde(default = "default_break_char")]
    pub break_char: char,
}

impl Default for SubtitleStyle {
    fn default() -> Self {
        Self {
            font_size: default_font_size(),
            font_color: default_font_color(),
            stroke_color: default_stroke_color(),
            stroke_width: default_stroke_width(),
            break_char: default_break_char(),
        }
    }
}

/// Whisper model names accepted by the transcription config
pub const AVAILABLE_WHISPER_MODELS: [&str; 5] = ["tiny", "base", "small", "medium", "large"];

/// Whisper transcription configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TranscriptionConfig {
    /// Whisper model name
    #[serde(default = "default_whisper_model")]
    pub model: String,

    /// Spoken language hint (ISO 639-1); None lets whisper auto-detect
    #[serde(default)]
    pub language: Option<String>,
}

impl TranscriptionConfig {
    /// Validate the whisper model name against the supported list
    pub fn validate(&self) -> Result<()> {
        if !AVAILABLE_WHISPER_MODELS.contains(&self.model.as_str()) {
            return Err(anyhow!(
                "Invalid whisper model: {}. Available: {}",
                self.model,
                AVAILABLE_WHISPER_MODELS.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            model: default_whisper_model(),
            language: None,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_gemini_timeout_secs() -> u64 {
    // Gemini requests may carry the whole video as inline media
    300
}

fn default_max_output_tokens() -> u32 {
    4096
}

fn default_temperature() -> f32 {
    0.2
}

fn default_openai_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_gemini_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_font_size() -> u32 {
    24
}

fn default_font_color() -> String {
    "white".to_string()
}

fn default_stroke_color() -> String {
    "black".to_string()
}

fn default_stroke_width() -> u32 {
    2
}

fn default_break_char() -> char {
    '、'
}

fn default_whisper_model() -> String {
    "base".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output_mp4")
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Default config file location under the user config directory
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("clipsift")
            .join("conf.json")
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate target language when translation is requested
        if let Some(target) = &self.target_language {
            let _target_name = crate::language_utils::get_language_name(target)?;
        }

        // Both supported providers require an API key
        let api_key = self.llm.get_api_key();
        if api_key.is_empty() {
            return Err(anyhow!(
                "API key is required for the {} provider (set it in the config or via {})",
                self.llm.provider.display_name(),
                self.llm.provider.api_key_env_var()
            ));
        }

        // A custom endpoint must at least parse as a URL
        let endpoint = self.llm.get_endpoint();
        if !endpoint.is_empty() {
            url::Url::parse(&endpoint)
                .map_err(|e| anyhow!("Invalid endpoint URL '{}': {}", endpoint, e))?;
        }

        self.transcription.validate()?;

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            llm: LlmConfig::default(),
            subtitle_style: SubtitleStyle::default(),
            transcription: TranscriptionConfig::default(),
            target_language: None,
            output_dir: default_output_dir(),
            log_level: LogLevel::default(),
        }
    }
}
