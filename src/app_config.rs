use anyhow::{Result, anyhow, Context};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

use crate::language;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language codes, comma-separated (e.g. "es, fr, ar")
    #[serde(default = "String::new")]
    pub target_languages: String,

    /// Provider config
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Common translation settings
    #[serde(default)]
    pub common: TranslationCommonConfig,

    /// SEO metadata integration to read source values from and mirror
    /// translated values into
    #[serde(default)]
    pub seo: SeoIntegration,

    /// Path of the JSON content store file
    #[serde(default = "default_store_path")]
    pub store_path: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Chat-completion provider configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Model name
    #[serde(default = "default_model")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    // @field: Timeout per request, seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key: String::new(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Common translation settings applicable to every field and language
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationCommonConfig {
    /// System prompt template for short strings (titles, SEO fields)
    /// Placeholders: {language_name}, {language_code}
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// System prompt template for HTML body content. Empty means the
    /// built-in HTML-preserving prompt is used.
    /// Placeholders: {language_name}, {language_code}
    #[serde(default = "String::new")]
    pub html_system_prompt: String,

    /// Temperature parameter for text generation (0.0 to 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum number of tokens per completion
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for TranslationCommonConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            html_system_prompt: String::new(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Which SEO metadata convention the content store carries.
///
/// Selected once at startup; there is no runtime probing for whichever
/// integration happens to be present.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SeoIntegration {
    /// No SEO fields are read or written
    None,
    /// Yoast-style meta keys
    #[default]
    Yoast,
    /// Rank-Math-style meta keys
    RankMath,
}

impl SeoIntegration {
    // @returns: Capitalized integration name
    pub fn display_name(&self) -> &str {
        match self {
            Self::None => "None",
            Self::Yoast => "Yoast",
            Self::RankMath => "Rank Math",
        }
    }
}

impl std::str::FromStr for SeoIntegration {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "yoast" => Ok(Self::Yoast),
            "rankmath" => Ok(Self::RankMath),
            _ => Err(anyhow!("Invalid SEO integration: {}", s)),
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

fn default_source_language() -> String {
    "en".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    90
}

fn default_temperature() -> f32 {
    0.5
}

fn default_max_tokens() -> u32 {
    3000
}

fn default_store_path() -> String {
    "content.json".to_string()
}

fn default_system_prompt() -> String {
    crate::translation::prompts::DEFAULT_SYSTEM_PROMPT.to_string()
}

impl Config {
    /// Load configuration from a JSON file. A missing file yields the
    /// default configuration, written back out so the user has a template
    /// to edit.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            let config = Config::default();
            config.to_file(path)?;
            return Ok(config);
        }
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {:?}", path))?;
        let config: Config = serde_json::from_str(&content)
            .context(format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    /// Save configuration as pretty-printed JSON
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)
            .context(format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Parsed, validated target language code list
    pub fn target_language_codes(&self) -> Vec<String> {
        language::parse_target_languages(&self.target_languages)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        language::validate_language_code(&self.source_language)?;

        if self.provider.api_key.trim().is_empty() {
            return Err(anyhow!("Translation API key is required"));
        }

        if self.provider.endpoint.trim().is_empty() {
            return Err(anyhow!("Provider endpoint must not be empty"));
        }
        url::Url::parse(&self.provider.endpoint)
            .context(format!("Invalid provider endpoint: {}", self.provider.endpoint))?;

        if !(0.0..=1.0).contains(&self.common.temperature) {
            return Err(anyhow!(
                "Temperature must be between 0.0 and 1.0, got {}",
                self.common.temperature
            ));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_languages: String::new(),
            provider: ProviderConfig::default(),
            common: TranslationCommonConfig::default(),
            seo: SeoIntegration::default(),
            store_path: default_store_path(),
            log_level: LogLevel::default(),
        }
    }
}
