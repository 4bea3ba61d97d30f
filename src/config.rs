//! YAML configuration.
//!
//! Every field has a default, so the config file is optional and may be
//! partial. Command-line flags override what is loaded here (see
//! [`crate::cli`]).
//!
//! ```yaml
//! fetch:
//!   selector: "article"
//!   timeout_secs: 30
//! text:
//!   min_len: 2             # optional; every word is kept by default
//!   max_len: 15
//!   stop_word_list: nltk     # or: iso
//!   extra_stop_words: ["said"]
//! cloud:
//!   width: 800
//!   height: 400
//!   max_words: 200
//! api:
//!   base_url: "https://api.openai.com/v1"
//!   model: "gpt-4o-mini"
//!   mode: chat               # or: completions
//!   max_tokens: 200
//!   temperature: 0.7
//! ```

use crate::api::CompletionMode;
use crate::error::ConfigError;
use crate::text::normalize::{DEFAULT_MAX_LEN, DEFAULT_MIN_LEN};
use crate::text::{Normalizer, StopWordList, StopWordSet};
use serde::Deserialize;
use std::fmt;
use tracing::{info, instrument};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetch: FetchConfig,
    pub text: TextConfig,
    pub cloud: CloudConfig,
    pub api: ApiConfig,
}

/// How articles are downloaded and where their text lives in the page.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub user_agent: String,
    /// CSS selector of the element holding the article body.
    pub selector: String,
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            selector: "article".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    pub min_len: usize,
    pub max_len: usize,
    pub stop_word_list: StopWordList,
    pub extra_stop_words: Vec<String>,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            min_len: DEFAULT_MIN_LEN,
            max_len: DEFAULT_MAX_LEN,
            stop_word_list: StopWordList::default(),
            extra_stop_words: Vec::new(),
        }
    }
}

/// Hints for the external word-cloud renderer.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    pub width: u32,
    pub height: u32,
    pub max_words: usize,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            max_words: 200,
        }
    }
}

/// OpenAI-compatible completion API settings.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub model: String,
    pub mode: CompletionMode,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Falls back to `OPENAI_API_KEY` when unset.
    pub api_key: Option<String>,
    pub max_retries: usize,
    pub base_delay_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            mode: CompletionMode::default(),
            max_tokens: 200,
            temperature: 0.7,
            api_key: None,
            max_retries: 5,
            base_delay_ms: 1000,
        }
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("mode", &self.mode)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("max_retries", &self.max_retries)
            .field("base_delay_ms", &self.base_delay_ms)
            .finish()
    }
}

impl Config {
    /// Parse a configuration from YAML text.
    pub fn from_yaml(yaml: &str, path: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    /// The normalizer described by the `text` section.
    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(self.text.min_len, self.text.max_len)
    }

    /// The stop-word set described by the `text` section.
    pub fn stop_words(&self) -> StopWordSet {
        StopWordSet::from_list(self.text.stop_word_list).with_extra(&self.text.extra_stop_words)
    }
}

/// Load configuration from `path`, or defaults when no path is given.
#[instrument(level = "info")]
pub async fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let Some(path) = path else {
        info!("No config file given; using defaults");
        return Ok(Config::default());
    };
    let yaml = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
    let config = Config::from_yaml(&yaml, path)?;
    info!(path, "Loaded configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.fetch.selector, "article");
        assert_eq!(config.cloud.width, 800);
        assert_eq!(config.cloud.height, 400);
        assert_eq!(config.api.model, "gpt-4o-mini");
        assert_eq!(config.api.max_tokens, 200);
        assert_eq!(config.api.mode, CompletionMode::Chat);
        assert_eq!(config.normalizer(), Normalizer::default());
        assert_eq!(config.stop_words().len(), 127);
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = r#"
text:
  stop_word_list: iso
  extra_stop_words: ["said", "Reuters"]
api:
  mode: completions
  temperature: 0.2
"#;
        let config = Config::from_yaml(yaml, "test.yaml").unwrap();
        assert_eq!(config.text.stop_word_list, StopWordList::Iso);
        assert_eq!(config.text.min_len, DEFAULT_MIN_LEN);
        assert_eq!(config.text.max_len, DEFAULT_MAX_LEN);
        assert_eq!(config.api.mode, CompletionMode::Completions);
        assert_eq!(config.api.model, "gpt-4o-mini");
        assert!((config.api.temperature - 0.2).abs() < f32::EPSILON);
        assert!(config.stop_words().contains("reuters"));
        assert_eq!(config.fetch.timeout_secs, 30);
    }

    #[test]
    fn test_length_bounds_from_yaml() {
        let yaml = "text:\n  min_len: 2\n  max_len: 15\n";
        let config = Config::from_yaml(yaml, "test.yaml").unwrap();
        assert_eq!(config.normalizer(), Normalizer::new(2, 15));
        assert_eq!(config.normalizer().normalize("I saw a cat"), vec!["saw", "cat"]);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = Config::from_yaml("{}", "empty.yaml").unwrap();
        assert_eq!(config.fetch.selector, "article");
    }

    #[test]
    fn test_invalid_yaml() {
        let err = Config::from_yaml("text: [unclosed", "bad.yaml").unwrap_err();
        assert!(err.to_string().starts_with("failed to parse config file bad.yaml"));
    }

    #[test]
    fn test_api_key_redacted_in_debug() {
        let api = ApiConfig {
            api_key: Some("sk-secret".to_string()),
            ..ApiConfig::default()
        };
        let debug = format!("{api:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[tokio::test]
    async fn test_load_without_path() {
        let config = load_config(None).await.unwrap();
        assert_eq!(config.api.base_url, "https://api.openai.com/v1");
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = load_config(Some("/nonexistent/news_taster.yaml"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
