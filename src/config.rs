//! Configuration management for nsrtag using the prefer crate.

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Records per chunk; the sink is flushed after each one.
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// Records annotated and written concurrently within a chunk.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Extra attempts for a failed record write.
pub const DEFAULT_WRITE_RETRIES: u32 = 3;

/// Pause between write attempts in milliseconds.
pub const DEFAULT_RETRY_DELAY_MS: u64 = 250;

/// Settings for the keyword annotator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, prefer::FromValue)]
pub struct AnnotationConfig {
    /// Recognize bare mass-number forms such as `16O`.
    /// Disable to accept only explicitly marked forms (`{+16}O`, `^{16}O`).
    #[serde(default = "default_true")]
    #[prefer(default = "true")]
    pub bare_mass_numbers: bool,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            bare_mass_numbers: true,
        }
    }
}

impl AnnotationConfig {
    pub fn with_env_overrides(mut self) -> Self {
        // NSRTAG_BARE_MASS_NUMBERS=0 disables the bare `16O` rule
        if let Ok(value) = env::var("NSRTAG_BARE_MASS_NUMBERS") {
            if let Some(flag) = parse_flag(&value) {
                self.bare_mass_numbers = flag;
            }
        }
        self
    }
}

/// Settings for batch runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, prefer::FromValue)]
pub struct BatchConfig {
    #[serde(default = "default_batch_size")]
    #[prefer(default = "500")]
    pub batch_size: usize,
    #[serde(default = "default_concurrency")]
    #[prefer(default = "8")]
    pub concurrency: usize,
    #[serde(default = "default_write_retries")]
    #[prefer(default = "3")]
    pub write_retries: u32,
    #[serde(default = "default_retry_delay_ms")]
    #[prefer(default = "250")]
    pub retry_delay_ms: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            concurrency: DEFAULT_CONCURRENCY,
            write_retries: DEFAULT_WRITE_RETRIES,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
        }
    }
}

impl BatchConfig {
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(n) = env_parse::<usize>("NSRTAG_BATCH_SIZE").filter(|n| *n > 0) {
            self.batch_size = n;
        }
        if let Some(n) = env_parse::<usize>("NSRTAG_CONCURRENCY").filter(|n| *n > 0) {
            self.concurrency = n;
        }
        if let Some(n) = env_parse::<u32>("NSRTAG_WRITE_RETRIES") {
            self.write_retries = n;
        }
        self
    }
}

fn default_true() -> bool {
    true
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

fn default_write_retries() -> u32 {
    DEFAULT_WRITE_RETRIES
}

fn default_retry_delay_ms() -> u64 {
    DEFAULT_RETRY_DELAY_MS
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, prefer::FromValue)]
pub struct Config {
    /// Annotation engine settings.
    #[serde(default)]
    #[prefer(default)]
    pub annotation: AnnotationConfig,
    /// Batch run settings.
    #[serde(default)]
    #[prefer(default)]
    pub batch: BatchConfig,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    #[prefer(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Automatically discovers nsrtag config files in standard locations.
    pub async fn load() -> Self {
        // Use prefer for file discovery, then parse with serde
        match prefer::load("nsrtag").await {
            Ok(pref_config) => {
                if let Some(path) = pref_config.source_path() {
                    match Self::load_from_path(path).await {
                        Ok(config) => config,
                        Err(e) => {
                            tracing::warn!("ignoring config {}: {}", path.display(), e);
                            Self::default_with_env()
                        }
                    }
                } else {
                    Self::from_prefer(&pref_config).unwrap_or_else(|e| {
                        tracing::warn!("ignoring discovered config: {}", e);
                        Self::default_with_env()
                    })
                }
            }
            Err(_) => {
                // No config file found, use defaults with env overrides
                Self::default_with_env()
            }
        }
    }

    /// Create a default config with environment variable overrides applied.
    pub fn default_with_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Build a config from values prefer has already parsed.
    pub fn from_prefer(pref_config: &prefer::Config) -> Result<Self, String> {
        <Self as prefer::FromValue>::from_value(pref_config.data())
            .map(Self::with_env_overrides)
            .map_err(|e| format!("Failed to read config values: {}", e))
    }

    /// Load configuration from a specific file path.
    /// Supports JSON, TOML, and YAML based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, String> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let mut config = Self::parse(&contents, ext)?;
        config.source_path = Some(path.to_path_buf());
        Ok(config.with_env_overrides())
    }

    /// Parse config contents in the format named by `ext`.
    pub fn parse(contents: &str, ext: &str) -> Result<Self, String> {
        match ext {
            "toml" => toml::from_str(contents)
                .map_err(|e| format!("Failed to parse TOML config: {}", e)),
            "yaml" | "yml" => serde_yaml::from_str(contents)
                .map_err(|e| format!("Failed to parse YAML config: {}", e)),
            _ => serde_json::from_str(contents)
                .map_err(|e| format!("Failed to parse JSON config: {}", e)),
        }
    }

    pub fn with_env_overrides(mut self) -> Self {
        self.annotation = self.annotation.with_env_overrides();
        self.batch = self.batch.with_env_overrides();
        self
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to render config: {}", e))
    }
}

/// Expand `~` and environment variables in a user-supplied path.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    match shellexpand::full(&raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.annotation.bare_mass_numbers);
        assert_eq!(config.batch.batch_size, 500);
        assert_eq!(config.batch.concurrency, 8);
        assert_eq!(config.batch.write_retries, 3);
    }

    #[test]
    fn test_parse_toml_partial() {
        let config = Config::parse(
            "[batch]\nconcurrency = 2\n\n[annotation]\nbare_mass_numbers = false\n",
            "toml",
        )
        .unwrap();
        assert_eq!(config.batch.concurrency, 2);
        assert_eq!(config.batch.batch_size, DEFAULT_BATCH_SIZE);
        assert!(!config.annotation.bare_mass_numbers);
    }

    #[test]
    fn test_parse_yaml() {
        let config = Config::parse("batch:\n  batch_size: 100\n", "yaml").unwrap();
        assert_eq!(config.batch.batch_size, 100);
        assert!(config.annotation.bare_mass_numbers);
    }

    #[test]
    fn test_parse_json_empty_object() {
        let config = Config::parse("{}", "json").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_error_names_format() {
        let err = Config::parse("batch = [", "toml").unwrap_err();
        assert!(err.starts_with("Failed to parse TOML config"));
    }

    #[tokio::test]
    async fn test_load_from_path_records_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nsrtag.toml");
        std::fs::write(&path, "[batch]\nwrite_retries = 0\n").unwrap();

        let config = Config::load_from_path(&path).await.unwrap();
        assert_eq!(config.source_path.as_deref(), Some(path.as_path()));
    }

    #[tokio::test]
    async fn test_load_from_missing_path() {
        let err = Config::load_from_path(Path::new("/nonexistent/nsrtag.toml"))
            .await
            .unwrap_err();
        assert!(err.starts_with("Failed to read config file"));
    }

    #[test]
    fn test_from_prefer_values() {
        use std::collections::HashMap;

        use prefer::ConfigValue;

        let batch = HashMap::from([("concurrency".to_string(), ConfigValue::Integer(2))]);
        let annotation = HashMap::from([(
            "bare_mass_numbers".to_string(),
            ConfigValue::Bool(false),
        )]);
        let data = ConfigValue::Object(HashMap::from([
            ("batch".to_string(), ConfigValue::Object(batch)),
            ("annotation".to_string(), ConfigValue::Object(annotation)),
        ]));

        let config = Config::from_prefer(&prefer::Config::new(data)).unwrap();
        assert_eq!(config.batch.concurrency, 2);
        assert_eq!(config.batch.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(config.batch.retry_delay_ms, DEFAULT_RETRY_DELAY_MS);
        assert!(!config.annotation.bare_mass_numbers);
        assert_eq!(config.source_path, None);
    }

    #[test]
    fn test_from_prefer_empty_object_is_default() {
        let data = prefer::ConfigValue::Object(std::collections::HashMap::new());
        let config = Config::from_prefer(&prefer::Config::new(data)).unwrap();
        assert_eq!(config.batch, BatchConfig::default());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" 0 "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_to_toml_round_trips_settings() {
        let mut config = Config::default();
        config.batch.concurrency = 3;
        let rendered = config.to_toml().unwrap();
        assert_eq!(Config::parse(&rendered, "toml").unwrap(), config);
    }
}
