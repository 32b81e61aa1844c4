//! Configuration for the YouTube API key, target channel and output file
//!
//! Loads configuration from config.yml file

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default output file, written into the working directory.
pub const OUTPUT_FILE: &str = "uytm_player_subs.json";

/// Comment threads per page; 100 is the API maximum.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// YAML config structures
#[derive(Debug, Deserialize)]
struct YamlConfig {
    youtube: Option<YouTubeSection>,
    output: Option<OutputSection>,
    limits: Option<LimitsSection>,
}

#[derive(Debug, Default, Deserialize)]
struct YouTubeSection {
    api_key: Option<String>,
    channel_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct OutputSection {
    path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LimitsSection {
    page_size: Option<u32>,
    max_pages: Option<usize>,
}

/// Main configuration struct
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub channel_id: String,
    pub output_path: PathBuf,
    pub page_size: u32,
    pub max_pages: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Load configuration from config.yml or use defaults.
    /// `${VAR}` placeholders and environment variables take precedence
    /// over literal config.yml values.
    pub fn new() -> Self {
        Self::load_from_file("config.yml")
            .or_else(|_| Self::load_from_file("../config.yml"))
            .unwrap_or_else(|_| Self::defaults())
    }

    /// Resolve a value: prefer env var if config value looks like ${VAR}
    fn resolve_env_string(value: Option<String>, env_key: &str) -> String {
        if let Some(ref v) = value {
            if v.starts_with("${") && v.ends_with('}') {
                let var_name = &v[2..v.len() - 1];
                if let Ok(env_val) = std::env::var(var_name) {
                    return env_val;
                }
            } else if !v.is_empty() {
                return v.clone();
            }
        }
        // Fallback: explicit env_key
        if let Ok(env_val) = std::env::var(env_key) {
            return env_val;
        }
        value.unwrap_or_default()
    }

    /// Load .env file into environment variables using dotenvy
    fn load_dotenv() {
        if dotenvy::dotenv().is_err() {
            let _ = dotenvy::from_filename("../.env");
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_dotenv();

        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| Error::ConfigError(format!("Failed to read config file: {}", e)))?;

        let yaml: YamlConfig = serde_yaml::from_str(&content)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config file: {}", e)))?;

        let youtube = yaml.youtube.unwrap_or_default();
        let output = yaml.output.unwrap_or_default();
        let limits = yaml.limits.unwrap_or_default();

        let api_key = Self::resolve_env_string(youtube.api_key, "YOUTUBE_API_KEY");
        let channel_id = Self::resolve_env_string(youtube.channel_id, "YOUTUBE_CHANNEL_ID");

        Ok(Self {
            api_key,
            channel_id,
            output_path: output
                .path
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(OUTPUT_FILE)),
            page_size: normalize_page_size(limits.page_size),
            max_pages: limits.max_pages,
        })
    }

    /// Create config from environment variables only (fallback when no
    /// config.yml is present).
    fn defaults() -> Self {
        Self::load_dotenv();
        Self {
            api_key: std::env::var("YOUTUBE_API_KEY").unwrap_or_default(),
            channel_id: std::env::var("YOUTUBE_CHANNEL_ID").unwrap_or_default(),
            output_path: PathBuf::from(OUTPUT_FILE),
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: None,
        }
    }

    /// Fail early when the API key is missing.
    pub fn require_api_key(&self) -> Result<&str> {
        if self.api_key.trim().is_empty() {
            return Err(Error::ConfigError(
                "API key not configured; set youtube.api_key in config.yml or YOUTUBE_API_KEY"
                    .to_string(),
            ));
        }
        Ok(&self.api_key)
    }
}

/// Clamp the configured page size to the API's 1..=100 range.
fn normalize_page_size(page_size: Option<u32>) -> u32 {
    page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, 100)
}
