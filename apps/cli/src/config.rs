use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use lltrade_market_data::{CodeListerConfig, SinaConfig, DEFAULT_PAGE_SIZE};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_FILE_PREFIX: &str = "lltrade";
pub const DEFAULT_LOG_MAX_FILES: usize = 5;

/// Where and how log events are written.
#[derive(Clone, Debug, PartialEq)]
pub struct LogConfig {
    pub format: LogFormat,
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    /// Copy events to stderr
    pub console: bool,
    /// Daily rotated log files go here; no file output when `None`
    pub dir: Option<PathBuf>,
    pub file_prefix: String,
    /// Rotated files kept before the oldest is deleted
    pub max_files: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            level: DEFAULT_LOG_LEVEL.to_string(),
            console: true,
            dir: None,
            file_prefix: DEFAULT_LOG_FILE_PREFIX.to_string(),
            max_files: DEFAULT_LOG_MAX_FILES,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub sina: SinaConfig,
    pub lister: CodeListerConfig,
    pub log: LogConfig,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup. Unset and blank values
    /// fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut sina = SinaConfig::default();
        if let Some(url) = var("LLT_QUOTE_URL") {
            sina.quote_url = url;
        }
        if let Some(url) = var("LLT_LISTING_URL") {
            sina.listing_url = url;
        }
        sina.request_timeout = match var("LLT_REQUEST_TIMEOUT_MS") {
            Some(raw) => {
                let ms: u64 = raw
                    .parse()
                    .with_context(|| format!("Invalid LLT_REQUEST_TIMEOUT_MS: {raw}"))?;
                (ms > 0).then(|| Duration::from_millis(ms))
            }
            None => None,
        };

        let page_size = match var("LLT_PAGE_SIZE") {
            Some(raw) => {
                let size: usize = raw
                    .parse()
                    .with_context(|| format!("Invalid LLT_PAGE_SIZE: {raw}"))?;
                if size == 0 {
                    bail!("LLT_PAGE_SIZE must be positive");
                }
                size
            }
            None => DEFAULT_PAGE_SIZE,
        };
        let lister = CodeListerConfig {
            page_size,
            output_dir: var("LLT_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
        };

        let format = match var("LLT_LOG_FORMAT") {
            Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
            Some(f) if f.eq_ignore_ascii_case("text") => LogFormat::Text,
            Some(f) => bail!("Invalid LLT_LOG_FORMAT: {f} (expected text or json)"),
            None => LogFormat::Text,
        };
        let console = match var("LLT_LOG_CONSOLE") {
            Some(raw) => parse_flag(&raw)
                .with_context(|| format!("Invalid LLT_LOG_CONSOLE: {raw}"))?,
            None => true,
        };
        let max_files = match var("LLT_LOG_MAX_FILES") {
            Some(raw) => {
                let count: usize = raw
                    .parse()
                    .with_context(|| format!("Invalid LLT_LOG_MAX_FILES: {raw}"))?;
                if count == 0 {
                    bail!("LLT_LOG_MAX_FILES must be positive");
                }
                count
            }
            None => DEFAULT_LOG_MAX_FILES,
        };
        let log = LogConfig {
            format,
            level: var("LLT_LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            console,
            dir: var("LLT_LOG_DIR").map(PathBuf::from),
            file_prefix: var("LLT_LOG_FILE")
                .unwrap_or_else(|| DEFAULT_LOG_FILE_PREFIX.to_string()),
            max_files,
        };

        Ok(Self { sina, lister, log })
    }
}

fn parse_flag(raw: &str) -> anyhow::Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => bail!("expected true or false"),
    }
}
