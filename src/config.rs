//! Runtime configuration for the `ingest-eval` binary.
//!
//! Priority: CLI flags > environment variables > config file > defaults.

use crate::Result;
use crate::sniff::{DEFAULT_SNIFF_LIMIT, MAX_SNIFF_SAMPLES};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "INGEST_EVAL_CONFIG";
pub const SAMPLES_DIR_ENV: &str = "INGEST_EVAL_SAMPLES_DIR";
pub const LOG_ENV: &str = "INGEST_EVAL_LOG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Root holding one sub-directory of `*.log` files per corpus.
    pub samples_dir: PathBuf,
    pub sniff_limit: usize,
    pub log_level: String,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            samples_dir: PathBuf::from("log_samples"),
            sniff_limit: DEFAULT_SNIFF_LIMIT,
            log_level: "info".to_string(),
        }
    }
}

impl EvalConfig {
    /// Load from `path` (or `INGEST_EVAL_CONFIG`) if the file exists, then
    /// apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        let mut config = match path {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };

        if let Some(dir) = std::env::var_os(SAMPLES_DIR_ENV) {
            config.samples_dir = PathBuf::from(dir);
        }
        if let Ok(level) = std::env::var(LOG_ENV) {
            config.log_level = level;
        }

        Ok(config.normalized())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parse config file {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: EvalConfig = toml::from_str(text)?;
        Ok(config.normalized())
    }

    fn normalized(mut self) -> Self {
        self.sniff_limit = self.sniff_limit.clamp(1, MAX_SNIFF_SAMPLES);
        self
    }
}
