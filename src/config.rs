use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::lab::calc::NumberPolicy;
use crate::lab::constants::{MAX_CASES, MIN_CASES};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Prefilled into the case count field; 0 leaves it empty.
    #[serde(default = "default_case_count")]
    pub default_case_count: usize,
    #[serde(default = "default_strict_numbers")]
    pub strict_numbers: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_case_count() -> usize {
    1
}
fn default_strict_numbers() -> bool {
    true
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_file() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("condlab")
        .join("condlab.log")
        .to_string_lossy()
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            default_case_count: default_case_count(),
            strict_numbers: default_strict_numbers(),
            log_level: default_log_level(),
            log_file: default_log_file(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let mut config: Config = toml::from_str(&content)
                .with_context(|| format!("failed to parse {}", path.display()))?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    #[allow(dead_code)]
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("condlab")
            .join("config.toml")
    }

    pub fn number_policy(&self) -> NumberPolicy {
        NumberPolicy::from_strict(self.strict_numbers)
    }

    /// Text to prefill the count field with.
    pub fn case_count_text(&self) -> String {
        if self.default_case_count == 0 {
            String::new()
        } else {
            self.default_case_count.to_string()
        }
    }

    /// Clamp values a hand-edited file may have pushed out of range.
    pub fn normalize(&mut self) {
        if self.default_case_count != 0 {
            self.default_case_count = self.default_case_count.clamp(MIN_CASES, MAX_CASES);
        }
        if self.log_level.trim().is_empty() {
            self.log_level = default_log_level();
        }
    }
}
