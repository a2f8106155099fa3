use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::course::progress::{PracticeMode, UnlockRequirements};
use crate::engine::scoring::{AdvanceThresholds, ScoreOptions};
use crate::generator::TextLength;
use crate::keyboard::matcher::KeyMatching;
use crate::session::attempt::AttemptRules;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub practice: PracticeConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub scoring: ScoreOptions,
    #[serde(default)]
    pub advance: AdvanceThresholds,
    #[serde(default)]
    pub unlock: UnlockRequirements,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PracticeConfig {
    #[serde(default)]
    pub mode: PracticeMode,
    #[serde(default = "default_letters_length")]
    pub letters_length: usize,
    /// Overrides `letters_length` when set; clamped to 10..=1000.
    #[serde(default)]
    pub letters_custom_length: Option<usize>,
    /// Empty means every bundled letter.
    #[serde(default)]
    pub selected_letters: Vec<String>,
    #[serde(default)]
    pub paragraph: String,
    #[serde(default = "default_common_length")]
    pub common_length: usize,
    /// Overrides `common_length` when set; clamped to 10..=500.
    #[serde(default)]
    pub common_custom_length: Option<usize>,
    #[serde(default)]
    pub lesson_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_allow_backspace")]
    pub allow_backspace: bool,
    #[serde(default)]
    pub key_matching: KeyMatching,
}

fn default_letters_length() -> usize {
    50
}
fn default_common_length() -> usize {
    30
}
fn default_allow_backspace() -> bool {
    true
}

impl Default for PracticeConfig {
    fn default() -> Self {
        Self {
            mode: PracticeMode::default(),
            letters_length: default_letters_length(),
            letters_custom_length: None,
            selected_letters: Vec::new(),
            paragraph: String::new(),
            common_length: default_common_length(),
            common_custom_length: None,
            lesson_id: None,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            allow_backspace: default_allow_backspace(),
            key_matching: KeyMatching::default(),
        }
    }
}

impl PracticeConfig {
    pub fn letters_length(&self) -> TextLength {
        match self.letters_custom_length {
            Some(n) => TextLength::Custom(n),
            None => TextLength::Preset(self.letters_length),
        }
    }

    pub fn common_length(&self) -> TextLength {
        match self.common_custom_length {
            Some(n) => TextLength::Custom(n),
            None => TextLength::Preset(self.common_length),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Defaults when `path` does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

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
            .join("ezhuthu")
            .join("config.toml")
    }

    pub fn attempt_rules(&self) -> AttemptRules {
        AttemptRules {
            allow_backspace: self.input.allow_backspace,
            scoring: self.scoring,
            advance: self.advance,
        }
    }
}
