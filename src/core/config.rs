//! # Configuration
//!
//! The portfolio is described by a single YAML file passed with `--config`:
//! an ordered list of languages and an ordered list of layers.
//!
//! ```yaml
//! langs:
//!   - code: fr
//!     label: Français
//!   - code: en
//!     label: English
//! layers:
//!   - key: a
//!     cmd:   { fr: "cat about.fr.txt", en: "cat about.en.txt" }
//!     title: { fr: "À propos", en: "About" }
//!     label: { fr: "Profil", en: "Profile" }
//! ```
//!
//! Loading fails if either list is empty or a language has a blank code.
//! Once loaded the config is never mutated.

use log::{debug, info};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// Text keyed by language code. Sorted by code, which is the order the
/// resolver falls back through when neither the active nor the default
/// language has a value.
pub type Localized = BTreeMap<String, String>;

// ============================================================================
// Config Structs
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub langs: Vec<Language>,
    #[serde(default)]
    pub layers: Vec<Layer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Language {
    pub code: String,
    /// Display name in the menu. Falls back to `code` when blank.
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Layer {
    /// Key binding, matched case-insensitively. Blank means unbound.
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub cmd: Localized,
    #[serde(default)]
    pub title: Localized,
    #[serde(default)]
    pub label: Localized,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_yaml::Error),
    NoLayers,
    NoLanguages,
    BlankLanguageCode(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::NoLayers => write!(f, "aucun layer defini"),
            ConfigError::NoLanguages => write!(f, "aucune langue definie"),
            ConfigError::BlankLanguageCode(index) => {
                write!(f, "langue sans code a l'index {index}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Read, parse and validate the config file at `path`.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config = parse(&contents)?;
    info!(
        "Loaded config from {} ({} languages, {} layers)",
        path.display(),
        config.langs.len(),
        config.layers.len()
    );
    Ok(config)
}

/// Parse and validate a YAML document.
pub fn parse(contents: &str) -> Result<Config, ConfigError> {
    let config: Config = serde_yaml::from_str(contents).map_err(ConfigError::Parse)?;
    debug!("Config: {:?}", config);
    config.validate()?;
    Ok(config)
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.layers.is_empty() {
            return Err(ConfigError::NoLayers);
        }
        if self.langs.is_empty() {
            return Err(ConfigError::NoLanguages);
        }
        if let Some(index) = self
            .langs
            .iter()
            .position(|lang| lang.code.trim().is_empty())
        {
            return Err(ConfigError::BlankLanguageCode(index));
        }
        Ok(())
    }
}
