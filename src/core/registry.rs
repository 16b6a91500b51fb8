//! # Layer Registry
//!
//! Read-only view over the configured languages and layers. Order matters:
//! it drives the menu, the language cycle, and the default language
//! (always the first one).

use super::config::{Config, Language, Layer};
use super::locale;

/// Header title when no layer can be resolved.
pub const DEFAULT_TITLE: &str = "CV";

#[derive(Debug, Clone, Default)]
pub struct Registry {
    languages: Vec<Language>,
    layers: Vec<Layer>,
}

impl Registry {
    pub fn new(config: Config) -> Self {
        Self {
            languages: config.langs,
            layers: config.layers,
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn language_count(&self) -> usize {
        self.languages.len()
    }

    /// An out-of-range index reads as the first language.
    fn language(&self, index: usize) -> Option<&Language> {
        self.languages.get(index).or_else(|| self.languages.first())
    }

    /// Trimmed code of the language at `index`, or `""` if none are configured.
    pub fn language_code(&self, index: usize) -> &str {
        self.language(index).map_or("", |lang| lang.code.trim())
    }

    /// Display label of the language at `index`, falling back to its code.
    pub fn language_label(&self, index: usize) -> &str {
        let Some(lang) = self.language(index) else {
            return "";
        };
        let label = lang.label.trim();
        if label.is_empty() {
            lang.code.trim()
        } else {
            label
        }
    }

    pub fn fallback_code(&self) -> &str {
        self.language_code(0)
    }

    /// Case-insensitive key lookup. First match wins; unbound layers never match.
    pub fn index_for_key(&self, key: &str) -> Option<usize> {
        let wanted = key.to_lowercase();
        self.layers
            .iter()
            .position(|layer| !layer.key.is_empty() && layer.key.to_lowercase() == wanted)
    }

    /// The shell command for a layer in the `active` language, trimmed.
    pub fn command_for(&self, index: usize, active: &str) -> &str {
        self.layers.get(index).map_or("", |layer| {
            locale::resolve(&layer.cmd, active, self.fallback_code()).trim()
        })
    }

    /// Menu label: the label, else the title, else `Layer N` (1-based).
    pub fn label_for(&self, index: usize, active: &str) -> String {
        let Some(layer) = self.layers.get(index) else {
            return synthesized_name(index);
        };
        let fallback = self.fallback_code();

        let label = locale::resolve(&layer.label, active, fallback);
        if !label.trim().is_empty() {
            return label.to_string();
        }
        let title = locale::resolve(&layer.title, active, fallback);
        if !title.trim().is_empty() {
            return title.to_string();
        }
        synthesized_name(index)
    }

    /// Header title: the title, else whatever [`label_for`](Self::label_for) gives.
    pub fn title_for(&self, index: usize, active: &str) -> String {
        let Some(layer) = self.layers.get(index) else {
            return DEFAULT_TITLE.to_string();
        };

        let title = locale::resolve(&layer.title, active, self.fallback_code());
        if !title.trim().is_empty() {
            return title.to_string();
        }
        self.label_for(index, active)
    }
}

fn synthesized_name(index: usize) -> String {
    format!("Layer {}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{lang, layer, two_language_config};

    #[test]
    fn test_index_for_key_is_case_insensitive() {
        let registry = Registry::new(two_language_config());
        assert_eq!(registry.index_for_key("a"), Some(0));
        assert_eq!(registry.index_for_key("A"), Some(0));
        assert_eq!(registry.index_for_key("x"), Some(1));
        assert_eq!(registry.index_for_key("z"), None);
    }

    #[test]
    fn test_blank_keys_never_match() {
        let config = Config {
            langs: vec![lang("fr", "")],
            layers: vec![layer("", &[("fr", "ls")]), layer("b", &[("fr", "pwd")])],
        };
        let registry = Registry::new(config);
        assert_eq!(registry.index_for_key(""), None);
        assert_eq!(registry.index_for_key("b"), Some(1));
    }

    #[test]
    fn test_first_matching_key_wins() {
        let config = Config {
            langs: vec![lang("fr", "")],
            layers: vec![layer("a", &[("fr", "one")]), layer("A", &[("fr", "two")])],
        };
        let registry = Registry::new(config);
        assert_eq!(registry.index_for_key("a"), Some(0));
    }

    #[test]
    fn test_command_is_localized_and_trimmed() {
        let config = Config {
            langs: vec![lang("fr", ""), lang("en", "English")],
            layers: vec![layer("a", &[("fr", "  echo bonjour \n"), ("en", "echo hello")])],
        };
        let registry = Registry::new(config);
        assert_eq!(registry.command_for(0, "fr"), "echo bonjour");
        assert_eq!(registry.command_for(0, "en"), "echo hello");
        assert_eq!(registry.command_for(0, "de"), "echo bonjour");
        assert_eq!(registry.command_for(9, "fr"), "");
    }

    #[test]
    fn test_label_falls_back_to_title_then_synthesized() {
        let mut with_title = layer("a", &[]);
        with_title.title.insert("fr".into(), "Expérience".into());
        let mut with_label = layer("b", &[]);
        with_label.label.insert("fr".into(), "XP".into());
        with_label.title.insert("fr".into(), "Expérience pro".into());

        let config = Config {
            langs: vec![lang("fr", "")],
            layers: vec![with_title, with_label, layer("c", &[])],
        };
        let registry = Registry::new(config);

        assert_eq!(registry.label_for(0, "fr"), "Expérience");
        assert_eq!(registry.label_for(1, "fr"), "XP");
        assert_eq!(registry.label_for(2, "fr"), "Layer 3");
    }

    #[test]
    fn test_title_falls_back_through_label() {
        let mut labelled = layer("a", &[]);
        labelled.label.insert("fr".into(), "Profil".into());
        let config = Config {
            langs: vec![lang("fr", "")],
            layers: vec![labelled, layer("b", &[])],
        };
        let registry = Registry::new(config);

        assert_eq!(registry.title_for(0, "fr"), "Profil");
        assert_eq!(registry.title_for(1, "fr"), "Layer 2");
        assert_eq!(registry.title_for(5, "fr"), DEFAULT_TITLE);
    }

    #[test]
    fn test_language_label_falls_back_to_code() {
        let registry = Registry::new(two_language_config());
        assert_eq!(registry.language_label(0), "fr");
        assert_eq!(registry.language_label(1), "English");
        assert_eq!(registry.language_code(1), "en");
        assert_eq!(registry.fallback_code(), "fr");
        // Out of range reads as the first language.
        assert_eq!(registry.language_code(7), "fr");
    }

    #[test]
    fn test_no_languages() {
        let registry = Registry::new(Config::default());
        assert_eq!(registry.language_code(0), "");
        assert_eq!(registry.language_label(0), "");
        assert_eq!(registry.title_for(0, ""), DEFAULT_TITLE);
    }
}
