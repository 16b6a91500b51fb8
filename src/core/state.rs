//! # Application State
//!
//! Core session state for Termfolio. This module contains domain logic only -
//! no TUI-specific types. Scroll offsets live in the `tui` module.
//!
//! ```text
//! App
//! ├── registry: Registry            // languages + layers (immutable)
//! ├── active_layer: usize           // layer shown in the viewport
//! ├── active_language: usize        // index into the language cycle
//! ├── layer_output: Vec<String>     // one slot per layer, kept across switches
//! ├── viewport: Option<Viewport>    // None until the first resize
//! ├── content: String               // what the viewport currently shows
//! └── has_overflow_x: bool          // some line is wider than the viewport
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use super::config::Config;
use super::layout::{self, MenuBlock};
use super::registry::Registry;

/// Placeholder while a layer's command is in flight.
pub const LOADING_TEXT: &str = "Chargement...";
/// Shown when the config has no layers at all.
pub const NO_LAYERS_TEXT: &str = "Aucun layer defini";
/// Shown when a layer resolved to blank output.
pub const NO_OUTPUT_TEXT: &str = "Aucune sortie";

pub const QUIT_KEY: &str = "q";
pub const QUIT_LABEL: &str = "Quitter";
pub const LANGUAGE_KEY: &str = "L";
pub const VERTICAL_HINT: &str = "haut/bas";
pub const HORIZONTAL_HINT: &str = "gauche/droite";

/// Terminal dimensions and the derived viewport height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
    pub content_height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            content_height: layout::content_height(height),
        }
    }
}

pub struct App {
    pub registry: Registry,
    pub active_layer: usize,
    pub active_language: usize,
    pub layer_output: Vec<String>,
    /// `None` until the terminal reports its size.
    pub viewport: Option<Viewport>,
    pub content: String,
    pub has_overflow_x: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        let registry = Registry::new(config);
        let mut layer_output = vec![String::new(); registry.layer_count()];
        if let Some(first) = layer_output.first_mut() {
            *first = LOADING_TEXT.to_string();
        }

        let mut app = Self {
            registry,
            active_layer: 0,
            active_language: 0,
            layer_output,
            viewport: None,
            content: String::new(),
            has_overflow_x: false,
        };
        app.refresh_content();
        app
    }

    pub fn is_ready(&self) -> bool {
        self.viewport.is_some()
    }

    pub fn language_code(&self) -> &str {
        self.registry.language_code(self.active_language)
    }

    pub fn language_label(&self) -> &str {
        self.registry.language_label(self.active_language)
    }

    /// Command for a layer in the active language.
    pub fn command_for(&self, index: usize) -> &str {
        self.registry.command_for(index, self.language_code())
    }

    pub fn title(&self) -> String {
        self.registry.title_for(self.active_layer, self.language_code())
    }

    /// Rebuild the viewport text from the active layer's stored output.
    pub fn refresh_content(&mut self) {
        let content = if self.layer_output.is_empty() {
            NO_LAYERS_TEXT.to_string()
        } else if let Some(output) = self.layer_output.get(self.active_layer) {
            let output = output.trim();
            if output.is_empty() {
                NO_OUTPUT_TEXT.to_string()
            } else {
                output.to_string()
            }
        } else {
            return;
        };

        let width = self.viewport.map_or(0, |v| v.width);
        self.has_overflow_x = layout::has_horizontal_overflow(&content, width);
        self.content = content;
    }

    pub fn total_lines(&self) -> usize {
        layout::line_count(&self.content)
    }

    pub fn visible_lines(&self) -> usize {
        self.viewport.map_or(0, |v| usize::from(v.content_height))
    }

    /// The footer menu, in display order: one block per layer, quit,
    /// language, then scroll hints when the content does not fit.
    pub fn menu_blocks(&self) -> Vec<MenuBlock> {
        let code = self.language_code();
        let mut blocks: Vec<MenuBlock> = self
            .registry
            .layers()
            .iter()
            .enumerate()
            .map(|(index, layer)| MenuBlock::new(layer.key.clone(), self.registry.label_for(index, code)))
            .collect();

        blocks.push(MenuBlock::new(QUIT_KEY, QUIT_LABEL));

        let language = self.language_label();
        if !language.is_empty() {
            blocks.push(MenuBlock::new(LANGUAGE_KEY, language));
        }
        if self.total_lines() > self.visible_lines() {
            blocks.push(MenuBlock::new(" ", VERTICAL_HINT));
        }
        if self.has_overflow_x {
            blocks.push(MenuBlock::new(" ", HORIZONTAL_HINT));
        }
        blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_app, two_language_config};

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.active_layer, 0);
        assert_eq!(app.active_language, 0);
        assert!(!app.is_ready());
        assert_eq!(app.layer_output, vec![LOADING_TEXT.to_string(), String::new()]);
        assert_eq!(app.content, LOADING_TEXT);
    }

    #[test]
    fn test_no_layers_content() {
        let app = App::new(Config::default());
        assert_eq!(app.content, NO_LAYERS_TEXT);
        assert!(app.layer_output.is_empty());
    }

    #[test]
    fn test_blank_output_shows_placeholder() {
        let mut app = test_app();
        app.layer_output[0] = "  \n ".into();
        app.refresh_content();
        assert_eq!(app.content, NO_OUTPUT_TEXT);
    }

    #[test]
    fn test_menu_blocks_order() {
        let app = App::new(two_language_config());
        let blocks = app.menu_blocks();
        let keys: Vec<&str> = blocks.iter().map(|b| b.key.as_str()).collect();
        // Not ready yet: zero visible lines, so the vertical hint shows.
        assert_eq!(keys, vec!["a", "x", "q", "L", " "]);
        assert_eq!(blocks[2].label, QUIT_LABEL);
        assert_eq!(blocks[3].label, "fr");
        assert_eq!(blocks[4].label, VERTICAL_HINT);
    }

    #[test]
    fn test_menu_hints_follow_content() {
        let mut app = test_app();
        app.viewport = Some(Viewport::new(10, 10));
        app.layer_output[0] = "short".into();
        app.refresh_content();
        assert!(!app.menu_blocks().iter().any(|b| b.key == " "));

        app.layer_output[0] = format!("{}\n1\n2\n3\n4\n5", "w".repeat(11));
        app.refresh_content();
        let labels: Vec<String> = app.menu_blocks().into_iter().map(|b| b.label).collect();
        assert!(labels.contains(&VERTICAL_HINT.to_string()));
        assert!(labels.contains(&HORIZONTAL_HINT.to_string()));
    }
}
