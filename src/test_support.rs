//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::config::{Config, Language, Layer};
use crate::core::dispatch::{CommandRunner, Outcome};
use crate::core::state::App;

/// A runner that answers from a script instead of spawning processes.
/// Unscripted commands succeed with empty output.
#[derive(Default)]
pub struct ScriptedRunner {
    script: HashMap<String, Outcome>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, command: &str, outcome: Outcome) -> Self {
        self.script.insert(command.to_string(), outcome);
        self
    }

    /// Commands run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn run(&self, command: &str) -> Outcome {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(command.to_string());
        }
        self.script
            .get(command)
            .cloned()
            .unwrap_or_else(|| Outcome::Success(String::new()))
    }
}

pub fn lang(code: &str, label: &str) -> Language {
    Language {
        code: code.to_string(),
        label: label.to_string(),
    }
}

/// A layer with only commands set.
pub fn layer(key: &str, commands: &[(&str, &str)]) -> Layer {
    Layer {
        key: key.to_string(),
        cmd: commands
            .iter()
            .map(|(code, cmd)| (code.to_string(), cmd.to_string()))
            .collect(),
        ..Default::default()
    }
}

/// `fr` (unlabelled) then `en` ("English"); layers `a` and `x`.
pub fn two_language_config() -> Config {
    Config {
        langs: vec![lang("fr", ""), lang("en", "English")],
        layers: vec![
            layer("a", &[("fr", "echo bonjour"), ("en", "echo hello")]),
            layer("x", &[("fr", "cat experience.txt")]),
        ],
    }
}

/// Creates a test App from [`two_language_config`].
pub fn test_app() -> App {
    App::new(two_language_config())
}
