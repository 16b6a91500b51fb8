//! # Actions
//!
//! Everything that can happen in Termfolio becomes an `Action`.
//! User presses `a`? That's `Action::KeyPressed("a")`.
//! A layer's command finishes? That's `Action::LayerResult(result)`.
//!
//! The `update()` function takes the current state and an action,
//! mutates the state, and returns an `Effect` describing any I/O the
//! caller must perform. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Results from superseded dispatches are still applied: output is stored
//! per layer, so a late result for a layer the user left is kept for when
//! they come back. If two dispatches for one layer are in flight, the one
//! that lands last wins.

use log::{debug, info};

use super::dispatch::{LayerResult, Outcome};
use super::state::{App, LOADING_TEXT, Viewport};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A printable key, as typed (`"a"`, `"L"`, ...).
    KeyPressed(String),
    /// Ctrl+C.
    Interrupt,
    Resize { width: u16, height: u16 },
    LayerResult(LayerResult),
}

/// Side effect requested by `update()`, performed by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    /// Run `command` and report back with `Action::LayerResult`.
    Dispatch { layer_index: usize, command: String },
}

/// The effect to run once at startup: load the first layer eagerly.
pub fn init(app: &App) -> Effect {
    if app.registry.layer_count() == 0 {
        return Effect::None;
    }
    dispatch_effect(app, app.active_layer)
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Interrupt => {
            info!("Interrupt received, quitting");
            Effect::Quit
        }
        Action::KeyPressed(key) => handle_key(app, &key),
        Action::Resize { width, height } => {
            if app.viewport.is_none() {
                info!("Terminal ready at {}x{}", width, height);
            } else {
                debug!("Terminal resized to {}x{}", width, height);
            }
            app.viewport = Some(Viewport::new(width, height));
            app.refresh_content();
            Effect::None
        }
        Action::LayerResult(result) => {
            apply_result(app, result);
            Effect::None
        }
    }
}

fn handle_key(app: &mut App, key: &str) -> Effect {
    match key {
        "q" => {
            info!("Quit requested");
            Effect::Quit
        }
        "L" | "l" => {
            let count = app.registry.language_count();
            if count == 0 {
                return Effect::None;
            }
            app.active_language = (app.active_language + 1) % count;
            info!("Language switched to {}", app.language_code());

            let index = app.active_layer;
            if index < app.layer_output.len() {
                reload(app, index)
            } else {
                Effect::None
            }
        }
        _ => match app.registry.index_for_key(key) {
            Some(index) => {
                debug!("Key {:?} selects layer {}", key, index);
                app.active_layer = index;
                reload(app, index)
            }
            None => Effect::None,
        },
    }
}

/// Show the loading placeholder for `index` and ask for a fresh run.
fn reload(app: &mut App, index: usize) -> Effect {
    app.layer_output[index] = LOADING_TEXT.to_string();
    app.refresh_content();
    dispatch_effect(app, index)
}

fn dispatch_effect(app: &App, index: usize) -> Effect {
    Effect::Dispatch {
        layer_index: index,
        command: app.command_for(index).to_string(),
    }
}

fn apply_result(app: &mut App, result: LayerResult) {
    let index = result.layer_index;
    let Some(slot) = app.layer_output.get_mut(index) else {
        debug!("Dropping result for unknown layer {}", index);
        return;
    };

    *slot = match result.outcome {
        Outcome::Success(output) => output,
        Outcome::Failure { error, output } => {
            let mut message = format!("Erreur: {error}");
            if !output.trim().is_empty() {
                message.push('\n');
                message.push_str(&output);
            }
            message
        }
    };

    if index == app.active_layer {
        app.refresh_content();
    }
}
