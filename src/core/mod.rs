//! # Core Application Logic
//!
//! This module contains Termfolio's presentation engine.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No terminal. Pure.     │
//!                    └───────────┬─────────────┘
//!                                │ Effect::Dispatch
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │  ── Action::LayerResult ─│  Dispatch  │
//!     │  Adapter   │                          │  (sh -c)   │
//!     │ (ratatui)  │                          │            │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`]: The YAML schema, loading and validation
//! - [`ansi`]: Splits coloured command output into styled runs
//! - [`locale`]: Picks the text to show for the active language
//! - [`registry`]: Languages and layers, with key and text lookups
//! - [`dispatch`]: Runs a layer's shell command off the event loop
//! - [`layout`]: Pure sizing math for the header, viewport and menu strip
//! - [`state`]: The `App` struct — all session state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer

pub mod action;
pub mod ansi;
pub mod config;
pub mod dispatch;
pub mod layout;
pub mod locale;
pub mod registry;
pub mod state;
