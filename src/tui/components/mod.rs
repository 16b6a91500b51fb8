//! # TUI Components
//!
//! One component per screen band:
//!
//! ```text
//! components/
//! ├── mod.rs       (this file)
//! ├── header.rs    (active layer title, stateless)
//! ├── viewport.rs  (scrollable layer output, stateful)
//! └── menu.rs      (key → label strip, stateless)
//! ```
//!
//! Components receive external data as props (struct fields) rather than
//! reading `App` directly, so each can be rendered against a `TestBackend`
//! in isolation.

pub mod header;
pub mod menu;
pub mod viewport;

pub use header::Header;
pub use menu::Menu;
pub use viewport::{Viewport, ViewportState};
