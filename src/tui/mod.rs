//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard events into core::Action values, and performs the
//! effects `update()` asks for.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! One thread owns `App`. Each pass:
//!
//! 1. Draw, if anything changed since the last frame.
//! 2. Wait up to 100ms for terminal input, then drain everything pending.
//! 3. Drain finished dispatches from the result channel.
//!
//! Commands run as tokio tasks and report back through the channel, so a
//! slow or hung command never stalls input handling. Leaving the loop
//! drops the runtime, which kills any shell still running.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crate::core::action::{Action, Effect, init, update};
use crate::core::config::Config;
use crate::core::dispatch::{self, CommandRunner, ShellRunner};
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::ViewportState;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub viewport: ViewportState,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            viewport: ViewportState::new(),
        }
    }
}

/// Run the viewer until the user quits. Must be called from inside a
/// tokio runtime.
pub fn run(config: Config) -> std::io::Result<()> {
    let runner: Arc<dyn CommandRunner> = Arc::new(ShellRunner);
    let mut app = App::new(config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut app, &mut tui, runner);
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    tui: &mut TuiState,
    runner: Arc<dyn CommandRunner>,
) -> std::io::Result<()> {
    // Channel for results from dispatch tasks
    let (tx, rx) = mpsc::channel();

    perform(init(app), &runner, &tx);

    // The terminal does not announce its initial size, so feed it in as
    // the first resize.
    let size = terminal.size()?;
    update(
        app,
        Action::Resize {
            width: size.width,
            height: size.height,
        },
    );

    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, app, tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(POLL_TIMEOUT)?;
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut pending = first_event;
        while let Some(event) = pending {
            let action = match event {
                TuiEvent::Interrupt => Some(Action::Interrupt),
                TuiEvent::Key(key) => Some(Action::KeyPressed(key)),
                TuiEvent::Resize(width, height) => Some(Action::Resize { width, height }),
                scroll => {
                    tui.viewport.handle_event(&scroll);
                    None
                }
            };

            if let Some(action) = action
                && perform(update(app, action), &runner, &tx)
            {
                info!("Leaving event loop");
                return Ok(());
            }
            pending = poll_event_immediate()?;
        }

        // Handle results from finished dispatches
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            update(app, action);
        }
    }
}

/// Carry out an effect. Returns true when the app should exit.
fn perform(effect: Effect, runner: &Arc<dyn CommandRunner>, tx: &mpsc::Sender<Action>) -> bool {
    match effect {
        Effect::None => false,
        Effect::Quit => true,
        Effect::Dispatch {
            layer_index,
            command,
        } => {
            spawn_dispatch(layer_index, command, Arc::clone(runner), tx.clone());
            false
        }
    }
}

fn spawn_dispatch(
    layer_index: usize,
    command: String,
    runner: Arc<dyn CommandRunner>,
    tx: mpsc::Sender<Action>,
) {
    info!("Spawning dispatch for layer {}", layer_index);
    tokio::spawn(async move {
        let result = dispatch::dispatch(runner.as_ref(), &command, layer_index).await;
        if tx.send(Action::LayerResult(result)).is_err() {
            warn!(
                "Failed to send result for layer {}: receiver dropped",
                layer_index
            );
        }
    });
}
