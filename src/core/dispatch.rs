//! # Command Dispatch
//!
//! Turns a layer's command into a tagged result. The actual process work
//! sits behind [`CommandRunner`] so the event loop never blocks on it and
//! tests can script the outcome.
//!
//! ```text
//! Effect::Dispatch ──▶ dispatch() ──▶ runner.run("sh -c ...") ──▶ LayerResult
//!                          │
//!                          └── blank command: EmptyCommand, nothing spawned
//! ```

use std::fmt;
use std::os::fd::OwnedFd;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tokio::net::unix::pipe;
use tokio::process::Command;
use log::{debug, info, warn};

/// Why a dispatch did not produce clean output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The layer has no command for the active language.
    EmptyCommand,
    /// The shell could not be started or its output could not be read.
    Spawn(String),
    /// The shell exited with a non-zero code, or `None` if killed by a signal.
    Exit(Option<i32>),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::EmptyCommand => write!(f, "commande vide"),
            DispatchError::Spawn(msg) => write!(f, "lancement impossible: {msg}"),
            DispatchError::Exit(Some(code)) => write!(f, "exit status {code}"),
            DispatchError::Exit(None) => write!(f, "interrompu par un signal"),
        }
    }
}

impl std::error::Error for DispatchError {}

/// How a dispatch ended. Output captured before a failure is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(String),
    Failure { error: DispatchError, output: String },
}

/// A dispatch outcome tagged with the layer that asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerResult {
    pub layer_index: usize,
    pub outcome: Outcome,
}

/// Runs one command to completion and reports combined stdout+stderr.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    fn name(&self) -> &str;

    async fn run(&self, command: &str) -> Outcome;
}

/// Dispatch `command` on behalf of layer `layer_index`.
pub async fn dispatch(runner: &dyn CommandRunner, command: &str, layer_index: usize) -> LayerResult {
    let outcome = if command.trim().is_empty() {
        debug!("Layer {} has an empty command, nothing to run", layer_index);
        Outcome::Failure {
            error: DispatchError::EmptyCommand,
            output: String::new(),
        }
    } else {
        info!("Running layer {} via {}: {}", layer_index, runner.name(), command);
        runner.run(command).await
    };

    match &outcome {
        Outcome::Success(output) => {
            debug!("Layer {} succeeded ({} bytes)", layer_index, output.len())
        }
        Outcome::Failure { error, output } => {
            warn!("Layer {} failed: {} ({} bytes captured)", layer_index, error, output.len())
        }
    }

    LayerResult { layer_index, outcome }
}

/// Runs commands with `sh -c`, stdout and stderr merged into one stream.
pub struct ShellRunner;

#[async_trait]
impl CommandRunner for ShellRunner {
    fn name(&self) -> &str {
        "sh"
    }

    async fn run(&self, command: &str) -> Outcome {
        run_shell(command).await
    }
}

/// Spawn `sh -c command` and wait for it. Both output streams share one
/// pipe so the text keeps the order the command wrote it in. The child is
/// killed if this future is dropped, so quitting never waits on a command.
async fn run_shell(command: &str) -> Outcome {
    let spawn_failure = |e: std::io::Error| Outcome::Failure {
        error: DispatchError::Spawn(e.to_string()),
        output: String::new(),
    };

    let (reader, writer) = match std::io::pipe() {
        Ok(pair) => pair,
        Err(e) => return spawn_failure(e),
    };
    let writer_for_stderr = match writer.try_clone() {
        Ok(w) => w,
        Err(e) => return spawn_failure(e),
    };

    // The Command owns the write ends; it must be dropped before reading
    // or the reader never sees EOF.
    let spawned = Command::new("sh")
        .arg("-c")
        .arg(command)
        .stdin(Stdio::null())
        .stdout(writer)
        .stderr(writer_for_stderr)
        .kill_on_drop(true)
        .spawn();
    let mut child = match spawned {
        Ok(child) => child,
        Err(e) => return spawn_failure(e),
    };

    let mut reader = match pipe::Receiver::from_owned_fd(OwnedFd::from(reader)) {
        Ok(reader) => reader,
        Err(e) => return spawn_failure(e),
    };

    let mut bytes = Vec::new();
    let read_result = reader.read_to_end(&mut bytes).await;
    let output = trim_trailing_newlines(String::from_utf8_lossy(&bytes).into_owned());

    let status = match child.wait().await {
        Ok(status) => status,
        Err(e) => {
            return Outcome::Failure {
                error: DispatchError::Spawn(e.to_string()),
                output,
            };
        }
    };

    if let Err(e) = read_result {
        return Outcome::Failure {
            error: DispatchError::Spawn(e.to_string()),
            output,
        };
    }

    if status.success() {
        Outcome::Success(output)
    } else {
        Outcome::Failure {
            error: DispatchError::Exit(status.code()),
            output,
        }
    }
}

fn trim_trailing_newlines(mut text: String) -> String {
    let trimmed_len = text.trim_end_matches('\n').len();
    text.truncate(trimmed_len);
    text
}
