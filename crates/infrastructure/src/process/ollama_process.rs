//! Wrapper around the `ollama` executable
//!
//! `serve` is spawned and forgotten; `pull` is run to completion while its
//! output is streamed line by line.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info, instrument, warn};

/// Errors from running the server executable
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The executable does not exist
    #[error("Executable not found at '{}'", .0.display())]
    NotFound(PathBuf),

    /// The executable could not be started for another reason
    #[error("Failed to start '{}': {reason}", .executable.display())]
    Spawn { executable: PathBuf, reason: String },

    /// Reading output or waiting for exit failed
    #[error("I/O error while running '{}': {reason}", .executable.display())]
    Io { executable: PathBuf, reason: String },

    /// The process exited unsuccessfully
    #[error("'{command}' exited with {status}")]
    Failed { command: String, status: String },
}

/// Handle on the server executable
#[derive(Debug, Clone)]
pub struct OllamaProcess {
    executable: PathBuf,
}

impl OllamaProcess {
    /// Use the executable at `executable`
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Path of the executable
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    fn spawn_error(&self, e: &std::io::Error) -> ProcessError {
        if e.kind() == std::io::ErrorKind::NotFound {
            ProcessError::NotFound(self.executable.clone())
        } else {
            ProcessError::Spawn {
                executable: self.executable.clone(),
                reason: e.to_string(),
            }
        }
    }

    fn io_error(&self, e: &std::io::Error) -> ProcessError {
        ProcessError::Io {
            executable: self.executable.clone(),
            reason: e.to_string(),
        }
    }

    /// Start `{exe} serve` in the background
    ///
    /// The child gets null stdio and its own process group, and its handle
    /// is dropped without killing it. Returns the pid when known.
    #[instrument(skip(self), fields(executable = %self.executable.display()))]
    pub fn launch(&self) -> Result<Option<u32>, ProcessError> {
        let mut cmd = Command::new(&self.executable);
        cmd.arg("serve")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(false);
        // Keep terminal signals aimed at the CLI away from the server
        #[cfg(unix)]
        cmd.process_group(0);

        let child = cmd.spawn().map_err(|e| self.spawn_error(&e))?;
        let pid = child.id();
        drop(child);

        info!(pid, "Spawned server process");
        Ok(pid)
    }

    /// Run `{exe} pull {model}` to completion
    ///
    /// stdout and stderr are read concurrently until both are closed. Every
    /// non-empty line is passed to `on_line` as soon as it arrives, decoded
    /// lossily and with terminal escapes removed; lines redrawn in place are
    /// reduced to their latest segment. A stream that fails to read is
    /// closed without stopping the pull. Returns the number of forwarded lines.
    #[instrument(skip(self, on_line), fields(executable = %self.executable.display()))]
    pub async fn pull<F>(&self, model: &str, mut on_line: F) -> Result<usize, ProcessError>
    where
        F: FnMut(&str) + Send,
    {
        let mut child = Command::new(&self.executable)
            .arg("pull")
            .arg(model)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.spawn_error(&e))?;

        let missing = || ProcessError::Io {
            executable: self.executable.clone(),
            reason: "output pipe not captured".to_string(),
        };
        let mut stdout = BufReader::new(child.stdout.take().ok_or_else(missing)?);
        let mut stderr = BufReader::new(child.stderr.take().ok_or_else(missing)?);

        // Partial lines survive a losing select branch
        let mut stdout_buf = Vec::new();
        let mut stderr_buf = Vec::new();
        let mut stdout_open = true;
        let mut stderr_open = true;
        let mut forwarded = 0usize;

        while stdout_open || stderr_open {
            let line = tokio::select! {
                read = stdout.read_until(b'\n', &mut stdout_buf), if stdout_open => {
                    stdout_open = stream_open(read, "stdout");
                    std::mem::take(&mut stdout_buf)
                },
                read = stderr.read_until(b'\n', &mut stderr_buf), if stderr_open => {
                    stderr_open = stream_open(read, "stderr");
                    std::mem::take(&mut stderr_buf)
                },
            };

            if let Some(text) = progress_text(&String::from_utf8_lossy(&line)) {
                on_line(&text);
                forwarded += 1;
            }
        }

        let status = child.wait().await.map_err(|e| self.io_error(&e))?;
        debug!(%status, forwarded, "Pull process exited");

        if status.success() {
            Ok(forwarded)
        } else {
            warn!(%status, model, "Pull failed");
            Err(ProcessError::Failed {
                command: format!("{} pull {model}", self.executable.display()),
                status: status.to_string(),
            })
        }
    }
}

/// Whether a stream can still be read after `read`
fn stream_open(read: std::io::Result<usize>, stream: &str) -> bool {
    match read {
        Ok(0) => false,
        Ok(_) => true,
        Err(e) => {
            warn!(error = %e, stream, "Stopped reading pull output");
            false
        },
    }
}

/// Latest visible text of one output line, if any
fn progress_text(line: &str) -> Option<String> {
    strip_ansi(line)
        .rsplit('\r')
        .map(str::trim)
        .find(|segment| !segment.is_empty())
        .map(str::to_string)
}

/// Remove terminal escape sequences
///
/// A cursor-to-column move (`ESC [ n G`) becomes `\r` so in-place redraws
/// split like carriage returns do.
fn strip_ansi(line: &str) -> Cow<'_, str> {
    if !line.contains('\x1b') {
        return Cow::Borrowed(line);
    }

    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        if c != '\x1b' {
            out.push(c);
            continue;
        }
        match chars.next() {
            // CSI: parameters up to a final byte in '@'..='~'
            Some('[') => {
                if chars.by_ref().find(|c| ('@'..='~').contains(c)) == Some('G') {
                    out.push('\r');
                }
            },
            // OSC: up to BEL or ESC \
            Some(']') => {
                if chars.by_ref().find(|c| matches!(c, '\x07' | '\x1b')) == Some('\x1b') {
                    chars.next();
                }
            },
            _ => {},
        }
    }
    Cow::Owned(out)
}
