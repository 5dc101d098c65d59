//! Clipboard backed by a platform copy command reading stdin

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::Clipboard;
use super::error::ClipboardError;
use crate::config::ClipboardConfig;

/// Upper bound on a single copy command
const COMMAND_TIMEOUT: Duration = Duration::from_secs(5);

/// Pipes text to the first copy command that exists on this machine
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    candidates: Vec<Vec<String>>,
    timeout: Duration,
}

impl CommandClipboard {
    /// Use exactly one command
    pub fn new(argv: Vec<String>) -> Self {
        Self {
            candidates: vec![argv],
            timeout: COMMAND_TIMEOUT,
        }
    }

    /// Bound on one command, covering the stdin write and the exit
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Platform defaults, tried in order
    pub fn detect() -> Self {
        let candidates = if cfg!(target_os = "macos") {
            vec![argv(&["pbcopy"])]
        } else if cfg!(target_os = "windows") {
            vec![argv(&["clip"])]
        } else {
            let mut candidates = Vec::new();
            if std::env::var_os("WAYLAND_DISPLAY").is_some() {
                candidates.push(argv(&["wl-copy"]));
            }
            candidates.push(argv(&["xclip", "-selection", "clipboard"]));
            candidates.push(argv(&["xsel", "--clipboard", "--input"]));
            candidates
        };
        debug!(?candidates, "CommandClipboard::detect: candidates");
        Self {
            candidates,
            timeout: COMMAND_TIMEOUT,
        }
    }

    /// Configured command if set, platform defaults otherwise
    pub fn from_config(config: &ClipboardConfig) -> Self {
        match config.command_argv() {
            Some(argv) => Self::new(argv),
            None => Self::detect(),
        }
    }

    async fn run(argv: &[String], text: &str, timeout: Duration) -> Result<(), ClipboardError> {
        let command = argv.join(" ");
        debug!(%command, ?timeout, "CommandClipboard::run: called");

        let mut child = tokio::process::Command::new(&argv[0])
            .args(&argv[1..])
            .stdin(Stdio::piped())
            // Some tools fork and hold inherited pipes open; never wait on them
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ClipboardError::Spawn {
                command: command.clone(),
                source,
            })?;

        // Bound the stdin write as well; a tool that never reads it blocks there
        let interaction = async {
            if let Some(mut stdin) = child.stdin.take() {
                stdin.write_all(text.as_bytes()).await?;
                stdin.shutdown().await?;
            }
            Ok::<_, ClipboardError>(child.wait().await?)
        };
        let outcome = tokio::time::timeout(timeout, interaction).await;

        let status = match outcome {
            Ok(result) => result?,
            Err(_) => {
                debug!(%command, "CommandClipboard::run: timed out, killing");
                let _ = child.kill().await;
                return Err(ClipboardError::Timeout { command, timeout });
            }
        };

        if status.success() {
            debug!(%command, "CommandClipboard::run: succeeded");
            Ok(())
        } else {
            Err(ClipboardError::Exited {
                command,
                code: status.code(),
            })
        }
    }
}

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

#[async_trait]
impl Clipboard for CommandClipboard {
    fn name(&self) -> &str {
        "command"
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        debug!(text_len = text.len(), "CommandClipboard::write_text: called");
        for argv in self.candidates.iter().filter(|argv| !argv.is_empty()) {
            match Self::run(argv, text, self.timeout).await {
                Ok(()) => return Ok(()),
                Err(e) if e.is_missing_command() => {
                    debug!(command = %argv[0], "CommandClipboard::write_text: not installed, trying next");
                }
                Err(e) => return Err(e),
            }
        }

        let tried = self
            .candidates
            .iter()
            .filter_map(|argv| argv.first().cloned())
            .collect::<Vec<_>>()
            .join(", ");
        Err(ClipboardError::NoBackend { tried })
    }
}
