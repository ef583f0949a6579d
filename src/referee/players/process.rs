//! Player programs run as child processes.

use super::{ChannelError, PlayerChannel, Received};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, Command};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

/// A player program talking over stdin/stdout.
///
/// Stdout is drained by a background task into a queue, so lines the
/// program writes while it is not being asked are kept and can be detected.
pub struct ProcessPlayer {
    name: String,
    child: Child,
    stdin: Option<ChildStdin>,
    lines: mpsc::UnboundedReceiver<String>,
    reader: JoinHandle<()>,
}

impl ProcessPlayer {
    /// Starts `command`, split on whitespace into program and arguments.
    ///
    /// Must be called inside a tokio runtime.
    #[instrument]
    pub fn spawn(name: &str, command: &str, forward_stderr: bool) -> Result<Self, ChannelError> {
        let mut parts = command.split_whitespace();
        let program = parts.next().ok_or(ChannelError::EmptyCommand)?;

        let stderr = if forward_stderr {
            Stdio::inherit()
        } else {
            Stdio::null()
        };

        let mut child = Command::new(program)
            .args(parts)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(stderr)
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ChannelError::Spawn {
                command: command.to_string(),
                message: e.to_string(),
            })?;

        let stdin = child.stdin.take();
        let stdout = child.stdout.take().ok_or_else(|| ChannelError::Spawn {
            command: command.to_string(),
            message: "stdout not captured".to_string(),
        })?;

        let (tx, lines) = mpsc::unbounded_channel();
        let reader_name = name.to_string();
        let reader = tokio::spawn(async move {
            let mut stdout = BufReader::new(stdout).lines();
            loop {
                match stdout.next_line().await {
                    Ok(Some(line)) => {
                        debug!(player = %reader_name, %line, "READ");
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Ok(None) => {
                        debug!(player = %reader_name, "Stdout closed");
                        break;
                    }
                    Err(e) => {
                        warn!(player = %reader_name, error = %e, "Stdout read failed");
                        break;
                    }
                }
            }
        });

        info!(player = name, pid = ?child.id(), "Player process started");
        Ok(Self {
            name: name.to_string(),
            child,
            stdin,
            lines,
            reader,
        })
    }
}

#[async_trait::async_trait]
impl PlayerChannel for ProcessPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self), fields(player = %self.name))]
    async fn send_line(&mut self, line: &str) -> Result<(), ChannelError> {
        let player = self.name.clone();
        let write_error = |message: String| ChannelError::Write {
            player: player.clone(),
            message,
        };
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| write_error("stdin closed".to_string()))?;

        let mut framed = String::with_capacity(line.len() + 1);
        framed.push_str(line);
        framed.push('\n');
        stdin
            .write_all(framed.as_bytes())
            .await
            .map_err(|e| write_error(e.to_string()))?;
        stdin.flush().await.map_err(|e| write_error(e.to_string()))?;

        debug!(%line, "WRITE");
        Ok(())
    }

    #[instrument(skip(self), fields(player = %self.name))]
    async fn receive_line(&mut self, deadline: Duration) -> Received {
        match timeout(deadline, self.lines.recv()).await {
            Ok(Some(line)) => Received::Line(line),
            Ok(None) => Received::Closed,
            Err(_) => Received::TimedOut,
        }
    }

    fn poll_unsolicited(&mut self) -> Option<String> {
        self.lines.try_recv().ok()
    }

    #[instrument(skip(self), fields(player = %self.name))]
    async fn shutdown(&mut self) {
        self.stdin.take();
        if let Err(e) = self.child.start_kill() {
            debug!(error = %e, "Player already exited");
        }
        self.reader.abort();
        match self.child.wait().await {
            Ok(status) => debug!(%status, "Player process stopped"),
            Err(e) => warn!(error = %e, "Failed to reap player process"),
        }
    }
}
