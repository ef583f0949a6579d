//! Deterministic in-memory player.

use super::{ChannelError, PlayerChannel, Received};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, instrument};

/// What a scripted player does when asked for its next line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStep {
    /// Answers immediately.
    Reply(String),
    /// Answers after a pause. Past the deadline this is a timeout.
    Delayed(Duration, String),
    /// Never answers.
    Silent,
    /// Closes its output.
    Hangup,
    /// Emits this line before being asked.
    Early(String),
}

/// Record of everything the controller did to a scripted player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptLog {
    /// Lines sent to the player, in order.
    pub sent: Vec<String>,
    /// How many times a line was requested.
    pub reads: usize,
    /// Whether the player was shut down.
    pub shut_down: bool,
}

/// Player that follows a fixed script.
///
/// The log stays readable through [`ScriptedPlayer::log`] after the player
/// has been handed to a controller.
#[derive(Debug)]
pub struct ScriptedPlayer {
    name: String,
    script: VecDeque<ScriptStep>,
    log: Arc<Mutex<ScriptLog>>,
}

impl ScriptedPlayer {
    /// Creates a player from a list of steps.
    #[instrument(skip(steps))]
    pub fn new(name: &str, steps: impl IntoIterator<Item = ScriptStep>) -> Self {
        Self {
            name: name.to_string(),
            script: steps.into_iter().collect(),
            log: Arc::new(Mutex::new(ScriptLog::default())),
        }
    }

    /// Creates a player that answers every request with the next line.
    pub fn replies<S: Into<String>>(name: &str, lines: impl IntoIterator<Item = S>) -> Self {
        Self::new(name, lines.into_iter().map(|l| ScriptStep::Reply(l.into())))
    }

    /// Shared handle on what this player has seen.
    pub fn log(&self) -> Arc<Mutex<ScriptLog>> {
        Arc::clone(&self.log)
    }

    fn record(&self, update: impl FnOnce(&mut ScriptLog)) {
        if let Ok(mut log) = self.log.lock() {
            update(&mut log);
        }
    }
}

#[async_trait::async_trait]
impl PlayerChannel for ScriptedPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send_line(&mut self, line: &str) -> Result<(), ChannelError> {
        debug!(player = %self.name, %line, "WRITE");
        self.record(|log| log.sent.push(line.to_string()));
        Ok(())
    }

    async fn receive_line(&mut self, deadline: Duration) -> Received {
        self.record(|log| log.reads += 1);
        match self.script.pop_front() {
            Some(ScriptStep::Reply(line)) => Received::Line(line),
            Some(ScriptStep::Delayed(delay, line)) => {
                if delay > deadline {
                    tokio::time::sleep(deadline).await;
                    // Still late; a real player would deliver it next turn.
                    self.script.push_front(ScriptStep::Early(line));
                    Received::TimedOut
                } else {
                    tokio::time::sleep(delay).await;
                    Received::Line(line)
                }
            }
            Some(ScriptStep::Silent) => {
                tokio::time::sleep(deadline).await;
                Received::TimedOut
            }
            Some(ScriptStep::Early(line)) => Received::Line(line),
            Some(ScriptStep::Hangup) | None => Received::Closed,
        }
    }

    fn poll_unsolicited(&mut self) -> Option<String> {
        match self.script.front() {
            Some(ScriptStep::Early(_)) => match self.script.pop_front() {
                Some(ScriptStep::Early(line)) => Some(line),
                _ => None,
            },
            _ => None,
        }
    }

    async fn shutdown(&mut self) {
        debug!(player = %self.name, "Shut down");
        self.record(|log| log.shut_down = true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replies_in_order_then_closes() {
        let mut player = ScriptedPlayer::replies("p", ["h1 d1 r0", "h1 d2 r0"]);
        let deadline = Duration::from_millis(10);
        assert_eq!(
            player.receive_line(deadline).await,
            Received::Line("h1 d1 r0".into())
        );
        assert_eq!(
            player.receive_line(deadline).await,
            Received::Line("h1 d2 r0".into())
        );
        assert_eq!(player.receive_line(deadline).await, Received::Closed);
        assert_eq!(player.log().lock().unwrap().reads, 3);
    }

    #[tokio::test]
    async fn test_early_line_is_unsolicited() {
        let mut player = ScriptedPlayer::new("p", [ScriptStep::Early("h2 a1 r0".into())]);
        assert_eq!(player.poll_unsolicited(), Some("h2 a1 r0".into()));
        assert_eq!(player.poll_unsolicited(), None);
    }

    #[tokio::test]
    async fn test_late_reply_times_out() {
        let mut player = ScriptedPlayer::new(
            "p",
            [ScriptStep::Delayed(
                Duration::from_millis(200),
                "h1 d1 r0".into(),
            )],
        );
        assert_eq!(
            player.receive_line(Duration::from_millis(20)).await,
            Received::TimedOut
        );
    }

    #[tokio::test]
    async fn test_sent_lines_are_logged() {
        let mut player = ScriptedPlayer::replies("p", Vec::<String>::new());
        let log = player.log();
        player.send_line("blue").await.unwrap();
        player.shutdown().await;
        let log = log.lock().unwrap();
        assert_eq!(log.sent, vec!["blue".to_string()]);
        assert!(log.shut_down);
    }
}
