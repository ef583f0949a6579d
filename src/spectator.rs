//! Follows a match from the controller's event channel.
//!
//! The spectator keeps its own copy of every snapshot for the web
//! visualizer and optionally draws each one on stdout. It never sees the
//! game state itself.

use crate::referee::{MatchEvent, StateSnapshot};
use crate::render::render_snapshot;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{RwLock, mpsc};
use tracing::{debug, info, instrument};

/// What the visualizer knows about the match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpectatorState {
    /// Rule set name.
    pub game: String,
    /// Every snapshot received so far.
    pub snapshots: Vec<StateSnapshot>,
    /// Whether the match is over.
    pub game_over: bool,
    /// Terminal message, once the match is over.
    pub message: Option<String>,
}

impl SpectatorState {
    /// Empty state for a match of `game`.
    pub fn new(game: &str) -> Self {
        Self {
            game: game.to_string(),
            ..Self::default()
        }
    }

    /// Folds one event into the state.
    #[instrument(skip(self, event))]
    pub fn apply(&mut self, event: &MatchEvent) {
        match event {
            MatchEvent::StateChanged(snapshot) => self.snapshots.push(snapshot.clone()),
            MatchEvent::GameOver { message } => {
                self.game_over = true;
                self.message = Some(message.clone());
                if let Some(last) = self.snapshots.last_mut() {
                    last.finish(message);
                }
            }
        }
    }
}

/// State shared between the spectator task and the web server.
pub type SharedSpectator = Arc<RwLock<SpectatorState>>;

/// Holds back the newest snapshot until it is known whether it is final.
///
/// The controller announces the last position before the game-over event,
/// so drawing eagerly would show a finished board as still to move.
#[derive(Debug, Default)]
struct FrameBuffer {
    pending: Option<StateSnapshot>,
}

impl FrameBuffer {
    /// Takes one event and returns a frame that is ready to draw, if any.
    fn push(&mut self, event: &MatchEvent) -> Option<String> {
        match event {
            MatchEvent::StateChanged(snapshot) => self
                .pending
                .replace(snapshot.clone())
                .map(|previous| render_snapshot(&previous, true)),
            MatchEvent::GameOver { message } => {
                let mut last = self.pending.take()?;
                last.finish(message);
                Some(render_snapshot(&last, true))
            }
        }
    }

    /// Whatever is still held back once the stream ends.
    fn flush(&mut self) -> Option<String> {
        self.pending
            .take()
            .map(|snapshot| render_snapshot(&snapshot, true))
    }
}

/// Consumes events until the controller hangs up.
#[instrument(skip(events, state))]
pub async fn follow(
    mut events: mpsc::UnboundedReceiver<MatchEvent>,
    state: SharedSpectator,
    visual: bool,
) {
    let mut frames = FrameBuffer::default();
    while let Some(event) = events.recv().await {
        if visual && let Some(frame) = frames.push(&event) {
            println!("{frame}");
        }
        state.write().await.apply(&event);
    }
    if visual && let Some(frame) = frames.flush() {
        debug!("Drawing last frame without a game-over event");
        println!("{frame}");
    }
    info!("Event stream closed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::RuleSet;
    use crate::games::tictactoe::TicTacToe;

    #[tokio::test]
    async fn test_follow_collects_snapshots() {
        let (tx, rx) = mpsc::unbounded_channel();
        let state: SharedSpectator = Arc::new(RwLock::new(SpectatorState::new("tictactoe")));

        tx.send(MatchEvent::StateChanged(StateSnapshot::opening(
            TicTacToe::new().view(),
        )))
        .unwrap();
        tx.send(MatchEvent::GameOver {
            message: "END: Draw!".into(),
        })
        .unwrap();
        drop(tx);

        follow(rx, Arc::clone(&state), false).await;

        let state = state.read().await;
        assert_eq!(state.snapshots.len(), 1);
        assert!(state.game_over);
        assert!(state.snapshots[0].game_over);
        assert_eq!(state.message.as_deref(), Some("END: Draw!"));
    }

    #[test]
    fn test_final_frame_is_drawn_finished() {
        let opening = StateSnapshot::opening(TicTacToe::new().view());
        let mut frames = FrameBuffer::default();

        assert_eq!(frames.push(&MatchEvent::StateChanged(opening.clone())), None);
        let frame = frames
            .push(&MatchEvent::GameOver {
                message: "END: Draw!".into(),
            })
            .unwrap();
        assert!(frame.ends_with("END: Draw!\n"));
        assert!(!frame.contains("to move"));
        assert_eq!(frames.flush(), None);
    }

    #[test]
    fn test_earlier_frames_are_drawn_when_superseded() {
        let opening = StateSnapshot::opening(TicTacToe::new().view());
        let mut frames = FrameBuffer::default();

        frames.push(&MatchEvent::StateChanged(opening.clone()));
        let frame = frames
            .push(&MatchEvent::StateChanged(opening.clone()))
            .unwrap();
        assert!(frame.contains("to move: blue"));
        assert_eq!(frames.flush(), Some(render_snapshot(&opening, true)));
    }
}
