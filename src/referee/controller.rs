//! The turn controller: one match, start to verdict.

use super::fault::MatchFault;
use super::outcome::{MatchReport, StateSnapshot, Verdict};
use super::players::{PlayerChannel, Received};
use crate::config::RefereeConfig;
use crate::games::{Color, Ending, RuleSet};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Where the match stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    /// Colors not yet announced.
    AwaitingFirstMove,
    /// Waiting on this color's move.
    AwaitingResponse(Color),
    /// Over. No further player I/O happens.
    Terminated(Verdict),
}

/// Messages sent from the controller to spectators.
#[derive(Debug, Clone)]
pub enum MatchEvent {
    /// A move was accepted (or the match started).
    StateChanged(StateSnapshot),
    /// The match ended.
    GameOver {
        /// The terminal message.
        message: String,
    },
}

/// The two players, by color.
pub struct Seats {
    blue: Box<dyn PlayerChannel>,
    orange: Box<dyn PlayerChannel>,
}

impl Seats {
    /// Seats two players.
    pub fn new(blue: Box<dyn PlayerChannel>, orange: Box<dyn PlayerChannel>) -> Self {
        Self { blue, orange }
    }

    fn get_mut(&mut self, color: Color) -> &mut dyn PlayerChannel {
        match color {
            Color::Blue => self.blue.as_mut(),
            Color::Orange => self.orange.as_mut(),
        }
    }
}

/// Drives one match of `G` between two players.
///
/// Owns the game state outright; nothing else mutates it.
pub struct TurnController<G: RuleSet> {
    game: G,
    seats: Seats,
    phase: TurnPhase,
    move_timeout: Duration,
    move_delay: Duration,
    pending_relay: Option<String>,
    snapshots: Vec<StateSnapshot>,
    events: Option<mpsc::UnboundedSender<MatchEvent>>,
}

impl<G: RuleSet> TurnController<G> {
    /// Creates a controller for a fresh game.
    #[instrument(skip_all, fields(game = game.name()))]
    pub fn new(game: G, seats: Seats, config: &RefereeConfig) -> Self {
        Self {
            game,
            seats,
            phase: TurnPhase::AwaitingFirstMove,
            move_timeout: config.move_timeout(),
            move_delay: config.move_delay(),
            pending_relay: None,
            snapshots: Vec::new(),
            events: None,
        }
    }

    /// Publishes snapshots and the final message on `events`.
    pub fn with_events(mut self, events: mpsc::UnboundedSender<MatchEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Current phase.
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// The game being refereed.
    pub fn game(&self) -> &G {
        &self.game
    }

    /// Plays the match to the end.
    #[instrument(skip(self), fields(game = self.game.name()))]
    pub async fn run(mut self) -> MatchReport {
        info!("Match started");
        let verdict = loop {
            if let TurnPhase::Terminated(verdict) = self.phase {
                break verdict;
            }
            self.step().await;
        };
        MatchReport::new(
            self.game.name().to_string(),
            verdict,
            verdict.message(),
            self.snapshots,
        )
    }

    /// Advances by one transition.
    pub async fn step(&mut self) {
        match self.phase {
            TurnPhase::AwaitingFirstMove => self.assign_colors().await,
            TurnPhase::AwaitingResponse(color) => self.take_turn(color).await,
            TurnPhase::Terminated(_) => {}
        }
    }

    #[instrument(skip(self))]
    async fn assign_colors(&mut self) {
        self.record(StateSnapshot::opening(self.game.view()));
        for color in Color::ALL {
            let seat = self.seats.get_mut(color);
            // Nothing has been asked yet, so any pending line is early.
            if let Some(line) = seat.poll_unsolicited() {
                self.forfeit(color, MatchFault::OutOfOrder { line }).await;
                return;
            }
            if let Err(e) = seat.send_line(&color.to_string()).await {
                let fault = MatchFault::ProcessTermination {
                    detail: e.to_string(),
                };
                self.forfeit(color, fault).await;
                return;
            }
        }
        self.phase = TurnPhase::AwaitingResponse(Color::Blue);
    }

    #[instrument(skip(self))]
    async fn take_turn(&mut self, color: Color) {
        let line = match self.solicit(color).await {
            Ok(line) => line,
            Err(fault) => return self.forfeit(color, fault).await,
        };

        let ending = match self.adjudicate(color, &line) {
            Ok(ending) => ending,
            Err(fault) => return self.forfeit(color, fault).await,
        };

        let turn = self.snapshots.len();
        self.record(StateSnapshot {
            turn,
            mover: Some(color),
            last_move: Some(line.clone()),
            board: self.game.view(),
            game_over: false,
            message: None,
        });

        if let Some(ending) = ending {
            return self.terminate(Verdict::from_ending(ending)).await;
        }

        self.pending_relay = Some(line);
        if !self.move_delay.is_zero() {
            tokio::time::sleep(self.move_delay).await;
        }
        self.phase = TurnPhase::AwaitingResponse(color.opponent());
    }

    /// Sends the opponent's last move and waits for a reply.
    ///
    /// Blue's opening move answers its color token, so there is no relay
    /// and a line already queued is the reply, not an early one.
    async fn solicit(&mut self, color: Color) -> Result<String, MatchFault> {
        let timeout = self.move_timeout;
        let seat = self.seats.get_mut(color);

        if let Some(relay) = self.pending_relay.take() {
            if let Some(line) = seat.poll_unsolicited() {
                return Err(MatchFault::OutOfOrder { line });
            }
            seat.send_line(&relay)
                .await
                .map_err(|e| MatchFault::ProcessTermination {
                    detail: e.to_string(),
                })?;
        }

        match seat.receive_line(timeout).await {
            Received::Line(line) => {
                let line = line.trim_end_matches(['\r', '\n']).to_string();
                debug!(%color, %line, "Move received");
                Ok(line)
            }
            Received::TimedOut => Err(MatchFault::Timeout {
                timeout_ms: timeout.as_millis() as u64,
            }),
            Received::Closed => Err(MatchFault::ProcessTermination {
                detail: "stream closed before a move".to_string(),
            }),
        }
    }

    /// Parses, validates and applies `line` for `color`.
    fn adjudicate(&mut self, color: Color, line: &str) -> Result<Option<Ending>, MatchFault> {
        let mv = self
            .game
            .parse_move(line)
            .map_err(|e| MatchFault::SyntaxError {
                line: line.to_string(),
                detail: e.to_string(),
            })?;
        let delta = self
            .game
            .validate_move(color, &mv)
            .map_err(|e| MatchFault::IllegalMove {
                line: line.to_string(),
                detail: e.to_string(),
            })?;
        debug!(?delta, "Move accepted");
        self.game.apply_move(delta, line);
        Ok(self.game.check_terminal())
    }

    async fn forfeit(&mut self, color: Color, fault: MatchFault) {
        warn!(%color, %fault, "Player forfeits");
        self.terminate(Verdict::forfeit(color, &fault)).await;
    }

    async fn terminate(&mut self, verdict: Verdict) {
        let message = verdict.message();
        info!(?verdict, %message, "Match over");

        if let Some(last) = self.snapshots.last_mut() {
            last.finish(&message);
        }
        self.emit(MatchEvent::GameOver {
            message: message.clone(),
        });

        for color in Color::ALL {
            self.seats.get_mut(color).shutdown().await;
        }
        self.phase = TurnPhase::Terminated(verdict);
    }

    fn record(&mut self, snapshot: StateSnapshot) {
        self.emit(MatchEvent::StateChanged(snapshot.clone()));
        self.snapshots.push(snapshot);
    }

    fn emit(&self, event: MatchEvent) {
        if let Some(events) = &self.events
            && events.send(event).is_err()
        {
            debug!("No spectators listening");
        }
    }
}
