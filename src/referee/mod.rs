//! Refereeing a match between two player programs.
//!
//! The [`TurnController`] sends each player its color, then alternates:
//! relay the opponent's last move, wait for a reply within the deadline,
//! hand it to the [`RuleSet`](crate::games::RuleSet), and stop at the first
//! fault or end condition.

mod controller;
mod fault;
mod outcome;
pub mod players;

pub use controller::{MatchEvent, Seats, TurnController, TurnPhase};
pub use fault::{ForfeitKind, MatchFault};
pub use outcome::{MatchReport, Reason, StateSnapshot, Verdict};
