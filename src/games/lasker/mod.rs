//! Lasker Morris: nine men's morris with ten stones, placement and
//! movement interleaved, and flying at three stones.

mod action;
mod game;
mod rules;
mod state;
mod topology;
mod types;

pub use action::{HandToken, Move, ParseError, Removal, Source, parse};
pub use game::{LaskerMorris, MIN_STONES, REPETITION_LIMIT};
pub use rules::{Delta, FLYING_THRESHOLD, IllegalMove, validate};
pub use state::{GameState, HistoryEntry, Signature};
pub use topology::{MILLS, Mill, POSITION_COUNT, Position, is_valid};
pub use types::{Board, Hands, STARTING_HAND};
