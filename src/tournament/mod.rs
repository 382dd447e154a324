//! Head-to-head matches with adaptive search depth, and single-elimination
//! brackets that reduce a roster of entrants to one champion.

mod bracket;
mod match_runner;

pub use bracket::{run_bracket, BracketNode, BracketOutcome, Entrant};
pub use match_runner::{run_match, AgentReport, MatchConfig, MatchReport};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TournamentError {
    #[error("search level must be at least 1, got {level}")]
    InvalidLevel { level: u8 },
    #[error("roster has no entrants")]
    EmptyRoster,
    #[error("unknown game `{0}`")]
    UnknownGame(String),
    #[error("roster mixes games `{0}` and `{1}`; all entrants must play the same game")]
    MixedRoster(String, String),
    #[error("malformed roster line `{0}`; expected `name game`")]
    MalformedRosterLine(String),
    #[error("cannot read roster file: {0}")]
    RosterIo(#[from] std::io::Error),
}
