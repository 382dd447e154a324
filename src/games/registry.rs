//! Explicit name-to-factory registry for the bundled games.
//!
//! The registry is the only place that knows every concrete game. Callers
//! look a game up by name and receive either an erased [`GameSession`] for
//! interactive use or a roster runner that resolves a whole bracket, so the
//! rest of the binary never names a concrete board type.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::board::{Board, InvalidMoveError, ParseMoveError, Player, Value};
use crate::search::{search_best_move, SearchContext};
use crate::tournament::{run_bracket, BracketOutcome, Entrant, MatchConfig, TournamentError};

use super::reversi::ReversiBoard;
use super::tic_tac_toe::TicTacToeBoard;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Parse(#[from] ParseMoveError),
    #[error(transparent)]
    Move(#[from] InvalidMoveError),
}

/// A game in progress, with moves passed as text. This is the erased facade
/// the command line works against.
pub trait GameSession {
    fn render(&self) -> String;
    fn current_player(&self) -> Player;
    fn value(&self) -> Value;
    fn is_over(&self) -> bool;
    fn valid_moves(&self) -> Vec<String>;
    fn move_history(&self) -> Vec<String>;
    fn apply(&mut self, input: &str) -> Result<(), SessionError>;
    fn undo(&mut self);
    /// Searches for the best move without playing it.
    fn best_move(&mut self, depth: u8) -> Option<(String, Value)>;
    /// Searches for the best move and plays it.
    fn engine_move(&mut self, depth: u8) -> Option<(String, Value)>;
    fn searched_positions(&self) -> usize;
    fn last_search_duration(&self) -> Option<Duration>;
}

struct Session<B: Board> {
    board: B,
    context: SearchContext,
}

impl<B> GameSession for Session<B>
where
    B: Board + fmt::Display,
    B::Move: fmt::Display + FromStr<Err = ParseMoveError>,
{
    fn render(&self) -> String {
        self.board.to_string()
    }

    fn current_player(&self) -> Player {
        self.board.current_player()
    }

    fn value(&self) -> Value {
        self.board.value()
    }

    fn is_over(&self) -> bool {
        self.board.valid_moves().is_empty()
    }

    fn valid_moves(&self) -> Vec<String> {
        self.board
            .valid_moves()
            .iter()
            .map(|candidate| candidate.to_string())
            .collect()
    }

    fn move_history(&self) -> Vec<String> {
        self.board
            .move_history()
            .iter()
            .map(|played| played.to_string())
            .collect()
    }

    fn apply(&mut self, input: &str) -> Result<(), SessionError> {
        let candidate = input.trim().parse::<B::Move>()?;
        self.board.apply_move(&candidate)?;
        Ok(())
    }

    fn undo(&mut self) {
        self.board.undo_move();
    }

    fn best_move(&mut self, depth: u8) -> Option<(String, Value)> {
        let result = search_best_move(&mut self.context, &mut self.board, depth);
        let value = result.value;
        result
            .best_move
            .map(|chosen| (chosen.to_string(), value))
    }

    fn engine_move(&mut self, depth: u8) -> Option<(String, Value)> {
        let result = search_best_move(&mut self.context, &mut self.board, depth);
        match result.best_move {
            Some(chosen) => {
                self.board
                    .apply_move(&chosen)
                    .expect("searched move should be legal");
                Some((chosen.to_string(), result.value))
            }
            None => None,
        }
    }

    fn searched_positions(&self) -> usize {
        self.context.searched_position_count()
    }

    fn last_search_duration(&self) -> Option<Duration> {
        self.context.last_search_duration()
    }
}

/// One registered game.
pub struct GameEntry {
    pub name: &'static str,
    pub summary: &'static str,
    session_factory: fn() -> Box<dyn GameSession>,
    roster_runner: fn(&[String], &MatchConfig) -> Result<BracketOutcome, TournamentError>,
}

impl GameEntry {
    pub fn new_session(&self) -> Box<dyn GameSession> {
        (self.session_factory)()
    }

    /// Runs a single-elimination bracket between identically-equipped
    /// entrants of this game.
    pub fn run_roster(
        &self,
        entrant_names: &[String],
        config: &MatchConfig,
    ) -> Result<BracketOutcome, TournamentError> {
        (self.roster_runner)(entrant_names, config)
    }
}

fn session_of<B>(board: B) -> Box<dyn GameSession>
where
    B: Board + fmt::Display + 'static,
    B::Move: fmt::Display + FromStr<Err = ParseMoveError>,
{
    Box::new(Session {
        board,
        context: SearchContext::new(),
    })
}

fn roster_of<B: Board + 'static>(
    make_board: fn() -> B,
    entrant_names: &[String],
    config: &MatchConfig,
) -> Result<BracketOutcome, TournamentError> {
    let entrants = entrant_names
        .iter()
        .map(|name| Entrant::new(name.clone(), make_board))
        .collect();
    run_bracket(entrants, config)
}

pub static GAMES: Lazy<FxHashMap<&'static str, GameEntry>> = Lazy::new(|| {
    let mut games = FxHashMap::default();

    let tic_tac_toe = GameEntry {
        name: "tic-tac-toe",
        summary: "3x3 tic-tac-toe; moves look like `2,3`",
        session_factory: || session_of(TicTacToeBoard::new()),
        roster_runner: |names, config| roster_of(TicTacToeBoard::new, names, config),
    };
    games.insert(tic_tac_toe.name, tic_tac_toe);

    let reversi = GameEntry {
        name: "reversi",
        summary: "8x8 reversi; moves look like `3,4` or `pass`",
        session_factory: || session_of(ReversiBoard::new()),
        roster_runner: |names, config| roster_of(ReversiBoard::new, names, config),
    };
    games.insert(reversi.name, reversi);

    games
});

pub fn lookup(name: &str) -> Option<&'static GameEntry> {
    GAMES.get(name)
}

/// Registered game names, sorted for stable help output.
pub fn names() -> Vec<&'static str> {
    let mut names: Vec<_> = GAMES.keys().copied().collect();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_bundled_game_is_registered() {
        assert_eq!(names(), vec!["reversi", "tic-tac-toe"]);
        assert!(lookup("tic-tac-toe").is_some());
        assert!(lookup("reversi").is_some());
        assert!(lookup("chess").is_none());
    }

    #[test]
    fn test_session_plays_a_text_move() {
        let entry = lookup("tic-tac-toe").unwrap();
        let mut session = entry.new_session();

        assert_eq!(session.current_player(), Player::One);
        session.apply("2,2").unwrap();
        assert_eq!(session.current_player(), Player::Two);
        assert_eq!(session.move_history(), vec!["2,2".to_string()]);
        assert_eq!(session.valid_moves().len(), 8);

        session.undo();
        assert_eq!(session.valid_moves().len(), 9);
    }

    #[test]
    fn test_session_surfaces_parse_and_rule_errors() {
        let entry = lookup("tic-tac-toe").unwrap();
        let mut session = entry.new_session();

        assert!(matches!(
            session.apply("nonsense"),
            Err(SessionError::Parse(_))
        ));
        session.apply("1,1").unwrap();
        assert!(matches!(session.apply("1,1"), Err(SessionError::Move(_))));
    }

    #[test]
    fn test_session_engine_move_advances_the_game() {
        let entry = lookup("reversi").unwrap();
        let mut session = entry.new_session();

        let (played, _) = session.engine_move(3).expect("opening has moves");
        assert_eq!(session.move_history(), vec![played]);
        assert!(session.searched_positions() > 0);
        assert!(session.last_search_duration().is_some());
    }

    #[test]
    fn test_roster_runner_crowns_a_registered_entrant() {
        let entry = lookup("tic-tac-toe").unwrap();
        let names = vec!["north".to_string(), "south".to_string()];
        let config = MatchConfig::new(Duration::from_secs(3600), 3).unwrap();

        let outcome = entry.run_roster(&names, &config).unwrap();
        assert_eq!(outcome.matches_played, 1);
        assert!(names.contains(&outcome.champion));
    }
}
