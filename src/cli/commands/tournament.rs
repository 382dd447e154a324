//! Tournament command - resolve a roster file into a champion.

use std::fs;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use arena::games::registry;
use arena::tournament::{MatchConfig, TournamentError};
use structopt::StructOpt;

use super::Command;

#[derive(StructOpt)]
pub struct TournamentArgs {
    #[structopt(help = "Roster file with one `name game` pair per line; `#` starts a comment")]
    pub roster: PathBuf,
    #[structopt(
        long = "time-per-move",
        default_value = "1.0",
        help = "Per-move time budget in seconds"
    )]
    pub time_per_move: f64,
    #[structopt(
        long = "max-level",
        default_value = "6",
        help = "Search depth ceiling for every entrant"
    )]
    pub max_level: u8,
}

impl Command for TournamentArgs {
    fn execute(self) {
        if let Err(error) = self.run() {
            eprintln!("tournament failed: {}", error);
            process::exit(1);
        }
    }
}

impl TournamentArgs {
    fn run(self) -> Result<(), TournamentError> {
        let contents = fs::read_to_string(&self.roster)?;
        let (game, entrant_names) = parse_roster(&contents)?;
        let entry =
            registry::lookup(&game).ok_or_else(|| TournamentError::UnknownGame(game.clone()))?;

        let config = MatchConfig::new(Duration::from_secs_f64(self.time_per_move), self.max_level)?;
        let outcome = entry.run_roster(&entrant_names, &config)?;

        print!("{}", outcome.root.render());
        println!("{} matches played", outcome.matches_played);
        println!("Winner: {}", outcome.champion);
        Ok(())
    }
}

/// Parses roster lines of the form `name game`. Blank lines and `#`
/// comments are skipped. Every entrant must name the same game.
fn parse_roster(contents: &str) -> Result<(String, Vec<String>), TournamentError> {
    let mut game: Option<String> = None;
    let mut entrant_names = Vec::new();

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut parts = line.split_whitespace();
        let (name, entrant_game) = match (parts.next(), parts.next(), parts.next()) {
            (Some(name), Some(entrant_game), None) => (name, entrant_game),
            _ => return Err(TournamentError::MalformedRosterLine(line.to_string())),
        };

        match &game {
            None => game = Some(entrant_game.to_string()),
            Some(existing) if existing != entrant_game => {
                return Err(TournamentError::MixedRoster(
                    existing.clone(),
                    entrant_game.to_string(),
                ));
            }
            Some(_) => (),
        }
        entrant_names.push(name.to_string());
    }

    let game = game.ok_or(TournamentError::EmptyRoster)?;
    Ok((game, entrant_names))
}
