//! CalculateBestMove command - report the best move from a given position.

use std::process;

use structopt::StructOpt;

use super::util::resolve_game;
use super::Command;

#[derive(StructOpt)]
pub struct CalculateBestMoveArgs {
    #[structopt(short, long, default_value = "6")]
    pub depth: u8,
    #[structopt(short, long, default_value = "tic-tac-toe")]
    pub game: String,
    #[structopt(
        long = "moves",
        default_value = "",
        help = "Space-separated moves leading to the position to analyze"
    )]
    pub moves: String,
}

impl Command for CalculateBestMoveArgs {
    fn execute(self) {
        let entry = resolve_game(&self.game);
        let mut session = entry.new_session();

        for played in self.moves.split_whitespace() {
            if let Err(error) = session.apply(played) {
                eprintln!("cannot apply `{}`: {}", played, error);
                process::exit(1);
            }
        }

        println!("{}\n", session.render());
        match session.best_move(self.depth) {
            Some((best, value)) => {
                println!("best move: {} (value {})", best, value);
                println!("{} positions searched", session.searched_positions());
                if let Some(duration) = session.last_search_duration() {
                    println!("search took {:?}", duration);
                }
            }
            None => println!("position is terminal (value {})", session.value()),
        }
    }
}
