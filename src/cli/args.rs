//! CLI argument parsing using StructOpt.

use structopt::StructOpt;

use crate::cli::commands::{
    calculate_best_move::CalculateBestMoveArgs, play::PlayArgs, tournament::TournamentArgs,
    watch::WatchArgs,
};

#[derive(StructOpt)]
#[structopt(
    name = "arena",
    about = "A generic adversarial game engine and tournament arena ♟"
)]
pub enum Arena {
    #[structopt(
        name = "play",
        about = "Play a game against the engine, which searches for the best move using alpha-beta pruning at the given `--depth` (default: 4). Your seat is chosen at random unless you specify it with `--seat`. Pick the game with `--game` (default: tic-tac-toe)."
    )]
    Play(PlayArgs),
    #[structopt(
        name = "watch",
        about = "Watch the engine play against itself at the given `--depth` (default: 6). Pick the game with `--game` (default: reversi)."
    )]
    Watch(WatchArgs),
    #[structopt(
        name = "calculate-best-move",
        about = "Determine the best move from a given position, reached by applying the space-separated `--moves` list to the starting position. You can optionally specify the depth of the search with the `--depth` arg (default: 6)."
    )]
    CalculateBestMove(CalculateBestMoveArgs),
    #[structopt(
        name = "tournament",
        about = "Run a single-elimination tournament between the entrants listed in a roster file (one `name game` pair per line). Each entrant's search depth adapts to the `--time-per-move` budget, never exceeding `--max-level`."
    )]
    Tournament(TournamentArgs),
}

impl crate::cli::commands::Command for Arena {
    fn execute(self) {
        macro_rules! execute_command {
            ($($variant:ident($cmd:ident)),+ $(,)?) => {
                match self {
                    $(Self::$variant($cmd) => $cmd.execute(),)+
                }
            };
        }

        execute_command! {
            Play(cmd),
            Watch(cmd),
            CalculateBestMove(cmd),
            Tournament(cmd),
        }
    }
}
