//! Watch command - watch the engine play against itself.

use std::io;
use std::thread::sleep;
use std::time::Duration;

use crossterm::{cursor, execute, terminal};
use structopt::StructOpt;

use super::util::{announce_outcome, resolve_game};
use super::Command;

#[derive(StructOpt)]
pub struct WatchArgs {
    #[structopt(short, long, default_value = "6")]
    pub depth: u8,
    #[structopt(short, long, default_value = "reversi")]
    pub game: String,
    #[structopt(
        long = "delay",
        default_value = "1000",
        help = "Delay between moves in milliseconds"
    )]
    pub delay_ms: u64,
}

impl Command for WatchArgs {
    fn execute(self) {
        let entry = resolve_game(&self.game);
        let mut session = entry.new_session();

        loop {
            let _ = execute!(
                io::stdout(),
                terminal::Clear(terminal::ClearType::All),
                cursor::MoveTo(0, 0)
            );
            println!("{}\n", session.render());

            if session.is_over() {
                announce_outcome(session.value());
                break;
            }

            let mover = session.current_player();
            match session.engine_move(self.depth) {
                Some((played, value)) => {
                    println!("{} plays {} (value {})", mover, played, value);
                }
                None => {
                    announce_outcome(session.value());
                    break;
                }
            }

            sleep(Duration::from_millis(self.delay_ms));
        }
    }
}
