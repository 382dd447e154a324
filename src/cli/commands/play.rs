//! Play command - play a game against the engine.

use std::io::{self, Write};
use std::str::FromStr;

use arena::board::Player;
use regex::Regex;
use structopt::StructOpt;

use super::util::{announce_outcome, resolve_game};
use super::Command;

#[derive(Debug, Clone, Copy)]
pub enum Seat {
    First,
    Second,
    Random,
}

impl FromStr for Seat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first" => Ok(Seat::First),
            "second" => Ok(Seat::Second),
            "random" => Ok(Seat::Random),
            other => Err(format!(
                "unknown seat `{}` (expected first, second, or random)",
                other
            )),
        }
    }
}

#[derive(StructOpt)]
pub struct PlayArgs {
    #[structopt(short, long, default_value = "4")]
    pub depth: u8,
    #[structopt(short, long, default_value = "tic-tac-toe")]
    pub game: String,
    #[structopt(
        short,
        long,
        default_value = "random",
        help = "Which seat you take: first, second, or random"
    )]
    pub seat: Seat,
}

enum ShellCommand {
    Move { text: String },
    ShowMoves,
    ShowBoard,
    ShowHistory,
    Undo,
    Quit,
}

impl ShellCommand {
    fn parse(command: &str) -> Result<ShellCommand, &'static str> {
        // handle commands with no args
        match command {
            "moves" => return Ok(ShellCommand::ShowMoves),
            "board" => return Ok(ShellCommand::ShowBoard),
            "history" => return Ok(ShellCommand::ShowHistory),
            "undo" => return Ok(ShellCommand::Undo),
            "quit" => return Ok(ShellCommand::Quit),
            _ => (),
        }

        // handle commands with args
        if command.starts_with("move") {
            let re = Regex::new(r"^move\s+(.+)$").unwrap();
            let caps = match re.captures(command) {
                Some(captures) => captures,
                None => return Err("unable to parse move command"),
            };
            return Ok(ShellCommand::Move {
                text: caps[1].to_string(),
            });
        }

        Err("invalid command")
    }
}

impl Command for PlayArgs {
    fn execute(self) {
        let entry = resolve_game(&self.game);
        let mut session = entry.new_session();
        let human = match self.seat {
            Seat::First => Player::One,
            Seat::Second => Player::Two,
            Seat::Random => {
                if fastrand::bool() {
                    Player::One
                } else {
                    Player::Two
                }
            }
        };

        println!("{}", entry.summary);
        println!("You are {}.", human);
        println!("Commands: move <m>, moves, board, history, undo, quit");

        loop {
            println!("\n{}", session.render());
            if session.is_over() {
                announce_outcome(session.value());
                break;
            }

            if session.current_player() == human {
                print!("> ");
                let _ = io::stdout().flush();

                let mut input = String::new();
                match io::stdin().read_line(&mut input) {
                    Ok(0) => break,
                    Ok(_) => (),
                    Err(error) => {
                        println!("error: {}", error);
                        continue;
                    }
                }
                let input = input.trim();

                match ShellCommand::parse(input) {
                    Ok(ShellCommand::Move { text }) => {
                        if let Err(error) = session.apply(&text) {
                            println!("move error: {}", error);
                        }
                    }
                    Ok(ShellCommand::ShowMoves) => {
                        println!("valid moves: {}", session.valid_moves().join(" "));
                    }
                    Ok(ShellCommand::ShowBoard) => (),
                    Ok(ShellCommand::ShowHistory) => {
                        println!("moves so far: {}", session.move_history().join(" "));
                    }
                    Ok(ShellCommand::Undo) => {
                        // Take back the engine's reply and your own move.
                        session.undo();
                        session.undo();
                    }
                    Ok(ShellCommand::Quit) => break,
                    Err(error) => {
                        println!("failed to parse command `{}`: {}", input, error);
                    }
                }
            } else {
                match session.engine_move(self.depth) {
                    Some((played, value)) => println!(
                        "engine plays {} (value {}, {} positions searched)",
                        played,
                        value,
                        session.searched_positions()
                    ),
                    None => {
                        announce_outcome(session.value());
                        break;
                    }
                }
            }
        }
    }
}
