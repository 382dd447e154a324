//! Shared utilities for CLI commands.

use std::process;

use arena::board::Value;
use arena::games::registry::{self, GameEntry};

pub(crate) fn resolve_game(name: &str) -> &'static GameEntry {
    match registry::lookup(name) {
        Some(entry) => entry,
        None => {
            eprintln!(
                "unknown game `{}`; available games: {}",
                name,
                registry::names().join(", ")
            );
            process::exit(1);
        }
    }
}

pub(crate) fn announce_outcome(value: Value) {
    if value > 0 {
        println!("player 1 wins!");
    } else if value < 0 {
        println!("player 2 wins!");
    } else {
        println!("draw!");
    }
}
