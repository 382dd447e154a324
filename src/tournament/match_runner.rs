//! Runs one game between two search agents, adjusting each agent's search
//! depth between moves to keep its thinking time near a fixed budget.

use std::time::{Duration, Instant};

use log::debug;

use crate::board::{Board, Value};
use crate::search::{search_best_move, SearchContext};

use super::TournamentError;

/// Per-match configuration shared by both agents.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Target thinking time per move.
    pub time_per_move: Duration,
    /// Search depth ceiling. Agents start here and never exceed it.
    pub max_level: u8,
}

impl MatchConfig {
    pub fn new(time_per_move: Duration, max_level: u8) -> Result<Self, TournamentError> {
        if max_level < 1 {
            return Err(TournamentError::InvalidLevel { level: max_level });
        }
        Ok(Self {
            time_per_move,
            max_level,
        })
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            time_per_move: Duration::from_secs(1),
            max_level: 6,
        }
    }
}

/// Final per-agent numbers reported by a match.
#[derive(Debug, Clone)]
pub struct AgentReport {
    pub final_level: u8,
    /// Cumulative thinking time over budget in nanoseconds. Negative means
    /// the agent stayed under budget overall.
    pub time_surplus_ns: i128,
    pub moves_played: u32,
    pub positions_searched: usize,
}

#[derive(Debug, Clone)]
pub struct MatchReport {
    /// Index of the winning seat: `0` for the first entrant (who moves
    /// first), `1` for the second.
    pub winner: usize,
    /// Value of the finished game: positive, negative, or zero.
    pub final_value: Value,
    /// True when the game itself was drawn and the winner was decided by
    /// the time tie-break.
    pub drawn: bool,
    pub plies: u32,
    pub agents: [AgentReport; 2],
}

struct Agent {
    level: u8,
    surplus_ns: i128,
    moves_played: u32,
    context: SearchContext,
}

impl Agent {
    fn new(max_level: u8) -> Self {
        Self {
            level: max_level,
            surplus_ns: 0,
            moves_played: 0,
            context: SearchContext::new(),
        }
    }

    /// Folds one move's timing into the running surplus and steps the level
    /// toward the budget. The accumulator is never reset on adjustment, so
    /// one slow move does not whipsaw the level; it has to be paid back
    /// before the level rises again.
    fn adjust_level(&mut self, elapsed: Duration, budget: Duration, max_level: u8) {
        self.surplus_ns += elapsed.as_nanos() as i128 - budget.as_nanos() as i128;
        if self.surplus_ns > 0 {
            self.level = self.level.saturating_sub(1).max(1);
        } else if self.surplus_ns < 0 {
            self.level = (self.level + 1).min(max_level);
        }
        debug_assert!(self.level >= 1 && self.level <= max_level);
    }

    fn report(&self) -> AgentReport {
        AgentReport {
            final_level: self.level,
            time_surplus_ns: self.surplus_ns,
            moves_played: self.moves_played,
            positions_searched: self.context.searched_position_count(),
        }
    }
}

/// Decides the finished game. A nonzero value names the winner outright; a
/// draw goes to the agent with the lower cumulative time surplus, and to the
/// second agent when the surpluses are exactly equal.
fn decide_outcome(value: Value, surplus_ns: [i128; 2]) -> (usize, bool) {
    if value > 0 {
        (0, false)
    } else if value < 0 {
        (1, false)
    } else if surplus_ns[0] < surplus_ns[1] {
        (0, true)
    } else {
        (1, true)
    }
}

/// Plays one match to completion. The first board seats the first mover.
///
/// Each agent searches its own board; the chosen move is mirrored onto both
/// boards so they stay synchronized. The game ends when a full-width search
/// returns no move, at which point the returned value decides the outcome.
///
/// A `max_level` of zero is clamped to one; [`MatchConfig::new`] rejects it
/// up front.
pub fn run_match<B: Board>(mut boards: [B; 2], config: &MatchConfig) -> MatchReport {
    let max_level = config.max_level.max(1);
    let budget = config.time_per_move;
    let mut agents = [Agent::new(max_level), Agent::new(max_level)];
    let mut mover = 0;
    let mut plies: u32 = 0;

    loop {
        let result = {
            let agent = &mut agents[mover];
            let start = Instant::now();
            let result = search_best_move(&mut agent.context, &mut boards[mover], agent.level);
            let elapsed = start.elapsed();
            agent.adjust_level(elapsed, budget, max_level);
            debug!(
                "seat {} searched at level {}, surplus {}ns",
                mover, agent.level, agent.surplus_ns
            );
            result
        };

        match result.best_move {
            None => {
                let (winner, drawn) =
                    decide_outcome(result.value, [agents[0].surplus_ns, agents[1].surplus_ns]);
                return MatchReport {
                    winner,
                    final_value: result.value,
                    drawn,
                    plies,
                    agents: [agents[0].report(), agents[1].report()],
                };
            }
            Some(chosen) => {
                for board in boards.iter_mut() {
                    board
                        .apply_move(&chosen)
                        .expect("searched move should be legal on the mirrored board");
                }
                agents[mover].moves_played += 1;
                plies += 1;
                mover = 1 - mover;
            }
        }
    }
}
