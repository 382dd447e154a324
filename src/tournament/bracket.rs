//! Single-elimination bracket over a roster of entrants.
//!
//! Entrants are paired in roster order through a FIFO queue: the first two
//! play, the winner rejoins the back of the queue, and so on until one
//! entrant remains. N entrants always resolve in exactly N-1 matches.

use std::collections::VecDeque;
use std::rc::Rc;

use log::info;

use crate::board::Board;

use super::match_runner::{run_match, MatchConfig, MatchReport};
use super::TournamentError;

/// A registered player: a display name and a factory producing a fresh
/// board for each match the entrant plays.
pub struct Entrant<B> {
    pub name: String,
    factory: Rc<dyn Fn() -> B>,
}

impl<B> Entrant<B> {
    pub fn new(name: impl Into<String>, factory: impl Fn() -> B + 'static) -> Self {
        Self {
            name: name.into(),
            factory: Rc::new(factory),
        }
    }
}

/// One node of the resolved bracket. Leaves are registered entrants;
/// internal nodes carry the winner's name and the match that decided it.
#[derive(Debug, Clone)]
pub struct BracketNode {
    pub name: String,
    pub report: Option<MatchReport>,
    pub children: Option<Box<[BracketNode; 2]>>,
}

impl BracketNode {
    fn leaf(name: String) -> Self {
        Self {
            name,
            report: None,
            children: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Renders the resolution tree, champion first, two spaces of indent
    /// per round.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(0, &mut out);
        out
    }

    fn render_into(&self, depth: usize, out: &mut String) {
        for _ in 0..depth {
            out.push_str("  ");
        }
        out.push_str(&self.name);
        if let Some(report) = &self.report {
            let how = if report.drawn {
                "drawn game, time tie-break".to_string()
            } else {
                format!("value {}", report.final_value)
            };
            out.push_str(&format!(" ({} plies, {})", report.plies, how));
        }
        out.push('\n');
        if let Some(children) = &self.children {
            children[0].render_into(depth + 1, out);
            children[1].render_into(depth + 1, out);
        }
    }
}

/// The resolved tournament: the champion's name and the full bracket tree.
#[derive(Debug, Clone)]
pub struct BracketOutcome {
    pub champion: String,
    pub matches_played: usize,
    pub root: BracketNode,
}

/// Resolves a roster into a champion. A single entrant is champion without
/// playing; an empty roster is an error.
pub fn run_bracket<B: Board>(
    entrants: Vec<Entrant<B>>,
    config: &MatchConfig,
) -> Result<BracketOutcome, TournamentError> {
    if entrants.is_empty() {
        return Err(TournamentError::EmptyRoster);
    }

    let mut queue: VecDeque<(BracketNode, Rc<dyn Fn() -> B>)> = entrants
        .into_iter()
        .map(|entrant| (BracketNode::leaf(entrant.name), entrant.factory))
        .collect();
    let mut matches_played = 0;

    while queue.len() > 1 {
        let (left, left_factory) = queue.pop_front().expect("queue holds two entrants");
        let (right, right_factory) = queue.pop_front().expect("queue holds two entrants");

        let report = run_match([left_factory(), right_factory()], config);
        matches_played += 1;

        let (winner_name, winner_factory) = if report.winner == 0 {
            (left.name.clone(), left_factory)
        } else {
            (right.name.clone(), right_factory)
        };
        info!("{} vs {}: {}", left.name, right.name, winner_name);

        let node = BracketNode {
            name: winner_name,
            report: Some(report),
            children: Some(Box::new([left, right])),
        };
        queue.push_back((node, winner_factory));
    }

    let (root, _) = queue.pop_front().expect("one entrant remains");
    Ok(BracketOutcome {
        champion: root.name.clone(),
        matches_played,
        root,
    })
}
