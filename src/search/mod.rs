//! Generic alpha-beta search over the board contract.

mod engine;

pub use engine::{alpha_beta_search, search_best_move, SearchContext, SearchResult};

#[cfg(test)]
mod tests;
