//! World Setup
//!
//! Network construction, centrality measures, agent spawning, and
//! misinformation seeding.

pub mod agents;
pub mod centrality;
pub mod network;
pub mod seeding;

pub use agents::*;
pub use centrality::*;
pub use network::*;
pub use seeding::*;

use thiserror::Error;

/// Fatal construction errors. All of these abort before any tick runs.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("small-world rewiring failed to produce a connected graph after {0} attempts")]
    Disconnected(usize),
    #[error("no eligible nodes for seed mode `{0}`")]
    EmptySeedPool(&'static str),
    #[error("invalid beta distribution shapes: {0}")]
    Distribution(String),
}
