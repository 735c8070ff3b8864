//! ECS Components
//!
//! Per-agent state and the shared contact network resource.

pub mod agent;
pub mod network;

pub use agent::*;
pub use network::*;
