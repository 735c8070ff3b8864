//! Agent Components
//!
//! Per-node traits and belief state for residents and staff.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Marker component identifying an entity as a network agent
#[derive(Component, Debug, Clone, Default)]
pub struct Agent;

/// Graph node this agent occupies, assigned once at spawn
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// Whether a node belongs to a resident or a staff member.
/// Immutable after construction.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    Resident,
    Staff,
}

impl NodeRole {
    pub fn is_staff(&self) -> bool {
        matches!(self, NodeRole::Staff)
    }

    pub fn label(&self) -> &'static str {
        match self {
            NodeRole::Resident => "resident",
            NodeRole::Staff => "staff",
        }
    }
}

/// Belief-scale bands used for both spreading dispositions and the
/// trust/distrust population metrics.
pub mod belief_bands {
    /// Above this magnitude an agent broadcasts to every neighbor
    pub const BROADCAST: f32 = 0.66;
    /// Above this magnitude an agent confides in its closest neighbor only;
    /// also the cutoff for counting an agent as trusting or distrusting
    pub const CONFIDE: f32 = 0.33;
}

/// Fixed cognitive traits, drawn once at spawn.
/// Ability and literacy are 0.0 to 1.0.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct Traits {
    /// Capacity to evaluate incoming claims
    pub cognitive_ability: f32,
    /// Fluency with online information
    pub digital_literacy: f32,
    /// Residents seek social engagement; staff do not
    pub se_motivated: bool,
}

/// Signed belief in the circulating misinformation.
/// -1.0 is full distrust, +1.0 is full trust; magnitude is intensity.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Belief(pub f32);

impl Belief {
    pub fn new(value: f32) -> Self {
        Self(value.clamp(-1.0, 1.0))
    }

    pub fn value(&self) -> f32 {
        self.0
    }

    /// Shift belief and clamp back into [-1, 1]
    pub fn shift(&mut self, delta: f32) {
        self.0 = (self.0 + delta).clamp(-1.0, 1.0);
    }

    /// Scale belief and clamp back into [-1, 1]
    pub fn scale(&mut self, factor: f32) {
        self.0 = (self.0 * factor).clamp(-1.0, 1.0);
    }
}

/// One signal received from a neighbor: who sent it, and the sender's
/// belief scale at send time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReceivedSignal {
    pub sender: usize,
    pub attitude: f32,
}

/// Ordered log of signals received over the run.
///
/// Consumed by the fact-checking weight adjustment; never pruned within a
/// run, so repeated fact-checks re-penalize the same historical senders.
#[derive(Component, Debug, Clone, Default)]
pub struct ReceivedLog {
    pub entries: Vec<ReceivedSignal>,
}

impl ReceivedLog {
    pub fn push(&mut self, sender: usize, attitude: f32) {
        self.entries.push(ReceivedSignal { sender, attitude });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
