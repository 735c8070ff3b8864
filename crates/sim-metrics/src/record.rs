//! Metric Records
//!
//! Per-tick aggregate rows and the end-of-run summary consumed by
//! reporting and parameter-sweep drivers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Aggregate belief metrics sampled once per tick.
///
/// Fractions are over the whole population; `belief_total` is the signed
/// sum of every agent's belief scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickRecord {
    pub tick: u64,
    /// Fraction of agents with belief above +0.33
    pub trust: f32,
    /// Fraction of agents with belief below -0.33
    pub distrust: f32,
    /// Fraction of agents in the neutral band
    pub neglect: f32,
    /// Signed sum of belief across all agents
    pub belief_total: f32,
}

/// Final state of a single run, serialized for sweep drivers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub seed: u64,
    /// Ticks actually executed (excludes the construction-time row)
    pub ticks: u64,
    /// Whether the run ended by saturating rather than exhausting its budget
    pub saturated: bool,
    pub final_record: TickRecord,
    pub history: Vec<TickRecord>,
}
