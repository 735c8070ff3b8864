//! Statistics Output
//!
//! Collects per-tick aggregate belief metrics and applies the saturation
//! stopping rule.

use bevy_ecs::prelude::*;
use std::fs;
use std::path::Path;

use sim_metrics::TickRecord;

use crate::components::agent::{belief_bands, Belief};
use crate::setup::agents::NodeIndex;
use crate::SimulationState;

/// Accumulates one `TickRecord` per tick, including a construction-time
/// row at tick 0.
#[derive(Resource, Debug, Default)]
pub struct MetricsCollector {
    pub history: Vec<TickRecord>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a metrics row from the full belief vector.
    pub fn record(&mut self, tick: u64, beliefs: &[f32]) {
        let n = beliefs.len().max(1) as f32;
        let trust = beliefs.iter().filter(|&&b| b > belief_bands::CONFIDE).count() as f32 / n;
        let distrust = beliefs
            .iter()
            .filter(|&&b| b < -belief_bands::CONFIDE)
            .count() as f32
            / n;
        let belief_total: f32 = beliefs.iter().sum();

        self.history.push(TickRecord {
            tick,
            trust,
            distrust,
            neglect: 1.0 - trust - distrust,
            belief_total,
        });
    }

    pub fn latest(&self) -> Option<&TickRecord> {
        self.history.last()
    }

    /// The population has saturated once the summed belief is within one
    /// agent of unanimity in either direction.
    pub fn saturated(&self, node_count: usize) -> bool {
        self.latest()
            .map(|record| record.belief_total.abs() >= (node_count.saturating_sub(1)) as f32)
            .unwrap_or(false)
    }
}

/// Sample the current belief vector (in node order) into the collector.
pub fn collect_metrics(world: &mut World) {
    let beliefs: Vec<f32> = {
        let index = world.resource::<NodeIndex>();
        index
            .iter()
            .map(|entity| world.get::<Belief>(entity).map(|b| b.value()).unwrap_or(0.0))
            .collect()
    };
    let tick = world.resource::<SimulationState>().current_tick;
    world
        .resource_mut::<MetricsCollector>()
        .record(tick, &beliefs);
}

/// Write the metrics history as pretty JSON.
pub fn write_metrics(history: &[TickRecord], path: impl AsRef<Path>) -> std::io::Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(history)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_fractions() {
        let mut collector = MetricsCollector::new();
        collector.record(0, &[0.9, -0.9, 0.1, 0.5]);

        let record = collector.latest().unwrap();
        assert!((record.trust - 0.5).abs() < 1e-6);
        assert!((record.distrust - 0.25).abs() < 1e-6);
        assert!((record.neglect - 0.25).abs() < 1e-6);
        assert!((record.belief_total - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_band_boundaries_count_as_neglect() {
        let mut collector = MetricsCollector::new();
        collector.record(0, &[0.33, -0.33, 0.0]);

        let record = collector.latest().unwrap();
        assert_eq!(record.trust, 0.0);
        assert_eq!(record.distrust, 0.0);
        assert!((record.neglect - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_saturation_rule() {
        let mut collector = MetricsCollector::new();
        collector.record(0, &[1.0, 1.0, 1.0, 0.2]);
        // |3.2| >= 3 for 4 nodes
        assert!(collector.saturated(4));

        let mut collector = MetricsCollector::new();
        collector.record(0, &[-1.0, -1.0, -1.0, -0.2]);
        assert!(collector.saturated(4));

        let mut collector = MetricsCollector::new();
        collector.record(0, &[1.0, 0.5, 0.0, 0.0]);
        assert!(!collector.saturated(4));
    }

    #[test]
    fn test_empty_history_is_not_saturated() {
        let collector = MetricsCollector::new();
        assert!(!collector.saturated(10));
    }
}
