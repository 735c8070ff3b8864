//! Simulation Configuration
//!
//! Tunable parameters for network construction, trait distributions, and the
//! update protocol. Loads from a TOML file, or from a flat name/value map so
//! parameter-sweep drivers can instantiate many independent runs.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Network topology mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    /// Reciprocated random graph, all edge weights 1
    UniformWeight,
    /// Reciprocated random graph, weights drawn uniformly per directed edge
    RandomWeight,
    /// Connected Watts-Strogatz ring lattice with rewiring, weights 1
    SmallWorld,
}

impl Topology {
    pub fn as_str(&self) -> &'static str {
        match self {
            Topology::UniformWeight => "uniform_weight",
            Topology::RandomWeight => "random_weight",
            Topology::SmallWorld => "small_world",
        }
    }
}

impl FromStr for Topology {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uniform_weight" => Ok(Topology::UniformWeight),
            "random_weight" => Ok(Topology::RandomWeight),
            "small_world" => Ok(Topology::SmallWorld),
            _ => Err(ConfigError::InvalidValue {
                key: "topology".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Strategy for choosing the node that starts out fully convinced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedMode {
    /// Any node
    Random,
    /// Any staff node
    Staff,
    /// Top-quartile betweenness residents
    HighBetweenness,
    /// Top-quartile degree residents
    HighDegree,
    /// Bottom-quartile betweenness residents
    PeripheralBetweenness,
    /// Bottom-quartile degree residents
    PeripheralDegree,
}

impl SeedMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeedMode::Random => "random",
            SeedMode::Staff => "staff",
            SeedMode::HighBetweenness => "high_betweenness",
            SeedMode::HighDegree => "high_degree",
            SeedMode::PeripheralBetweenness => "peripheral_betweenness",
            SeedMode::PeripheralDegree => "peripheral_degree",
        }
    }
}

impl FromStr for SeedMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(SeedMode::Random),
            "staff" => Ok(SeedMode::Staff),
            "high_betweenness" => Ok(SeedMode::HighBetweenness),
            "high_degree" => Ok(SeedMode::HighDegree),
            "peripheral_betweenness" => Ok(SeedMode::PeripheralBetweenness),
            "peripheral_degree" => Ok(SeedMode::PeripheralDegree),
            _ => Err(ConfigError::InvalidValue {
                key: "seed_mode".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Presentation format of the circulating misinformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfoFormat {
    Text,
    Visual,
}

impl InfoFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoFormat::Text => "text",
            InfoFormat::Visual => "visual",
        }
    }
}

impl FromStr for InfoFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(InfoFormat::Text),
            "visual" => Ok(InfoFormat::Visual),
            _ => Err(ConfigError::InvalidValue {
                key: "info_format".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// All construction parameters, validated at model-build time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Resident count; total nodes are scaled up by the staff ratio
    pub num_residents: usize,
    /// Staff per resident
    pub staff_resident_ratio: f32,
    /// Target average node degree
    pub avg_node_degree: usize,
    pub topology: Topology,
    /// Beta shape parameters for cognitive ability (swapped between roles)
    pub cognitive_alpha: f32,
    pub cognitive_beta: f32,
    /// Beta shape parameters for digital literacy (same for both roles)
    pub literacy_alpha: f32,
    pub literacy_beta: f32,
    pub seed_mode: SeedMode,
    pub info_format: InfoFormat,
    /// An agent fact-checks each tick with probability 1 - this value
    pub fact_checking_prob: f32,
    /// Multiplier applied to a trust edge when its source spread misinformation
    pub confidence_deprecation_rate: f32,
    /// RNG seed for reproducible runs
    pub seed: u64,
    /// Step budget when no saturation occurs
    pub max_ticks: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_residents: 50,
            staff_resident_ratio: 0.1,
            avg_node_degree: 10,
            topology: Topology::UniformWeight,
            cognitive_alpha: 3.0,
            cognitive_beta: 5.0,
            literacy_alpha: 3.0,
            literacy_beta: 5.0,
            seed_mode: SeedMode::Random,
            info_format: InfoFormat::Text,
            fact_checking_prob: 0.05,
            confidence_deprecation_rate: 0.1,
            seed: 42,
            max_ticks: 1000,
        }
    }
}

impl SimulationConfig {
    /// Total node count: residents plus the staff contingent.
    pub fn total_nodes(&self) -> usize {
        (self.num_residents as f32 * (1.0 + self.staff_resident_ratio)) as usize
    }

    /// Exact number of staff nodes to place.
    pub fn staff_count(&self) -> usize {
        (self.total_nodes() as f32 * self.staff_resident_ratio).round() as usize
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        let config: Self =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Build a configuration from a flat name/value map.
    ///
    /// Unknown names are rejected so sweep drivers fail fast on typos.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        // Deterministic application order regardless of map iteration
        let mut keys: Vec<&String> = params.keys().collect();
        keys.sort();
        for key in keys {
            config.apply_param(key, &params[key])?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Set a single parameter by name.
    pub fn apply_param(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        fn parse<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
            value.parse().map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
            })
        }

        match key {
            "num_residents" => self.num_residents = parse(key, value)?,
            "staff_resident_ratio" => self.staff_resident_ratio = parse(key, value)?,
            "avg_node_degree" => self.avg_node_degree = parse(key, value)?,
            "topology" => self.topology = value.parse()?,
            "cognitive_alpha" => self.cognitive_alpha = parse(key, value)?,
            "cognitive_beta" => self.cognitive_beta = parse(key, value)?,
            "literacy_alpha" => self.literacy_alpha = parse(key, value)?,
            "literacy_beta" => self.literacy_beta = parse(key, value)?,
            "seed_mode" => self.seed_mode = value.parse()?,
            "info_format" => self.info_format = value.parse()?,
            "fact_checking_prob" => self.fact_checking_prob = parse(key, value)?,
            "confidence_deprecation_rate" => {
                self.confidence_deprecation_rate = parse(key, value)?
            }
            "seed" => self.seed = parse(key, value)?,
            "max_ticks" => self.max_ticks = parse(key, value)?,
            _ => return Err(ConfigError::UnknownParam(key.to_string())),
        }
        Ok(())
    }

    /// Check all parameter ranges. Fatal at construction per the error model.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let n = self.total_nodes();
        if self.num_residents < 2 {
            return Err(ConfigError::OutOfRange(
                "num_residents must be at least 2".to_string(),
            ));
        }
        if self.staff_resident_ratio < 0.0 || !self.staff_resident_ratio.is_finite() {
            return Err(ConfigError::OutOfRange(
                "staff_resident_ratio must be a finite non-negative number".to_string(),
            ));
        }
        if self.avg_node_degree == 0 || self.avg_node_degree >= n {
            return Err(ConfigError::OutOfRange(format!(
                "avg_node_degree must be in 1..{} for {} nodes",
                n, n
            )));
        }
        if !(0.0..=1.0).contains(&self.fact_checking_prob) {
            return Err(ConfigError::OutOfRange(
                "fact_checking_prob must be within [0, 1]".to_string(),
            ));
        }
        if !(self.confidence_deprecation_rate > 0.0 && self.confidence_deprecation_rate <= 1.0) {
            return Err(ConfigError::OutOfRange(
                "confidence_deprecation_rate must be within (0, 1]".to_string(),
            ));
        }
        for (name, shape) in [
            ("cognitive_alpha", self.cognitive_alpha),
            ("cognitive_beta", self.cognitive_beta),
            ("literacy_alpha", self.literacy_alpha),
            ("literacy_beta", self.literacy_beta),
        ] {
            if !(shape > 0.0 && shape.is_finite()) {
                return Err(ConfigError::OutOfRange(format!(
                    "{} must be a positive finite shape parameter",
                    name
                )));
            }
        }
        if self.staff_count() > n {
            return Err(ConfigError::OutOfRange(
                "staff_resident_ratio places more staff than nodes".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(String),
    #[error("could not parse config file: {0}")]
    Parse(String),
    #[error("unknown parameter `{0}`")]
    UnknownParam(String),
    #[error("invalid value `{value}` for `{key}`")]
    InvalidValue { key: String, value: String },
    #[error("{0}")]
    OutOfRange(String),
}
