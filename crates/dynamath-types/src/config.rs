// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Dynamath Configuration
// ─────────────────────────────────────────────────────────────────────
//! Tunable coefficients (`SimParams`) and construction-time settings
//! (`EngineConfig`).
//!
//! `SimParams` is the only record the control surface may touch while
//! the engine runs. Partial updates arrive as JSON-shaped key/value maps
//! and are merged field by field: recognised keys overwrite, unknown or
//! mistyped keys are skipped, nothing is range-checked.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DynamathError, DynamathResult};

/// Largest population an engine accepts. W alone is n² f64 values.
pub const MAX_NODE_COUNT: usize = 4096;

/// Coerce a JSON value to `f64` the way a lenient wire peer expects:
/// numbers as-is, booleans as 0/1, numeric strings parsed.
///
/// Everything else (null, arrays, objects, junk strings) yields `None`.
pub fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Dynamic coefficients for one simulation instance.
///
/// `alpha` and `beta` are shared between state forcing and edge
/// accretion; see `FieldEngine::step`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimParams {
    /// Integration step for the field-force drift. Wire key: `speed_dt`.
    #[serde(rename = "speed_dt")]
    pub dt: f64,
    /// Reserved pull coefficient. Stored and echoed, read by nothing.
    pub pull_k: f64,
    /// Display cutoff for the snapshot edge list (pre-scale units).
    pub edge_threshold: f64,
    /// Similarity gain (edges) and neighbor-context gain (states).
    pub alpha: f64,
    /// Distance penalty (edges) and sensor-input gain (states).
    pub beta: f64,
    /// State-consistency gain (edges).
    pub gamma: f64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            dt: 0.02,
            pull_k: 0.01,
            edge_threshold: 0.06,
            alpha: 0.20,
            beta: 0.05,
            gamma: 0.10,
        }
    }
}

impl SimParams {
    /// Merge a partial update into these parameters.
    ///
    /// Returns the number of fields that were overwritten. A payload
    /// that is not an object changes nothing.
    pub fn merge_json(&mut self, payload: &Value) -> usize {
        let Some(map) = payload.as_object() else {
            log::debug!("parameter payload is not an object; ignored");
            return 0;
        };

        let mut applied = 0;
        for (key, value) in map {
            let slot = match key.as_str() {
                "speed_dt" => &mut self.dt,
                "pull_k" => &mut self.pull_k,
                "edge_threshold" => &mut self.edge_threshold,
                "alpha" => &mut self.alpha,
                "beta" => &mut self.beta,
                "gamma" => &mut self.gamma,
                other => {
                    log::debug!("unrecognised parameter key {other:?}; ignored");
                    continue;
                }
            };
            match coerce_f64(value) {
                Some(v) => {
                    *slot = v;
                    applied += 1;
                }
                None => log::debug!("parameter {key:?} has non-numeric value {value}; ignored"),
            }
        }
        applied
    }

    /// Check that every coefficient is finite.
    ///
    /// Never called by `merge_json`; available to callers that want to
    /// reject updates before applying them.
    pub fn validate(&self) -> DynamathResult<()> {
        let fields = [
            ("speed_dt", self.dt),
            ("pull_k", self.pull_k),
            ("edge_threshold", self.edge_threshold),
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("gamma", self.gamma),
        ];
        for (name, v) in fields {
            if !v.is_finite() {
                return Err(DynamathError::Validation(format!(
                    "{name} must be finite, got {v}"
                )));
            }
        }
        Ok(())
    }

    /// Load from JSON string.
    pub fn from_json(json: &str) -> DynamathResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| DynamathError::Config(format!("JSON parse error: {e}")))
    }
}

/// Construction-time settings. Fixed for the lifetime of an instance
/// and reused verbatim by `reset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of nodes n.
    pub node_count: usize,
    /// RNG seed for embeddings and states.
    pub seed: u64,
    /// Mean of the initial embedding distribution.
    pub center: [f64; 2],
    /// Standard deviation of each initial embedding coordinate.
    pub embedding_spread: f64,
    /// Standard deviation of each initial internal-state component.
    pub state_spread: f64,
    /// Neighbors averaged into each node's context vector.
    pub k_neighbors: usize,
    /// Denominator of the field-force Gaussian kernel exponent.
    pub kernel_bandwidth: f64,
    /// Tick period used by `TickDriver::spawn_with_config` (≈30 ticks/s).
    pub tick_interval_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            node_count: 12,
            seed: 0,
            center: [1.2, 0.6],
            embedding_spread: 0.2,
            state_spread: 0.1,
            k_neighbors: 3,
            kernel_bandwidth: 0.05,
            tick_interval_ms: 33,
        }
    }
}

impl EngineConfig {
    /// Default configuration with the given node count and seed.
    pub fn with_nodes(node_count: usize, seed: u64) -> Self {
        Self {
            node_count,
            seed,
            ..Self::default()
        }
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> DynamathResult<()> {
        if self.node_count < 1 {
            return Err(DynamathError::Config(format!(
                "node_count must be >= 1, got {}",
                self.node_count
            )));
        }
        if self.node_count > MAX_NODE_COUNT {
            return Err(DynamathError::Config(format!(
                "node_count must be <= {MAX_NODE_COUNT}, got {}",
                self.node_count
            )));
        }
        if self.k_neighbors < 1 {
            return Err(DynamathError::Config(format!(
                "k_neighbors must be >= 1, got {}",
                self.k_neighbors
            )));
        }
        if !self.center.iter().all(|c| c.is_finite()) {
            return Err(DynamathError::Config(format!(
                "center must be finite, got {:?}",
                self.center
            )));
        }
        if !(self.embedding_spread.is_finite() && self.embedding_spread >= 0.0) {
            return Err(DynamathError::Config(format!(
                "embedding_spread must be finite and >= 0, got {}",
                self.embedding_spread
            )));
        }
        if !(self.state_spread.is_finite() && self.state_spread >= 0.0) {
            return Err(DynamathError::Config(format!(
                "state_spread must be finite and >= 0, got {}",
                self.state_spread
            )));
        }
        if !(self.kernel_bandwidth.is_finite() && self.kernel_bandwidth > 0.0) {
            return Err(DynamathError::Config(format!(
                "kernel_bandwidth must be > 0, got {}",
                self.kernel_bandwidth
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(DynamathError::Config(
                "tick_interval_ms must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load from JSON string. Missing keys fall back to defaults.
    pub fn from_json(json: &str) -> DynamathResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| DynamathError::Config(format!("JSON parse error: {e}")))
    }
}
