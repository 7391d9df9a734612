// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Dynamath Projection Records
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

/// One displayed edge `(i, j, weight)` with `i < j`.
///
/// Serialises as a three-element array to match the wire contract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge(pub usize, pub usize, pub f64);

impl Edge {
    pub fn source(&self) -> usize {
        self.0
    }

    pub fn target(&self) -> usize {
        self.1
    }

    pub fn weight(&self) -> f64 {
        self.2
    }
}

/// Read-only visual state of the simulation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Node embeddings in index order.
    pub positions: Vec<[f64; 2]>,
    /// Edges whose weight exceeds the scaled display threshold.
    pub edges: Vec<Edge>,
}

/// Scalar metrics returned by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StepMetrics {
    /// ‖S0 − S‖ over all nodes and components.
    pub drift: f64,
    /// Shannon entropy of normalised per-node state magnitudes.
    pub entropy: f64,
}

/// Payload pushed downstream once per tick: snapshot plus metrics.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TickFrame {
    pub positions: Vec<[f64; 2]>,
    pub edges: Vec<Edge>,
    pub drift: f64,
    pub entropy: f64,
}

impl TickFrame {
    pub fn new(snapshot: Snapshot, metrics: StepMetrics) -> Self {
        Self {
            positions: snapshot.positions,
            edges: snapshot.edges,
            drift: metrics.drift,
            entropy: metrics.entropy,
        }
    }
}
