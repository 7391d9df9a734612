// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Dynamath Snapshot Projection
// ─────────────────────────────────────────────────────────────────────
//! Read-only views of engine state for downstream consumers.

use dynamath_physics::params::LEGACY_EDGE_SCALE;
use dynamath_types::{Edge, Snapshot, StepMetrics, TickFrame};

use crate::engine::FieldEngine;

impl FieldEngine {
    /// Weight a pair must exceed to appear in `snapshot().edges`.
    pub fn display_threshold(&self) -> f64 {
        self.params.edge_threshold * LEGACY_EDGE_SCALE
    }

    /// Positions plus the thresholded upper-triangle edge list.
    ///
    /// Never mutates state; two calls without a tick in between return
    /// identical data.
    pub fn snapshot(&self) -> Snapshot {
        let n = self.ns.n;
        let th = self.display_threshold();
        let mut edges = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                let w = self.ns.weights[i * n + j];
                if w > th {
                    edges.push(Edge(i, j, w));
                }
            }
        }
        Snapshot {
            positions: self.ns.embeddings.clone(),
            edges,
        }
    }

    /// Step once and package the result with a fresh snapshot.
    pub fn tick(&mut self) -> TickFrame {
        let metrics: StepMetrics = self.step();
        TickFrame::new(self.snapshot(), metrics)
    }
}
