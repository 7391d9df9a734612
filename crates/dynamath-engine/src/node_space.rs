// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Dynamath NodeSpace
// ─────────────────────────────────────────────────────────────────────
//! Pre-allocated state container for one simulation instance.
//!
//! Stores embeddings E, internal states S, the initial-state snapshot
//! S0, and the edge-weight field W. All per-node arrays have length n;
//! n never changes after construction.

use dynamath_physics::{SimpleRng, EMBED_DIM, STATE_DIM};
use dynamath_types::EngineConfig;

/// Central state container.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSpace {
    pub n: usize,
    /// Node embeddings E (length = n).
    pub embeddings: Vec<[f64; EMBED_DIM]>,
    /// Internal states S (length = n).
    pub states: Vec<[f64; STATE_DIM]>,
    /// S captured at initialisation. Never written afterwards.
    initial_states: Vec<[f64; STATE_DIM]>,
    /// Edge weights W, n×n row-major, in [0, 1e9].
    pub weights: Vec<f64>,
}

impl NodeSpace {
    /// Allocate a NodeSpace for n nodes.
    ///
    /// All arrays are zeroed. Use `seeded` for a randomised instance.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            embeddings: vec![[0.0; EMBED_DIM]; n],
            states: vec![[0.0; STATE_DIM]; n],
            initial_states: vec![[0.0; STATE_DIM]; n],
            weights: vec![0.0; n * n],
        }
    }

    /// Build and randomise a NodeSpace from `config`.
    pub fn seeded(config: &EngineConfig) -> Self {
        let mut ns = Self::new(config.node_count);
        ns.randomise(config);
        ns
    }

    /// Draw E around `center` and S around zero, then capture S0.
    ///
    /// Embeddings consume the RNG stream first, states second, so a given
    /// seed always produces the same layout.
    pub fn randomise(&mut self, config: &EngineConfig) {
        let mut rng = SimpleRng::new(config.seed);

        for e in self.embeddings.iter_mut() {
            for (k, v) in e.iter_mut().enumerate() {
                *v = rng.normal(config.center[k], config.embedding_spread);
            }
        }

        for s in self.states.iter_mut() {
            for v in s.iter_mut() {
                *v = rng.normal(0.0, config.state_spread);
            }
        }

        self.initial_states = self.states.clone();
        self.weights.iter_mut().for_each(|w| *w = 0.0);
    }

    /// Initial-state snapshot S0.
    pub fn initial_states(&self) -> &[[f64; STATE_DIM]] {
        &self.initial_states
    }

    /// Weight of the ordered pair (i, j).
    #[inline]
    pub fn weight(&self, i: usize, j: usize) -> f64 {
        self.weights[i * self.n + j]
    }
}
