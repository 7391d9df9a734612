// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Dynamath Neighbor Search
// ─────────────────────────────────────────────────────────────────────
//! k-nearest-neighbor discovery over node embeddings.
//!
//! The default strategy is a quadratic scan over the precomputed
//! distance matrix, which is fine for tens of nodes. Larger populations
//! can plug in a spatial index through `NeighborSearch` without touching
//! the tick contract.

use dynamath_physics::EMBED_DIM;

/// Strategy for selecting each node's nearest other nodes.
pub trait NeighborSearch: Send + Sync {
    /// For every node, up to `k` other node indices by ascending distance.
    ///
    /// `distances` is the n×n row-major matrix of pairwise Euclidean
    /// distances over `positions`. A node never lists itself.
    fn neighbors(&self, positions: &[[f64; EMBED_DIM]], distances: &[f64], k: usize)
        -> Vec<Vec<usize>>;

    /// Human-readable strategy name.
    fn name(&self) -> &'static str;
}

/// Sort every row of the distance matrix. O(n² log n).
///
/// Ties break on the lower index so results are fully deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForceNeighbors;

impl NeighborSearch for BruteForceNeighbors {
    fn neighbors(
        &self,
        positions: &[[f64; EMBED_DIM]],
        distances: &[f64],
        k: usize,
    ) -> Vec<Vec<usize>> {
        let n = positions.len();
        debug_assert_eq!(distances.len(), n * n);

        (0..n)
            .map(|i| {
                let row = &distances[i * n..(i + 1) * n];
                let mut others: Vec<usize> = (0..n).filter(|&j| j != i).collect();
                others.sort_by(|&a, &b| row[a].total_cmp(&row[b]).then(a.cmp(&b)));
                others.truncate(k);
                others
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "brute_force"
    }
}
