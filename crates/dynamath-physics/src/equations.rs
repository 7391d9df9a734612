// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Dynamath Equation Library
// ─────────────────────────────────────────────────────────────────────
//! Stateless numeric primitives for the field engine.
//!
//!   sim(a, b)   = a·b / (‖a‖‖b‖)                 cosine similarity
//!   ρ(x)        = Σ_p exp(-‖x − p‖² / 2h²)        Gaussian density
//!   Φ           = −α ρ                            potential
//!   F           = −∇Φ                             centred differences
//!   p'          = p + dt·v                        forward Euler
//!   w'          = max(0, w + dt(αA − βD + γC))    edge accretion
//!   D_n         = ‖s0 − s_n‖                      drift
//!   H(p)        = −Σ p log p                      Shannon entropy
//!   S'          = tanh(S + a·R + b·U)             forced update
//!
//! Every function is a deterministic map from its arguments; none holds
//! state. Divide-by-zero is avoided with fixed floors, never by erroring.

use dynamath_types::{DynamathError, DynamathResult};

use crate::params::{ENTROPY_CLIP, REFERENCE_CONTEXT_GAIN, REFERENCE_INPUT_GAIN};

#[inline]
fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[inline]
fn norm(a: &[f64]) -> f64 {
    dot(a, a).sqrt()
}

/// Cosine of the angle between `a` and `b`.
///
/// Returns 0.0 when either vector has zero magnitude. That 0 means
/// "undefined", not "orthogonal".
pub fn cosine_sim(a: &[f64], b: &[f64]) -> f64 {
    let na = norm(a);
    let nb = norm(b);
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    dot(a, b) / (na * nb)
}

/// Cosine similarity with `floor` added to the norm product instead of a
/// zero test. Always finite for finite input.
pub fn cosine_sim_floored(a: &[f64], b: &[f64], floor: f64) -> f64 {
    dot(a, b) / (norm(a) * norm(b) + floor)
}

/// Euclidean norm of `a − b`.
pub fn distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Full pairwise distance matrix, n×n row-major, zero diagonal.
pub fn distance_matrix<const D: usize>(points: &[[f64; D]]) -> Vec<f64> {
    let n = points.len();
    let mut d = vec![0.0; n * n];
    for i in 0..n {
        for j in (i + 1)..n {
            let dij = distance(&points[i], &points[j]);
            d[i * n + j] = dij;
            d[j * n + i] = dij;
        }
    }
    d
}

/// Sum of isotropic Gaussian bumps centred on `points`, evaluated at
/// each `grid` location. Larger `bandwidth` smooths more.
pub fn density(points: &[[f64; 2]], grid: &[[f64; 2]], bandwidth: f64) -> Vec<f64> {
    let two_h2 = 2.0 * bandwidth * bandwidth;
    grid.iter()
        .map(|g| {
            points
                .iter()
                .map(|p| {
                    let dx = g[0] - p[0];
                    let dy = g[1] - p[1];
                    (-(dx * dx + dy * dy) / two_h2).exp()
                })
                .sum()
        })
        .collect()
}

/// Φ = −α ρ. Lower potential where density is higher.
pub fn potential(density: &[f64], alpha: f64) -> Vec<f64> {
    density.iter().map(|rho| -alpha * rho).collect()
}

/// F = −∇Φ over a `(rows, cols)` row-major grid with unit spacing.
///
/// Centred differences on interior cells only: the x-component is zero
/// on the first and last column, the y-component on the first and last
/// row. No wraparound, no one-sided edges.
pub fn force(grid_values: &[f64], shape: (usize, usize)) -> DynamathResult<Vec<[f64; 2]>> {
    let (rows, cols) = shape;
    if grid_values.len() != rows * cols {
        return Err(DynamathError::Shape {
            expected: rows * cols,
            got: grid_values.len(),
        });
    }

    let mut f = vec![[0.0; 2]; rows * cols];
    for r in 0..rows {
        for c in 0..cols {
            let idx = r * cols + c;
            if c >= 1 && c + 1 < cols {
                let gx = (grid_values[idx + 1] - grid_values[idx - 1]) / 2.0;
                f[idx][0] = -gx;
            }
            if r >= 1 && r + 1 < rows {
                let gy = (grid_values[idx + cols] - grid_values[idx - cols]) / 2.0;
                f[idx][1] = -gy;
            }
        }
    }
    Ok(f)
}

/// Row-major lattice spanning `x_range` × `y_range` inclusive.
///
/// Column index walks x, row index walks y. A single row or column sits
/// at the lower bound.
pub fn grid_points(x_range: (f64, f64), y_range: (f64, f64), shape: (usize, usize)) -> Vec<[f64; 2]> {
    let (rows, cols) = shape;
    let step = |lo: f64, hi: f64, count: usize| {
        if count > 1 {
            (hi - lo) / (count - 1) as f64
        } else {
            0.0
        }
    };
    let dx = step(x_range.0, x_range.1, cols);
    let dy = step(y_range.0, y_range.1, rows);

    let mut grid = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            grid.push([x_range.0 + c as f64 * dx, y_range.0 + r as f64 * dy]);
        }
    }
    grid
}

/// Density, potential and force sampled on one grid.
#[derive(Debug, Clone)]
pub struct FieldSample {
    pub shape: (usize, usize),
    pub grid: Vec<[f64; 2]>,
    pub density: Vec<f64>,
    pub potential: Vec<f64>,
    pub force: Vec<[f64; 2]>,
}

/// Chain density → potential → force for `points` over a lattice.
pub fn field_force_on_grid(
    points: &[[f64; 2]],
    x_range: (f64, f64),
    y_range: (f64, f64),
    shape: (usize, usize),
    bandwidth: f64,
    alpha: f64,
) -> DynamathResult<FieldSample> {
    let grid = grid_points(x_range, y_range, shape);
    let density = density(points, &grid, bandwidth);
    let potential = potential(&density, alpha);
    let force = force(&potential, shape)?;
    Ok(FieldSample {
        shape,
        grid,
        density,
        potential,
        force,
    })
}

/// Gaussian-kernel pull of every point toward its dense neighbourhood.
///
///   F_i = −Σ_j (p_i − p_j) exp(−(‖p_i − p_j‖² + floor) / bandwidth)
///
/// The self term contributes nothing since its displacement is zero.
pub fn kernel_force(points: &[[f64; 2]], bandwidth: f64, floor: f64) -> Vec<[f64; 2]> {
    points
        .iter()
        .map(|pi| {
            let mut grad = [0.0; 2];
            for pj in points {
                let dx = pi[0] - pj[0];
                let dy = pi[1] - pj[1];
                let w = (-(dx * dx + dy * dy + floor) / bandwidth).exp();
                grad[0] += dx * w;
                grad[1] += dy * w;
            }
            [-grad[0], -grad[1]]
        })
        .collect()
}

/// Forward-Euler position update p ← p + dt·v.
pub fn advect(positions: &[[f64; 2]], velocity: &[[f64; 2]], dt: f64) -> Vec<[f64; 2]> {
    debug_assert_eq!(positions.len(), velocity.len());
    positions
        .iter()
        .zip(velocity)
        .map(|(p, v)| [p[0] + dt * v[0], p[1] + dt * v[1]])
        .collect()
}

/// Clamped linear edge accretion:
/// `max(0, w + dt·(α·A − β·D + γ·C))`.
#[allow(clippy::too_many_arguments)]
#[inline]
pub fn edge_delta(
    w: f64,
    a: f64,
    d: f64,
    c: f64,
    alpha: f64,
    beta: f64,
    gamma: f64,
    dt: f64,
) -> f64 {
    let dw = alpha * a - beta * d + gamma * c;
    (w + dt * dw).max(0.0)
}

/// Euclidean distance between two flattened state snapshots.
pub fn drift(s0: &[f64], sn: &[f64]) -> f64 {
    debug_assert_eq!(s0.len(), sn.len());
    distance(s0, sn)
}

/// Shannon entropy −Σ p log p in nats.
///
/// Input is clipped to [1e-12, 1] and renormalised first, so the result
/// is finite and non-negative for any non-negative input. Empty input
/// has zero entropy.
pub fn entropy(probabilities: &[f64]) -> f64 {
    if probabilities.is_empty() {
        return 0.0;
    }
    let clipped: Vec<f64> = probabilities
        .iter()
        .map(|p| p.clamp(ENTROPY_CLIP, 1.0))
        .collect();
    let total: f64 = clipped.iter().sum();
    -clipped
        .iter()
        .map(|p| {
            let q = p / total;
            q * q.ln()
        })
        .sum::<f64>()
}

/// Parameterised bounded update `tanh(S + a·R + b·U)`.
pub fn forced_update<const D: usize>(
    s: &[f64; D],
    r_ctx: &[f64; D],
    u: &[f64; D],
    context_gain: f64,
    input_gain: f64,
) -> [f64; D] {
    std::array::from_fn(|k| (s[k] + context_gain * r_ctx[k] + input_gain * u[k]).tanh())
}

/// Reference operator `tanh(S + 0.6R + 0.2U)`.
pub fn nonlinear_update<const D: usize>(s: &[f64; D], r_ctx: &[f64; D], u: &[f64; D]) -> [f64; D] {
    forced_update(s, r_ctx, u, REFERENCE_CONTEXT_GAIN, REFERENCE_INPUT_GAIN)
}

/// Exponential pull toward `target`: `S + k(target − S)`.
pub fn stabilizing_flow<const D: usize>(s: &[f64; D], target: &[f64; D], k: f64) -> [f64; D] {
    std::array::from_fn(|i| s[i] + k * (target[i] - s[i]))
}
