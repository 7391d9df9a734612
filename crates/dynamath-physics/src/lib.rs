// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Dynamath Physics
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Equation library for the Dynamath field engine: similarity and
//! distance metrics, density/potential/force fields, advection, edge
//! accretion, drift and entropy, and bounded state operators.

pub mod equations;
pub mod params;
pub mod rng;

pub use equations::{
    advect, cosine_sim, cosine_sim_floored, density, distance, distance_matrix, drift,
    edge_delta, entropy, field_force_on_grid, force, forced_update, grid_points, kernel_force,
    nonlinear_update, potential, stabilizing_flow, FieldSample,
};
pub use params::{EMBED_DIM, STATE_DIM};
pub use rng::SimpleRng;
