// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Dynamath Field Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Discrete-time multi-agent field simulation.
//!
//! A small population of nodes carries 2-D embeddings, 4-D internal
//! states and an n×n edge-weight matrix. Each tick pulls embeddings
//! toward dense regions, drifts them with the external sensor reading,
//! diffuses states across nearest neighbors, and accretes edge weights
//! from similarity, distance and state consistency.
//!
//! Architecture:
//!   - NodeSpace: pre-allocated state container (E, S, S0, W)
//!   - NeighborSearch: pluggable k-nearest-neighbor strategy
//!   - FieldEngine: six-stage tick orchestrator
//!   - projection: thresholded snapshot and tick frame
//!   - control: parameter/sensor merge, reset, tagged commands
//!   - SharedEngine: lock-guarded handle for concurrent control
//!   - TickDriver: fixed-rate background tick loop

#![deny(unsafe_code)]

pub mod control;
pub mod driver;
pub mod engine;
pub mod handle;
pub mod neighbors;
pub mod node_space;
pub mod projection;

pub use control::Command;
pub use driver::TickDriver;
pub use engine::FieldEngine;
pub use handle::SharedEngine;
pub use neighbors::{BruteForceNeighbors, NeighborSearch};
pub use node_space::NodeSpace;
