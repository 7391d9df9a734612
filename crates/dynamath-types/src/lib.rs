// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Dynamath Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Type definitions, configuration, and error hierarchy for the
//! Dynamath field engine.

pub mod config;
pub mod error;
pub mod sensor;
pub mod snapshot;

pub use config::{EngineConfig, SimParams, MAX_NODE_COUNT};
pub use error::{DynamathError, DynamathResult};
pub use sensor::SensorReading;
pub use snapshot::{Edge, Snapshot, StepMetrics, TickFrame};
