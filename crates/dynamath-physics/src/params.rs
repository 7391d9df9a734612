// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Dynamath Canonical Constants
// ─────────────────────────────────────────────────────────────────────
//! Dimensions, numerical floors, and fixed gains shared by the equation
//! library and the step engine.
//!
//! The floors replace divide-by-zero handling everywhere: degenerate
//! geometry degrades numerically instead of raising.

/// Dimension of a node embedding.
pub const EMBED_DIM: usize = 2;

/// Dimension of a node internal state.
pub const STATE_DIM: usize = 4;

/// Denominator floor for cosine similarity inside the edge pass.
pub const COSINE_FLOOR: f64 = 1e-8;

/// Denominator floor for the state-consistency term 1 / (ε + ‖S_i − S_j‖).
pub const CONSISTENCY_FLOOR: f64 = 1e-4;

/// Added to squared distance in the field-force kernel.
pub const FORCE_FLOOR: f64 = 1e-6;

/// Added to per-node state magnitudes before normalising to probabilities.
pub const MAGNITUDE_FLOOR: f64 = 1e-9;

/// Lower clip applied to probabilities before taking logarithms.
pub const ENTROPY_CLIP: f64 = 1e-12;

/// Upper clamp on every edge weight.
pub const WEIGHT_CLAMP: f64 = 1e9;

/// Amplitude of the sensor-driven global flow per unit motion.
pub const SENSOR_FLOW_GAIN: f64 = 0.05;

/// Brightness floor inside the flow amplitude `0.2 + 0.8·brightness`.
pub const SENSOR_BRIGHTNESS_BASE: f64 = 0.2;

/// Multiplier mapping `edge_threshold` onto accumulated weight units.
///
/// A unit-reconciliation artifact of an earlier display scale; reproduced
/// literally for compatibility rather than derived.
pub const LEGACY_EDGE_SCALE: f64 = 3.2e7;

/// Fixed neighbor-context gain of the reference nonlinear operator.
pub const REFERENCE_CONTEXT_GAIN: f64 = 0.6;

/// Fixed input gain of the reference nonlinear operator.
pub const REFERENCE_INPUT_GAIN: f64 = 0.2;

/// Default rate for `stabilizing_flow`.
pub const STABILIZING_RATE: f64 = 0.02;
