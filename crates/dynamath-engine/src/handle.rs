// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Dynamath Shared Engine Handle
// ─────────────────────────────────────────────────────────────────────
//! Single-owner access to one engine from several threads.
//!
//! Every operation takes the same lock, so control updates always land
//! strictly between ticks and a reader never sees a torn mixture of old
//! and new coefficients.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::Value;

use dynamath_types::{DynamathResult, SimParams, Snapshot, StepMetrics, TickFrame};

use crate::control::Command;
use crate::engine::FieldEngine;

/// Cloneable, thread-safe handle to a `FieldEngine`.
///
/// Thread-safe: all access is serialised by a `parking_lot::Mutex`.
#[derive(Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<FieldEngine>>,
}

impl SharedEngine {
    pub fn new(engine: FieldEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Construct an engine with default configuration and wrap it.
    pub fn create(node_count: usize, seed: u64) -> DynamathResult<Self> {
        Ok(Self::new(FieldEngine::create(node_count, seed)?))
    }

    /// Step and snapshot under one lock acquisition.
    pub fn advance(&self) -> TickFrame {
        self.inner.lock().tick()
    }

    pub fn step(&self) -> StepMetrics {
        self.inner.lock().step()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.inner.lock().snapshot()
    }

    pub fn set_parameters(&self, payload: &Value) -> usize {
        self.inner.lock().apply_parameters(payload)
    }

    pub fn set_sensor(&self, payload: &Value) -> usize {
        self.inner.lock().apply_sensor(payload)
    }

    pub fn reset(&self) {
        self.inner.lock().reset();
    }

    pub fn apply_command(&self, command: &Command) {
        self.inner.lock().apply_command(command);
    }

    /// Decode and apply one JSON command; returns its type tag.
    pub fn handle_message(&self, text: &str) -> DynamathResult<&'static str> {
        let command = Command::parse(text)?;
        self.apply_command(&command);
        Ok(command.kind())
    }

    pub fn params(&self) -> SimParams {
        self.inner.lock().params().clone()
    }

    pub fn tick_count(&self) -> u64 {
        self.inner.lock().tick_count()
    }

    /// Configured period between driver ticks.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.inner.lock().config().tick_interval_ms)
    }

    /// Run `f` with exclusive access to the engine.
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut FieldEngine) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
