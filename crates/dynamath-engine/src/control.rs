// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Dynamath Control Surface
// ─────────────────────────────────────────────────────────────────────
//! Between-tick mutations: parameter merge, sensor merge, reset, and
//! dispatch of tagged inbound commands.
//!
//! Merges never fail. Bad fields are skipped one by one and the rest of
//! the payload still lands. Only an undecodable command envelope is an
//! error, and it leaves the engine untouched.

use serde_json::{Map, Value};

use dynamath_types::{DynamathError, DynamathResult, EngineConfig};

use crate::engine::FieldEngine;
use crate::neighbors::BruteForceNeighbors;

/// Inbound command `{ "type": ..., "payload": ... }`.
///
/// A missing payload decodes as an empty object.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Partial `SimParams` update.
    Control(Value),
    /// Partial `SensorReading` update.
    Sensor(Value),
    /// Reinitialise state, keep parameters. The payload is ignored.
    Reset,
}

impl Command {
    /// Decode a command from JSON text.
    pub fn parse(text: &str) -> DynamathResult<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| DynamathError::Command(format!("JSON parse error: {e}")))?;
        Self::from_value(value)
    }

    /// Decode a command from an already-parsed JSON value.
    pub fn from_value(mut value: Value) -> DynamathResult<Self> {
        let Some(map) = value.as_object_mut() else {
            return Err(DynamathError::Command(
                "command must be a JSON object".to_string(),
            ));
        };
        let payload = map
            .remove("payload")
            .unwrap_or_else(|| Value::Object(Map::new()));
        match map.get("type").and_then(Value::as_str) {
            Some("control") => Ok(Command::Control(payload)),
            Some("sensor") => Ok(Command::Sensor(payload)),
            Some("reset") => Ok(Command::Reset),
            Some(other) => Err(DynamathError::Command(format!(
                "unrecognised command type {other:?}"
            ))),
            None => Err(DynamathError::Command(
                "command has no string \"type\" field".to_string(),
            )),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Command::Control(_) => "control",
            Command::Sensor(_) => "sensor",
            Command::Reset => "reset",
        }
    }
}

impl FieldEngine {
    /// Merge recognised coefficient keys from `payload`.
    ///
    /// Returns how many fields changed. Unknown keys, mistyped values and
    /// missing keys leave the prior value in place. No range checks.
    pub fn apply_parameters(&mut self, payload: &Value) -> usize {
        self.params.merge_json(payload)
    }

    /// Merge sensor fields from `payload`; `rgb` only as three numbers.
    pub fn apply_sensor(&mut self, payload: &Value) -> usize {
        self.sensor.merge_json(payload)
    }

    /// Rebuild all state from the stored node count and seed.
    ///
    /// A fresh engine is constructed and the current parameters are
    /// copied onto it; sensor reading and tick count start over.
    pub fn reset(&mut self) {
        let search = std::mem::replace(&mut self.neighbor_search, Box::new(BruteForceNeighbors));
        let mut fresh = FieldEngine::from_config(self.cfg.clone(), search);
        fresh.params = self.params.clone();
        log::info!(
            "field engine reset: n={}, seed={}, after {} ticks",
            self.cfg.node_count,
            self.cfg.seed,
            self.tick_count
        );
        *self = fresh;
    }

    /// Rebuild with a different node count and seed, keeping parameters.
    pub fn reset_with(&mut self, node_count: usize, seed: u64) -> DynamathResult<()> {
        let cfg = EngineConfig {
            node_count,
            seed,
            ..self.cfg.clone()
        };
        cfg.validate()?;
        self.cfg = cfg;
        self.reset();
        Ok(())
    }

    /// Dispatch one decoded command.
    pub fn apply_command(&mut self, command: &Command) {
        match command {
            Command::Control(payload) => {
                self.apply_parameters(payload);
            }
            Command::Sensor(payload) => {
                self.apply_sensor(payload);
            }
            Command::Reset => self.reset(),
        }
    }

    /// Decode and dispatch a JSON command message.
    pub fn handle_message(&mut self, text: &str) -> DynamathResult<&'static str> {
        let command = Command::parse(text)?;
        self.apply_command(&command);
        Ok(command.kind())
    }
}
