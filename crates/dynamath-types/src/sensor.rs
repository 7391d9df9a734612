// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Dynamath Sensor Reading
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::coerce_f64;

/// Latest external perceptual input.
///
/// Declared ranges (`motion`, `brightness`, `rgb` in [0, 1], `hue` in
/// [-π, π]) are a caller convention; the engine neither validates nor
/// clamps them. Last-known-value semantics: nothing decays between ticks.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SensorReading {
    pub motion: f64,
    pub brightness: f64,
    pub hue: f64,
    pub rgb: [f64; 3],
}

impl SensorReading {
    /// Mean of the three colour channels.
    pub fn rgb_mean(&self) -> f64 {
        self.rgb.iter().sum::<f64>() / 3.0
    }

    /// Merge a partial update. `rgb` is replaced only when it arrives as
    /// exactly three numeric values.
    ///
    /// Returns the number of fields that were overwritten.
    pub fn merge_json(&mut self, payload: &Value) -> usize {
        let Some(map) = payload.as_object() else {
            log::debug!("sensor payload is not an object; ignored");
            return 0;
        };

        let mut applied = 0;
        for (key, value) in map {
            let slot = match key.as_str() {
                "motion" => &mut self.motion,
                "brightness" => &mut self.brightness,
                "hue" => &mut self.hue,
                "rgb" => {
                    match parse_rgb(value) {
                        Some(rgb) => {
                            self.rgb = rgb;
                            applied += 1;
                        }
                        None => log::debug!("sensor rgb {value} is not three numbers; kept"),
                    }
                    continue;
                }
                other => {
                    log::debug!("unrecognised sensor key {other:?}; ignored");
                    continue;
                }
            };
            match coerce_f64(value) {
                Some(v) => {
                    *slot = v;
                    applied += 1;
                }
                None => log::debug!("sensor {key:?} has non-numeric value {value}; ignored"),
            }
        }
        applied
    }
}

fn parse_rgb(value: &Value) -> Option<[f64; 3]> {
    match value.as_array()?.as_slice() {
        [r, g, b] => Some([coerce_f64(r)?, coerce_f64(g)?, coerce_f64(b)?]),
        _ => None,
    }
}
