// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Dynamath PyO3 FFI Bindings
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
// Note: #[deny(unsafe_code)] not applied — PyO3 proc macros generate
// unsafe blocks internally. All hand-written code in this crate is safe.
//! Python-callable wrapper around the Dynamath field engine.
//!
//! Exposes `DynamathEngine` to Python via PyO3. The engine sits behind a
//! `SharedEngine` lock and every call releases the GIL while it holds
//! that lock, so a Python-side transport thread can push control updates
//! while another thread ticks.
//!
//! Install: `pip install -e crates/dynamath-ffi` (requires maturin).
//!
//! Usage from Python:
//! ```python
//! from dynamath import DynamathEngine
//!
//! engine = DynamathEngine(node_count=12, seed=0)
//! engine.set_sensor({"motion": 0.5, "hue": 1.2})
//! metrics = engine.step()
//! frame = engine.snapshot()
//! ```

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyDict};
use serde_json::{Map, Number, Value};

use dynamath_engine::SharedEngine;

// ─── Conversion helpers ─────────────────────────────────────────────

/// Best-effort conversion of a Python object into JSON.
///
/// Anything without a JSON counterpart becomes `null`, which every merge
/// then ignores field by field.
fn py_to_json(obj: &Bound<'_, PyAny>) -> Value {
    if obj.is_none() {
        return Value::Null;
    }
    if let Ok(flag) = obj.downcast::<PyBool>() {
        return Value::Bool(flag.is_true());
    }
    if let Ok(x) = obj.extract::<f64>() {
        // JSON has no NaN or infinity; the string form coerces back.
        return Number::from_f64(x).map_or_else(|| Value::String(x.to_string()), Value::Number);
    }
    if let Ok(text) = obj.extract::<String>() {
        return Value::String(text);
    }
    if let Ok(dict) = obj.downcast::<PyDict>() {
        return dict_to_json(dict);
    }
    if let Ok(items) = obj.extract::<Vec<Bound<'_, PyAny>>>() {
        return Value::Array(items.iter().map(py_to_json).collect());
    }
    Value::Null
}

fn dict_to_json(dict: &Bound<'_, PyDict>) -> Value {
    let mut map = Map::new();
    for (key, value) in dict.iter() {
        if let Ok(key) = key.extract::<String>() {
            map.insert(key, py_to_json(&value));
        }
    }
    Value::Object(map)
}

// ─── DynamathEngine ─────────────────────────────────────────────────

/// Multi-agent field simulation with live parameter and sensor control.
#[pyclass(name = "DynamathEngine")]
struct PyDynamathEngine {
    inner: SharedEngine,
}

#[pymethods]
impl PyDynamathEngine {
    #[new]
    #[pyo3(signature = (node_count = 12, seed = 0))]
    fn new(node_count: usize, seed: u64) -> PyResult<Self> {
        let inner =
            SharedEngine::create(node_count, seed).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Advance one tick. Returns `{"drift": float, "entropy": float}`.
    fn step(&self, py: Python<'_>) -> PyResult<PyObject> {
        let metrics = py.allow_threads(|| self.inner.step());
        let dict = PyDict::new(py);
        dict.set_item("drift", metrics.drift)?;
        dict.set_item("entropy", metrics.entropy)?;
        Ok(dict.into())
    }

    /// Positions and thresholded edges as `{"positions": [[x, y]], "edges": [(i, j, w)]}`.
    fn snapshot(&self, py: Python<'_>) -> PyResult<PyObject> {
        let snap = py.allow_threads(|| self.inner.snapshot());
        let positions: Vec<Vec<f64>> = snap.positions.iter().map(|p| p.to_vec()).collect();
        let edges: Vec<(usize, usize, f64)> = snap
            .edges
            .iter()
            .map(|e| (e.source(), e.target(), e.weight()))
            .collect();
        let dict = PyDict::new(py);
        dict.set_item("positions", positions)?;
        dict.set_item("edges", edges)?;
        Ok(dict.into())
    }

    /// Step, then return the merged frame as a JSON string.
    fn tick_json(&self, py: Python<'_>) -> PyResult<String> {
        let frame = py.allow_threads(|| self.inner.advance());
        serde_json::to_string(&frame).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Partial coefficient update. Returns how many fields changed.
    ///
    /// A payload that is not a dict changes nothing.
    fn set_parameters(&self, py: Python<'_>, payload: &Bound<'_, PyAny>) -> usize {
        let payload = py_to_json(payload);
        py.allow_threads(|| self.inner.set_parameters(&payload))
    }

    /// Partial sensor update. Returns how many fields changed.
    fn set_sensor(&self, py: Python<'_>, payload: &Bound<'_, PyAny>) -> usize {
        let payload = py_to_json(payload);
        py.allow_threads(|| self.inner.set_sensor(&payload))
    }

    /// Reinitialise positions, states and edges; keep parameters.
    fn reset(&self, py: Python<'_>) {
        py.allow_threads(|| self.inner.reset());
    }

    /// Apply a `{"type": ..., "payload": ...}` JSON command.
    ///
    /// Returns the command type. Raises `ValueError` on a bad envelope.
    fn handle_message(&self, py: Python<'_>, text: &str) -> PyResult<String> {
        py.allow_threads(|| self.inner.handle_message(text))
            .map(str::to_string)
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Current coefficients, keyed as on the wire.
    fn parameters(&self, py: Python<'_>) -> PyResult<PyObject> {
        let p = self.inner.params();
        let dict = PyDict::new(py);
        dict.set_item("speed_dt", p.dt)?;
        dict.set_item("pull_k", p.pull_k)?;
        dict.set_item("edge_threshold", p.edge_threshold)?;
        dict.set_item("alpha", p.alpha)?;
        dict.set_item("beta", p.beta)?;
        dict.set_item("gamma", p.gamma)?;
        Ok(dict.into())
    }

    #[getter]
    fn node_count(&self) -> usize {
        self.inner.with_engine(|e| e.node_count())
    }

    #[getter]
    fn tick_count(&self) -> u64 {
        self.inner.tick_count()
    }

    fn __repr__(&self) -> String {
        let (n, seed, ticks) = self
            .inner
            .with_engine(|e| (e.node_count(), e.config().seed, e.tick_count()));
        format!("DynamathEngine(node_count={n}, seed={seed}, ticks={ticks})")
    }
}

// ─── Module ─────────────────────────────────────────────────────────

#[pymodule]
fn dynamath(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyDynamathEngine>()?;
    Ok(())
}
