// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Dynamath Step Engine
// ─────────────────────────────────────────────────────────────────────
//! Six-stage tick, applied in this order every step:
//!   1. Neighbors: pairwise distances D over E, k nearest per node
//!   2. Field force: E += dt · F, F = Gaussian-kernel pull
//!   3. Sensor flow: E += uniform vector from hue/motion/brightness
//!   4. States: S = tanh(S + α·R_ctx + β·U)
//!   5. Edges: W = clamp(W + α·A − β·D + γ·C, 0, 1e9)
//!   6. Metrics: drift ‖S0 − S‖, entropy of state magnitudes
//!
//! Each array is rebuilt in scratch and swapped in whole, so a tick is
//! never observed half-applied.
//!
//! α and β are shared between stage 4 and stage 5. The coupling is part
//! of the engine's behaviour and is kept as-is.

use dynamath_physics::params::{
    CONSISTENCY_FLOOR, COSINE_FLOOR, FORCE_FLOOR, MAGNITUDE_FLOOR, SENSOR_BRIGHTNESS_BASE,
    SENSOR_FLOW_GAIN, WEIGHT_CLAMP,
};
use dynamath_physics::{
    advect, cosine_sim_floored, distance, distance_matrix, drift, edge_delta, entropy,
    forced_update, kernel_force, EMBED_DIM, STATE_DIM,
};
use dynamath_types::{DynamathResult, EngineConfig, SensorReading, SimParams, StepMetrics};

use crate::neighbors::{BruteForceNeighbors, NeighborSearch};
use crate::node_space::NodeSpace;

/// One simulation instance: state, coefficients, sensor, and the tick.
pub struct FieldEngine {
    pub(crate) cfg: EngineConfig,
    pub(crate) params: SimParams,
    pub(crate) sensor: SensorReading,
    pub(crate) ns: NodeSpace,
    pub(crate) neighbor_search: Box<dyn NeighborSearch>,
    pub(crate) tick_count: u64,
}

impl std::fmt::Debug for FieldEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldEngine")
            .field("node_count", &self.ns.n)
            .field("seed", &self.cfg.seed)
            .field("tick_count", &self.tick_count)
            .field("neighbor_search", &self.neighbor_search.name())
            .finish()
    }
}

impl FieldEngine {
    /// Create a new engine from a validated configuration.
    pub fn new(config: EngineConfig) -> DynamathResult<Self> {
        config.validate()?;
        log::info!(
            "field engine created: n={}, seed={}, k={}",
            config.node_count,
            config.seed,
            config.k_neighbors
        );
        Ok(Self::from_config(config, Box::new(BruteForceNeighbors)))
    }

    /// Default configuration with the given node count and seed.
    pub fn create(node_count: usize, seed: u64) -> DynamathResult<Self> {
        Self::new(EngineConfig::with_nodes(node_count, seed))
    }

    /// Fresh state and default coefficients. `config` must already be valid.
    pub(crate) fn from_config(config: EngineConfig, neighbor_search: Box<dyn NeighborSearch>) -> Self {
        Self {
            ns: NodeSpace::seeded(&config),
            cfg: config,
            params: SimParams::default(),
            sensor: SensorReading::default(),
            neighbor_search,
            tick_count: 0,
        }
    }

    /// Replace the neighbor-discovery strategy.
    pub fn with_neighbor_search(mut self, search: Box<dyn NeighborSearch>) -> Self {
        self.neighbor_search = search;
        self
    }

    // ------------------------------------------------------------------
    // Tick
    // ------------------------------------------------------------------

    /// Advance one tick. Returns drift and entropy after the update.
    pub fn step(&mut self) -> StepMetrics {
        // 1. Neighbors & distances (pre-drift geometry)
        let distances = distance_matrix(&self.ns.embeddings);
        let neighbors =
            self.neighbor_search
                .neighbors(&self.ns.embeddings, &distances, self.cfg.k_neighbors);

        // 2. Field force
        let f = kernel_force(&self.ns.embeddings, self.cfg.kernel_bandwidth, FORCE_FLOOR);
        self.ns.embeddings = advect(&self.ns.embeddings, &f, self.params.dt);

        // 3. Sensor-driven global flow
        let flow = vec![self.sensor_flow(); self.ns.n];
        self.ns.embeddings = advect(&self.ns.embeddings, &flow, 1.0);

        // 4. State diffusion + forcing
        self.ns.states = self.diffuse_states(&neighbors);

        // 5. Edge accretion
        self.ns.weights = self.accrete_edges(&distances);

        // 6. Metrics
        let metrics = StepMetrics {
            drift: self.drift(),
            entropy: self.state_entropy(),
        };
        if !(metrics.drift.is_finite() && metrics.entropy.is_finite()) {
            log::warn!(
                "tick {} produced non-finite metrics: drift={}, entropy={}",
                self.tick_count,
                metrics.drift,
                metrics.entropy
            );
        }

        self.tick_count += 1;
        metrics
    }

    /// Run multiple ticks.
    pub fn run(&mut self, n_ticks: usize) -> Vec<StepMetrics> {
        let mut out = Vec::with_capacity(n_ticks);
        for _ in 0..n_ticks {
            out.push(self.step());
        }
        out
    }

    /// Global displacement added to every embedding this tick.
    ///
    /// Direction (cos hue, sin hue), magnitude 0.05·motion·(0.2 + 0.8·brightness).
    pub fn sensor_flow(&self) -> [f64; EMBED_DIM] {
        let s = &self.sensor;
        let amp = SENSOR_FLOW_GAIN
            * s.motion
            * (SENSOR_BRIGHTNESS_BASE + (1.0 - SENSOR_BRIGHTNESS_BASE) * s.brightness);
        [amp * s.hue.cos(), amp * s.hue.sin()]
    }

    /// External input vector U = [motion, brightness, hue/π, mean(rgb)].
    pub fn input_vector(&self) -> [f64; STATE_DIM] {
        let s = &self.sensor;
        [
            s.motion,
            s.brightness,
            s.hue / std::f64::consts::PI,
            s.rgb_mean(),
        ]
    }

    fn diffuse_states(&self, neighbors: &[Vec<usize>]) -> Vec<[f64; STATE_DIM]> {
        let u = self.input_vector();
        let states = &self.ns.states;
        states
            .iter()
            .zip(neighbors)
            .map(|(s, nbrs)| {
                let r_ctx = mean_state(states, nbrs);
                forced_update(s, &r_ctx, &u, self.params.alpha, self.params.beta)
            })
            .collect()
    }

    /// Pure accretion with no dt scaling: `dt = 1` in `edge_delta`.
    fn accrete_edges(&self, distances: &[f64]) -> Vec<f64> {
        let n = self.ns.n;
        let e = &self.ns.embeddings;
        let s = &self.ns.states;
        let p = &self.params;

        let mut w = self.ns.weights.clone();
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let a = cosine_sim_floored(&e[i], &e[j], COSINE_FLOOR);
                let c = 1.0 / (CONSISTENCY_FLOOR + distance(&s[i], &s[j]));
                let idx = i * n + j;
                w[idx] = edge_delta(w[idx], a, distances[idx], c, p.alpha, p.beta, p.gamma, 1.0)
                    .min(WEIGHT_CLAMP);
            }
        }
        w
    }

    /// ‖S0 − S‖ over all nodes and components.
    pub fn drift(&self) -> f64 {
        drift(
            self.ns.initial_states().as_flattened(),
            self.ns.states.as_flattened(),
        )
    }

    /// Entropy of per-node mean absolute state, floored and normalised.
    fn state_entropy(&self) -> f64 {
        let mags: Vec<f64> = self
            .ns
            .states
            .iter()
            .map(|s| s.iter().map(|v| v.abs()).sum::<f64>() / STATE_DIM as f64 + MAGNITUDE_FLOOR)
            .collect();
        let total: f64 = mags.iter().sum();
        let p: Vec<f64> = mags.iter().map(|m| m / total).collect();
        entropy(&p)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn config(&self) -> &EngineConfig {
        &self.cfg
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    pub fn sensor(&self) -> &SensorReading {
        &self.sensor
    }

    pub fn node_space(&self) -> &NodeSpace {
        &self.ns
    }

    pub fn node_count(&self) -> usize {
        self.ns.n
    }

    /// Ticks since construction or the last reset.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn neighbor_search_name(&self) -> &'static str {
        self.neighbor_search.name()
    }
}

/// Mean of the listed states; zero when the list is empty.
fn mean_state(states: &[[f64; STATE_DIM]], idx: &[usize]) -> [f64; STATE_DIM] {
    let mut acc = [0.0; STATE_DIM];
    if idx.is_empty() {
        return acc;
    }
    for &j in idx {
        for (a, v) in acc.iter_mut().zip(states[j].iter()) {
            *a += v;
        }
    }
    let k = idx.len() as f64;
    acc.map(|a| a / k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_engine() -> FieldEngine {
        FieldEngine::create(5, 0).unwrap()
    }

    #[test]
    fn test_engine_init() {
        let engine = FieldEngine::new(EngineConfig::default()).unwrap();
        assert_eq!(engine.node_count(), 12);
        assert_eq!(engine.tick_count(), 0);
        assert_eq!(engine.drift(), 0.0);
        assert_eq!(engine.neighbor_search_name(), "brute_force");
    }

    #[test]
    fn test_create_rejects_empty_population() {
        assert!(FieldEngine::create(0, 0).is_err());
        assert!(FieldEngine::create(dynamath_types::MAX_NODE_COUNT + 1, 0).is_err());
    }

    #[test]
    fn test_single_step_end_to_end() {
        let mut engine = make_engine();
        let m = engine.step();
        assert!(m.drift >= 0.0);
        assert!(m.entropy >= 0.0);
        assert_eq!(engine.snapshot().positions.len(), 5);
        assert_eq!(engine.tick_count(), 1);
    }

    #[test]
    fn test_same_seed_same_trajectory() {
        let mut a = make_engine();
        let mut b = make_engine();
        let ma = a.run(10);
        let mb = b.run(10);
        assert_eq!(ma, mb);
        assert_eq!(a.node_space(), b.node_space());
    }

    #[test]
    fn test_zero_motion_isolates_field_force() {
        let mut lit = make_engine();
        lit.apply_sensor(&json!({"motion": 0.0, "brightness": 1.0, "hue": 1.3, "rgb": [1, 1, 1]}));
        let mut dark = make_engine();
        assert_eq!(lit.sensor_flow(), [0.0, 0.0]);

        for _ in 0..5 {
            let e0 = lit.node_space().embeddings.clone();
            let f = kernel_force(&e0, 0.05, FORCE_FLOOR);
            let expected = advect(&e0, &f, lit.params().dt);
            lit.step();
            dark.step();
            assert_eq!(lit.node_space().embeddings, expected);
        }
        // Embeddings never read S, so forcing differences cannot leak in.
        assert_eq!(lit.node_space().embeddings, dark.node_space().embeddings);
        assert_ne!(lit.node_space().states, dark.node_space().states);
    }

    #[test]
    fn test_sensor_flow_uniform_shift() {
        let cfg = EngineConfig {
            embedding_spread: 0.0,
            ..EngineConfig::with_nodes(1, 0)
        };
        let mut engine = FieldEngine::new(cfg).unwrap();
        engine.apply_sensor(&json!({"motion": 1.0, "brightness": 1.0, "hue": 0.0}));
        // A lone node feels no field force; only the flow moves it.
        engine.step();
        let e = engine.node_space().embeddings[0];
        assert!((e[0] - (1.2 + 0.05)).abs() < 1e-12);
        assert!((e[1] - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_sensor_flow_magnitude() {
        let mut engine = make_engine();
        engine.apply_sensor(&json!({"motion": 0.5, "brightness": 0.25, "hue": std::f64::consts::FRAC_PI_2}));
        let [dx, dy] = engine.sensor_flow();
        // 0.05 · 0.5 · (0.2 + 0.8·0.25) = 0.01
        assert!(dx.abs() < 1e-15);
        assert!((dy - 0.01).abs() < 1e-15);
    }

    #[test]
    fn test_input_vector() {
        let mut engine = make_engine();
        engine.apply_sensor(&json!({
            "motion": 0.2, "brightness": 0.4, "hue": -std::f64::consts::PI, "rgb": [0.0, 0.3, 0.6]
        }));
        let u = engine.input_vector();
        assert_eq!(u[0], 0.2);
        assert_eq!(u[1], 0.4);
        assert!((u[2] + 1.0).abs() < 1e-15);
        assert!((u[3] - 0.3).abs() < 1e-15);
    }

    #[test]
    fn test_states_stay_bounded() {
        let mut engine = make_engine();
        engine.apply_parameters(&json!({"alpha": 50.0, "beta": 50.0}));
        engine.apply_sensor(&json!({"motion": 1.0, "brightness": 1.0, "hue": 3.0, "rgb": [1, 1, 1]}));
        engine.run(20);
        assert!(engine
            .node_space()
            .states
            .iter()
            .flatten()
            .all(|v| v.abs() <= 1.0));
    }

    #[test]
    fn test_weights_non_negative_and_clamped() {
        let mut engine = make_engine();
        engine.apply_parameters(&json!({"beta": 1e9}));
        engine.run(3);
        assert!(engine.node_space().weights.iter().all(|&w| w == 0.0));

        let mut engine = make_engine();
        engine.apply_parameters(&json!({"gamma": 1e12}));
        engine.run(2);
        let n = engine.node_count();
        for i in 0..n {
            for j in 0..n {
                let w = engine.node_space().weight(i, j);
                assert!((0.0..=WEIGHT_CLAMP).contains(&w));
                if i != j {
                    assert_eq!(w, WEIGHT_CLAMP);
                }
            }
        }
    }

    #[test]
    fn test_diagonal_stays_zero_and_matrix_symmetric() {
        let mut engine = make_engine();
        engine.run(4);
        let ns = engine.node_space();
        for i in 0..ns.n {
            assert_eq!(ns.weight(i, i), 0.0);
            for j in 0..ns.n {
                assert!((ns.weight(i, j) - ns.weight(j, i)).abs() <= 1e-9 * ns.weight(i, j).max(1.0));
            }
        }
    }

    #[test]
    fn test_edge_accretion_hand_computed() {
        // Two nodes, no motion, no field force (dt = 0): one accretion step.
        let mut engine = FieldEngine::create(2, 9).unwrap();
        engine.apply_parameters(&json!({"speed_dt": 0.0}));
        let e = engine.node_space().embeddings.clone();
        let d01 = distance(&e[0], &e[1]);
        engine.step();
        let s = &engine.node_space().states;
        let a = cosine_sim_floored(&e[0], &e[1], COSINE_FLOOR);
        let c = 1.0 / (CONSISTENCY_FLOOR + distance(&s[0], &s[1]));
        let expected = (0.20 * a - 0.05 * d01 + 0.10 * c).max(0.0);
        assert!((engine.node_space().weight(0, 1) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_state_update_hand_computed() {
        // Two nodes: each node's only neighbor is the other one.
        let mut engine = FieldEngine::create(2, 5).unwrap();
        engine.apply_sensor(&json!({"motion": 0.5, "brightness": 0.5, "hue": 0.0, "rgb": [0.3, 0.3, 0.3]}));
        let s0 = engine.node_space().states.clone();
        engine.step();
        let u = [0.5, 0.5, 0.0, 0.3];
        for (i, other) in [(0, 1), (1, 0)] {
            let got = engine.node_space().states[i];
            for k in 0..STATE_DIM {
                let want = (s0[i][k] + 0.2 * s0[other][k] + 0.05 * u[k]).tanh();
                assert!((got[k] - want).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_single_node_has_zero_context() {
        let mut engine = FieldEngine::create(1, 2).unwrap();
        let s0 = engine.node_space().states[0];
        let m = engine.step();
        let want = s0.map(|v| v.tanh());
        assert_eq!(engine.node_space().states[0], want);
        assert!(m.entropy.abs() < 1e-12);
    }

    #[test]
    fn test_entropy_bounded_by_log_n() {
        let mut engine = FieldEngine::create(12, 0).unwrap();
        for m in engine.run(10) {
            assert!(m.entropy >= 0.0);
            assert!(m.entropy <= (12f64).ln() + 1e-12);
        }
    }

    #[test]
    fn test_drift_grows_from_zero() {
        let mut engine = make_engine();
        assert_eq!(engine.drift(), 0.0);
        engine.apply_sensor(&json!({"motion": 1.0, "brightness": 1.0}));
        let m = engine.step();
        assert!(m.drift > 0.0);
        assert_eq!(m.drift, engine.drift());
    }

    #[test]
    fn test_custom_neighbor_search() {
        struct FirstNode;
        impl NeighborSearch for FirstNode {
            fn neighbors(&self, p: &[[f64; 2]], _d: &[f64], _k: usize) -> Vec<Vec<usize>> {
                (0..p.len()).map(|i| if i == 0 { vec![] } else { vec![0] }).collect()
            }
            fn name(&self) -> &'static str {
                "first_node"
            }
        }
        let mut engine = make_engine().with_neighbor_search(Box::new(FirstNode));
        assert_eq!(engine.neighbor_search_name(), "first_node");
        let s0 = engine.node_space().states.clone();
        engine.step();
        let want = s0[0].map(|v| v.tanh());
        assert_eq!(engine.node_space().states[0], want);
    }
}
