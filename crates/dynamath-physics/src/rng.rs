// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Dynamath Seeded RNG
// ─────────────────────────────────────────────────────────────────────
//! Minimal xorshift64 RNG. Same seed, same stream, on every platform.

/// Deterministic xorshift64 generator with Box-Muller normals.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u64,
    spare: Option<f64>,
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        // xorshift has a fixed point at zero.
        Self {
            state: if seed == 0 { 0xDEAD_BEEF_CAFE_BABE } else { seed },
            spare: None,
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Standard normal via Box-Muller; the sine branch is cached for the
    /// next call.
    pub fn next_normal(&mut self) -> f64 {
        if let Some(z) = self.spare.take() {
            return z;
        }
        let u1 = self.next_f64().max(1e-300);
        let u2 = self.next_f64();
        let radius = (-2.0 * u1.ln()).sqrt();
        let angle = std::f64::consts::TAU * u2;
        self.spare = Some(radius * angle.sin());
        radius * angle.cos()
    }

    /// Normal with the given mean and standard deviation.
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        mean + std_dev * self.next_normal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = SimpleRng::new(7);
        let mut b = SimpleRng::new(7);
        for _ in 0..32 {
            assert_eq!(a.next_normal().to_bits(), b.next_normal().to_bits());
        }
    }

    #[test]
    fn test_zero_seed_not_stuck() {
        let mut rng = SimpleRng::new(0);
        let first = rng.next_u64();
        assert_ne!(first, 0);
        assert_ne!(first, rng.next_u64());
    }

    #[test]
    fn test_uniform_range() {
        let mut rng = SimpleRng::new(42);
        assert!((0..1000).map(|_| rng.next_f64()).all(|u| (0.0..1.0).contains(&u)));
    }

    #[test]
    fn test_normal_moments() {
        let mut rng = SimpleRng::new(1234);
        let samples: Vec<f64> = (0..20_000).map(|_| rng.normal(1.0, 0.5)).collect();
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / samples.len() as f64;
        assert!((mean - 1.0).abs() < 0.02, "mean={mean}");
        assert!((var.sqrt() - 0.5).abs() < 0.02, "std={}", var.sqrt());
    }
}
