use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded normal feature generator (Box-Muller).
pub struct NormalSampler {
    rng: ChaCha8Rng,
    sigma: f32,
    spare: Option<f32>,
}

impl NormalSampler {
    pub fn new(seed: u64, sigma: f32) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            sigma,
            spare: None,
        }
    }

    pub fn sample(&mut self) -> f32 {
        if let Some(z) = self.spare.take() {
            return z * self.sigma;
        }
        let u1: f32 = self.rng.gen_range(f32::EPSILON..1.0);
        let u2: f32 = self.rng.gen_range(0.0..1.0);
        let r = (-2.0 * u1.ln()).sqrt();
        let theta = 2.0 * std::f32::consts::PI * u2;
        self.spare = Some(r * theta.sin());
        r * theta.cos() * self.sigma
    }

    pub fn vector(&mut self, len: usize) -> Vec<f32> {
        (0..len).map(|_| self.sample()).collect()
    }

    pub fn batch(&mut self, count: usize, len: usize) -> Vec<Vec<f32>> {
        (0..count).map(|_| self.vector(len)).collect()
    }
}
