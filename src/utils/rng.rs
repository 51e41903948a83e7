use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::f64::consts::PI;
use std::hash::{Hash, Hasher};

use crate::utils::constants::NOISE_SIGMA_BOUND;

/// Deterministic seeding for a set of named vehicles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    master_seed: u64,
}

impl RngManager {
    pub fn new(seed: u64) -> Self {
        Self { master_seed: seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Seed for a vehicle, derived by hashing its name with the master seed.
    pub fn seed_for(&self, name: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.master_seed.hash(&mut hasher);
        name.hash(&mut hasher);
        hasher.finish()
    }

    pub fn get_rng(&self, name: &str) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.seed_for(name))
    }
}

/// Bounded Gaussian sampler over a private ChaCha stream.
///
/// Every model instance owns exactly one of these; two samplers built from
/// the same seed yield the same sequence.
#[derive(Debug, Clone)]
pub struct GaussianNoise {
    seed: u64,
    rng: ChaCha8Rng,
}

impl GaussianNoise {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Rewind the stream to its initial seed.
    pub fn reset(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
    }

    /// Draw from N(mu, sigma²) using the Box–Muller transform, truncated to
    /// `mu ± NOISE_SIGMA_BOUND·sigma`.
    ///
    /// A non-positive or non-finite `sigma` returns `mu` without consuming
    /// the stream.
    pub fn sample(&mut self, mu: f64, sigma: f64) -> f64 {
        if !(sigma.is_finite() && sigma > 0.0) {
            return mu;
        }

        // u1 in (0, 1] keeps the logarithm finite
        let u1: f64 = 1.0 - self.rng.gen::<f64>();
        let u2: f64 = self.rng.gen();

        let radius = (-2.0 * u1.ln()).sqrt();
        let z = radius * (2.0 * PI * u2).cos();

        mu + sigma * z.clamp(-NOISE_SIGMA_BOUND, NOISE_SIGMA_BOUND)
    }
}
