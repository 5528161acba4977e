//! Seeded Gaussian vector generator, used to initialize hyperplanes and to
//! feed deterministic test fixtures.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f32::consts::PI;

/// Generates standard-Gaussian vectors of a fixed dimension from a seeded,
/// deterministic PRNG stream.
pub struct RandomVectorGen {
    rng: ChaCha8Rng,
    dim: usize,
}

impl RandomVectorGen {
    /// Creates a generator for `dim`-dimensional vectors, seeded at `seed`.
    #[must_use]
    pub fn new(seed: i64, dim: usize) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed as u64),
            dim,
        }
    }

    /// Draws one standard-Gaussian sample via the Box-Muller transform.
    fn next_gaussian(&mut self) -> f32 {
        let u1: f32 = self.rng.gen_range(f32::EPSILON..=1.0);
        let u2: f32 = self.rng.gen_range(0.0..1.0);
        (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    }

    /// Draws the next `dim`-dimensional Gaussian vector.
    pub fn next(&mut self) -> Vec<f32> {
        (0..self.dim).map(|_| self.next_gaussian()).collect()
    }

    /// Draws `n` vectors.
    pub fn generate(&mut self, n: usize) -> Vec<Vec<f32>> {
        (0..n).map(|_| self.next()).collect()
    }

    /// Draws `n` vectors and renders them as a JSON array of float arrays,
    /// matching the original generator's `GenerateJson` output shape.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails (it should not, for
    /// plain `Vec<Vec<f32>>` data).
    pub fn to_json(&mut self, n: usize) -> serde_json::Result<String> {
        serde_json::to_string(&self.generate(n))
    }
}
