//! Seeded random number generation

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Create the season generator (entropy-seeded when no seed is given)
pub fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}
