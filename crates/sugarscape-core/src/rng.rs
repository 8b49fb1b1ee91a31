use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

/// Create the shared simulation RNG.
///
/// A fixed seed makes shuffle order, tie-breaks, and mutation rolls
/// reproducible; `None` draws a fresh seed from the thread RNG.
pub fn create_rng(seed: Option<u64>) -> ChaCha12Rng {
    match seed {
        Some(seed) => ChaCha12Rng::seed_from_u64(seed),
        None => ChaCha12Rng::seed_from_u64(rand::rng().random()),
    }
}
