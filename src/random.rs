//! Seeded random number generation.
//!
//! Every solver draws from exactly one generator created here, so a
//! fixed seed reproduces the whole run.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generator type owned by each solver.
pub type SolverRng = ChaCha8Rng;

/// Seed used by every default configuration.
pub const DEFAULT_SEED: u64 = 0xD5F1306;

/// Creates a deterministic generator from a 64-bit seed.
pub fn create_rng(seed: u64) -> SolverRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Shuffles a slice in place (Fisher-Yates).
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

/// Draws a value uniformly from `[lower, upper]`.
///
/// Degenerate intervals (`lower == upper`) return `lower`. Intervals whose
/// width overflows `f64` (e.g. `[-f64::MAX, f64::MAX]`) are sampled as a
/// convex combination of the endpoints.
pub fn uniform<R: Rng + ?Sized>(lower: f64, upper: f64, rng: &mut R) -> f64 {
    if upper <= lower {
        lower
    } else if (upper - lower).is_finite() {
        rng.random_range(lower..=upper)
    } else {
        let t: f64 = rng.random();
        ((1.0 - t) * lower + t * upper).clamp(lower, upper)
    }
}
