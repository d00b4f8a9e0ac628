use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The single pseudo-random stream threaded through one generation call.
pub type TerrainRng = ChaCha8Rng;

// Main generation stream for an outer seed
pub fn stream(seed: i64) -> TerrainRng {
    ChaCha8Rng::seed_from_u64(seed as u64)
}

// Independent stream for draws that must not shift the main sequence
pub fn side_stream(seed: i64, phase: u64) -> TerrainRng {
    ChaCha8Rng::seed_from_u64((seed as u64) ^ phase.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}
