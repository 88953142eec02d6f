use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seeded randomness threaded explicitly through every generator.
///
/// Two independent streams are derived from one seed: `choice` drives
/// categorical and numeric draws, `faker` drives names, e-mails and dates.
#[derive(Debug, Clone)]
pub struct RandomSource {
    seed: u64,
    pub choice: ChaCha8Rng,
    pub faker: ChaCha8Rng,
}

impl RandomSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            choice: ChaCha8Rng::seed_from_u64(seed),
            faker: ChaCha8Rng::seed_from_u64(hash_seed(seed, "faker")),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

fn hash_seed(seed: u64, key: &str) -> u64 {
    let mut hash = seed ^ 0xcbf29ce484222325;
    for byte in key.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}
