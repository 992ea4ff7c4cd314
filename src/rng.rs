use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seeded random number generator for reproducible simulations
#[derive(Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new GameRng with an optional seed
    /// If seed is None, generates a random seed
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            use rand::thread_rng;
            thread_rng().gen()
        });

        let rng = ChaCha8Rng::seed_from_u64(seed);
        GameRng { rng, seed }
    }

    /// Get the seed used for this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random integer in range [0, max)
    pub fn random_range(&mut self, max: usize) -> usize {
        self.rng.gen_range(0..max)
    }

    /// Full Fisher-Yates shuffle for a mutable slice
    pub fn shuffle<T>(&mut self, array: &mut [T]) {
        for i in (1..array.len()).rev() {
            let j = self.random_range(i + 1);
            array.swap(i, j);
        }
    }

    /// Partial Fisher-Yates shuffle: randomizes only the first `prefix`
    /// positions, each drawn uniformly from the rest of the slice.
    /// Positions past the prefix are left in whatever order earlier
    /// shuffles put them, which is fine when only the prefix is read.
    pub fn shuffle_prefix<T>(&mut self, array: &mut [T], prefix: usize) {
        let len = array.len();
        for i in 0..prefix.min(len) {
            let j = i + self.random_range(len - i);
            array.swap(i, j);
        }
    }
}
