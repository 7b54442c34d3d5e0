//! Seedable random source for dealing decks.
//!
//! Same seed, same deal. Rounds started without a seed draw one from the
//! operating system so every game differs.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG wrapper used for shuffling.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// The seed this RNG was created with, for replaying a deal.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffle a slice in place with a uniform Fisher-Yates permutation.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_shuffle() {
        let mut a: Vec<u32> = (0..16).collect();
        let mut b = a.clone();
        GameRng::new(7).shuffle(&mut a);
        GameRng::new(7).shuffle(&mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = GameRng::new(42);
        let mut data: Vec<u32> = (0..10).collect();
        let original = data.clone();

        rng.shuffle(&mut data);
        assert_ne!(data, original);

        data.sort();
        assert_eq!(data, original);
    }

    #[test]
    fn shuffle_positions_are_roughly_uniform() {
        // Each of 4 items should land in slot 0 about a quarter of the time.
        let mut rng = GameRng::new(2024);
        let mut hits = [0u32; 4];
        for _ in 0..4000 {
            let mut data = [0usize, 1, 2, 3];
            rng.shuffle(&mut data);
            hits[data[0]] += 1;
        }
        for count in hits {
            assert!((800..1200).contains(&count), "skewed count {count}");
        }
    }

    #[test]
    fn entropy_seed_is_reported() {
        let rng = GameRng::from_entropy();
        let replay = GameRng::new(rng.seed());
        assert_eq!(rng.seed(), replay.seed());
    }
}
