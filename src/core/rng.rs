//! Deterministic random number generation.
//!
//! ## Key Features
//!
//! - **Deterministic**: the same seed produces the same shuffle sequence
//! - **Serializable**: the RNG serializes as `(seed, word position)`, so a
//!   deserialized state reshuffles exactly as the original would have
//!
//! All randomness in a match (initial deck shuffles, relic pile split,
//! discard-into-deck reshuffles) flows through the one `GameRng` owned by the
//! game state.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Deterministic RNG backed by ChaCha8.
///
/// ChaCha8's word-position counter gives O(1) state capture regardless of
/// how many values have been generated.
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

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}

/// Two RNGs are equal when they would produce the same future sequence.
impl PartialEq for GameRng {
    fn eq(&self, other: &Self) -> bool {
        self.seed == other.seed && self.inner.get_word_pos() == other.inner.get_word_pos()
    }
}

impl Eq for GameRng {}

#[derive(Serialize, Deserialize)]
struct RngRepr {
    seed: u64,
    word_pos: u128,
}

impl Serialize for GameRng {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RngRepr {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GameRng {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = RngRepr::deserialize(deserializer)?;
        let mut inner = ChaCha8Rng::seed_from_u64(repr.seed);
        inner.set_word_pos(repr.word_pos);
        Ok(Self {
            inner,
            seed: repr.seed,
        })
    }
}
