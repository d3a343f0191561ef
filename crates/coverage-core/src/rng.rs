//! Seeded random streams
//!
//! Every Monte Carlo trial draws from its own `StdRng`, seeded from a
//! [`StreamSeed`] that is derived hierarchically from one base seed:
//!
//! ```text
//! base seed -> estimator -> scenario -> sample size -> trial
//! ```
//!
//! Because a trial's generator depends only on its coordinates, results do
//! not depend on which thread runs the trial or how trials are chunked.

use rand::rngs::StdRng;
use rand::{thread_rng, Rng, SeedableRng};

/// SplitMix64 finalizer.
#[inline]
fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Seed of one random stream in the derivation tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamSeed(u64);

impl StreamSeed {
    /// Root stream for the given base seed
    pub fn new(seed: u64) -> Self {
        Self(splitmix64(seed))
    }

    /// Root stream seeded from fresh entropy
    pub fn from_entropy() -> Self {
        Self::new(entropy_seed())
    }

    /// Raw seed value
    pub fn value(self) -> u64 {
        self.0
    }

    /// Child stream identified by `index`
    ///
    /// Distinct indices give decorrelated children; deriving the same index
    /// twice gives the same child.
    pub fn derive(self, index: u64) -> Self {
        Self(splitmix64(self.0 ^ splitmix64(index.wrapping_add(0xD1B5_4A32_D192_ED03))))
    }

    /// Generator for the `trial`-th trial of this stream
    pub fn trial_rng(self, trial: u64) -> StdRng {
        StdRng::seed_from_u64(self.derive(trial).0)
    }
}

/// Draw a fresh base seed from the thread-local generator
pub fn entropy_seed() -> u64 {
    thread_rng().gen()
}
