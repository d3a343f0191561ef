//! Synthetic sample generators for coverage simulation
//!
//! Three distribution families are supported:
//!
//! - **Bernoulli(θ)**: draws of 0/1, θ ∈ [0, 1]
//! - **Uniform(a, b)**: continuous draws on `[a, b]`
//! - **Normal(μ, σ)**: Gaussian draws clamped into `[0, 1]`
//!
//! The clamping of the Normal family is part of its definition here: values
//! below 0 become 0 and values above 1 become 1, which fattens the mass at the
//! bounds and matters for coverage analysis.
//!
//! # Example
//!
//! ```rust
//! use coverage_sampling::{generate, Distribution};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let dist = Distribution::clamped_normal(0.5, 0.9).unwrap();
//! let sample = generate(&dist, 100, &mut rng).unwrap();
//! assert!(sample.iter().all(|&x| (0.0..=1.0).contains(&x)));
//! ```

mod distribution;
mod generators;

pub use distribution::{Distribution, DistributionKind};
pub use generators::{generate, Sampler};
