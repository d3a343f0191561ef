//! Sample generators
//!
//! A [`Sampler`] is built once per scenario from a validated
//! [`Distribution`] and then draws i.i.d. samples from any caller-supplied
//! generator. Nothing here holds random state; the caller owns the `Rng`.

use crate::distribution::Distribution;
use coverage_core::{Error, Result};
use rand::Rng;
use rand_distr::{Bernoulli, Distribution as _, Normal, Uniform};

/// Prepared sampler for one distribution
#[derive(Debug, Clone, Copy)]
pub enum Sampler {
    /// Degenerate distribution: every draw is this value
    Constant(f64),
    Bernoulli(Bernoulli),
    Uniform(Uniform<f64>),
    /// Gaussian whose draws are clamped into `[0, 1]`
    ClampedNormal(Normal<f64>),
}

impl Sampler {
    /// Build a sampler, rejecting out-of-domain parameters
    pub fn new(distribution: &Distribution) -> Result<Self> {
        distribution.validate()?;

        let sampler = match *distribution {
            Distribution::Bernoulli { theta } => {
                let bernoulli = Bernoulli::new(theta)
                    .map_err(|e| Error::InvalidParameter(format!("Bernoulli(theta={theta}): {e}")))?;
                Self::Bernoulli(bernoulli)
            }
            Distribution::Uniform { low, high } if low == high => Self::Constant(low),
            Distribution::Uniform { low, high } => Self::Uniform(Uniform::new_inclusive(low, high)),
            Distribution::ClampedNormal { mean, std_dev } => {
                let normal = Normal::new(mean, std_dev).map_err(|e| {
                    Error::InvalidParameter(format!("Normal(mu={mean}, sigma={std_dev}): {e}"))
                })?;
                Self::ClampedNormal(normal)
            }
        };

        Ok(sampler)
    }

    /// Draw a single value
    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Self::Constant(value) => *value,
            Self::Bernoulli(b) => {
                if b.sample(rng) {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Uniform(u) => u.sample(rng),
            Self::ClampedNormal(n) => n.sample(rng).clamp(0.0, 1.0),
        }
    }

    /// Replace the contents of `buf` with `n` fresh draws
    ///
    /// Reuses the buffer's allocation across trials.
    pub fn fill<R: Rng + ?Sized>(&self, n: usize, rng: &mut R, buf: &mut Vec<f64>) {
        buf.clear();
        buf.reserve(n);
        buf.extend((0..n).map(|_| self.sample(rng)));
    }

    /// Draw `n` values into a new vector
    pub fn generate<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<f64> {
        let mut buf = Vec::with_capacity(n);
        self.fill(n, rng, &mut buf);
        buf
    }
}

/// Draw `n` i.i.d. values from `distribution`
///
/// Convenience wrapper around [`Sampler`]; prefer building the sampler once
/// when drawing many samples from the same distribution.
pub fn generate<R: Rng + ?Sized>(distribution: &Distribution, n: usize, rng: &mut R) -> Result<Vec<f64>> {
    Ok(Sampler::new(distribution)?.generate(n, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn mean(xs: &[f64]) -> f64 {
        xs.iter().sum::<f64>() / xs.len() as f64
    }

    #[test]
    fn test_length() {
        let dist = Distribution::uniform(0.0, 1.0).unwrap();
        let mut rng = rng();
        for n in [1, 10, 1000] {
            assert_eq!(generate(&dist, n, &mut rng).unwrap().len(), n);
        }
        assert!(generate(&dist, 0, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn test_bernoulli_values_and_mean() {
        let dist = Distribution::bernoulli(0.5).unwrap();
        let xs = generate(&dist, 20_000, &mut rng()).unwrap();
        assert!(xs.iter().all(|&x| x == 0.0 || x == 1.0));
        assert_abs_diff_eq!(mean(&xs), 0.5, epsilon = 0.02);
    }

    #[test]
    fn test_bernoulli_degenerate() {
        let mut rng = rng();
        let zeros = generate(&Distribution::bernoulli(0.0).unwrap(), 500, &mut rng).unwrap();
        assert!(zeros.iter().all(|&x| x == 0.0));

        let ones = generate(&Distribution::bernoulli(1.0).unwrap(), 500, &mut rng).unwrap();
        assert!(ones.iter().all(|&x| x == 1.0));
    }

    #[test]
    fn test_uniform_range() {
        let dist = Distribution::uniform(0.95, 1.0).unwrap();
        let xs = generate(&dist, 10_000, &mut rng()).unwrap();
        assert!(xs.iter().all(|&x| (0.95..=1.0).contains(&x)));
        assert_abs_diff_eq!(mean(&xs), 0.975, epsilon = 0.002);
    }

    #[test]
    fn test_uniform_degenerate() {
        let dist = Distribution::uniform(0.3, 0.3).unwrap();
        assert!(matches!(Sampler::new(&dist).unwrap(), Sampler::Constant(v) if v == 0.3));
        let xs = generate(&dist, 100, &mut rng()).unwrap();
        assert!(xs.iter().all(|&x| x == 0.3));
    }

    #[test]
    fn test_unrepresentable_uniform_range_is_rejected() {
        let unchecked = Distribution::Uniform { low: -f64::MAX, high: f64::MAX };
        assert!(matches!(Sampler::new(&unchecked), Err(Error::InvalidParameter(_))));
        assert!(generate(&unchecked, 10, &mut rng()).is_err());

        let wide = Distribution::uniform(-1e300, 1e300).unwrap();
        let xs = generate(&wide, 100, &mut rng()).unwrap();
        assert!(xs.iter().all(|&x| (-1e300..=1e300).contains(&x)));
    }

    #[test]
    fn test_normal_is_clamped() {
        let dist = Distribution::clamped_normal(0.5, 0.9).unwrap();
        let xs = generate(&dist, 10_000, &mut rng()).unwrap();
        assert!(xs.iter().all(|&x| (0.0..=1.0).contains(&x)));
        // With sigma = 0.9 a large share of the mass piles up on the bounds
        let at_bounds = xs.iter().filter(|&&x| x == 0.0 || x == 1.0).count();
        assert!(at_bounds > 3_000, "expected heavy clamping, got {at_bounds}");
    }

    #[test]
    fn test_standard_normal_clamps_half_to_zero() {
        let dist = Distribution::clamped_normal(0.0, 1.0).unwrap();
        let xs = generate(&dist, 20_000, &mut rng()).unwrap();
        let zeros = xs.iter().filter(|&&x| x == 0.0).count() as f64 / xs.len() as f64;
        assert_abs_diff_eq!(zeros, 0.5, epsilon = 0.02);
    }

    #[test]
    fn test_normal_zero_sigma() {
        let dist = Distribution::clamped_normal(0.4, 0.0).unwrap();
        let xs = generate(&dist, 50, &mut rng()).unwrap();
        assert!(xs.iter().all(|&x| x == 0.4));
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let bad = Distribution::ClampedNormal { mean: 0.5, std_dev: -1.0 };
        assert!(Sampler::new(&bad).is_err());
        assert!(generate(&bad, 10, &mut rng()).is_err());
    }

    #[test]
    fn test_same_seed_same_sample() {
        let dist = Distribution::clamped_normal(0.5, 0.1).unwrap();
        let a = generate(&dist, 100, &mut rng()).unwrap();
        let b = generate(&dist, 100, &mut rng()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fill_reuses_buffer() {
        let sampler = Sampler::new(&Distribution::uniform(0.0, 1.0).unwrap()).unwrap();
        let mut rng = rng();
        let mut buf = Vec::new();
        sampler.fill(100, &mut rng, &mut buf);
        let first = buf.clone();
        sampler.fill(10, &mut rng, &mut buf);
        assert_eq!(buf.len(), 10);
        assert_ne!(&first[..10], &buf[..]);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_samples_stay_in_support(
                mean in -2.0f64..3.0,
                std_dev in 0.0f64..3.0,
                seed in any::<u64>(),
                n in 1usize..200,
            ) {
                let dist = Distribution::clamped_normal(mean, std_dev).unwrap();
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let xs = generate(&dist, n, &mut rng).unwrap();
                prop_assert_eq!(xs.len(), n);
                prop_assert!(xs.iter().all(|&x| (0.0..=1.0).contains(&x)));
            }

            #[test]
            fn prop_uniform_in_range(a in -5.0f64..5.0, width in 0.0f64..5.0, seed in any::<u64>()) {
                let dist = Distribution::uniform(a, a + width).unwrap();
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let xs = generate(&dist, 64, &mut rng).unwrap();
                prop_assert!(xs.iter().all(|&x| x >= a && x <= a + width));
            }
        }
    }
}
