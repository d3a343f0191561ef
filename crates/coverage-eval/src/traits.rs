//! The estimator contract
//!
//! The evaluation core never computes an interval itself. It calls an
//! [`IntervalEstimator`] once per generated sample and only inspects the
//! returned bounds for containment of the true value.

use crate::types::Interval;
use coverage_core::Result;
use std::sync::Arc;

/// A confidence-interval procedure under test
///
/// Implementations receive a finite, non-empty sample and return a pair of
/// bounds. They need not be valid, deterministic, or fast: a randomized
/// estimator is fine, and bounds outside any natural range are accepted
/// verbatim. Estimators are shared across worker threads, hence
/// `Send + Sync`.
pub trait IntervalEstimator: Send + Sync {
    /// Compute the interval for one sample
    fn interval(&self, sample: &[f64]) -> Result<Interval>;
}

impl<T: IntervalEstimator + ?Sized> IntervalEstimator for &T {
    fn interval(&self, sample: &[f64]) -> Result<Interval> {
        (**self).interval(sample)
    }
}

impl<T: IntervalEstimator + ?Sized> IntervalEstimator for Box<T> {
    fn interval(&self, sample: &[f64]) -> Result<Interval> {
        (**self).interval(sample)
    }
}

impl<T: IntervalEstimator + ?Sized> IntervalEstimator for Arc<T> {
    fn interval(&self, sample: &[f64]) -> Result<Interval> {
        (**self).interval(sample)
    }
}

/// Estimator backed by a fallible closure
#[derive(Clone)]
pub struct FnEstimator<F> {
    f: F,
}

impl<F> IntervalEstimator for FnEstimator<F>
where
    F: Fn(&[f64]) -> Result<Interval> + Send + Sync,
{
    fn interval(&self, sample: &[f64]) -> Result<Interval> {
        (self.f)(sample)
    }
}

/// Estimator backed by a closure returning `(lower, upper)`
#[derive(Clone)]
pub struct InfallibleFn<F> {
    f: F,
}

impl<F> IntervalEstimator for InfallibleFn<F>
where
    F: Fn(&[f64]) -> (f64, f64) + Send + Sync,
{
    fn interval(&self, sample: &[f64]) -> Result<Interval> {
        Ok((self.f)(sample).into())
    }
}

/// Wrap a fallible closure as an estimator
///
/// # Example
/// ```rust
/// use coverage_eval::{estimator_fn, Interval, IntervalEstimator};
/// use coverage_core::Error;
///
/// let range = estimator_fn(|sample: &[f64]| {
///     let lo = sample.iter().copied().fold(f64::INFINITY, f64::min);
///     let hi = sample.iter().copied().fold(f64::NEG_INFINITY, f64::max);
///     if lo.is_finite() {
///         Ok(Interval::new(lo, hi))
///     } else {
///         Err(Error::InvalidInput("empty sample".to_string()))
///     }
/// });
/// assert_eq!(range.interval(&[0.2, 0.9, 0.4]).unwrap(), Interval::new(0.2, 0.9));
/// ```
pub fn estimator_fn<F>(f: F) -> FnEstimator<F>
where
    F: Fn(&[f64]) -> Result<Interval> + Send + Sync,
{
    FnEstimator { f }
}

/// Wrap a closure that always produces bounds
pub fn infallible_fn<F>(f: F) -> InfallibleFn<F>
where
    F: Fn(&[f64]) -> (f64, f64) + Send + Sync,
{
    InfallibleFn { f }
}
