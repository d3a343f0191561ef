//! Shared utilities for integration tests

#![allow(dead_code)]

use coverage_eval::{CoverageConfig, Interval, IntervalEstimator, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Small, seeded configuration that keeps test runs fast
pub fn small_config(seed: u64) -> CoverageConfig {
    CoverageConfig::new()
        .with_sample_sizes(vec![10, 100])
        .with_repeats(200)
        .with_seed(seed)
}

/// Estimator returning the same bounds for every sample
#[derive(Debug, Clone, Copy)]
pub struct Fixed(pub f64, pub f64);

impl IntervalEstimator for Fixed {
    fn interval(&self, _sample: &[f64]) -> Result<Interval> {
        Ok(Interval::new(self.0, self.1))
    }
}

/// Sample range `[min, max]`
#[derive(Debug, Clone, Copy)]
pub struct MinMax;

impl IntervalEstimator for MinMax {
    fn interval(&self, sample: &[f64]) -> Result<Interval> {
        let lo = sample.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = sample.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Ok(Interval::new(lo, hi))
    }
}

/// Estimator that keeps a copy of every sample it receives
///
/// Clones share the same log, so a test can register one clone and inspect
/// the other.
#[derive(Debug, Clone, Default)]
pub struct Recording {
    samples: Arc<Mutex<Vec<Vec<f64>>>>,
}

impl Recording {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn samples(&self) -> Vec<Vec<f64>> {
        self.samples.lock().unwrap().clone()
    }
}

impl IntervalEstimator for Recording {
    fn interval(&self, sample: &[f64]) -> Result<Interval> {
        self.samples.lock().unwrap().push(sample.to_vec());
        Ok(Interval::new(0.0, 1.0))
    }
}

/// Estimator that only counts its invocations
#[derive(Debug, Clone, Default)]
pub struct Counting {
    calls: Arc<AtomicUsize>,
}

impl Counting {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IntervalEstimator for Counting {
    fn interval(&self, _sample: &[f64]) -> Result<Interval> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Interval::unbounded())
    }
}
