//! Collected coverage results

use crate::catalog::Scenario;
use crate::registry::EstimatorId;
use crate::types::{CoveragePoint, Validity};
use coverage_sampling::{Distribution, DistributionKind};
use serde::Serialize;

/// Coverage of one scenario across the configured sample sizes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioCoverage {
    pub scenario: Scenario,
    /// One point per configured sample size, in configuration order
    pub points: Vec<CoveragePoint>,
}

impl ScenarioCoverage {
    /// Miss fractions in configuration order
    pub fn miss_fractions(&self) -> Vec<f64> {
        self.points.iter().map(CoveragePoint::miss_fraction).collect()
    }

    pub fn point(&self, sample_size: usize) -> Option<&CoveragePoint> {
        self.points.iter().find(|p| p.sample_size == sample_size)
    }

    pub fn validity(&self, alpha: f64) -> Validity {
        Validity::classify(&self.points, alpha)
    }
}

/// The full scenario battery for one estimator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimatorCoverage {
    pub estimator: EstimatorId,
    pub scenarios: Vec<ScenarioCoverage>,
}

impl EstimatorCoverage {
    pub fn scenario(&self, kind: DistributionKind, label: &str) -> Option<&ScenarioCoverage> {
        self.scenarios
            .iter()
            .find(|s| s.scenario.kind() == kind && s.scenario.label() == label)
    }

    /// Whether the estimator is exact at `alpha` on every scenario
    pub fn is_exact(&self, alpha: f64) -> bool {
        self.scenarios.iter().all(|s| s.validity(alpha).is_exact())
    }
}

/// Everything a run produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageReport {
    /// Base seed the run used; pass it back through the config to replay
    pub seed: u64,
    pub repeats: usize,
    pub sample_sizes: Vec<usize>,
    pub alphas: Vec<f64>,
    pub estimators: Vec<EstimatorCoverage>,
}

impl CoverageReport {
    pub fn estimator(&self, label: &str) -> Option<&EstimatorCoverage> {
        self.estimators.iter().find(|e| e.estimator.label() == label)
    }

    /// Flatten into one record per (estimator, scenario, sample size)
    pub fn records(&self) -> Vec<CoverageRecord> {
        self.estimators
            .iter()
            .flat_map(|est| {
                est.scenarios.iter().flat_map(move |sc| {
                    sc.points.iter().map(move |p| CoverageRecord {
                        estimator: est.estimator.label().to_string(),
                        family: sc.scenario.kind(),
                        scenario: sc.scenario.label().to_string(),
                        parameters: *sc.scenario.distribution(),
                        true_value: sc.scenario.true_value(),
                        sample_size: p.sample_size,
                        repeats: p.repeats,
                        covered: p.covered,
                        miss_fraction: p.miss_fraction(),
                        standard_error: p.standard_error(),
                    })
                })
            })
            .collect()
    }
}

/// One flat (estimator, scenario, sample size, miss fraction) tuple
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageRecord {
    pub estimator: String,
    pub family: DistributionKind,
    pub scenario: String,
    pub parameters: Distribution,
    pub true_value: f64,
    pub sample_size: usize,
    pub repeats: usize,
    pub covered: usize,
    pub miss_fraction: f64,
    pub standard_error: f64,
}
