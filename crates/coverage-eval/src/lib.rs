//! Monte Carlo coverage evaluation of confidence interval estimators
//!
//! Given a procedure that turns a sample into a pair of bounds, this crate
//! measures how often those bounds actually contain the true parameter. For
//! each scenario of a fixed catalog (Bernoulli, Uniform and clamped Normal
//! distributions, three parameterizations each) and each configured sample
//! size it draws `repeats` independent samples, calls the estimator once per
//! sample and records the fraction of misses. The miss fraction is then read
//! against each nominal level α: an estimator is valid at α when its miss
//! fraction does not exceed α.
//!
//! - **Estimator contract**: [`IntervalEstimator`], adapted from closures with
//!   [`estimator_fn`] / [`infallible_fn`] and named in an [`EstimatorRegistry`]
//! - **Evaluation**: [`CoverageEvaluator`] for one bucket, [`ScenarioDriver`]
//!   for the full battery
//! - **Reporting**: [`TextReporter`] and [`JsonReporter`]
//!
//! No estimator is implemented here.
//!
//! # Example
//!
//! ```rust
//! use coverage_eval::{
//!     infallible_fn, run_coverage, CoverageConfig, EstimatorRegistry, Reporter, TextReporter,
//! };
//!
//! let registry = EstimatorRegistry::new()
//!     .with("min-max", infallible_fn(|s: &[f64]| {
//!         let lo = s.iter().copied().fold(f64::INFINITY, f64::min);
//!         let hi = s.iter().copied().fold(f64::NEG_INFINITY, f64::max);
//!         (lo, hi)
//!     }))
//!     .unwrap();
//!
//! let config = CoverageConfig::new()
//!     .with_sample_sizes(vec![10, 100])
//!     .with_repeats(200)
//!     .with_seed(42);
//!
//! let report = run_coverage(config, &registry).unwrap();
//! let text = TextReporter::new().render_to_string(&report).unwrap();
//! assert!(text.contains("Estimator: min-max"));
//! ```

pub mod api;
mod catalog;
mod config;
mod driver;
mod evaluator;
mod registry;
pub mod report;
mod results;
mod traits;
mod types;

// Re-exports
pub use api::{evaluate_scenario, run_coverage, FAST_REPEATS, HIGH_PRECISION_REPEATS};
pub use catalog::{CatalogBuilder, Scenario, ScenarioCatalog, ScenarioFamily};
pub use config::{CoverageConfig, IntervalPolicy, DEFAULT_ALPHAS, DEFAULT_REPEATS, DEFAULT_SAMPLE_SIZES};
pub use driver::ScenarioDriver;
pub use evaluator::CoverageEvaluator;
pub use registry::{EstimatorId, EstimatorRegistry, RegisteredEstimator};
pub use report::{JsonReporter, Reporter, TextReporter};
pub use results::{CoverageRecord, CoverageReport, EstimatorCoverage, ScenarioCoverage};
pub use traits::{estimator_fn, infallible_fn, FnEstimator, InfallibleFn, IntervalEstimator};
pub use types::{CoveragePoint, Interval, TrialOutcome, TrialTally, Validity};

pub use coverage_core::{Error, Result};
pub use coverage_sampling::{Distribution, DistributionKind};
