//! Monte Carlo coverage validation for confidence interval estimators
//!
//! Facade over the workspace crates:
//!
//! - [`core`]: error type, execution engines and seed streams
//! - [`sampling`]: scenario distributions and sample generation
//! - [`eval`]: estimator registry, coverage evaluation and reporting
//!
//! Most users only need the [`prelude`].
//!
//! ```rust
//! use ci_coverage::prelude::*;
//!
//! let registry = EstimatorRegistry::new()
//!     .with("unit", infallible_fn(|_s: &[f64]| (0.0, 1.0)))
//!     .unwrap();
//! let config = CoverageConfig::new()
//!     .with_sample_sizes(vec![10])
//!     .with_repeats(100)
//!     .with_seed(1);
//!
//! let report = run_coverage(config, &registry).unwrap();
//! let unit = report.estimator("unit").unwrap();
//! assert!(unit.is_exact(0.05));
//! ```

pub use coverage_core as core;
pub use coverage_eval as eval;
pub use coverage_sampling as sampling;

pub use coverage_core::{Error, Result};

pub mod prelude {
    pub use coverage_core::{auto_engine, sequential, ExecutionEngine, SequentialEngine, StreamSeed};
    #[cfg(feature = "parallel")]
    pub use coverage_core::{parallel, ParallelEngine};
    pub use coverage_eval::{
        estimator_fn, evaluate_scenario, infallible_fn, run_coverage, CoverageConfig, CoverageEvaluator,
        CoverageReport, Distribution, DistributionKind, Error, EstimatorRegistry, Interval,
        IntervalEstimator, IntervalPolicy, JsonReporter, Reporter, Result, Scenario, ScenarioCatalog,
        ScenarioDriver, TextReporter, Validity,
    };
}
