//! Scenario driver
//!
//! Runs every catalog scenario at every configured sample size for every
//! registered estimator. Random streams are derived as
//! `seed -> estimator index -> scenario index -> sample size index`, so each
//! bucket draws samples independent of every other bucket.

use crate::catalog::ScenarioCatalog;
use crate::config::CoverageConfig;
use crate::evaluator::CoverageEvaluator;
use crate::registry::{EstimatorRegistry, RegisteredEstimator};
use crate::results::{CoverageReport, EstimatorCoverage, ScenarioCoverage};
use coverage_core::{Error, ExecutionEngine, Result, StreamSeed};
use tracing::{info, instrument};

/// Drives the coverage evaluator over the scenario catalog
#[derive(Debug, Clone)]
pub struct ScenarioDriver<E: ExecutionEngine> {
    evaluator: CoverageEvaluator<E>,
    catalog: ScenarioCatalog,
    config: CoverageConfig,
    seed: u64,
}

impl<E: ExecutionEngine> ScenarioDriver<E> {
    /// Create a driver over the standard catalog
    ///
    /// Fails fast on an invalid configuration. Without a configured seed a
    /// fresh one is drawn now and reported in the results.
    pub fn new(engine: E, config: CoverageConfig) -> Result<Self> {
        let evaluator = CoverageEvaluator::from_config(engine, &config)?;
        let seed = config.seed().unwrap_or_else(coverage_core::entropy_seed);
        Ok(Self {
            evaluator,
            catalog: ScenarioCatalog::standard(),
            config,
            seed,
        })
    }

    /// Replace the scenario catalog
    pub fn with_catalog(mut self, catalog: ScenarioCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn catalog(&self) -> &ScenarioCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &CoverageConfig {
        &self.config
    }

    /// Base seed of this driver's random streams
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Run the full battery once per registered estimator
    pub fn run(&self, registry: &EstimatorRegistry) -> Result<CoverageReport> {
        if registry.is_empty() {
            return Err(Error::InvalidConfig("no estimators registered".to_string()));
        }
        if self.catalog.is_empty() {
            return Err(Error::empty_list("scenario catalog"));
        }

        info!(
            estimators = registry.len(),
            scenarios = self.catalog.len(),
            sample_sizes = self.config.sample_sizes().len(),
            repeats = self.config.repeats(),
            seed = self.seed,
            "Starting coverage run"
        );

        let estimators = registry
            .iter()
            .map(|estimator| self.run_estimator(estimator))
            .collect::<Result<Vec<_>>>()?;

        Ok(CoverageReport {
            seed: self.seed,
            repeats: self.config.repeats(),
            sample_sizes: self.config.sample_sizes().to_vec(),
            alphas: self.config.alphas().to_vec(),
            estimators,
        })
    }

    /// Run the full battery for a single estimator
    #[instrument(skip(self, estimator), fields(estimator = %estimator.label()))]
    pub fn run_estimator(&self, estimator: &RegisteredEstimator) -> Result<EstimatorCoverage> {
        let stream = StreamSeed::new(self.seed).derive(estimator.id().index() as u64);

        let scenarios = self
            .catalog
            .iter()
            .enumerate()
            .map(|(scenario_idx, scenario)| {
                let scenario_stream = stream.derive(scenario_idx as u64);
                let points = self
                    .config
                    .sample_sizes()
                    .iter()
                    .enumerate()
                    .map(|(size_idx, &n)| {
                        self.evaluator
                            .evaluate(scenario, n, estimator, scenario_stream.derive(size_idx as u64))
                    })
                    .collect::<Result<Vec<_>>>()?;

                Ok(ScenarioCoverage {
                    scenario: scenario.clone(),
                    points,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        info!(scenarios = scenarios.len(), "Estimator battery complete");

        Ok(EstimatorCoverage {
            estimator: estimator.id().clone(),
            scenarios,
        })
    }
}
