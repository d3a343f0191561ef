//! Coverage evaluator
//!
//! For one scenario and one sample size the evaluator runs `repeats`
//! independent trials. A trial draws a fresh sample, calls the estimator once
//! and checks whether the scenario's true value lies in the returned bounds
//! (inclusive at both ends).
//!
//! Trials are grouped into chunks that the execution engine may run in
//! parallel. Each chunk returns a partial [`TrialTally`] and the tallies are
//! summed at the end, so no state is shared between trials. Every trial seeds
//! its own generator from the bucket's [`StreamSeed`] and its trial index,
//! which makes the result independent of the engine and the chunk size.

use crate::catalog::Scenario;
use crate::config::{CoverageConfig, IntervalPolicy, DEFAULT_REPEATS};
use crate::registry::{EstimatorId, RegisteredEstimator};
use crate::traits::IntervalEstimator;
use crate::types::{CoveragePoint, Interval, TrialOutcome, TrialTally};
use coverage_core::{Error, ExecutionEngine, Result, SequentialEngine, StreamSeed};
use coverage_sampling::Sampler;
use tracing::{debug, instrument, warn};

/// Monte Carlo coverage evaluator
#[derive(Debug, Clone)]
pub struct CoverageEvaluator<E = SequentialEngine> {
    engine: E,
    repeats: usize,
    chunk_size: Option<usize>,
    policy: IntervalPolicy,
}

impl<E: ExecutionEngine> CoverageEvaluator<E> {
    /// Create a new evaluator with the default repeat count
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            repeats: DEFAULT_REPEATS,
            chunk_size: None,
            policy: IntervalPolicy::default(),
        }
    }

    /// Create an evaluator from a validated configuration
    pub fn from_config(engine: E, config: &CoverageConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            engine,
            repeats: config.repeats(),
            chunk_size: config.chunk_size(),
            policy: config.interval_policy(),
        })
    }

    /// Set the number of trials per bucket
    pub fn with_repeats(mut self, repeats: usize) -> Self {
        self.repeats = repeats;
        self
    }

    /// Set the number of trials per work unit
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    pub fn with_interval_policy(mut self, policy: IntervalPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn repeats(&self) -> usize {
        self.repeats
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Run `repeats` trials of `estimator` on `scenario` at `sample_size`
    ///
    /// `stream` identifies the bucket's random stream; two calls with the same
    /// stream and inputs produce the same point.
    #[instrument(
        skip(self, scenario, estimator, stream),
        fields(estimator = %estimator.label(), scenario = %scenario.label(), repeats = self.repeats)
    )]
    pub fn evaluate(
        &self,
        scenario: &Scenario,
        sample_size: usize,
        estimator: &RegisteredEstimator,
        stream: StreamSeed,
    ) -> Result<CoveragePoint> {
        if self.repeats == 0 {
            return Err(Error::InvalidConfig("repeats must be positive".to_string()));
        }
        if sample_size == 0 {
            return Err(Error::InvalidConfig("sample size must be positive".to_string()));
        }
        if self.chunk_size == Some(0) {
            return Err(Error::InvalidConfig("chunk_size must be positive".to_string()));
        }

        let sampler = Sampler::new(scenario.distribution())?;
        let chunk = self
            .chunk_size
            .unwrap_or_else(|| self.engine.preferred_chunk_size(self.repeats));
        let n_chunks = self.repeats.div_ceil(chunk);

        debug!("Running {} trials in {} chunks of {}", self.repeats, n_chunks, chunk);

        let partials = self.engine.execute_batch(n_chunks, |c| -> Result<TrialTally> {
            let start = c * chunk;
            let end = (start + chunk).min(self.repeats);
            let trial = TrialContext {
                scenario,
                sample_size,
                estimator: estimator.id(),
            };

            let mut buf = Vec::with_capacity(sample_size);
            let mut tally = TrialTally::default();
            for index in start..end {
                let mut rng = stream.trial_rng(index as u64);
                sampler.fill(sample_size, &mut rng, &mut buf);

                let interval = estimator
                    .interval(&buf)
                    .map_err(|e| trial.estimator_error(index, e))?;
                tally.record(self.check(interval, &trial, index)?);
            }
            Ok(tally)
        });

        // Lowest failing chunk wins, independent of scheduling
        let tally = partials
            .into_iter()
            .try_fold(TrialTally::default(), |acc, partial| partial.map(|t| acc + t))?;

        debug_assert_eq!(tally.trials, self.repeats);

        if tally.inverted > 0 {
            warn!(
                inverted = tally.inverted,
                "estimator returned lower > upper; counted as misses"
            );
        }

        let point = CoveragePoint::from_tally(sample_size, tally);
        debug!(
            sample_size,
            miss_fraction = point.miss_fraction(),
            "bucket complete"
        );
        Ok(point)
    }

    /// Miss fraction of an arbitrary estimator on one scenario
    ///
    /// Convenience form of [`CoverageEvaluator::evaluate`] for a single
    /// estimator outside of any registry.
    pub fn miss_fraction<Est>(
        &self,
        scenario: &Scenario,
        sample_size: usize,
        estimator: Est,
        stream: StreamSeed,
    ) -> Result<f64>
    where
        Est: IntervalEstimator + 'static,
    {
        let registered = RegisteredEstimator::new(EstimatorId::new(0, "estimator"), estimator);
        Ok(self.evaluate(scenario, sample_size, &registered, stream)?.miss_fraction())
    }

    fn check(&self, interval: Interval, trial: &TrialContext<'_>, index: usize) -> Result<TrialOutcome> {
        if interval.has_nan() {
            return Err(trial.malformed(index, interval, "bound is NaN"));
        }
        if interval.is_inverted() {
            return match self.policy {
                IntervalPolicy::CountAsMiss => Ok(TrialOutcome::Inverted),
                IntervalPolicy::Strict => Err(trial.malformed(index, interval, "lower bound exceeds upper bound")),
            };
        }

        if interval.contains(trial.scenario.true_value()) {
            Ok(TrialOutcome::Covered)
        } else {
            Ok(TrialOutcome::Missed)
        }
    }
}

/// Identifies the bucket a trial belongs to, for error reporting
struct TrialContext<'a> {
    scenario: &'a Scenario,
    sample_size: usize,
    estimator: &'a EstimatorId,
}

impl TrialContext<'_> {
    fn estimator_error(&self, trial: usize, source: Error) -> Error {
        Error::Estimator {
            estimator: self.estimator.label().to_string(),
            scenario: self.scenario.label().to_string(),
            sample_size: self.sample_size,
            trial,
            source: Box::new(source),
        }
    }

    fn malformed(&self, trial: usize, interval: Interval, reason: &'static str) -> Error {
        Error::MalformedInterval {
            estimator: self.estimator.label().to_string(),
            scenario: self.scenario.label().to_string(),
            sample_size: self.sample_size,
            trial,
            lower: interval.lower,
            upper: interval.upper,
            reason,
        }
    }
}
