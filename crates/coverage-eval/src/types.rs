//! Common types for coverage evaluation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

/// A pair of bounds returned by an estimator
///
/// No ordering between `lower` and `upper` is enforced; see
/// [`Interval::is_inverted`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// Lower bound of the interval
    pub lower: f64,
    /// Upper bound of the interval
    pub upper: f64,
}

impl Interval {
    /// Create a new interval
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Degenerate interval `[value, value]`
    pub fn point(value: f64) -> Self {
        Self::new(value, value)
    }

    /// `[-inf, +inf]`
    pub fn unbounded() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Inclusive containment: `lower <= value <= upper`
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// Width of the interval
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// `lower > upper`
    pub fn is_inverted(&self) -> bool {
        self.lower > self.upper
    }

    /// Either bound is NaN
    pub fn has_nan(&self) -> bool {
        self.lower.is_nan() || self.upper.is_nan()
    }
}

impl From<(f64, f64)> for Interval {
    fn from((lower, upper): (f64, f64)) -> Self {
        Self::new(lower, upper)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}

/// Result of a single trial's containment check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialOutcome {
    Covered,
    Missed,
    /// `lower > upper`, counted as a miss
    Inverted,
}

/// Running counts for a batch of trials
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrialTally {
    pub trials: usize,
    pub covered: usize,
    pub inverted: usize,
}

impl TrialTally {
    /// Count one trial
    pub fn record(&mut self, outcome: TrialOutcome) {
        self.trials += 1;
        match outcome {
            TrialOutcome::Covered => self.covered += 1,
            TrialOutcome::Missed => {}
            TrialOutcome::Inverted => self.inverted += 1,
        }
    }
}

impl Add for TrialTally {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            trials: self.trials + rhs.trials,
            covered: self.covered + rhs.covered,
            inverted: self.inverted + rhs.inverted,
        }
    }
}

impl AddAssign for TrialTally {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Coverage measured for one (scenario, sample size) bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoveragePoint {
    pub sample_size: usize,
    pub repeats: usize,
    pub covered: usize,
    /// Trials whose interval had `lower > upper`
    pub inverted: usize,
}

impl CoveragePoint {
    pub(crate) fn from_tally(sample_size: usize, tally: TrialTally) -> Self {
        Self {
            sample_size,
            repeats: tally.trials,
            covered: tally.covered,
            inverted: tally.inverted,
        }
    }

    /// Fraction of trials whose interval contained the true value
    pub fn coverage(&self) -> f64 {
        if self.repeats == 0 {
            return 0.0;
        }
        self.covered.min(self.repeats) as f64 / self.repeats as f64
    }

    /// `1 - coverage`
    pub fn miss_fraction(&self) -> f64 {
        if self.repeats == 0 {
            return 1.0;
        }
        self.repeats.saturating_sub(self.covered) as f64 / self.repeats as f64
    }

    /// Monte Carlo standard error of the miss fraction
    pub fn standard_error(&self) -> f64 {
        if self.repeats == 0 {
            return 0.0;
        }
        let p = self.miss_fraction();
        (p * (1.0 - p) / self.repeats as f64).sqrt()
    }

    /// Whether the achieved miss fraction is within the nominal level
    pub fn is_valid_at(&self, alpha: f64) -> bool {
        self.miss_fraction() <= alpha
    }
}

/// Validity class of an estimator on one scenario at one nominal level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "class", rename_all = "snake_case")]
pub enum Validity {
    /// Miss fraction ≤ α at every tested sample size
    Exact,
    /// Miss fraction ≤ α from `from_sample_size` through the largest size
    Asymptotic { from_sample_size: usize },
    /// Miss fraction exceeds α at the largest tested sample size
    Invalid,
}

impl Validity {
    /// Classify a set of coverage points against `alpha`
    ///
    /// Points are ordered by sample size before classification, so the
    /// configured order of sample sizes does not matter.
    pub fn classify(points: &[CoveragePoint], alpha: f64) -> Self {
        let mut sorted: Vec<&CoveragePoint> = points.iter().collect();
        sorted.sort_by_key(|p| p.sample_size);

        if sorted.is_empty() {
            return Self::Invalid;
        }

        // Longest suffix of sizes that are all valid
        let first_valid = sorted
            .iter()
            .rposition(|p| !p.is_valid_at(alpha))
            .map_or(0, |i| i + 1);

        match first_valid {
            0 => Self::Exact,
            i if i == sorted.len() => Self::Invalid,
            i => Self::Asymptotic {
                from_sample_size: sorted[i].sample_size,
            },
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, Self::Exact)
    }
}

impl fmt::Display for Validity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => f.write_str("exact"),
            Self::Asymptotic { from_sample_size } => write!(f, "asymptotic (n >= {from_sample_size})"),
            Self::Invalid => f.write_str("invalid"),
        }
    }
}
