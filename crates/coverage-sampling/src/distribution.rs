//! Distribution families and their validated parameters

use coverage_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three families the scenario catalog draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionKind {
    Bernoulli,
    Uniform,
    Normal,
}

impl DistributionKind {
    /// All families, in catalog order
    pub const ALL: [DistributionKind; 3] = [Self::Bernoulli, Self::Uniform, Self::Normal];

    /// Human-readable family name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bernoulli => "Bernoulli",
            Self::Uniform => "Uniform",
            Self::Normal => "Normal",
        }
    }
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parameterized distribution
///
/// Use the validating constructors ([`Distribution::bernoulli`],
/// [`Distribution::uniform`], [`Distribution::clamped_normal`]); values built
/// directly from the variants are checked again by [`Distribution::validate`]
/// before any sampling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Distribution {
    /// 1 with probability `theta`, else 0
    Bernoulli { theta: f64 },
    /// Continuous uniform on `[low, high]`
    Uniform { low: f64, high: f64 },
    /// Gaussian draw clamped into `[0, 1]`
    #[serde(rename = "normal")]
    ClampedNormal { mean: f64, std_dev: f64 },
}

impl Distribution {
    /// Bernoulli(θ), θ ∈ [0, 1]
    pub fn bernoulli(theta: f64) -> Result<Self> {
        let dist = Self::Bernoulli { theta };
        dist.validate()?;
        Ok(dist)
    }

    /// Uniform(a, b), a ≤ b
    pub fn uniform(low: f64, high: f64) -> Result<Self> {
        let dist = Self::Uniform { low, high };
        dist.validate()?;
        Ok(dist)
    }

    /// Normal(μ, σ) clamped into [0, 1], σ ≥ 0
    pub fn clamped_normal(mean: f64, std_dev: f64) -> Result<Self> {
        let dist = Self::ClampedNormal { mean, std_dev };
        dist.validate()?;
        Ok(dist)
    }

    /// Check the parameters against the family's domain
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Bernoulli { theta } => {
                if !(0.0..=1.0).contains(&theta) {
                    return Err(Error::invalid_probability("theta", theta));
                }
            }
            Self::Uniform { low, high } => {
                if !low.is_finite() || !high.is_finite() {
                    return Err(Error::non_finite("uniform bounds"));
                }
                if low > high {
                    return Err(Error::InvalidParameter(format!(
                        "uniform lower bound {low} exceeds upper bound {high}"
                    )));
                }
                if !(high - low).is_finite() {
                    return Err(Error::InvalidParameter(format!(
                        "uniform range [{low}, {high}] is wider than f64 can represent"
                    )));
                }
            }
            Self::ClampedNormal { mean, std_dev } => {
                if !mean.is_finite() || !std_dev.is_finite() {
                    return Err(Error::non_finite("normal parameters"));
                }
                if std_dev < 0.0 {
                    return Err(Error::InvalidParameter(format!(
                        "normal standard deviation {std_dev} must be non-negative"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Family of this distribution
    pub fn kind(&self) -> DistributionKind {
        match self {
            Self::Bernoulli { .. } => DistributionKind::Bernoulli,
            Self::Uniform { .. } => DistributionKind::Uniform,
            Self::ClampedNormal { .. } => DistributionKind::Normal,
        }
    }

    /// The parameter a confidence interval for this distribution should cover
    ///
    /// θ for Bernoulli, (a+b)/2 for Uniform and μ for the clamped Normal.
    /// For the clamped Normal this is the mean of the *unclamped* Gaussian.
    pub fn target(&self) -> f64 {
        match *self {
            Self::Bernoulli { theta } => theta,
            Self::Uniform { low, high } => (low + high) / 2.0,
            Self::ClampedNormal { mean, .. } => mean,
        }
    }

    /// Range every generated value falls in
    pub fn support(&self) -> (f64, f64) {
        match *self {
            Self::Bernoulli { .. } | Self::ClampedNormal { .. } => (0.0, 1.0),
            Self::Uniform { low, high } => (low, high),
        }
    }

    /// Whether every draw is the same value
    pub fn is_degenerate(&self) -> bool {
        match *self {
            Self::Bernoulli { theta } => theta == 0.0 || theta == 1.0,
            Self::Uniform { low, high } => low == high,
            Self::ClampedNormal { std_dev, .. } => std_dev == 0.0,
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bernoulli { theta } => write!(f, "Bernoulli(theta={theta})"),
            Self::Uniform { low, high } => write!(f, "Uniform(a={low}, b={high})"),
            Self::ClampedNormal { mean, std_dev } => {
                write!(f, "Normal(mu={mean}, sigma={std_dev}) clamped to [0, 1]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_constructors() {
        assert!(Distribution::bernoulli(0.0).is_ok());
        assert!(Distribution::bernoulli(1.0).is_ok());
        assert!(Distribution::uniform(0.95, 1.0).is_ok());
        assert!(Distribution::uniform(0.3, 0.3).is_ok());
        assert!(Distribution::clamped_normal(0.5, 0.0).is_ok());
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(Distribution::bernoulli(1.01), Err(Error::InvalidParameter(_))));
        assert!(Distribution::bernoulli(-0.1).is_err());
        assert!(Distribution::bernoulli(f64::NAN).is_err());
        assert!(Distribution::uniform(1.0, 0.0).is_err());
        assert!(Distribution::uniform(0.0, f64::INFINITY).is_err());
        assert!(Distribution::clamped_normal(0.5, -0.1).is_err());
        assert!(Distribution::clamped_normal(f64::NAN, 1.0).is_err());

        let unchecked = Distribution::Uniform { low: 2.0, high: 1.0 };
        assert!(unchecked.validate().is_err());
    }

    #[test]
    fn test_uniform_range_must_be_representable() {
        assert!(matches!(
            Distribution::uniform(-f64::MAX, f64::MAX),
            Err(Error::InvalidParameter(_))
        ));
        let unchecked = Distribution::Uniform { low: -f64::MAX, high: f64::MAX };
        assert!(unchecked.validate().is_err());

        assert!(Distribution::uniform(-1e300, 1e300).is_ok());
    }

    #[test]
    fn test_target_values() {
        assert_eq!(Distribution::bernoulli(0.01).unwrap().target(), 0.01);
        assert_eq!(Distribution::uniform(0.0, 1.0).unwrap().target(), 0.5);
        assert_eq!(Distribution::uniform(0.95, 1.0).unwrap().target(), 0.975);
        assert_eq!(Distribution::clamped_normal(0.0, 1.0).unwrap().target(), 0.0);
    }

    #[test]
    fn test_kind_and_support() {
        let normal = Distribution::clamped_normal(0.5, 0.9).unwrap();
        assert_eq!(normal.kind(), DistributionKind::Normal);
        assert_eq!(normal.support(), (0.0, 1.0));

        let uniform = Distribution::uniform(0.0, 0.05).unwrap();
        assert_eq!(uniform.kind(), DistributionKind::Uniform);
        assert_eq!(uniform.support(), (0.0, 0.05));
    }

    #[test]
    fn test_degenerate() {
        assert!(Distribution::bernoulli(1.0).unwrap().is_degenerate());
        assert!(Distribution::uniform(0.2, 0.2).unwrap().is_degenerate());
        assert!(!Distribution::clamped_normal(0.5, 0.1).unwrap().is_degenerate());
    }

    #[test]
    fn test_display() {
        let d = Distribution::uniform(0.0, 0.05).unwrap();
        assert_eq!(d.to_string(), "Uniform(a=0, b=0.05)");
        assert_eq!(DistributionKind::Normal.to_string(), "Normal");
    }

    #[test]
    fn test_serde_tagging() {
        let d = Distribution::clamped_normal(0.5, 0.1).unwrap();
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, r#"{"kind":"normal","mean":0.5,"std_dev":0.1}"#);
        let back: Distribution = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }
}
