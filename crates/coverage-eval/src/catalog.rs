//! Scenario catalog
//!
//! A scenario fixes a distribution, its parameters, a label and the true
//! value a confidence interval should cover. The standard catalog holds
//! three parameterizations for each of the three families:
//!
//! | Family | Label | Parameters | True value |
//! |--------|-------|------------|------------|
//! | Bernoulli | balanced | θ = 0.5 | 0.5 |
//! | Bernoulli | rare events | θ = 0.01 | 0.01 |
//! | Bernoulli | common events | θ = 0.99 | 0.99 |
//! | Uniform | full range | (0, 1) | 0.5 |
//! | Uniform | lower edge | (0, 0.05) | 0.025 |
//! | Uniform | upper edge | (0.95, 1) | 0.975 |
//! | Normal | standard | (0, 1) | 0 |
//! | Normal | small variance | (0.5, 0.1) | 0.5 |
//! | Normal | large variance | (0.5, 0.9) | 0.5 |
//!
//! Normal draws are clamped into `[0, 1]`; the true value stays μ.

use coverage_core::{Error, Result};
use coverage_sampling::{Distribution, DistributionKind};
use serde::Serialize;
use std::fmt;

/// One immutable test scenario
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    label: String,
    distribution: Distribution,
    true_value: f64,
}

impl Scenario {
    /// Create a scenario, rejecting out-of-domain parameters
    pub fn new(label: impl Into<String>, distribution: Distribution) -> Result<Self> {
        distribution.validate()?;
        Ok(Self::from_valid(label.into(), distribution))
    }

    fn from_valid(label: String, distribution: Distribution) -> Self {
        Self {
            label,
            true_value: distribution.target(),
            distribution,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn distribution(&self) -> &Distribution {
        &self.distribution
    }

    pub fn kind(&self) -> DistributionKind {
        self.distribution.kind()
    }

    /// The value every trial's interval is tested against
    pub fn true_value(&self) -> f64 {
        self.true_value
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {}, true value {}",
            self.kind(),
            self.label,
            self.distribution,
            self.true_value
        )
    }
}

/// Scenarios of one distribution family, in catalog order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioFamily {
    kind: DistributionKind,
    scenarios: Vec<Scenario>,
}

impl ScenarioFamily {
    pub fn kind(&self) -> DistributionKind {
        self.kind
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }
}

/// Mapping from distribution family to its ordered scenarios
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioCatalog {
    families: Vec<ScenarioFamily>,
}

impl ScenarioCatalog {
    /// The nine-scenario catalog
    pub fn standard() -> Self {
        let family = |kind, entries: [(&str, Distribution); 3]| ScenarioFamily {
            kind,
            scenarios: entries
                .into_iter()
                .map(|(label, dist)| Scenario::from_valid(label.to_string(), dist))
                .collect(),
        };

        Self {
            families: vec![
                family(
                    DistributionKind::Bernoulli,
                    [
                        ("balanced", Distribution::Bernoulli { theta: 0.5 }),
                        ("rare events", Distribution::Bernoulli { theta: 0.01 }),
                        ("common events", Distribution::Bernoulli { theta: 0.99 }),
                    ],
                ),
                family(
                    DistributionKind::Uniform,
                    [
                        ("full range", Distribution::Uniform { low: 0.0, high: 1.0 }),
                        ("lower edge", Distribution::Uniform { low: 0.0, high: 0.05 }),
                        ("upper edge", Distribution::Uniform { low: 0.95, high: 1.0 }),
                    ],
                ),
                family(
                    DistributionKind::Normal,
                    [
                        ("standard", Distribution::ClampedNormal { mean: 0.0, std_dev: 1.0 }),
                        ("small variance", Distribution::ClampedNormal { mean: 0.5, std_dev: 0.1 }),
                        ("large variance", Distribution::ClampedNormal { mean: 0.5, std_dev: 0.9 }),
                    ],
                ),
            ],
        }
    }

    /// Start an empty custom catalog
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    pub fn families(&self) -> &[ScenarioFamily] {
        &self.families
    }

    pub fn family(&self, kind: DistributionKind) -> Option<&ScenarioFamily> {
        self.families.iter().find(|f| f.kind == kind)
    }

    /// All scenarios, family by family
    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.families.iter().flat_map(|f| f.scenarios.iter())
    }

    /// Look up a scenario by family and label
    pub fn find(&self, kind: DistributionKind, label: &str) -> Option<&Scenario> {
        self.family(kind)?.scenarios.iter().find(|s| s.label == label)
    }

    pub fn len(&self) -> usize {
        self.families.iter().map(|f| f.scenarios.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ScenarioCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Builder for custom catalogs
///
/// Scenarios are grouped by family in order of first appearance.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    families: Vec<ScenarioFamily>,
}

impl CatalogBuilder {
    /// Add a scenario, validating its parameters immediately
    pub fn scenario(mut self, label: impl Into<String>, distribution: Distribution) -> Result<Self> {
        let scenario = Scenario::new(label, distribution)?;
        let kind = scenario.kind();

        if let Some(family) = self.families.iter_mut().find(|f| f.kind == kind) {
            if family.scenarios.iter().any(|s| s.label == scenario.label) {
                return Err(Error::InvalidConfig(format!(
                    "duplicate {kind} scenario '{}'",
                    scenario.label
                )));
            }
            family.scenarios.push(scenario);
        } else {
            self.families.push(ScenarioFamily {
                kind,
                scenarios: vec![scenario],
            });
        }

        Ok(self)
    }

    pub fn build(self) -> Result<ScenarioCatalog> {
        if self.families.is_empty() {
            return Err(Error::empty_list("scenario catalog"));
        }
        Ok(ScenarioCatalog {
            families: self.families,
        })
    }
}
