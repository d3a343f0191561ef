//! Named estimators under test

use crate::traits::IntervalEstimator;
use crate::types::Interval;
use coverage_core::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Stable identifier of a registered estimator
///
/// The index is the registration order and seeds the estimator's random
/// stream; the label is used for report sectioning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EstimatorId {
    index: usize,
    label: String,
}

impl EstimatorId {
    pub fn new(index: usize, label: impl Into<String>) -> Self {
        Self {
            index,
            label: label.into(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for EstimatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// An estimator paired with its identifier
#[derive(Clone)]
pub struct RegisteredEstimator {
    id: EstimatorId,
    estimator: Arc<dyn IntervalEstimator>,
}

impl RegisteredEstimator {
    /// Pair an estimator with an identifier outside of any registry
    pub fn new<E: IntervalEstimator + 'static>(id: EstimatorId, estimator: E) -> Self {
        Self {
            id,
            estimator: Arc::new(estimator),
        }
    }

    pub fn id(&self) -> &EstimatorId {
        &self.id
    }

    pub fn label(&self) -> &str {
        self.id.label()
    }
}

impl IntervalEstimator for RegisteredEstimator {
    fn interval(&self, sample: &[f64]) -> Result<Interval> {
        self.estimator.interval(sample)
    }
}

impl fmt::Debug for RegisteredEstimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredEstimator").field("id", &self.id).finish_non_exhaustive()
    }
}

/// Ordered set of estimators to run the scenario battery against
#[derive(Debug, Clone, Default)]
pub struct EstimatorRegistry {
    entries: Vec<RegisteredEstimator>,
}

impl EstimatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an estimator under a unique label
    pub fn register<E>(&mut self, label: impl Into<String>, estimator: E) -> Result<EstimatorId>
    where
        E: IntervalEstimator + 'static,
    {
        self.register_shared(label, Arc::new(estimator))
    }

    /// Register an already shared estimator
    pub fn register_shared(
        &mut self,
        label: impl Into<String>,
        estimator: Arc<dyn IntervalEstimator>,
    ) -> Result<EstimatorId> {
        let label = label.into();
        if label.is_empty() {
            return Err(Error::InvalidConfig("estimator label must not be empty".to_string()));
        }
        if self.by_label(&label).is_some() {
            return Err(Error::InvalidConfig(format!("estimator '{label}' is already registered")));
        }

        let id = EstimatorId::new(self.entries.len(), label);
        self.entries.push(RegisteredEstimator {
            id: id.clone(),
            estimator,
        });
        Ok(id)
    }

    /// Builder-style registration
    pub fn with<E>(mut self, label: impl Into<String>, estimator: E) -> Result<Self>
    where
        E: IntervalEstimator + 'static,
    {
        self.register(label, estimator)?;
        Ok(self)
    }

    pub fn get(&self, id: &EstimatorId) -> Option<&RegisteredEstimator> {
        self.entries.get(id.index()).filter(|e| e.id == *id)
    }

    pub fn by_label(&self, label: &str) -> Option<&RegisteredEstimator> {
        self.entries.iter().find(|e| e.label() == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredEstimator> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::infallible_fn;

    #[test]
    fn test_register_assigns_sequential_ids() {
        let mut registry = EstimatorRegistry::new();
        let a = registry.register("wide", infallible_fn(|_s: &[f64]| (0.0, 1.0))).unwrap();
        let b = registry.register("narrow", infallible_fn(|_s: &[f64]| (0.5, 0.5))).unwrap();

        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(&b).unwrap().label(), "narrow");
        assert_eq!(registry.by_label("wide").unwrap().id(), &a);

        let labels: Vec<&str> = registry.iter().map(|e| e.label()).collect();
        assert_eq!(labels, vec!["wide", "narrow"]);
    }

    #[test]
    fn test_duplicate_and_empty_labels_rejected() {
        let registry = EstimatorRegistry::new()
            .with("wide", infallible_fn(|_s: &[f64]| (0.0, 1.0)))
            .unwrap();

        let dup = registry.clone().with("wide", infallible_fn(|_s: &[f64]| (0.0, 2.0)));
        assert!(matches!(dup, Err(Error::InvalidConfig(_))));

        let empty = registry.with("", infallible_fn(|_s: &[f64]| (0.0, 2.0)));
        assert!(empty.is_err());
    }

    #[test]
    fn test_foreign_id_not_found() {
        let registry = EstimatorRegistry::new()
            .with("wide", infallible_fn(|_s: &[f64]| (0.0, 1.0)))
            .unwrap();
        assert!(registry.get(&EstimatorId::new(0, "other")).is_none());
        assert!(registry.get(&EstimatorId::new(3, "wide")).is_none());
    }

    #[test]
    fn test_registered_estimator_delegates() {
        let entry = RegisteredEstimator::new(
            EstimatorId::new(0, "point"),
            infallible_fn(|_s: &[f64]| (0.25, 0.25)),
        );
        assert_eq!(entry.interval(&[1.0]).unwrap(), Interval::point(0.25));
        assert!(format!("{entry:?}").contains("point"));
    }
}
