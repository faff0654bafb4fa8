//! Test utilities for SurroForge core unit tests.

use std::collections::BTreeMap;

use crate::feature::{Feature, Features};
use crate::model::{SingleModelDescriptor, SurrogateKind};

/// A bounded continuous feature.
#[derive(Debug, Clone, PartialEq)]
pub struct TestFeature {
    pub key: String,
    pub lower: f64,
    pub upper: f64,
}

impl Feature for TestFeature {
    fn key(&self) -> &str {
        &self.key
    }
}

/// Creates a feature on `[0, 1]`.
pub fn feature(key: &str) -> TestFeature {
    TestFeature {
        key: key.to_string(),
        lower: 0.0,
        upper: 1.0,
    }
}

/// Creates a feature with custom bounds.
pub fn bounded(key: &str, lower: f64, upper: f64) -> TestFeature {
    TestFeature {
        key: key.to_string(),
        lower,
        upper,
    }
}

pub fn features(keys: &[&str]) -> Features<TestFeature> {
    Features::try_new(keys.iter().map(|k| feature(k)).collect()).unwrap()
}

pub type TestModel = SingleModelDescriptor<TestFeature, &'static str>;

/// Creates a model without preprocessing specs.
pub fn model(inputs: &[&str], outputs: &[&str]) -> TestModel {
    SingleModelDescriptor::try_new(
        SurrogateKind::SingleTaskGp,
        features(inputs),
        features(outputs),
        BTreeMap::new(),
    )
    .unwrap()
}

/// Creates a model with the given `(key, spec)` preprocessing pairs.
pub fn model_with_specs(
    inputs: &[&str],
    outputs: &[&str],
    specs: &[(&str, &'static str)],
) -> TestModel {
    SingleModelDescriptor::try_new(
        SurrogateKind::SingleTaskGp,
        features(inputs),
        features(outputs),
        specs.iter().map(|(k, s)| (k.to_string(), *s)).collect(),
    )
    .unwrap()
}
