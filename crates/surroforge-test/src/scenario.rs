//! Model builders and canonical ensemble scenarios.
//!
//! # Example
//!
//! ```
//! use surroforge_test::scenario::two_model_scenario;
//!
//! let scenario = two_model_scenario();
//! let ensemble = scenario.compose().unwrap();
//! assert!(ensemble.check_compatible(&scenario.inputs, &scenario.outputs).is_ok());
//! ```

use std::collections::BTreeMap;

use surroforge_core::{EnsembleComposer, Features, Result, SingleModelDescriptor, SurrogateKind};

use crate::feature::{categorical, continuous, output, TestFeature};
use crate::preprocessing::TestTransform;

/// Model descriptor over the fixture types.
pub type TestModel = SingleModelDescriptor<TestFeature, TestTransform>;

/// Candidate models plus the problem domain they should fit.
#[derive(Clone, Debug)]
pub struct Scenario {
    pub models: Vec<TestModel>,
    pub inputs: Features<TestFeature>,
    pub outputs: Features<TestFeature>,
}

impl Scenario {
    /// Composes the scenario's models.
    pub fn compose(&self) -> Result<EnsembleComposer<TestFeature, TestTransform>> {
        EnsembleComposer::try_new(self.models.clone())
    }

    /// Adds a domain input no model uses.
    ///
    /// # Panics
    ///
    /// Panics if the key already exists.
    pub fn with_extra_input(mut self, feature: TestFeature) -> Self {
        let mut inputs = self.inputs.as_slice().to_vec();
        inputs.push(feature);
        self.inputs = Features::try_new(inputs).expect("extra input key must be new");
        self
    }

    /// Replaces the model at `index`.
    pub fn with_model(mut self, index: usize, model: TestModel) -> Self {
        self.models[index] = model;
        self
    }
}

/// Builds a single-output model.
///
/// # Panics
///
/// Panics if the fixture data is malformed.
pub fn model(
    kind: SurrogateKind,
    inputs: Vec<TestFeature>,
    output_key: &str,
    specs: &[(&str, TestTransform)],
) -> TestModel {
    let specs: BTreeMap<String, TestTransform> =
        specs.iter().map(|(k, t)| (k.to_string(), *t)).collect();
    SingleModelDescriptor::try_new(
        kind,
        Features::try_new(inputs).expect("fixture inputs must be unique"),
        Features::try_new(vec![output(output_key)]).expect("single output"),
        specs,
    )
    .expect("fixture specs must reference inputs")
}

/// The shared categorical input of the two-model scenario.
pub fn shared_input() -> TestFeature {
    categorical("f2", &["a", "b", "c"])
}

/// Two models sharing input `f2` with equal feature and preprocessing.
///
/// - M1: inputs `{f1, f2}`, output `y1`
/// - M2: inputs `{f2, f3}`, output `y2`
/// - domain: inputs `{f1, f2, f3}`, outputs `{y1, y2}`
pub fn two_model_scenario() -> Scenario {
    let f1 = continuous("f1", 0.0, 1.0);
    let f3 = continuous("f3", -1.0, 1.0);
    let models = vec![
        model(
            SurrogateKind::SingleTaskGp,
            vec![f1.clone(), shared_input()],
            "y1",
            &[("f2", TestTransform::OneHot)],
        ),
        model(
            SurrogateKind::RandomForest,
            vec![shared_input(), f3.clone()],
            "y2",
            &[("f2", TestTransform::OneHot)],
        ),
    ];
    Scenario {
        models,
        inputs: Features::try_new(vec![f1, shared_input(), f3]).expect("unique"),
        outputs: Features::try_new(vec![output("y1"), output("y2")]).expect("unique"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use surroforge_core::Feature;

    #[test]
    fn test_two_model_scenario_shape() {
        let s = two_model_scenario();
        assert_eq!(s.models.len(), 2);
        assert_eq!(s.inputs.keys().collect::<Vec<_>>(), vec!["f1", "f2", "f3"]);
        assert_eq!(s.outputs.len(), 2);
    }

    #[test]
    fn test_with_extra_input() {
        let s = two_model_scenario().with_extra_input(continuous("f4", 0.0, 1.0));
        assert_eq!(s.inputs.len(), 4);
        assert_eq!(s.inputs.as_slice()[3].key(), "f4");
    }
}
