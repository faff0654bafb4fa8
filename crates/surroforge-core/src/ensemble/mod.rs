//! Composition of single-output models into one multi-output ensemble.
//!
//! An [`EnsembleComposer`] only exists if its models can be legally merged:
//! every model predicts exactly one output, outputs are pairwise distinct,
//! and every input key shared by several models resolves to equal features
//! and equal declared preprocessing specs.

mod compat;


use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::error::{Result, ValidationError};
use crate::feature::{Feature, Features, Inputs, Outputs, PreprocessingSpec};
use crate::model::SingleModelDescriptor;

/// A validated set of single-output models acting as one multi-output model.
///
/// Construction is the only place validation happens; there is no way to
/// mutate the model list afterwards, so the derived views stay consistent.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use surroforge_core::{EnsembleComposer, Feature, Features, SingleModelDescriptor, SurrogateKind};
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Named(&'static str);
///
/// impl Feature for Named {
///     fn key(&self) -> &str { self.0 }
/// }
///
/// let model = |inputs: Vec<Named>, output: Named| {
///     SingleModelDescriptor::<Named, ()>::try_new(
///         SurrogateKind::SingleTaskGp,
///         Features::try_new(inputs).unwrap(),
///         Features::try_new(vec![output]).unwrap(),
///         BTreeMap::new(),
///     )
///     .unwrap()
/// };
///
/// let ensemble = EnsembleComposer::try_new(vec![
///     model(vec![Named("f1"), Named("f2")], Named("y1")),
///     model(vec![Named("f2"), Named("f3")], Named("y2")),
/// ])
/// .unwrap();
///
/// assert_eq!(ensemble.output_keys(), vec!["y1", "y2"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EnsembleComposer<F, P> {
    models: Vec<SingleModelDescriptor<F, P>>,
}

impl<F: Feature, P: PreprocessingSpec> EnsembleComposer<F, P> {
    /// Validates `models` and wraps them as one ensemble.
    ///
    /// Checks run in a fixed order and stop at the first failure:
    /// 1. every model has exactly one output
    /// 2. output keys are distinct across models
    /// 3. shared input keys resolve to equal features
    /// 4. shared input keys carry equal declared preprocessing specs
    pub fn try_new(models: Vec<SingleModelDescriptor<F, P>>) -> Result<Self> {
        match validate_models(&models) {
            Ok(()) => {
                debug!(
                    event = "ensemble_validated",
                    models = models.len() as u64,
                );
                Ok(Self { models })
            }
            Err(err) => {
                debug!(
                    event = "ensemble_rejected",
                    models = models.len() as u64,
                    kind = ?err.kind(),
                    error = %err,
                );
                Err(err)
            }
        }
    }

    /// Output features of all models, in model order.
    pub fn output_features(&self) -> Outputs<F> {
        let outputs = self
            .models
            .iter()
            .flat_map(|m| m.output_features().iter().cloned())
            .collect();
        // Distinct by invariant, so this cannot fail.
        Features::try_new(outputs).unwrap_or_default()
    }

    /// Output keys of all models, in model order.
    pub fn output_keys(&self) -> Vec<&str> {
        self.models
            .iter()
            .flat_map(|m| m.output_features().keys())
            .collect()
    }

    /// Union of all models' input features, in first-seen order.
    pub fn input_features(&self) -> Inputs<F> {
        let mut inputs: Vec<F> = Vec::new();
        for model in &self.models {
            for feature in model.input_features() {
                if !inputs.iter().any(|f| f.key() == feature.key()) {
                    inputs.push(feature.clone());
                }
            }
        }
        Features::try_new(inputs).unwrap_or_default()
    }

    /// Merged preprocessing specs of all models.
    ///
    /// Models are merged in order, so a later model's entry replaces an
    /// earlier one for the same key. Declared specs for a shared key are
    /// equal by construction, which makes the merge order unobservable.
    pub fn input_preprocessing_specs(&self) -> BTreeMap<String, P> {
        let mut specs = BTreeMap::new();
        for model in &self.models {
            for (key, spec) in model.input_preprocessing_specs() {
                specs.insert(key.clone(), spec.clone());
            }
        }
        specs
    }

    pub fn models(&self) -> &[SingleModelDescriptor<F, P>] {
        &self.models
    }

    pub fn model(&self, index: usize) -> Option<&SingleModelDescriptor<F, P>> {
        self.models.get(index)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

fn validate_models<F: Feature, P: PreprocessingSpec>(
    models: &[SingleModelDescriptor<F, P>],
) -> Result<()> {
    for (index, model) in models.iter().enumerate() {
        let count = model.output_features().len();
        if count != 1 {
            return Err(ValidationError::OutputCount {
                model: index,
                count,
            });
        }
    }

    let mut output_owner: HashMap<&str, usize> = HashMap::with_capacity(models.len());
    for (index, model) in models.iter().enumerate() {
        for key in model.output_features().keys() {
            if let Some(&first) = output_owner.get(key) {
                return Err(ValidationError::DuplicateOutput {
                    key: key.to_string(),
                    first,
                    second: index,
                });
            }
            output_owner.insert(key, index);
        }
    }

    let index = KeyIndex::build(models);

    for (key, users) in index.shared() {
        let first = users[0];
        let reference = models[first].input_features().get_by_key(key);
        for &other in &users[1..] {
            if models[other].input_features().get_by_key(key) != reference {
                return Err(ValidationError::IncompatibleFeature {
                    key: key.to_string(),
                    first,
                    other,
                });
            }
        }
    }

    for (key, users) in index.shared() {
        let mut declared = users
            .iter()
            .filter_map(|&m| models[m].preprocessing_spec(key).map(|spec| (m, spec)));
        let Some((first, reference)) = declared.next() else {
            continue;
        };
        for (other, spec) in declared {
            if spec != reference {
                return Err(ValidationError::IncompatiblePreprocessing {
                    key: key.to_string(),
                    first,
                    other,
                });
            }
        }
    }

    Ok(())
}

/// Input key to the indices of the models that reference it.
///
/// Built once over all models so each key is compared only within the
/// models that actually use it.
struct KeyIndex<'a> {
    entries: Vec<(&'a str, Vec<usize>)>,
}

impl<'a> KeyIndex<'a> {
    fn build<F: Feature, P: PreprocessingSpec>(models: &'a [SingleModelDescriptor<F, P>]) -> Self {
        let mut slots: HashMap<&'a str, usize> = HashMap::new();
        let mut entries: Vec<(&'a str, Vec<usize>)> = Vec::new();
        for (index, model) in models.iter().enumerate() {
            for key in model.input_features().keys() {
                let slot = *slots.entry(key).or_insert_with(|| {
                    entries.push((key, Vec::new()));
                    entries.len() - 1
                });
                entries[slot].1.push(index);
            }
        }
        Self { entries }
    }

    /// Keys referenced by at least two models, in first-seen order.
    fn shared(&self) -> impl Iterator<Item = (&'a str, &[usize])> + '_ {
        self.entries
            .iter()
            .filter(|(_, users)| users.len() > 1)
            .map(|(key, users)| (*key, users.as_slice()))
    }
}
