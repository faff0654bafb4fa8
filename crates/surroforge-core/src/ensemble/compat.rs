//! Compatibility of an ensemble with a problem domain.

use std::collections::{BTreeSet, HashSet};

use tracing::{debug, trace};

use super::EnsembleComposer;
use crate::error::{Result, ValidationError};
use crate::feature::{Feature, Inputs, Outputs, PreprocessingSpec};

impl<F: Feature, P: PreprocessingSpec> EnsembleComposer<F, P> {
    /// Checks that this ensemble fits the domain's inputs and outputs.
    ///
    /// Read-only; repeated calls with the same arguments give the same
    /// result. The first failing check is reported, in this order:
    /// 1. output keys equal the domain's output keys as sets
    /// 2. no model has more inputs than the domain
    /// 3. every model input exists in the domain with an equal feature
    /// 4. every domain input is used by some model
    ///
    /// Preprocessing specs are not compared against the domain.
    pub fn check_compatible(&self, inputs: &Inputs<F>, outputs: &Outputs<F>) -> Result<()> {
        let result = self.check_domain(inputs, outputs);
        match &result {
            Ok(()) => debug!(
                event = "compatibility_checked",
                models = self.len() as u64,
                inputs = inputs.len() as u64,
                outputs = outputs.len() as u64,
            ),
            Err(err) => debug!(
                event = "compatibility_rejected",
                kind = ?err.kind(),
                error = %err,
            ),
        }
        result
    }

    fn check_domain(&self, inputs: &Inputs<F>, outputs: &Outputs<F>) -> Result<()> {
        let ours: BTreeSet<&str> = self.output_keys().into_iter().collect();
        let theirs: BTreeSet<&str> = outputs.keys().collect();
        if ours != theirs {
            return Err(ValidationError::OutputMismatch {
                missing: theirs.difference(&ours).map(|k| k.to_string()).collect(),
                unexpected: ours.difference(&theirs).map(|k| k.to_string()).collect(),
            });
        }

        for (index, model) in self.models().iter().enumerate() {
            let count = model.input_features().len();
            if count > inputs.len() {
                return Err(ValidationError::TooManyInputs {
                    model: index,
                    count,
                    available: inputs.len(),
                });
            }
        }

        let mut used: HashSet<&str> = HashSet::with_capacity(inputs.len());
        for (index, model) in self.models().iter().enumerate() {
            for feature in model.input_features() {
                let Some(expected) = inputs.get_by_key(feature.key()) else {
                    return Err(ValidationError::UnknownInput {
                        model: index,
                        key: feature.key().to_string(),
                    });
                };
                if feature != expected {
                    return Err(ValidationError::InputMismatch {
                        model: index,
                        key: feature.key().to_string(),
                    });
                }
                used.insert(expected.key());
            }
            trace!(model = index as u64, kind = %model.kind(), "model inputs match domain");
        }

        let unused: Vec<String> = inputs
            .keys()
            .filter(|key| !used.contains(key))
            .map(str::to_string)
            .collect();
        if !unused.is_empty() {
            return Err(ValidationError::UnusedInputs { keys: unused });
        }

        Ok(())
    }
}
