//! Single model descriptor.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Result, ValidationError};
use crate::feature::{Feature, Inputs, Outputs, PreprocessingSpec};

/// Surrogate family a descriptor was produced from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SurrogateKind {
    Empirical,
    RandomForest,
    SingleTaskGp,
    MixedSingleTaskGp,
    MlpEnsemble,
    /// Any other family, by name.
    Custom(String),
}

impl fmt::Display for SurrogateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empirical => f.write_str("EmpiricalSurrogate"),
            Self::RandomForest => f.write_str("RandomForestSurrogate"),
            Self::SingleTaskGp => f.write_str("SingleTaskGPSurrogate"),
            Self::MixedSingleTaskGp => f.write_str("MixedSingleTaskGPSurrogate"),
            Self::MlpEnsemble => f.write_str("MLPEnsemble"),
            Self::Custom(name) => f.write_str(name),
        }
    }
}

/// Declared inputs, outputs and preprocessing of one trained model.
///
/// Immutable once built. The single-output rule is enforced when the
/// descriptor joins an [`EnsembleComposer`](crate::EnsembleComposer), not
/// here.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleModelDescriptor<F, P> {
    kind: SurrogateKind,
    input_features: Inputs<F>,
    output_features: Outputs<F>,
    input_preprocessing_specs: BTreeMap<String, P>,
}

impl<F: Feature, P: PreprocessingSpec> SingleModelDescriptor<F, P> {
    /// Creates a descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownPreprocessingKey`] if a spec key is
    /// not one of `input_features`.
    pub fn try_new(
        kind: SurrogateKind,
        input_features: Inputs<F>,
        output_features: Outputs<F>,
        input_preprocessing_specs: BTreeMap<String, P>,
    ) -> Result<Self> {
        if let Some(key) = input_preprocessing_specs
            .keys()
            .find(|key| !input_features.contains_key(key))
        {
            return Err(ValidationError::UnknownPreprocessingKey { key: key.clone() });
        }
        Ok(Self {
            kind,
            input_features,
            output_features,
            input_preprocessing_specs,
        })
    }

    pub fn kind(&self) -> &SurrogateKind {
        &self.kind
    }

    pub fn input_features(&self) -> &Inputs<F> {
        &self.input_features
    }

    pub fn output_features(&self) -> &Outputs<F> {
        &self.output_features
    }

    /// Preprocessing specs by input key, in key order.
    pub fn input_preprocessing_specs(&self) -> &BTreeMap<String, P> {
        &self.input_preprocessing_specs
    }

    /// Returns the preprocessing spec declared for `key`, if any.
    pub fn preprocessing_spec(&self, key: &str) -> Option<&P> {
        self.input_preprocessing_specs.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationErrorKind;
    use crate::test_utils::{features, model_with_specs};

    #[test]
    fn test_spec_keys_must_be_inputs() {
        let specs: BTreeMap<String, &str> = [("f9".to_string(), "one_hot")].into_iter().collect();
        let err = SingleModelDescriptor::try_new(
            SurrogateKind::RandomForest,
            features(&["f1", "f2"]),
            features(&["y"]),
            specs,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::DomainMismatch);
        assert!(err.to_string().contains("`f9`"));
    }

    #[test]
    fn test_accessors() {
        let m = model_with_specs(&["f1", "f2"], &["y"], &[("f2", "one_hot")]);
        assert_eq!(m.kind(), &SurrogateKind::SingleTaskGp);
        assert_eq!(m.input_features().len(), 2);
        assert_eq!(m.output_features().keys().collect::<Vec<_>>(), vec!["y"]);
        assert_eq!(m.preprocessing_spec("f2"), Some(&"one_hot"));
        assert_eq!(m.preprocessing_spec("f1"), None);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(SurrogateKind::MlpEnsemble.to_string(), "MLPEnsemble");
        assert_eq!(SurrogateKind::Custom("Xgb".into()).to_string(), "Xgb");
    }
}
