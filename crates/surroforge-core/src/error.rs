//! Error types for SurroForge

use thiserror::Error;

/// Classification of a validation failure.
///
/// Every [`ValidationError`] maps to exactly one kind, so callers can branch
/// on the failure class without matching individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// Parallel sequences differ in length.
    ArityMismatch,
    /// A key that must be unique appears more than once.
    DuplicateIdentifier,
    /// A count is outside its permitted range.
    CardinalityViolation,
    /// The same key resolves to unequal features or preprocessing specs.
    FeatureInconsistency,
    /// A model or constraint does not fit the supplied problem domain.
    DomainMismatch,
    /// A domain input is referenced by no model.
    UnusedInput,
    /// A scalar field is outside its domain (non-finite, bad sign, empty).
    InvalidValue,
}

/// Main error type for SurroForge validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Features and their per-feature values differ in length.
    #[error("{constraint}: {features} features but {values} {values_name}")]
    ArityMismatch {
        constraint: &'static str,
        values_name: &'static str,
        features: usize,
        values: usize,
    },

    /// A keyed collection contains the same key twice.
    #[error("Duplicate key `{key}` in {scope}")]
    DuplicateKey { scope: &'static str, key: String },

    /// Two models of an ensemble predict the same output.
    #[error("Output feature keys are not unique across models: `{key}` is declared by model {first} and model {second}")]
    DuplicateOutput {
        key: String,
        first: usize,
        second: usize,
    },

    /// A model does not declare exactly one output.
    #[error("Only single output models allowed: model {model} declares {count} outputs")]
    OutputCount { model: usize, count: usize },

    /// NChooseK bounds are out of `[0, n]` or inverted.
    #[error("Invalid NChooseK counts: min_count {min_count}, max_count {max_count} for {features} features")]
    InvalidCount {
        min_count: usize,
        max_count: usize,
        features: usize,
    },

    /// Interpoint multiplicity below the smallest meaningful group size.
    #[error("Interpoint constraint on `{feature}` needs multiplicity >= 2, got {multiplicity}")]
    InvalidMultiplicity { feature: String, multiplicity: usize },

    /// Two models declare unequal features under one key.
    #[error("Features with key `{key}` are incompatible between model {first} and model {other}")]
    IncompatibleFeature {
        key: String,
        first: usize,
        other: usize,
    },

    /// Two models declare unequal preprocessing specs under one key.
    #[error("Preprocessing steps for feature `{key}` are incompatible between model {first} and model {other}")]
    IncompatiblePreprocessing {
        key: String,
        first: usize,
        other: usize,
    },

    /// A preprocessing spec names a key that is not one of the model's inputs.
    #[error("Preprocessing spec for `{key}` has no matching input feature")]
    UnknownPreprocessingKey { key: String },

    /// Ensemble outputs and domain outputs differ as sets.
    #[error("Output features do not match: missing {missing:?}, unexpected {unexpected:?}")]
    OutputMismatch {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    /// A model has more inputs than the whole domain.
    #[error("Model with index {model} has more features than acceptable: {count} > {available}")]
    TooManyInputs {
        model: usize,
        count: usize,
        available: usize,
    },

    /// A model input key is absent from the domain.
    #[error("Feature `{key}` of model {model} not found in domain inputs")]
    UnknownInput { model: usize, key: String },

    /// A model input differs from the domain's feature with the same key.
    #[error("Feature `{key}` of model {model} is incompatible with the domain input")]
    InputMismatch { model: usize, key: String },

    /// A constraint references a key absent from the domain.
    #[error("Constraint {constraint} references unknown feature `{key}`")]
    UnknownConstraintFeature { constraint: usize, key: String },

    /// A candidate point has no value for a referenced key.
    #[error("Candidate has no value for feature `{key}`")]
    MissingValue { key: String },

    /// Domain inputs referenced by no model.
    #[error("Unused features are present: {keys:?}")]
    UnusedInputs { keys: Vec<String> },

    /// A numeric field is NaN or infinite.
    #[error("{constraint}: {field} must be finite")]
    NonFinite {
        constraint: &'static str,
        field: &'static str,
    },

    /// A product sign other than -1 or +1.
    #[error("Sign must be -1 or 1, got {0}")]
    InvalidSign(i64),

    /// A constraint without any feature.
    #[error("{constraint}: features must not be empty")]
    EmptyFeatures { constraint: &'static str },

    /// A required or supplied symbolic expression is blank.
    #[error("{constraint}: {field} must not be empty")]
    EmptyExpression {
        constraint: &'static str,
        field: &'static str,
    },
}

impl ValidationError {
    /// Returns the failure class of this error.
    pub fn kind(&self) -> ValidationErrorKind {
        use ValidationErrorKind as K;
        match self {
            Self::ArityMismatch { .. } => K::ArityMismatch,
            Self::DuplicateKey { .. } | Self::DuplicateOutput { .. } => K::DuplicateIdentifier,
            Self::OutputCount { .. }
            | Self::InvalidCount { .. }
            | Self::InvalidMultiplicity { .. } => K::CardinalityViolation,
            Self::IncompatibleFeature { .. } | Self::IncompatiblePreprocessing { .. } => {
                K::FeatureInconsistency
            }
            Self::UnknownPreprocessingKey { .. }
            | Self::OutputMismatch { .. }
            | Self::TooManyInputs { .. }
            | Self::UnknownInput { .. }
            | Self::InputMismatch { .. }
            | Self::UnknownConstraintFeature { .. }
            | Self::MissingValue { .. } => K::DomainMismatch,
            Self::UnusedInputs { .. } => K::UnusedInput,
            Self::NonFinite { .. }
            | Self::InvalidSign(_)
            | Self::EmptyFeatures { .. }
            | Self::EmptyExpression { .. } => K::InvalidValue,
        }
    }
}

/// Result type alias for SurroForge operations
pub type Result<T> = std::result::Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        let err = ValidationError::InvalidMultiplicity {
            feature: "f1".into(),
            multiplicity: 1,
        };
        assert_eq!(err.kind(), ValidationErrorKind::CardinalityViolation);

        let err = ValidationError::UnusedInputs {
            keys: vec!["f4".into()],
        };
        assert_eq!(err.kind(), ValidationErrorKind::UnusedInput);
        assert_eq!(ValidationError::InvalidSign(2).kind(), ValidationErrorKind::InvalidValue);
    }

    #[test]
    fn test_message_names_offenders() {
        let err = ValidationError::DuplicateOutput {
            key: "y1".into(),
            first: 0,
            second: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("`y1`"));
        assert!(msg.contains("model 0"));
        assert!(msg.contains("model 2"));

        let err = ValidationError::ArityMismatch {
            constraint: "LinearEqualityConstraint",
            values_name: "coefficients",
            features: 3,
            values: 2,
        };
        assert_eq!(
            err.to_string(),
            "LinearEqualityConstraint: 3 features but 2 coefficients"
        );
    }
}
