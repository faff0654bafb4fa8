//! SurroForge - Composition-time validation for surrogate ensembles
//!
//! Checks that independently trained single-output models can be merged
//! into one multi-output ensemble, and that constraint descriptors over
//! decision variables are structurally sound, before any numerical work
//! starts.
//!
//! # Example
//!
//! ```rust
//! use surroforge::prelude::*;
//!
//! let cap = Constraint::n_choose_k(
//!     vec!["x1".into(), "x2".into(), "x3".into()],
//!     1,
//!     1,
//!     false,
//! )
//! .unwrap();
//! assert_eq!(cap.type_name(), "NChooseKConstraint");
//!
//! let err = Constraint::interpoint_equality("x1", Some(1)).unwrap_err();
//! assert_eq!(err.kind(), ValidationErrorKind::CardinalityViolation);
//! ```

// Ensemble composition
pub use surroforge_core::{
    EnsembleComposer, Feature, Features, Inputs, Outputs, PreprocessingSpec,
    SingleModelDescriptor, SurrogateKind,
};

// Constraint descriptors
pub use surroforge_core::constraint;
pub use surroforge_core::{CandidateValues, Constraint, Constraints, Sign};

// Errors
pub use surroforge_core::{Result, ValidationError, ValidationErrorKind};

// Configuration
pub use surroforge_config::{ConfigError, ConstraintConfig, ProblemConfig, ValidationConfig};

#[cfg(feature = "console")]
pub mod console;

mod problem;
pub use problem::Problem;

pub mod prelude {
    pub use super::{
        Constraint, Constraints, EnsembleComposer, Feature, Features, Inputs, Outputs, Problem,
        ProblemConfig, SingleModelDescriptor, SurrogateKind, ValidationError,
        ValidationErrorKind,
    };
}
