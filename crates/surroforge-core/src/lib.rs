//! SurroForge Core - Validation types for composite predictive models
//!
//! This crate provides the building blocks for checking, at composition time,
//! that independently trained single-output models can be merged into one
//! multi-output ensemble, and that declarative constraints over decision
//! variables are structurally sound:
//! - Feature traits and keyed feature collections
//! - Single model descriptors
//! - The ensemble composer and its domain compatibility check
//! - Constraint descriptors validated at construction

pub mod constraint;
pub mod ensemble;
pub mod error;
pub mod feature;
pub mod model;

#[cfg(test)]
mod test_utils;

pub use constraint::{
    CandidateValues, Constraint, Constraints, InterpointEqualityConstraint, LinearConstraint,
    NChooseKConstraint, NonlinearConstraint, ProductConstraint, Sign,
};
pub use ensemble::EnsembleComposer;
pub use error::{Result, ValidationError, ValidationErrorKind};
pub use feature::{Feature, Features, Inputs, Outputs, PreprocessingSpec};
pub use model::{SingleModelDescriptor, SurrogateKind};
