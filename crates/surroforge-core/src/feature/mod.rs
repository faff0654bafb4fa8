//! Feature traits and keyed feature collections
//!
//! The core never inspects features or preprocessing specs. It only reads a
//! feature's key and compares values for equality:
//! - `Feature`: descriptor of one input or output variable
//! - `PreprocessingSpec`: transform applied to one input before a model uses it
//! - `Features`: ordered collection with unique keys

mod features;


use std::fmt::Debug;

pub use features::{Features, Inputs, Outputs};

/// Descriptor of one input or output variable.
///
/// Equality defines "same feature": two models agree on an input only if
/// their descriptors for its key compare equal.
///
/// # Example
///
/// ```
/// use surroforge_core::Feature;
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Continuous {
///     key: String,
///     bounds: (f64, f64),
/// }
///
/// impl Feature for Continuous {
///     fn key(&self) -> &str {
///         &self.key
///     }
/// }
///
/// let x = Continuous { key: "x".into(), bounds: (0.0, 1.0) };
/// assert_eq!(x.key(), "x");
/// ```
pub trait Feature: Clone + PartialEq + Debug + Send + Sync {
    /// Returns the unique name of this feature.
    fn key(&self) -> &str;
}

/// Description of how one input feature is transformed for one model.
///
/// Implemented for every cloneable, comparable type.
pub trait PreprocessingSpec: Clone + PartialEq + Debug + Send + Sync {}

impl<T> PreprocessingSpec for T where T: Clone + PartialEq + Debug + Send + Sync {}
