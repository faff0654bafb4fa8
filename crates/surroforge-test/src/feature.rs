//! Feature fixtures.
//!
//! # Example
//!
//! ```
//! use surroforge_core::Feature;
//! use surroforge_test::feature::{categorical, continuous};
//!
//! let x = continuous("x", 0.0, 1.0);
//! let c = categorical("solvent", &["water", "ethanol"]);
//! assert_eq!(x.key(), "x");
//! assert_ne!(x, continuous("x", 0.0, 2.0));
//! assert_eq!(c.key(), "solvent");
//! ```

use surroforge_core::{Feature, Features};

/// A feature as a domain description layer would supply it.
#[derive(Clone, Debug, PartialEq)]
pub enum TestFeature {
    /// Bounded real-valued input.
    Continuous { key: String, lower: f64, upper: f64 },
    /// Input taking one of a fixed list of categories.
    Categorical { key: String, categories: Vec<String> },
    /// Real-valued model output.
    Output { key: String },
}

impl Feature for TestFeature {
    fn key(&self) -> &str {
        match self {
            Self::Continuous { key, .. } | Self::Categorical { key, .. } | Self::Output { key } => {
                key
            }
        }
    }
}

/// Creates a continuous input on `[lower, upper]`.
pub fn continuous(key: &str, lower: f64, upper: f64) -> TestFeature {
    TestFeature::Continuous {
        key: key.to_string(),
        lower,
        upper,
    }
}

/// Creates a categorical input.
pub fn categorical(key: &str, categories: &[&str]) -> TestFeature {
    TestFeature::Categorical {
        key: key.to_string(),
        categories: categories.iter().map(|c| c.to_string()).collect(),
    }
}

/// Creates an output feature.
pub fn output(key: &str) -> TestFeature {
    TestFeature::Output {
        key: key.to_string(),
    }
}

/// Continuous inputs on `[0, 1]` with the given keys.
///
/// # Panics
///
/// Panics if a key repeats.
pub fn unit_inputs(keys: &[&str]) -> Features<TestFeature> {
    Features::try_new(keys.iter().map(|k| continuous(k, 0.0, 1.0)).collect())
        .expect("fixture keys must be unique")
}

/// Output features with the given keys.
///
/// # Panics
///
/// Panics if a key repeats.
pub fn outputs(keys: &[&str]) -> Features<TestFeature> {
    Features::try_new(keys.iter().map(|k| output(k)).collect())
        .expect("fixture keys must be unique")
}
