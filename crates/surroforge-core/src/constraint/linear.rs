//! Linear constraints.

use super::{check_finite, check_unique, value_of, CandidateValues};
use crate::error::{Result, ValidationError};

const NAME: &str = "LinearConstraint";

/// `Σ coefficients[i] · features[i]` compared against `rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    features: Vec<String>,
    coefficients: Vec<f64>,
    rhs: f64,
}

impl LinearConstraint {
    /// Creates a linear constraint.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::ArityMismatch`] if the lengths differ
    /// - [`ValidationError::DuplicateKey`] if a feature repeats
    /// - [`ValidationError::NonFinite`] for NaN or infinite numbers
    pub fn try_new(features: Vec<String>, coefficients: Vec<f64>, rhs: f64) -> Result<Self> {
        if features.len() != coefficients.len() {
            return Err(ValidationError::ArityMismatch {
                constraint: NAME,
                values_name: "coefficients",
                features: features.len(),
                values: coefficients.len(),
            });
        }
        check_unique(&features)?;
        check_finite(NAME, "coefficients", &coefficients)?;
        check_finite(NAME, "rhs", &[rhs])?;
        Ok(Self {
            features,
            coefficients,
            rhs,
        })
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    /// Left-hand side evaluated at `candidate`.
    pub fn lhs<C: CandidateValues + ?Sized>(&self, candidate: &C) -> Result<f64> {
        self.features
            .iter()
            .zip(&self.coefficients)
            .try_fold(0.0, |acc, (key, c)| {
                Ok::<_, ValidationError>(acc + c * value_of(candidate, key)?)
            })
    }
}
