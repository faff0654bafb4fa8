//! Product constraints.

use super::{check_finite, check_unique, value_of, CandidateValues};
use crate::error::{Result, ValidationError};

const NAME: &str = "ProductConstraint";

/// Direction of a product constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Sign {
    #[default]
    Positive,
    /// Flips the inequality: `-Π xᵢ^eᵢ <= rhs`.
    Negative,
}

impl Sign {
    pub fn factor(self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }
}

impl TryFrom<i64> for Sign {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            1 => Ok(Self::Positive),
            -1 => Ok(Self::Negative),
            other => Err(ValidationError::InvalidSign(other)),
        }
    }
}

impl From<Sign> for i64 {
    fn from(sign: Sign) -> Self {
        match sign {
            Sign::Positive => 1,
            Sign::Negative => -1,
        }
    }
}

/// `sign · Π features[i]^exponents[i]` compared against `rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductConstraint {
    features: Vec<String>,
    exponents: Vec<f64>,
    rhs: f64,
    sign: Sign,
}

impl ProductConstraint {
    /// Creates a product constraint.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::ArityMismatch`] if the lengths differ
    /// - [`ValidationError::DuplicateKey`] if a feature repeats
    /// - [`ValidationError::NonFinite`] for NaN or infinite numbers
    pub fn try_new(features: Vec<String>, exponents: Vec<f64>, rhs: f64, sign: Sign) -> Result<Self> {
        if features.len() != exponents.len() {
            return Err(ValidationError::ArityMismatch {
                constraint: NAME,
                values_name: "exponents",
                features: features.len(),
                values: exponents.len(),
            });
        }
        check_unique(&features)?;
        check_finite(NAME, "exponents", &exponents)?;
        check_finite(NAME, "rhs", &[rhs])?;
        Ok(Self {
            features,
            exponents,
            rhs,
            sign,
        })
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn exponents(&self) -> &[f64] {
        &self.exponents
    }

    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// Signed product evaluated at `candidate`.
    pub fn lhs<C: CandidateValues + ?Sized>(&self, candidate: &C) -> Result<f64> {
        let product = self
            .features
            .iter()
            .zip(&self.exponents)
            .try_fold(1.0, |acc, (key, e)| {
                Ok::<_, ValidationError>(acc * value_of(candidate, key)?.powf(*e))
            })?;
        Ok(self.sign.factor() * product)
    }
}
