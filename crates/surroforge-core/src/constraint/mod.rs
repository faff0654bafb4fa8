//! Constraint descriptors over named decision variables.
//!
//! Each payload type validates its structural invariants in `try_new` and is
//! immutable afterwards:
//! - `LinearConstraint`: `Σ cᵢ·xᵢ` against a right-hand side
//! - `ProductConstraint`: `sign · Π xᵢ^eᵢ` against a right-hand side
//! - `NonlinearConstraint`: opaque symbolic expression over features
//! - `NChooseKConstraint`: how many features of a group may be active
//! - `InterpointEqualityConstraint`: one feature equal across grouped points
//!
//! [`Constraint`] is the closed set of variants built from these payloads.

mod interpoint;
mod linear;
mod nchoosek;
mod nonlinear;
mod product;

#[cfg(test)]
mod tests;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::BuildHasher;
use std::slice;

use tracing::debug;

use crate::error::{Result, ValidationError};
use crate::feature::{Feature, Inputs};

pub use interpoint::InterpointEqualityConstraint;
pub use linear::LinearConstraint;
pub use nchoosek::NChooseKConstraint;
pub use nonlinear::NonlinearConstraint;
pub use product::{ProductConstraint, Sign};

/// Lookup of feature values for one candidate point.
pub trait CandidateValues {
    /// Returns the value of `key`, if the candidate has one.
    fn value(&self, key: &str) -> Option<f64>;
}

impl<S: BuildHasher> CandidateValues for HashMap<String, f64, S> {
    fn value(&self, key: &str) -> Option<f64> {
        self.get(key).copied()
    }
}

impl CandidateValues for BTreeMap<String, f64> {
    fn value(&self, key: &str) -> Option<f64> {
        self.get(key).copied()
    }
}

/// A validated constraint.
///
/// # Example
///
/// ```
/// use surroforge_core::{Constraint, ValidationErrorKind};
///
/// let sum = Constraint::linear_equality(
///     vec!["x1".into(), "x2".into()],
///     vec![1.0, 1.0],
///     1.0,
/// )
/// .unwrap();
/// assert_eq!(sum.type_name(), "LinearEqualityConstraint");
///
/// let err = Constraint::interpoint_equality("x1", Some(1)).unwrap_err();
/// assert_eq!(err.kind(), ValidationErrorKind::CardinalityViolation);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    LinearEquality(LinearConstraint),
    LinearInequality(LinearConstraint),
    ProductEquality(ProductConstraint),
    ProductInequality(ProductConstraint),
    NonlinearEquality(NonlinearConstraint),
    NonlinearInequality(NonlinearConstraint),
    NChooseK(NChooseKConstraint),
    InterpointEquality(InterpointEqualityConstraint),
}

impl Constraint {
    /// `Σ coefficients·features = rhs`.
    pub fn linear_equality(features: Vec<String>, coefficients: Vec<f64>, rhs: f64) -> Result<Self> {
        LinearConstraint::try_new(features, coefficients, rhs).map(Self::LinearEquality)
    }

    /// `Σ coefficients·features <= rhs`.
    pub fn linear_inequality(
        features: Vec<String>,
        coefficients: Vec<f64>,
        rhs: f64,
    ) -> Result<Self> {
        LinearConstraint::try_new(features, coefficients, rhs).map(Self::LinearInequality)
    }

    /// `sign · Π features^exponents = rhs`.
    pub fn product_equality(
        features: Vec<String>,
        exponents: Vec<f64>,
        rhs: f64,
        sign: Sign,
    ) -> Result<Self> {
        ProductConstraint::try_new(features, exponents, rhs, sign).map(Self::ProductEquality)
    }

    /// `sign · Π features^exponents <= rhs`.
    pub fn product_inequality(
        features: Vec<String>,
        exponents: Vec<f64>,
        rhs: f64,
        sign: Sign,
    ) -> Result<Self> {
        ProductConstraint::try_new(features, exponents, rhs, sign).map(Self::ProductInequality)
    }

    pub fn nonlinear_equality(
        expression: impl Into<String>,
        features: Vec<String>,
        jacobian_expression: Option<String>,
        hessian_expression: Option<String>,
    ) -> Result<Self> {
        NonlinearConstraint::try_new(expression, features, jacobian_expression, hessian_expression)
            .map(Self::NonlinearEquality)
    }

    pub fn nonlinear_inequality(
        expression: impl Into<String>,
        features: Vec<String>,
        jacobian_expression: Option<String>,
        hessian_expression: Option<String>,
    ) -> Result<Self> {
        NonlinearConstraint::try_new(expression, features, jacobian_expression, hessian_expression)
            .map(Self::NonlinearInequality)
    }

    pub fn n_choose_k(
        features: Vec<String>,
        min_count: usize,
        max_count: usize,
        none_also_valid: bool,
    ) -> Result<Self> {
        NChooseKConstraint::try_new(features, min_count, max_count, none_also_valid)
            .map(Self::NChooseK)
    }

    pub fn interpoint_equality(
        feature: impl Into<String>,
        multiplicity: Option<usize>,
    ) -> Result<Self> {
        InterpointEqualityConstraint::try_new(feature, multiplicity).map(Self::InterpointEquality)
    }

    /// Keys of the features this constraint refers to.
    pub fn features(&self) -> &[String] {
        match self {
            Self::LinearEquality(c) | Self::LinearInequality(c) => c.features(),
            Self::ProductEquality(c) | Self::ProductInequality(c) => c.features(),
            Self::NonlinearEquality(c) | Self::NonlinearInequality(c) => c.features(),
            Self::NChooseK(c) => c.features(),
            Self::InterpointEquality(c) => slice::from_ref(c.feature_key()),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::LinearEquality(_) => "LinearEqualityConstraint",
            Self::LinearInequality(_) => "LinearInequalityConstraint",
            Self::ProductEquality(_) => "ProductEqualityConstraint",
            Self::ProductInequality(_) => "ProductInequalityConstraint",
            Self::NonlinearEquality(_) => "NonlinearEqualityConstraint",
            Self::NonlinearInequality(_) => "NonlinearInequalityConstraint",
            Self::NChooseK(_) => "NChooseKConstraint",
            Self::InterpointEquality(_) => "InterpointEqualityConstraint",
        }
    }

    /// Returns true for the equality variants.
    pub fn is_equality(&self) -> bool {
        matches!(
            self,
            Self::LinearEquality(_)
                | Self::ProductEquality(_)
                | Self::NonlinearEquality(_)
                | Self::InterpointEquality(_)
        )
    }

    /// Judges a single candidate point.
    ///
    /// Returns `Ok(None)` for constraints that one point cannot decide:
    /// nonlinear expressions need an external evaluator and interpoint
    /// constraints need a batch.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingValue`] if the candidate lacks a
    /// referenced feature.
    pub fn is_fulfilled<C>(&self, candidate: &C, tolerance: f64) -> Result<Option<bool>>
    where
        C: CandidateValues + ?Sized,
    {
        let fulfilled = match self {
            Self::LinearEquality(c) => (c.lhs(candidate)? - c.rhs()).abs() <= tolerance,
            Self::LinearInequality(c) => c.lhs(candidate)? <= c.rhs() + tolerance,
            Self::ProductEquality(c) => (c.lhs(candidate)? - c.rhs()).abs() <= tolerance,
            Self::ProductInequality(c) => c.lhs(candidate)? <= c.rhs() + tolerance,
            Self::NChooseK(c) => c.is_fulfilled(candidate, tolerance)?,
            Self::NonlinearEquality(_)
            | Self::NonlinearInequality(_)
            | Self::InterpointEquality(_) => return Ok(None),
        };
        Ok(Some(fulfilled))
    }
}

/// Ordered collection of constraints belonging to one problem.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constraints {
    constraints: Vec<Constraint>,
}

impl Constraints {
    pub fn new(constraints: Vec<Constraint>) -> Self {
        Self { constraints }
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Constraint> {
        self.constraints.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, Constraint> {
        self.constraints.iter()
    }

    /// Checks that every referenced feature exists in the domain inputs.
    pub fn check_against<F: Feature>(&self, inputs: &Inputs<F>) -> Result<()> {
        for (index, constraint) in self.constraints.iter().enumerate() {
            if let Some(key) = constraint.features().iter().find(|k| !inputs.contains_key(k)) {
                debug!(
                    event = "constraints_rejected",
                    constraint = index as u64,
                    kind = constraint.type_name(),
                    key = %key,
                );
                return Err(ValidationError::UnknownConstraintFeature {
                    constraint: index,
                    key: key.clone(),
                });
            }
        }
        debug!(
            event = "constraints_checked",
            constraints = self.constraints.len() as u64,
        );
        Ok(())
    }

    /// Returns true if every constraint a single point can decide holds.
    pub fn is_fulfilled<C>(&self, candidate: &C, tolerance: f64) -> Result<bool>
    where
        C: CandidateValues + ?Sized,
    {
        for constraint in &self.constraints {
            if constraint.is_fulfilled(candidate, tolerance)? == Some(false) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl From<Vec<Constraint>> for Constraints {
    fn from(constraints: Vec<Constraint>) -> Self {
        Self::new(constraints)
    }
}

impl<'a> IntoIterator for &'a Constraints {
    type Item = &'a Constraint;
    type IntoIter = slice::Iter<'a, Constraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.constraints.iter()
    }
}

/// Rejects repeated keys in a constraint's feature list.
fn check_unique(features: &[String]) -> Result<()> {
    let mut seen = HashSet::with_capacity(features.len());
    for key in features {
        if !seen.insert(key.as_str()) {
            return Err(ValidationError::DuplicateKey {
                scope: "constraint features",
                key: key.clone(),
            });
        }
    }
    Ok(())
}

fn check_finite(constraint: &'static str, field: &'static str, values: &[f64]) -> Result<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ValidationError::NonFinite { constraint, field })
    }
}

fn value_of<C: CandidateValues + ?Sized>(candidate: &C, key: &str) -> Result<f64> {
    candidate
        .value(key)
        .ok_or_else(|| ValidationError::MissingValue {
            key: key.to_string(),
        })
}
