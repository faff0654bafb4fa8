//! Cardinality constraints.

use super::{check_unique, value_of, CandidateValues};
use crate::error::{Result, ValidationError};

/// Bounds how many of `features` may be active (non-zero) at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NChooseKConstraint {
    features: Vec<String>,
    min_count: usize,
    max_count: usize,
    none_also_valid: bool,
}

impl NChooseKConstraint {
    /// Creates a cardinality constraint.
    ///
    /// With `none_also_valid`, zero active features is accepted regardless
    /// of `min_count`.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::DuplicateKey`] if a feature repeats
    /// - [`ValidationError::InvalidCount`] unless
    ///   `min_count <= max_count <= features.len()`
    pub fn try_new(
        features: Vec<String>,
        min_count: usize,
        max_count: usize,
        none_also_valid: bool,
    ) -> Result<Self> {
        check_unique(&features)?;
        if min_count > max_count || max_count > features.len() {
            return Err(ValidationError::InvalidCount {
                min_count,
                max_count,
                features: features.len(),
            });
        }
        Ok(Self {
            features,
            min_count,
            max_count,
            none_also_valid,
        })
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn min_count(&self) -> usize {
        self.min_count
    }

    pub fn max_count(&self) -> usize {
        self.max_count
    }

    pub fn none_also_valid(&self) -> bool {
        self.none_also_valid
    }

    /// Number of features whose magnitude exceeds `tolerance`.
    pub fn active_count<C: CandidateValues + ?Sized>(
        &self,
        candidate: &C,
        tolerance: f64,
    ) -> Result<usize> {
        let mut active = 0;
        for key in &self.features {
            if value_of(candidate, key)?.abs() > tolerance {
                active += 1;
            }
        }
        Ok(active)
    }

    pub fn is_fulfilled<C: CandidateValues + ?Sized>(
        &self,
        candidate: &C,
        tolerance: f64,
    ) -> Result<bool> {
        let active = self.active_count(candidate, tolerance)?;
        Ok((active == 0 && self.none_also_valid)
            || (self.min_count..=self.max_count).contains(&active))
    }
}
