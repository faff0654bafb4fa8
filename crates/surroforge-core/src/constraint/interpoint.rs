//! Interpoint constraints.

use crate::error::{Result, ValidationError};

/// Smallest group size that relates distinct points.
const MIN_MULTIPLICITY: usize = 2;

/// Forces one feature to take the same value across groups of points in a
/// batch.
///
/// A batch is split into consecutive groups of `multiplicity` points; without
/// a multiplicity the whole batch is one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpointEqualityConstraint {
    feature: String,
    multiplicity: Option<usize>,
}

impl InterpointEqualityConstraint {
    /// Creates an interpoint equality constraint.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidMultiplicity`] if `multiplicity` is
    /// below 2.
    pub fn try_new(feature: impl Into<String>, multiplicity: Option<usize>) -> Result<Self> {
        let feature = feature.into();
        if let Some(m) = multiplicity {
            if m < MIN_MULTIPLICITY {
                return Err(ValidationError::InvalidMultiplicity {
                    feature,
                    multiplicity: m,
                });
            }
        }
        Ok(Self {
            feature,
            multiplicity,
        })
    }

    pub fn feature(&self) -> &str {
        &self.feature
    }

    pub(crate) fn feature_key(&self) -> &String {
        &self.feature
    }

    pub fn multiplicity(&self) -> Option<usize> {
        self.multiplicity
    }

    /// Checks a batch of values of the constrained feature, one per point.
    ///
    /// The last group may be shorter than `multiplicity`.
    pub fn is_fulfilled_batch(&self, values: &[f64], tolerance: f64) -> bool {
        if values.is_empty() {
            return true;
        }
        let group = self.multiplicity.unwrap_or(values.len());
        values.chunks(group).all(|chunk| {
            let first = chunk[0];
            chunk.iter().all(|v| (v - first).abs() <= tolerance)
        })
    }
}
