//! Ordered feature collection with unique keys.

use std::collections::HashSet;
use std::slice;

use super::Feature;
use crate::error::{Result, ValidationError};

/// Ordered set of features, unique by key.
#[derive(Debug, Clone, PartialEq)]
pub struct Features<F> {
    features: Vec<F>,
}

/// Input features of a model or domain.
pub type Inputs<F> = Features<F>;

/// Output features of a model or domain.
pub type Outputs<F> = Features<F>;

impl<F: Feature> Features<F> {
    /// Creates a collection, rejecting duplicate keys.
    ///
    /// # Example
    ///
    /// ```
    /// use surroforge_core::{Feature, Features, ValidationErrorKind};
    ///
    /// #[derive(Debug, Clone, PartialEq)]
    /// struct Named(&'static str);
    ///
    /// impl Feature for Named {
    ///     fn key(&self) -> &str { self.0 }
    /// }
    ///
    /// let ok = Features::try_new(vec![Named("a"), Named("b")]).unwrap();
    /// assert_eq!(ok.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    ///
    /// let err = Features::try_new(vec![Named("a"), Named("a")]).unwrap_err();
    /// assert_eq!(err.kind(), ValidationErrorKind::DuplicateIdentifier);
    /// ```
    pub fn try_new(features: Vec<F>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(features.len());
        for feature in &features {
            if !seen.insert(feature.key()) {
                return Err(ValidationError::DuplicateKey {
                    scope: "features",
                    key: feature.key().to_string(),
                });
            }
        }
        Ok(Self { features })
    }

    /// Returns the feature with the given key.
    pub fn get_by_key(&self, key: &str) -> Option<&F> {
        self.features.iter().find(|f| f.key() == key)
    }

    /// Returns true if a feature with the given key exists.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get_by_key(key).is_some()
    }

    /// Returns the index of the feature with the given key.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.features.iter().position(|f| f.key() == key)
    }

    /// Iterates over keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(Feature::key)
    }
}

impl<F> Features<F> {
    /// Creates an empty collection.
    pub fn empty() -> Self {
        Self {
            features: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, F> {
        self.features.iter()
    }

    pub fn as_slice(&self) -> &[F] {
        &self.features
    }
}

impl<F> Default for Features<F> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a, F> IntoIterator for &'a Features<F> {
    type Item = &'a F;
    type IntoIter = slice::Iter<'a, F>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}
