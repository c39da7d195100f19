//! Pre-fitted model artifacts and the capabilities the pipeline consumes.
//!
//! The classification pipeline only sees two traits: [`FeatureTransform`]
//! (text to feature vector) and [`DecisionFunction`] (feature vector to raw
//! class label). The concrete TF-IDF vectorizer and logistic regression
//! implement them; tests substitute stubs.

use crate::error::{PhishError, Result};

pub mod artifact;
pub mod logistic;
pub mod tfidf;

pub use artifact::{sha256_hex, ModelBundle};
pub use logistic::{LogisticArtifact, LogisticRegression};
pub use tfidf::{Norm, TfidfArtifact, TfidfVectorizer};

/// Sparse feature vector of fixed dimension, entries sorted by index
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    dim: usize,
    entries: Vec<(usize, f64)>,
}

impl FeatureVector {
    /// All-zero vector
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            entries: Vec::new(),
        }
    }

    /// Build from (index, value) pairs. Duplicate indices are summed.
    pub fn from_entries(dim: usize, mut entries: Vec<(usize, f64)>) -> Result<Self> {
        if let Some(&(index, _)) = entries.iter().find(|(index, _)| *index >= dim) {
            return Err(PhishError::Inference(format!(
                "Feature index {} out of range for dimension {}",
                index, dim
            )));
        }

        entries.sort_by_key(|(index, _)| *index);

        let mut merged: Vec<(usize, f64)> = Vec::with_capacity(entries.len());
        for (index, value) in entries {
            match merged.last_mut() {
                Some(last) if last.0 == index => last.1 += value,
                _ => merged.push((index, value)),
            }
        }

        Ok(Self {
            dim,
            entries: merged,
        })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Number of stored entries
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Dot product with a dense weight vector of the same dimension
    pub fn dot(&self, weights: &[f64]) -> Result<f64> {
        if weights.len() != self.dim {
            return Err(PhishError::DimensionMismatch {
                expected: weights.len(),
                actual: self.dim,
            });
        }

        Ok(self
            .entries
            .iter()
            .map(|&(index, value)| value * weights[index])
            .sum())
    }

    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.dim];
        for &(index, value) in &self.entries {
            dense[index] = value;
        }
        dense
    }
}

/// Turns normalized text into a feature vector
#[cfg_attr(test, mockall::automock)]
pub trait FeatureTransform: Send + Sync {
    fn transform(&self, text: &str) -> Result<FeatureVector>;
}

/// Reduces a feature vector to a raw class label
#[cfg_attr(test, mockall::automock)]
pub trait DecisionFunction: Send + Sync {
    fn decide(&self, features: &FeatureVector) -> Result<i64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_entries_sorts_and_merges() {
        let v = FeatureVector::from_entries(5, vec![(3, 1.0), (1, 2.0), (3, 0.5)]).unwrap();
        assert_eq!(v.entries(), &[(1, 2.0), (3, 1.5)]);
        assert_eq!(v.nnz(), 2);
        assert_eq!(v.to_dense(), vec![0.0, 2.0, 0.0, 1.5, 0.0]);
    }

    #[test]
    fn test_from_entries_rejects_out_of_range() {
        let err = FeatureVector::from_entries(2, vec![(2, 1.0)]).unwrap_err();
        assert!(matches!(err, PhishError::Inference(_)));
    }

    #[test]
    fn test_dot() {
        let v = FeatureVector::from_entries(3, vec![(0, 2.0), (2, 1.0)]).unwrap();
        assert_eq!(v.dot(&[1.0, 100.0, -3.0]).unwrap(), -1.0);
    }

    #[test]
    fn test_dot_dimension_mismatch() {
        let v = FeatureVector::zeros(3);
        let err = v.dot(&[1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            PhishError::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        ));
    }
}
