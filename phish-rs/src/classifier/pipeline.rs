//! Classification pipeline: normalize, vectorize, decide, map to a label

use std::fmt;
use std::sync::Arc;
use tracing::debug;

use super::normalize::normalize;
use super::types::{Classification, Label};
use crate::error::{PhishError, Result};
use crate::model::{DecisionFunction, FeatureTransform};

/// Email classifier over injected, read-only model capabilities.
///
/// Cheap to clone; clones share the same artifacts.
#[derive(Clone)]
pub struct EmailClassifier {
    transform: Arc<dyn FeatureTransform>,
    decision: Arc<dyn DecisionFunction>,
}

impl EmailClassifier {
    pub fn new(transform: Arc<dyn FeatureTransform>, decision: Arc<dyn DecisionFunction>) -> Self {
        Self {
            transform,
            decision,
        }
    }

    /// Classify raw email text
    pub fn classify_email(&self, raw: &str) -> Result<Label> {
        self.classify(raw).map(|result| result.label)
    }

    /// Classify raw email text, keeping the intermediate values
    pub fn classify(&self, raw: &str) -> Result<Classification> {
        if raw.trim().is_empty() {
            return Err(PhishError::EmptyInput);
        }

        let normalized = normalize(raw);
        let features = self.transform.transform(&normalized)?;
        let raw_label = self.decision.decide(&features)?;
        let label = Label::from_raw(raw_label);

        debug!(
            raw_label,
            label = %label,
            normalized_len = normalized.len(),
            features = features.nnz(),
            "Email classified"
        );

        Ok(Classification {
            label,
            raw_label,
            normalized,
        })
    }
}

impl fmt::Debug for EmailClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailClassifier").finish_non_exhaustive()
    }
}
