//! Binary logistic regression decision function

use serde::{Deserialize, Serialize};

use super::{DecisionFunction, FeatureVector};
use crate::classifier::types::PHISHING_RAW_LABEL;
use crate::error::{PhishError, Result};

/// Serialized model as exported by the modeling toolchain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticArtifact {
    /// Class labels in training order; the decision value is positive for `classes[1]`
    pub classes: Vec<i64>,
    /// Weight rows; a binary model has exactly one
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

/// Validated binary linear classifier
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    classes: [i64; 2],
    weights: Vec<f64>,
    intercept: f64,
}

impl LogisticRegression {
    pub fn new(classes: [i64; 2], weights: Vec<f64>, intercept: f64) -> Self {
        Self {
            classes,
            weights,
            intercept,
        }
    }

    /// Validate an artifact
    pub fn from_artifact(artifact: LogisticArtifact) -> Result<Self> {
        let classes: [i64; 2] = artifact.classes.as_slice().try_into().map_err(|_| {
            PhishError::Artifact(format!(
                "Classifier must have exactly 2 classes, found {}",
                artifact.classes.len()
            ))
        })?;

        if classes[0] == classes[1] {
            return Err(PhishError::Artifact(format!(
                "Classifier classes must be distinct, found {:?}",
                classes
            )));
        }

        if artifact.coef.len() != 1 {
            return Err(PhishError::Artifact(format!(
                "Binary classifier must have 1 coefficient row, found {}",
                artifact.coef.len()
            )));
        }

        if artifact.intercept.len() != 1 {
            return Err(PhishError::Artifact(format!(
                "Binary classifier must have 1 intercept, found {}",
                artifact.intercept.len()
            )));
        }

        let weights = artifact.coef.into_iter().next().unwrap_or_default();
        if weights.is_empty() {
            return Err(PhishError::Artifact("Classifier has no weights".to_string()));
        }

        let intercept = artifact.intercept[0];
        if !intercept.is_finite() || weights.iter().any(|w| !w.is_finite()) {
            return Err(PhishError::Artifact(
                "Classifier contains non-finite parameters".to_string(),
            ));
        }

        Ok(Self::new(classes, weights, intercept))
    }

    /// Number of input features
    pub fn dimension(&self) -> usize {
        self.weights.len()
    }

    pub fn classes(&self) -> [i64; 2] {
        self.classes
    }

    /// Signed distance to the separating hyperplane; positive favours `classes[1]`
    pub fn decision_value(&self, features: &FeatureVector) -> Result<f64> {
        Ok(features.dot(&self.weights)? + self.intercept)
    }

    /// Probability that the features belong to the phishing class
    pub fn phishing_probability(&self, features: &FeatureVector) -> Result<f64> {
        let positive = sigmoid(self.decision_value(features)?);
        Ok(if self.classes[1] == PHISHING_RAW_LABEL {
            positive
        } else if self.classes[0] == PHISHING_RAW_LABEL {
            1.0 - positive
        } else {
            0.0
        })
    }
}

impl DecisionFunction for LogisticRegression {
    fn decide(&self, features: &FeatureVector) -> Result<i64> {
        let value = self.decision_value(features)?;
        Ok(if value > 0.0 {
            self.classes[1]
        } else {
            self.classes[0]
        })
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> LogisticRegression {
        LogisticRegression::new([0, 1], vec![-2.0, 1.0, 0.5], 0.25)
    }

    #[test]
    fn test_decide_positive_side() {
        let x = FeatureVector::from_entries(3, vec![(1, 1.0)]).unwrap();
        assert_eq!(model().decide(&x).unwrap(), 1);
    }

    #[test]
    fn test_decide_negative_side() {
        let x = FeatureVector::from_entries(3, vec![(0, 1.0)]).unwrap();
        assert_eq!(model().decide(&x).unwrap(), 0);
    }

    #[test]
    fn test_zero_decision_value_picks_first_class() {
        let m = LogisticRegression::new([0, 1], vec![1.0], 0.0);
        assert_eq!(m.decide(&FeatureVector::zeros(1)).unwrap(), 0);
    }

    #[test]
    fn test_intercept_only() {
        let x = FeatureVector::zeros(3);
        assert_eq!(model().decision_value(&x).unwrap(), 0.25);
        assert_eq!(model().decide(&x).unwrap(), 1);
    }

    #[test]
    fn test_phishing_probability() {
        let x = FeatureVector::zeros(3);
        let m = LogisticRegression::new([0, 1], vec![0.0; 3], 0.0);
        assert!((m.phishing_probability(&x).unwrap() - 0.5).abs() < 1e-12);

        let x = FeatureVector::from_entries(3, vec![(0, 5.0)]).unwrap();
        assert!(model().phishing_probability(&x).unwrap() > 0.99);
    }

    #[test]
    fn test_dimension_mismatch_propagates() {
        let x = FeatureVector::zeros(2);
        assert!(matches!(
            model().decide(&x),
            Err(PhishError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_from_artifact() {
        let json = r#"{"classes": [0, 1], "coef": [[0.5, -0.5]], "intercept": [0.1]}"#;
        let artifact: LogisticArtifact = serde_json::from_str(json).unwrap();
        let m = LogisticRegression::from_artifact(artifact).unwrap();
        assert_eq!(m.dimension(), 2);
        assert_eq!(m.classes(), [0, 1]);
    }

    #[test]
    fn test_rejects_multiclass() {
        let artifact = LogisticArtifact {
            classes: vec![0, 1, 2],
            coef: vec![vec![1.0]; 3],
            intercept: vec![0.0; 3],
        };
        assert!(matches!(
            LogisticRegression::from_artifact(artifact),
            Err(PhishError::Artifact(_))
        ));
    }

    #[test]
    fn test_rejects_duplicate_classes() {
        let artifact = LogisticArtifact {
            classes: vec![1, 1],
            coef: vec![vec![1.0]],
            intercept: vec![0.0],
        };
        assert!(LogisticRegression::from_artifact(artifact).is_err());
    }

    #[test]
    fn test_rejects_missing_intercept() {
        let artifact = LogisticArtifact {
            classes: vec![0, 1],
            coef: vec![vec![1.0]],
            intercept: vec![],
        };
        assert!(LogisticRegression::from_artifact(artifact).is_err());
    }

    #[test]
    fn test_rejects_empty_weights() {
        let artifact = LogisticArtifact {
            classes: vec![0, 1],
            coef: vec![vec![]],
            intercept: vec![0.0],
        };
        assert!(LogisticRegression::from_artifact(artifact).is_err());
    }
}
