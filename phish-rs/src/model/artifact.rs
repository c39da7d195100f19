//! Loading the fitted vectorizer and classifier from disk

use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use super::{FeatureTransform, LogisticArtifact, LogisticRegression, TfidfArtifact, TfidfVectorizer};
use crate::classifier::EmailClassifier;
use crate::config::ModelConfig;
use crate::error::{PhishError, Result};

/// The two artifacts the pipeline needs, loaded once and shared read-only
#[derive(Debug, Clone)]
pub struct ModelBundle {
    vectorizer: Arc<TfidfVectorizer>,
    classifier: Arc<LogisticRegression>,
}

impl ModelBundle {
    /// Load and cross-check both artifacts
    pub fn load(config: &ModelConfig) -> Result<Self> {
        let vectorizer_artifact: TfidfArtifact = read_artifact(
            Path::new(&config.vectorizer_path),
            config.vectorizer_sha256.as_deref(),
        )?;
        let vectorizer = TfidfVectorizer::from_artifact(vectorizer_artifact)?;

        let classifier_artifact: LogisticArtifact = read_artifact(
            Path::new(&config.classifier_path),
            config.classifier_sha256.as_deref(),
        )?;
        let classifier = LogisticRegression::from_artifact(classifier_artifact)?;

        let bundle = Self::from_parts(vectorizer, classifier)?;

        info!(
            vectorizer = %config.vectorizer_path,
            classifier = %config.classifier_path,
            dimension = bundle.dimension(),
            "Model artifacts loaded"
        );

        Ok(bundle)
    }

    /// Pair a vectorizer with a classifier of the same dimension
    pub fn from_parts(vectorizer: TfidfVectorizer, classifier: LogisticRegression) -> Result<Self> {
        if vectorizer.dimension() != classifier.dimension() {
            return Err(PhishError::DimensionMismatch {
                expected: classifier.dimension(),
                actual: vectorizer.dimension(),
            });
        }

        Ok(Self {
            vectorizer: Arc::new(vectorizer),
            classifier: Arc::new(classifier),
        })
    }

    /// Feature dimension shared by both artifacts
    pub fn dimension(&self) -> usize {
        self.vectorizer.dimension()
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn classifier(&self) -> &LogisticRegression {
        &self.classifier
    }

    /// Pipeline backed by these artifacts
    pub fn email_classifier(&self) -> EmailClassifier {
        EmailClassifier::new(self.vectorizer.clone(), self.classifier.clone())
    }

    /// Probability of the phishing class for already-normalized text
    pub fn phishing_probability(&self, normalized: &str) -> Result<f64> {
        let features = self.vectorizer.transform(normalized)?;
        self.classifier.phishing_probability(&features)
    }
}

/// Hex-encoded SHA-256 digest
pub fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

fn read_artifact<T: DeserializeOwned>(path: &Path, expected_sha256: Option<&str>) -> Result<T> {
    let bytes = std::fs::read(path).map_err(|e| {
        PhishError::Artifact(format!("Failed to read {}: {}", path.display(), e))
    })?;

    if let Some(expected) = expected_sha256 {
        let actual = sha256_hex(&bytes);
        if !actual.eq_ignore_ascii_case(expected.trim()) {
            return Err(PhishError::ChecksumMismatch {
                path: path.display().to_string(),
                expected: expected.trim().to_string(),
                actual,
            });
        }
        debug!("Checksum verified for {}", path.display());
    }

    serde_json::from_slice(&bytes).map_err(|e| {
        PhishError::Artifact(format!("Failed to parse {}: {}", path.display(), e))
    })
}
