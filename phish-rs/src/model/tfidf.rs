//! TF-IDF vectorizer applied with fitted vocabulary and idf weights

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use super::{FeatureTransform, FeatureVector};
use crate::error::{PhishError, Result};

/// Default token pattern: words of two or more word characters
pub const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

/// Row normalization applied after tf-idf weighting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    #[default]
    L2,
    L1,
    #[serde(rename = "none")]
    Unnormalized,
}

impl Norm {
    fn apply(&self, entries: &mut [(usize, f64)]) {
        let total = match self {
            Norm::L2 => entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt(),
            Norm::L1 => entries.iter().map(|(_, v)| v.abs()).sum::<f64>(),
            Norm::Unnormalized => return,
        };

        if total > 0.0 {
            for (_, value) in entries.iter_mut() {
                *value /= total;
            }
        }
    }
}

/// Serialized vectorizer as exported by the modeling toolchain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfArtifact {
    /// Term to column index
    pub vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per column
    pub idf: Vec<f64>,
    /// Inclusive word n-gram range
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    /// Use 1 + ln(tf) instead of raw counts
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default)]
    pub norm: Norm,
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,
    #[serde(default)]
    pub stop_words: Vec<String>,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_lowercase() -> bool {
    true
}

fn default_token_pattern() -> String {
    DEFAULT_TOKEN_PATTERN.to_string()
}

/// Validated, ready-to-use vectorizer
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    ngram_range: (usize, usize),
    sublinear_tf: bool,
    norm: Norm,
    lowercase: bool,
    token_pattern: Regex,
    stop_words: HashSet<String>,
}

impl TfidfVectorizer {
    /// Validate an artifact and compile its token pattern
    pub fn from_artifact(artifact: TfidfArtifact) -> Result<Self> {
        if artifact.vocabulary.is_empty() {
            return Err(PhishError::Artifact("Vectorizer vocabulary is empty".to_string()));
        }

        if artifact.idf.len() != artifact.vocabulary.len() {
            return Err(PhishError::Artifact(format!(
                "Vectorizer has {} terms but {} idf weights",
                artifact.vocabulary.len(),
                artifact.idf.len()
            )));
        }

        let mut seen = HashSet::with_capacity(artifact.vocabulary.len());
        for (term, &index) in &artifact.vocabulary {
            if index >= artifact.idf.len() {
                return Err(PhishError::Artifact(format!(
                    "Term '{}' has column {} outside 0..{}",
                    term,
                    index,
                    artifact.idf.len()
                )));
            }
            if !seen.insert(index) {
                return Err(PhishError::Artifact(format!(
                    "Column {} is assigned to more than one term",
                    index
                )));
            }
        }

        if artifact.idf.iter().any(|w| !w.is_finite()) {
            return Err(PhishError::Artifact("Vectorizer idf contains non-finite values".to_string()));
        }

        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(PhishError::Artifact(format!(
                "Invalid ngram_range ({}, {})",
                min_n, max_n
            )));
        }

        let token_pattern = Regex::new(&artifact.token_pattern).map_err(|e| {
            PhishError::Artifact(format!(
                "Invalid token_pattern '{}': {}",
                artifact.token_pattern, e
            ))
        })?;

        Ok(Self {
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            ngram_range: artifact.ngram_range,
            sublinear_tf: artifact.sublinear_tf,
            norm: artifact.norm,
            lowercase: artifact.lowercase,
            token_pattern,
            stop_words: artifact.stop_words.into_iter().collect(),
        })
    }

    /// Number of output columns
    pub fn dimension(&self) -> usize {
        self.idf.len()
    }

    /// Split text into tokens, dropping stop words
    pub fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.token_pattern
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|token| !self.stop_words.contains(*token))
            .collect()
    }

    fn term_counts(&self, tokens: &[&str]) -> HashMap<usize, f64> {
        let (min_n, max_n) = self.ngram_range;
        let mut counts = HashMap::new();

        for n in min_n..=max_n {
            for window in tokens.windows(n) {
                let term = window.join(" ");
                if let Some(&index) = self.vocabulary.get(&term) {
                    *counts.entry(index).or_insert(0.0) += 1.0;
                }
            }
        }

        counts
    }
}

impl FeatureTransform for TfidfVectorizer {
    fn transform(&self, text: &str) -> Result<FeatureVector> {
        let text = if self.lowercase {
            Cow::Owned(text.to_lowercase())
        } else {
            Cow::Borrowed(text)
        };

        let tokens = self.tokenize(&text);
        let mut entries: Vec<(usize, f64)> = self
            .term_counts(&tokens)
            .into_iter()
            .map(|(index, tf)| {
                let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
                (index, tf * self.idf[index])
            })
            .collect();

        self.norm.apply(&mut entries);

        FeatureVector::from_entries(self.dimension(), entries)
    }
}
