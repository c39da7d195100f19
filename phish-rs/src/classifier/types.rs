//! Classification types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw model output that means "phishing".
///
/// The training data encoded phishing mails as class 0; every other value is safe.
pub const PHISHING_RAW_LABEL: i64 = 0;

/// Final verdict for an email
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Phishing,
    Safe,
}

impl Label {
    /// Map a raw classifier output onto a label
    pub fn from_raw(raw: i64) -> Self {
        if raw == PHISHING_RAW_LABEL {
            Label::Phishing
        } else {
            Label::Safe
        }
    }

    /// Human-readable name shown to users
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Phishing => "Phishing Mail",
            Label::Safe => "Safe Mail",
        }
    }

    pub fn is_phishing(&self) -> bool {
        matches!(self, Label::Phishing)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one classification call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: Label,
    /// Value returned by the decision function before mapping
    pub raw_label: i64,
    /// Text after normalization, as fed to the vectorizer
    pub normalized: String,
}

impl Classification {
    /// Message shown after a successful submission
    pub fn message(&self) -> String {
        format!("The email has been classified as: {}", self.label)
    }
}
