//! Email classification module
//!
//! Normalizes raw email text and runs it through the injected vectorizer and
//! decision function to produce a phishing/safe verdict.

pub mod normalize;
pub mod pipeline;
pub mod types;

pub use normalize::normalize;
pub use pipeline::EmailClassifier;
pub use types::*;
