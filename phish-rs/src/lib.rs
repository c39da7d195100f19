//! phish-rs: email phishing classifier
//!
//! Cleans pasted email text and runs it through a pre-fitted TF-IDF
//! vectorizer and logistic regression to decide between "Phishing Mail"
//! and "Safe Mail".
//!
//! # Features
//!
//! - **Normalization**: URL, punctuation and case stripping, whitespace collapsing
//! - **Artifacts**: JSON vectorizer/classifier exports, validated and checksummed at load
//! - **Pipeline**: injected capabilities so any vectorizer or model can be plugged in
//!
//! # Example
//!
//! ```no_run
//! use phish_rs::config::Config;
//! use phish_rs::model::ModelBundle;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let bundle = ModelBundle::load(&config.model)?;
//!     let classifier = bundle.email_classifier();
//!
//!     let label = classifier.classify_email("Verify your account at http://bank.example now!")?;
//!     println!("The email has been classified as: {}", label);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`classifier`]: normalization and the classification pipeline
//! - [`model`]: vectorizer and classifier artifacts
//! - [`config`]: configuration management
//! - [`error`]: error types
//! - [`logging`]: tracing subscriber setup

pub mod classifier;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;

// Re-export commonly used types
pub use classifier::{normalize, Classification, EmailClassifier, Label};
pub use config::Config;
pub use error::{PhishError, Result};
pub use model::ModelBundle;
