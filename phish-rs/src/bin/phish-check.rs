//! CLI tool for classifying a single email
//!
//! # Usage
//!
//! ```bash
//! # Classify text given on the command line
//! phish-check "Your account is locked, verify at http://bank.example"
//!
//! # Classify a saved email
//! phish-check --file suspicious.eml
//!
//! # Read from stdin, print JSON
//! cat suspicious.eml | phish-check --json
//!
//! # Use other artifacts
//! phish-check --vectorizer tfidf.json --classifier logreg.json --file mail.txt
//! ```

use clap::Parser;
use phish_rs::config::{Config, LoggingConfig};
use phish_rs::model::ModelBundle;
use phish_rs::{logging, PhishError};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "phish-check")]
#[command(about = "Classify an email as phishing or safe", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Vectorizer artifact, overrides the configuration
    #[arg(long)]
    vectorizer: Option<String>,

    /// Classifier artifact, overrides the configuration
    #[arg(long)]
    classifier: Option<String>,

    /// Read the email from a file
    #[arg(short, long, conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Email text; stdin is read when neither text nor --file is given
    text: Vec<String>,
}

fn read_input(cli: &Cli) -> std::io::Result<String> {
    if let Some(path) = &cli.file {
        return std::fs::read_to_string(path);
    }

    if !cli.text.is_empty() {
        return Ok(cli.text.join(" "));
    }

    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(path) = &cli.vectorizer {
        config.model.vectorizer_path = path.clone();
    }
    if let Some(path) = &cli.classifier {
        config.model.classifier_path = path.clone();
    }
    config.validate()?;

    // Keep stdout for the verdict
    logging::init(&LoggingConfig {
        level: "warn".to_string(),
        format: config.logging.format.clone(),
    })?;

    let bundle = ModelBundle::load(&config.model)?;
    let classifier = bundle.email_classifier();

    let input = read_input(&cli)?;

    let result = match classifier.classify(&input) {
        Ok(result) => result,
        Err(PhishError::EmptyInput) => {
            eprintln!("Error: {}", PhishError::EmptyInput);
            std::process::exit(2);
        }
        Err(e) => return Err(e.into()),
    };

    if cli.json {
        let probability = bundle.phishing_probability(&result.normalized)?;
        let output = serde_json::json!({
            "label": result.label.as_str(),
            "is_phishing": result.label.is_phishing(),
            "raw_label": result.raw_label,
            "phishing_probability": probability,
            "normalized": result.normalized,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", result.message());
    }

    Ok(())
}
