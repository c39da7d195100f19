//! phish-web: browser and JSON front end for the phish-rs classifier
//!
//! Serves the classifier page, a JSON classification endpoint and a health
//! check over axum.

pub mod api;

pub use api::ApiServer;
