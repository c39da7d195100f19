//! HTTP module for phish-web
//!
//! Provides the HTML page, the JSON API and the server wiring

pub mod handlers;
pub mod server;
pub mod web;

pub use handlers::AppState;
pub use server::ApiServer;
