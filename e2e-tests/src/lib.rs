//! End-to-end tests for phish-web
//!
//! The tests under `tests/` start the web server on an ephemeral local port
//! with the demo artifacts and drive it over HTTP.
