//! HTML page handlers

use askama_axum::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::api::handlers::AppState;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    page_title: String,
    image_url: String,
    email_content: String,
    warning: String,
    success: String,
    error: String,
}

impl IndexTemplate {
    fn new(state: &AppState, email_content: String) -> Self {
        Self {
            page_title: state.ui.page_title.clone(),
            image_url: state.ui.image_url.clone(),
            email_content,
            warning: String::new(),
            success: String::new(),
            error: String::new(),
        }
    }
}

#[derive(Deserialize)]
pub struct ClassifyForm {
    #[serde(default)]
    email_content: String,
}

// Classifier page (GET)
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    IndexTemplate::new(&state, String::new())
}

// Classify button (POST)
pub async fn classify_form(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ClassifyForm>,
) -> Response {
    let result = state.classifier.classify(&form.email_content);
    let mut page = IndexTemplate::new(&state, form.email_content);

    match result {
        Ok(result) => {
            info!(label = %result.label, "Email classified from form");
            page.success = result.message();
            page.into_response()
        }
        Err(e) if e.is_validation() => {
            warn!("Blank email submitted");
            page.warning = e.to_string();
            page.into_response()
        }
        Err(e) => {
            error!("Classification failed: {}", e);
            page.error = format!("Classification failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, page).into_response()
        }
    }
}
