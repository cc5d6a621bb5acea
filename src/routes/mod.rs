use std::sync::Arc;

use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
};

use crate::contact::Notifier;
use crate::error::NotFoundTemplate;

mod assets;
mod contact;
mod health;
mod home;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub notifier: Arc<dyn Notifier>,
}

async fn fallback() -> impl IntoResponse {
    use askama::Template;

    match NotFoundTemplate.render() {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(err) => {
            tracing::error!("Failed to render 404 page: {err}");
            (StatusCode::NOT_FOUND, "Not found").into_response()
        }
    }
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/", get(home::page))
        .route("/contact", post(contact::action))
        .route("/static/{*path}", get(assets::asset))
        .fallback(fallback)
        .with_state(app_state)
}
