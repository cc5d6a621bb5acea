pub mod config;
pub mod contact;
pub mod email;
pub mod error;
pub mod hero;
pub mod observability;
pub mod routes;

pub use routes::AppState;

use std::sync::Arc;

/// Create the app router
///
/// Builds the Axum router with all routes configured. Integration tests
/// pass a recording notifier; the server passes the real email service.
pub fn create_app(config: config::Config, notifier: Arc<dyn contact::Notifier>) -> axum::Router {
    routes::router(AppState { config, notifier })
}
