pub mod auth;
pub mod generate;
pub mod json;
pub mod media;
pub mod pages;
pub mod site;
pub mod templates;

use crate::AppState;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Composes every feature router onto one app.
pub fn app_router(state: AppState) -> Router {
    // api router, where features are composed
    let api_router = Router::new()
        .nest("/pages", pages::pages_router())
        .nest("/media", media::media_api_router())
        .nest("/templates", templates::templates_router())
        .nest("/generate", generate::generate_router());

    Router::new()
        .nest("/api", api_router)
        .nest("/media", media::media_router())
        .merge(site::site_router())
        .fallback(site::not_found_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
