//! Route definitions for the link shortener
//!
//! Maps the two HTTP entry points to their handlers and injects the shared state.

use axum::middleware;
use axum::routing::any;
use axum::Router;

use crate::handler::{redirect_link, shorten_link};
use crate::middleware::cors_middleware;
use crate::registry::AppState;

/// Creates the application router
///
/// # Route Definitions
///
/// - `/shorten` (any method) - Shortens a URL; wrapped in the CORS middleware,
///   which answers `OPTIONS` itself
/// - anything else - Treated as a short code and redirected
///
/// # Example Usage
///
/// ```no_run
/// # use shortlink::registry::{AppState, LinkRegistry};
/// # use shortlink::route::create_app;
/// let state = AppState::new(LinkRegistry::new(), "https://fer.link/");
/// let app = create_app(state);
/// // axum::serve(listener, app).await.unwrap();
/// ```
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route(
            "/shorten",
            any(shorten_link).layer(middleware::from_fn(cors_middleware)),
        )
        // Any other path is a short code, including `/` (the empty code)
        .fallback(redirect_link)
        .with_state(state)
}
