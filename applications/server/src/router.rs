/// HTTP router
use crate::{api, state::AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the application router with CORS and request tracing
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health::health))
        .route(
            "/books",
            post(api::books::create_book).get(api::books::list_books),
        )
        .route(
            "/books/:id",
            get(api::books::get_book)
                .put(api::books::replace_book)
                .patch(api::books::update_book)
                .delete(api::books::delete_book),
        )
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
