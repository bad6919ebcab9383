use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method, StatusCode},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        contact::{create_message, delete_message, list_messages},
        health::{healthz, livez},
        pages::index,
        photos::{create_photo, delete_photo, list_photos},
        profile::{get_profile, update_profile},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route(
            "/contact",
            get(list_messages).post(create_message).delete(delete_message),
        )
        .route(
            "/photos",
            get(list_photos).post(create_photo).delete(delete_photo),
        )
        .route("/profile", get(get_profile).post(update_profile))
        .layer(cors);

    let max_upload_bytes = state.max_upload_bytes;

    Router::new()
        .route("/", get(index))
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}
