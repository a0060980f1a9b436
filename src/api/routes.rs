use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::api::handlers;
use crate::store::traits::Store;

pub fn create_router<S: Store + 'static>() -> Router<Arc<S>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // API Documentation
        .route("/docs", get(handlers::get_api_docs::<S>))
        .route("/docs/openapi.json", get(handlers::get_openapi_spec::<S>))
        // Inspection templates
        .route("/api/templates", get(handlers::list_templates::<S>))
        .route("/api/templates", post(handlers::create_template::<S>))
        .route("/api/templates", delete(handlers::delete_template::<S>))
        .route("/api/templates/get", post(handlers::get_template::<S>))
        // Properties ("objects")
        .route("/api/objects", get(handlers::list_objects::<S>))
        .route("/api/objects", post(handlers::create_object::<S>))
        .route("/api/objects", delete(handlers::delete_object::<S>))
        .route("/api/objects/get", post(handlers::get_object::<S>))
        .route("/api/objects/update", post(handlers::update_object::<S>))
        // Inspections
        .route("/api/inspections", get(handlers::list_inspections::<S>))
        .route("/api/inspections", post(handlers::create_inspection::<S>))
        .route("/api/inspections", delete(handlers::delete_inspection::<S>))
        .route("/api/inspections/get", post(handlers::get_inspection::<S>))
        .route(
            "/api/inspections/update",
            post(handlers::update_inspection::<S>),
        )
        .layer(middleware::from_fn(handlers::access_log))
        // Static landing page; the browser UI itself lives outside this crate
        .fallback_service(ServeDir::new("public"))
}
