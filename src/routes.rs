// routes.rs
use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        admin::admin_handler, events::subscribe_events, kiosk::kiosk_handler,
        monitor::monitor_handler, queue::queue_handler,
    },
    middleware::{role_check, staff_context},
    models::staffmodel::StaffRole,
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new()
        // Public surfaces: the kiosk, the monitor wall display, and the
        // change feed every screen subscribes to.
        .nest("/kiosk", kiosk_handler())
        .nest("/monitor", monitor_handler())
        .route("/events", get(subscribe_events))
        // Staff console and master panel.
        .nest(
            "/queue",
            queue_handler().layer(middleware::from_fn(staff_context)),
        )
        // Command center: settings, daily reset, staff management.
        .nest(
            "/admin",
            admin_handler()
                .layer(middleware::from_fn(|state, req, next| {
                    role_check(state, req, next, vec![StaffRole::Admin])
                }))
                .layer(middleware::from_fn(staff_context)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
}
