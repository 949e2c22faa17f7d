use std::sync::Arc;

use axum::{response::IntoResponse, routing::get, Extension, Json, Router};

use crate::{
    db::{settingsdb::SettingsExt, ticketdb::TicketExt},
    dtos::ticketdtos::{MonitorBoardDto, WindowBoardDto},
    error::HttpError,
    models::{
        settingsmodel::{DEFAULT_MARQUEE, DEFAULT_SIDEBAR, MARQUEE_TEXT, SIDEBAR_ANNOUNCEMENT},
        ticketmodel::{window_label, FIRST_WINDOW, LAST_WINDOW},
    },
    AppState,
};

/// How many upcoming tickets the public display shows per window.
const UPCOMING_LIMIT: i64 = 4;

pub fn monitor_handler() -> Router {
    Router::new().route("/board", get(board))
}

/// Snapshot for the public display: who is being served at each window,
/// the next few in line, and the admin-controlled display strings.
pub async fn board(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let mut windows = Vec::new();

    for window in FIRST_WINDOW..=LAST_WINDOW {
        let serving = app_state
            .db_client
            .get_serving_at_window(window)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        let upcoming = app_state
            .db_client
            .get_upcoming_for_window(window, UPCOMING_LIMIT)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        windows.push(WindowBoardDto {
            window,
            label: window_label(window).to_string(),
            serving,
            upcoming,
        });
    }

    let settings = app_state
        .db_client
        .get_settings()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let find = |id: &str, default: &str| {
        settings
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.value.clone())
            .unwrap_or_else(|| default.to_string())
    };

    Ok(Json(MonitorBoardDto {
        status: "success".to_string(),
        windows,
        marquee_text: find(MARQUEE_TEXT, DEFAULT_MARQUEE),
        sidebar_announcement: find(SIDEBAR_ANNOUNCEMENT, DEFAULT_SIDEBAR),
    }))
}
