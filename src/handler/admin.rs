use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{settingsdb::SettingsExt, staffdb::StaffExt, ticketdb::TicketExt},
    dtos::{
        staffdtos::{
            SettingsResponseDto, SettingsUpdateDto, StaffData, StaffListResponseDto,
            StaffResponseDto, UpdateStaffDto,
        },
        ticketdtos::{
            OverviewResponseDto, ResetResponseDto, TicketListResponseDto, WindowActivityDto,
        },
    },
    error::{ErrorMessage, HttpError},
    models::{
        settingsmodel::{MARQUEE_TEXT, SIDEBAR_ANNOUNCEMENT},
        ticketmodel::{TicketStatus, FIRST_WINDOW, LAST_WINDOW},
    },
    AppState,
};

pub fn admin_handler() -> Router {
    Router::new()
        .route("/overview", get(overview))
        .route("/report", get(completed_report))
        .route("/settings", get(get_settings).put(update_settings))
        .route("/reset", post(reset_day))
        .route("/staff", get(list_staff))
        .route("/staff/:id", put(update_staff))
}

/// Live counts for the dashboard cards and the per-window activity bars.
pub async fn overview(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let db = &app_state.db_client;

    let waiting = db
        .count_by_status(TicketStatus::Waiting)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let serving = db
        .count_by_status(TicketStatus::Serving)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let pending = db
        .count_by_status(TicketStatus::Pending)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let done = db
        .count_by_status(TicketStatus::Done)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let mut windows = Vec::new();
    for window in FIRST_WINDOW..=LAST_WINDOW {
        let serving_at = db
            .count_serving_at_window(window)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;
        let waiting_for = db
            .count_waiting_for_window(window)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;
        windows.push(WindowActivityDto {
            window,
            serving: serving_at,
            waiting: waiting_for,
        });
    }

    Ok(Json(OverviewResponseDto {
        status: "success".to_string(),
        waiting,
        serving,
        pending,
        done,
        windows,
    }))
}

/// Raw feed for the downstream reporting aggregator: completed tickets
/// with their per-window timing fields. Averages and exports are
/// computed downstream.
pub async fn completed_report(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let tickets = app_state
        .db_client
        .get_completed_tickets()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(TicketListResponseDto::of(tickets)))
}

pub async fn get_settings(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let settings = app_state
        .db_client
        .get_settings()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(SettingsResponseDto {
        status: "success".to_string(),
        settings,
    }))
}

pub async fn update_settings(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<SettingsUpdateDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if let Some(marquee) = &body.marquee_text {
        app_state
            .db_client
            .upsert_setting(MARQUEE_TEXT, marquee)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;
    }

    if let Some(advisory) = &body.sidebar_announcement {
        app_state
            .db_client
            .upsert_setting(SIDEBAR_ANNOUNCEMENT, advisory)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;
    }

    app_state.notifier.settings_changed();

    let settings = app_state
        .db_client
        .get_settings()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(SettingsResponseDto {
        status: "success".to_string(),
        settings,
    }))
}

/// End-of-day maintenance: clears every ticket and restarts numbering.
pub async fn reset_day(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let removed = app_state
        .queue_service
        .reset_day()
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ResetResponseDto {
        status: "success".to_string(),
        removed,
    }))
}

pub async fn list_staff(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let staff = app_state
        .db_client
        .list_staff_profiles()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(StaffListResponseDto {
        status: "success".to_string(),
        results: staff.len() as i64,
        staff,
    }))
}

pub async fn update_staff(
    Path(staff_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<UpdateStaffDto>,
) -> Result<impl IntoResponse, HttpError> {
    if let Some(window) = body.window_number {
        if !(FIRST_WINDOW..=LAST_WINDOW).contains(&window) {
            return Err(HttpError::bad_request(
                ErrorMessage::WindowOutOfRange.to_string(),
            ));
        }
    }

    let current = app_state
        .db_client
        .get_staff_profile(staff_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Staff profile not found"))?;

    let profile = app_state
        .db_client
        .update_staff_profile(
            staff_id,
            body.role.unwrap_or(current.role),
            body.window_number.or(current.window_number),
            body.is_active.unwrap_or(current.is_active),
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!(
        "staff {} updated: role {}, window {:?}, active {}",
        profile.id,
        profile.role.to_str(),
        profile.window_number,
        profile.is_active
    );

    Ok(Json(StaffResponseDto {
        status: "success".to_string(),
        data: StaffData { profile },
    }))
}
