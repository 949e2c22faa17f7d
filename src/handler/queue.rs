use std::sync::Arc;

use axum::{
    extract::Query,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    db::ticketdb::TicketExt,
    dtos::ticketdtos::{
        CallTicketDto, CompleteTicketDto, HoldTicketDto, TicketActionDto, TicketListResponseDto,
        TicketResponseDto, WindowQueryDto, WindowStatusDto,
    },
    error::{ErrorMessage, HttpError},
    middleware::StaffSession,
    AppState,
};

pub fn queue_handler() -> Router {
    Router::new()
        .route("/status", get(window_status))
        .route("/waiting", get(waiting_list))
        .route("/pool", get(pending_pool))
        .route("/call", post(call_ticket))
        .route("/pass", post(pass_ticket))
        .route("/hold", post(hold_ticket))
        .route("/complete", post(complete_ticket))
        .route("/requeue", post(requeue_ticket))
}

/// The window an action applies to. Plain staff always act on their
/// assigned window; admin and master pick one per request.
fn resolve_window(session: &StaffSession, requested: Option<i32>) -> Result<i32, HttpError> {
    if session.profile.role.can_act_on_any_window() {
        return requested
            .ok_or_else(|| HttpError::bad_request("window is required for this account"));
    }

    let assigned = session
        .profile
        .window_number
        .ok_or_else(|| HttpError::unauthorized(ErrorMessage::WindowNotAssigned.to_string()))?;

    if requested.map_or(false, |w| w != assigned) {
        return Err(HttpError::unauthorized(
            ErrorMessage::PermissionDenied.to_string(),
        ));
    }

    Ok(assigned)
}

pub async fn window_status(
    Query(query): Query<WindowQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(session): Extension<StaffSession>,
) -> Result<impl IntoResponse, HttpError> {
    let window = resolve_window(&session, query.window)?;

    let waiting_count = app_state
        .db_client
        .count_waiting_for_window(window)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let serving = app_state
        .db_client
        .get_serving_at_window(window)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(WindowStatusDto {
        status: "success".to_string(),
        window,
        waiting_count,
        serving,
    }))
}

pub async fn waiting_list(
    Query(query): Query<WindowQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(session): Extension<StaffSession>,
) -> Result<impl IntoResponse, HttpError> {
    let window = resolve_window(&session, query.window)?;

    let tickets = app_state
        .db_client
        .get_waiting_for_window(window)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(TicketListResponseDto::of(tickets)))
}

/// The global hold pool is visible to every window.
pub async fn pending_pool(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let tickets = app_state
        .queue_service
        .pool()
        .await
        .map_err(HttpError::from)?;

    Ok(Json(TicketListResponseDto::of(tickets)))
}

pub async fn call_ticket(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(session): Extension<StaffSession>,
    Json(body): Json<CallTicketDto>,
) -> Result<impl IntoResponse, HttpError> {
    let window = resolve_window(&session, body.window)?;

    let ticket = match body.ticket_id {
        Some(ticket_id) => app_state
            .queue_service
            .call(ticket_id, window)
            .await
            .map_err(HttpError::from)?,
        None => app_state
            .queue_service
            .call_next(window)
            .await
            .map_err(HttpError::from)?
            .ok_or_else(|| {
                HttpError::not_found(format!("No tickets waiting for window {}", window))
            })?,
    };

    Ok(Json(TicketResponseDto::of(ticket)))
}

pub async fn pass_ticket(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(session): Extension<StaffSession>,
    Json(body): Json<TicketActionDto>,
) -> Result<impl IntoResponse, HttpError> {
    let window = resolve_window(&session, body.window)?;

    let ticket = app_state
        .queue_service
        .pass(body.ticket_id, window)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(TicketResponseDto::of(ticket)))
}

pub async fn hold_ticket(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(session): Extension<StaffSession>,
    Json(body): Json<HoldTicketDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let window = resolve_window(&session, body.window)?;

    let ticket = app_state
        .queue_service
        .hold(body.ticket_id, window, body.reason)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(TicketResponseDto::of(ticket)))
}

pub async fn complete_ticket(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(session): Extension<StaffSession>,
    Json(body): Json<CompleteTicketDto>,
) -> Result<impl IntoResponse, HttpError> {
    let window = resolve_window(&session, body.window)?;

    if body.force && !session.profile.role.can_act_on_any_window() {
        return Err(HttpError::unauthorized(
            ErrorMessage::PermissionDenied.to_string(),
        ));
    }

    let ticket = app_state
        .queue_service
        .complete(body.ticket_id, window, body.force)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(TicketResponseDto::of(ticket)))
}

pub async fn requeue_ticket(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(session): Extension<StaffSession>,
    Json(body): Json<TicketActionDto>,
) -> Result<impl IntoResponse, HttpError> {
    let window = resolve_window(&session, body.window)?;

    let ticket = app_state
        .queue_service
        .requeue(body.ticket_id, window)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(TicketResponseDto::of(ticket)))
}
