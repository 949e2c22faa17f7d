use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    db::ticketdb::TicketExt,
    dtos::ticketdtos::{RegisterTicketDto, TicketListResponseDto, TicketResponseDto},
    error::HttpError,
    AppState,
};

pub fn kiosk_handler() -> Router {
    Router::new()
        .route("/register", post(register_ticket))
        .route("/recent", get(recent_tickets))
}

pub async fn register_ticket(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<RegisterTicketDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let ticket = app_state
        .queue_service
        .register(body.client_name, body.is_priority)
        .await
        .map_err(HttpError::from)?;

    Ok((StatusCode::CREATED, Json(TicketResponseDto::of(ticket))))
}

/// Last few issued tickets, shown beside the kiosk form.
pub async fn recent_tickets(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let tickets = app_state
        .db_client
        .get_recent_tickets(5)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(TicketListResponseDto::of(tickets)))
}
