use axum::http::StatusCode;
use thiserror::Error;
use uuid::Uuid;

use crate::{error::HttpError, models::ticketmodel::TicketStatus};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Ticket {0} not found")]
    TicketNotFound(Uuid),

    #[error("Ticket {0} cannot {1} while {2:?}")]
    InvalidTransition(Uuid, &'static str, TicketStatus),

    #[error("Ticket {0} was already updated by another window")]
    ConcurrentModification(Uuid),

    #[error("Ticket sequence is unavailable: {0}")]
    SequenceExhaustion(String),

    #[error("Window {0} is out of range")]
    InvalidWindow(i32),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::TicketNotFound(_) => HttpError::not_found(error.to_string()),

            ServiceError::InvalidTransition(_, _, _)
            | ServiceError::InvalidWindow(_)
            | ServiceError::Validation(_) => HttpError::bad_request(error.to_string()),

            ServiceError::ConcurrentModification(_) => HttpError::conflict(error.to_string()),

            ServiceError::SequenceExhaustion(_) => {
                HttpError::new(error.to_string(), StatusCode::SERVICE_UNAVAILABLE)
            }

            ServiceError::Database(_) => HttpError::server_error(error.to_string()),
        }
    }
}
