use axum::{
    http::StatusCode,
    response::{IntoResponse, Response as AxumResponse},
    Json,
};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Serialize)]
pub struct Response {
    pub status: &'static str,
    pub message: String,
}

#[derive(Debug, PartialEq)]
pub enum ErrorMessage {
    StaffIdNotProvided,
    InvalidStaffId,
    StaffNoLongerExist,
    StaffNotAuthenticated,
    StaffDeactivated,
    PermissionDenied,
    WindowNotAssigned,
    WindowOutOfRange,
}

impl ErrorMessage {
    fn to_str(&self) -> &str {
        match self {
            ErrorMessage::StaffIdNotProvided => "You are not logged in, please provide a staff id",
            ErrorMessage::InvalidStaffId => "Staff id is invalid",
            ErrorMessage::StaffNoLongerExist => "Staff belonging to this id no longer exists",
            ErrorMessage::StaffNotAuthenticated => "Staff session is not authenticated",
            ErrorMessage::StaffDeactivated => "This staff account has been deactivated",
            ErrorMessage::PermissionDenied => "You are not allowed to perform this action",
            ErrorMessage::WindowNotAssigned => "No service window is assigned to this account",
            ErrorMessage::WindowOutOfRange => "Window number must be between 1 and 3",
        }
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

#[derive(Debug, Clone)]
pub struct HttpError {
    pub message: String,
    pub status: StatusCode,
}

impl HttpError {
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        HttpError {
            message: message.into(),
            status,
        }
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        HttpError::new(message, StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        HttpError::new(message, StatusCode::BAD_REQUEST)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        HttpError::new(message, StatusCode::UNAUTHORIZED)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        HttpError::new(message, StatusCode::NOT_FOUND)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        HttpError::new(message, StatusCode::CONFLICT)
    }

    pub fn into_http_response(self) -> AxumResponse {
        let status = if self.status.is_server_error() {
            "error"
        } else {
            "fail"
        };
        (
            self.status,
            Json(Response {
                status,
                message: self.message,
            }),
        )
            .into_response()
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HttpError: message: {}, status: {}", self.message, self.status)
    }
}

impl std::error::Error for HttpError {}

impl IntoResponse for HttpError {
    fn into_response(self) -> AxumResponse {
        self.into_http_response()
    }
}
