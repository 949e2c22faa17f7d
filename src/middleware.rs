use std::sync::Arc;

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::IntoResponse,
    Extension,
};
use serde::{Deserialize, Serialize};

use crate::{
    db::staffdb::StaffExt,
    error::{ErrorMessage, HttpError},
    models::staffmodel::{StaffProfile, StaffRole},
    AppState,
};

/// The already-resolved identity of the acting station: every
/// staff-initiated transition carries this (role, window) pair.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StaffSession {
    pub profile: StaffProfile,
}

/// Resolves the `x-staff-id` header to an active staff profile and makes
/// it available to downstream handlers. Token issuance and verification
/// live with the identity provider, not here.
pub async fn staff_context(
    Extension(app_state): Extension<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    let staff_id = req
        .headers()
        .get("x-staff-id")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_owned());

    let staff_id = staff_id
        .ok_or_else(|| HttpError::unauthorized(ErrorMessage::StaffIdNotProvided.to_string()))?;

    let staff_id = uuid::Uuid::parse_str(&staff_id)
        .map_err(|_| HttpError::unauthorized(ErrorMessage::InvalidStaffId.to_string()))?;

    let profile = app_state
        .db_client
        .get_staff_profile(staff_id)
        .await
        .map_err(|_| HttpError::unauthorized(ErrorMessage::StaffNoLongerExist.to_string()))?;

    let profile = profile
        .ok_or_else(|| HttpError::unauthorized(ErrorMessage::StaffNoLongerExist.to_string()))?;

    if !profile.is_active {
        return Err(HttpError::unauthorized(
            ErrorMessage::StaffDeactivated.to_string(),
        ));
    }

    req.extensions_mut().insert(StaffSession { profile });

    Ok(next.run(req).await)
}

pub async fn role_check(
    Extension(_app_state): Extension<Arc<AppState>>,
    req: Request,
    next: Next,
    required_roles: Vec<StaffRole>,
) -> Result<impl IntoResponse, HttpError> {
    let session = req
        .extensions()
        .get::<StaffSession>()
        .ok_or_else(|| {
            HttpError::unauthorized(ErrorMessage::StaffNotAuthenticated.to_string())
        })?;

    if !required_roles.contains(&session.profile.role) {
        return Err(HttpError::new(
            ErrorMessage::PermissionDenied.to_string(),
            StatusCode::FORBIDDEN,
        ));
    }

    Ok(next.run(req).await)
}
