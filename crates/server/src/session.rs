// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session extraction for the server.
//!
//! Validates the bearer token at the HTTP boundary so handlers receive an
//! already-authenticated officer.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use labourdesk_api::{AuthenticatedOfficer, AuthenticationService};
use tracing::{debug, warn};

use crate::{AppState, ErrorResponse};

/// Extractor for authenticated officers.
///
/// Carries the resolved officer and the raw token, which logout needs.
///
/// # Authentication Flow
///
/// 1. Extract `Authorization: Bearer <token>` header
/// 2. Validate the token via `AuthenticationService::validate_session`,
///    which checks expiry and that the officer is still active
///
/// # Errors
///
/// Returns HTTP 401 Unauthorized if the header is missing or malformed, or
/// if the session does not validate.
pub struct SessionOperator(pub AuthenticatedOfficer, pub String);

impl FromRequestParts<AppState> for SessionOperator {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header: &str = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| {
                debug!("Missing Authorization header");
                SessionError::MissingAuthorizationHeader
            })?
            .to_str()
            .map_err(|_| {
                warn!("Invalid Authorization header encoding");
                SessionError::InvalidAuthorizationHeader
            })?;

        let token: &str = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            warn!("Authorization header does not start with 'Bearer '");
            SessionError::InvalidAuthorizationHeader
        })?;

        let mut persistence = state.persistence.lock().await;
        let officer: AuthenticatedOfficer =
            AuthenticationService::validate_session(&mut persistence, token).map_err(|e| {
                warn!(error = %e, "Session validation failed");
                SessionError::InvalidSession(e.to_string())
            })?;
        drop(persistence);

        debug!(
            username = %officer.officer.username,
            role = %officer.role(),
            "Session validated"
        );

        Ok(Self(officer, token.to_string()))
    }
}

/// Session extraction errors.
#[derive(Debug)]
pub enum SessionError {
    MissingAuthorizationHeader,
    InvalidAuthorizationHeader,
    InvalidSession(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::MissingAuthorizationHeader => String::from("Missing Authorization header"),
            Self::InvalidAuthorizationHeader => String::from(
                "Invalid Authorization header format. Expected: 'Bearer <token>'",
            ),
            Self::InvalidSession(reason) => format!("Session validation failed: {reason}"),
        };

        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::message(message)),
        )
            .into_response()
    }
}
