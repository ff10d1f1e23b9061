// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session extraction for admin routes.
//!
//! Admin handlers take a [`SessionAdmin`] extractor; it pulls the bearer
//! token from the `Authorization` header and validates it against the
//! sessions table before the handler runs.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use harborlight_api::{AuthenticatedActor, AuthenticationService};
use tracing::{debug, warn};

use crate::AppState;

/// Reads the bearer token out of the `Authorization` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Extractor for authenticated admin operators.
///
/// Validates the `Authorization: Bearer <token>` header against the
/// sessions table; expired sessions and disabled operators are rejected.
pub struct SessionAdmin(pub AuthenticatedActor);

impl FromRequestParts<AppState> for SessionAdmin {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token: &str = bearer_token(&parts.headers).ok_or_else(|| {
            debug!("Missing or malformed Authorization header");
            SessionError::MissingBearerToken
        })?;

        let mut persistence = state.persistence.lock().await;
        let actor: AuthenticatedActor =
            AuthenticationService::validate_session(&mut persistence, token, Utc::now()).map_err(
                |e| {
                    warn!(error = %e, "Session validation failed");
                    SessionError::InvalidSession(e.to_string())
                },
            )?;
        drop(persistence);

        debug!(operator = %actor.id, "Session validated");
        Ok(Self(actor))
    }
}

/// Session extraction failures, rendered as 401 responses.
#[derive(Debug)]
pub enum SessionError {
    /// No `Authorization: Bearer <token>` header was supplied.
    MissingBearerToken,
    /// The token did not resolve to a live session.
    InvalidSession(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::MissingBearerToken => {
                String::from("Missing Authorization header. Expected: 'Bearer <token>'")
            }
            Self::InvalidSession(reason) => reason,
        };
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "message": message })),
        )
            .into_response()
    }
}
