// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use harborlight_audit::Actor;
use harborlight_persistence::{NewSession, OperatorData, Persistence};

use crate::error::AuthError;

/// Actor roles for authorization.
///
/// Roles apply only to operators; public submitters are never
/// authenticated and carry no role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Admin role: operators who review submissions, drive status
    /// transitions, and manage the catalogues (payment methods, delivery
    /// options, events).
    Admin,
}

/// An authenticated operator with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The operator's login name.
    pub id: String,
    /// The role assigned to this operator.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }

    /// Converts this authenticated actor into an audit Actor.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        match self.role {
            Role::Admin => Actor::admin(self.id.clone()),
        }
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that an actor may perform an admin-only action.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub const fn require_admin(
        actor: &AuthenticatedActor,
        _action: &str,
    ) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
        }
    }
}

/// Session-based authentication backed by the operators table.
pub struct AuthenticationService;

impl AuthenticationService {
    /// How long a session stays valid after login.
    const SESSION_LIFETIME_HOURS: i64 = 24;

    /// Verifies credentials and opens a session.
    ///
    /// Returns the opaque session token and the operator record.
    ///
    /// # Errors
    ///
    /// Returns an error if the operator is unknown, disabled, or the
    /// password does not match. The reason never says which, so a caller
    /// cannot probe for valid login names.
    pub fn login(
        persistence: &mut Persistence,
        login_name: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<(String, OperatorData), AuthError> {
        let failed = || AuthError::AuthenticationFailed {
            reason: String::from("Invalid credentials"),
        };

        let operator: OperatorData = persistence
            .get_operator_by_login(login_name)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?
            .ok_or_else(failed)?;

        if !operator.is_enabled() {
            return Err(failed());
        }

        let password_ok: bool =
            bcrypt::verify(password, &operator.password_hash).map_err(|e| {
                AuthError::AuthenticationFailed {
                    reason: format!("Password verification error: {e}"),
                }
            })?;
        if !password_ok {
            return Err(failed());
        }

        let session_token: String = Self::generate_session_token();
        let expires_at: DateTime<Utc> = now + Duration::hours(Self::SESSION_LIFETIME_HOURS);

        let session: NewSession = NewSession {
            session_token: session_token.clone(),
            operator_id: operator.operator_id,
            created_at: now.to_rfc3339_opts(SecondsFormat::Secs, true),
            expires_at: expires_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        };
        persistence
            .create_session(&session)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to create session: {e}"),
            })?;

        persistence
            .update_last_login(
                operator.operator_id,
                &now.to_rfc3339_opts(SecondsFormat::Secs, true),
            )
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to update last login: {e}"),
            })?;

        Ok((session_token, operator))
    }

    /// Validates a bearer token and returns the authenticated actor.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is unknown, the session has expired,
    /// or the operator has been disabled since login.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
        now: DateTime<Utc>,
    ) -> Result<AuthenticatedActor, AuthError> {
        let (session, operator) = persistence
            .get_session_with_operator(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: DateTime<Utc> = session
            .expires_at
            .parse()
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to parse session expiration: {e}"),
            })?;
        if now > expires_at {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        if !operator.is_enabled() {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Operator is disabled"),
            });
        }

        match operator.role.as_str() {
            "admin" => Ok(AuthenticatedActor::new(operator.login_name, Role::Admin)),
            other => Err(AuthError::AuthenticationFailed {
                reason: format!("Invalid role: {other}"),
            }),
        }
    }

    /// Closes a session. Unknown tokens are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })
    }

    /// Generates an opaque session token from the thread RNG.
    fn generate_session_token() -> String {
        format!("session_{:032x}", rand::random::<u128>())
    }
}
