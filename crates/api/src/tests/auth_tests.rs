// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{NOW, fixed_time, mid_month, open_db};
use crate::auth::{AuthenticatedActor, AuthenticationService, Role};
use crate::error::AuthError;
use harborlight_persistence::Persistence;

fn seed_operator(db: &mut Persistence) {
    match db.create_operator("root", "Root Operator", "hunter2", "admin", NOW) {
        Ok(_) => {}
        Err(e) => panic!("Failed to seed operator: {e}"),
    }
}

fn login(db: &mut Persistence) -> String {
    match AuthenticationService::login(db, "root", "hunter2", mid_month()) {
        Ok((token, _)) => token,
        Err(e) => panic!("Failed to log in: {e}"),
    }
}

#[test]
fn test_a_login_opens_a_usable_session() {
    let mut db = open_db();
    seed_operator(&mut db);

    let token: String = login(&mut db);
    assert!(token.starts_with("session_"));

    let actor: AuthenticatedActor =
        match AuthenticationService::validate_session(&mut db, &token, mid_month()) {
            Ok(actor) => actor,
            Err(e) => panic!("Failed to validate session: {e}"),
        };
    assert_eq!(actor.id, "root");
    assert_eq!(actor.role, Role::Admin);
}

#[test]
fn test_bad_credentials_never_reveal_which_part_was_wrong() {
    let mut db = open_db();
    seed_operator(&mut db);

    let wrong_password = AuthenticationService::login(&mut db, "root", "wrong", mid_month());
    let unknown_login = AuthenticationService::login(&mut db, "ghost", "hunter2", mid_month());
    for result in [wrong_password, unknown_login] {
        match result {
            Err(AuthError::AuthenticationFailed { reason }) => {
                assert_eq!(reason, "Invalid credentials");
            }
            other => panic!("Expected uniform authentication failure, got {other:?}"),
        }
    }
}

#[test]
fn test_a_session_expires_after_its_lifetime() {
    let mut db = open_db();
    seed_operator(&mut db);
    let token: String = login(&mut db);

    // 25 hours after login, past the 24-hour lifetime.
    let later = fixed_time("2026-01-16T13:00:00Z");
    match AuthenticationService::validate_session(&mut db, &token, later) {
        Err(AuthError::AuthenticationFailed { reason }) => {
            assert_eq!(reason, "Session expired");
        }
        other => panic!("Expected an expired session, got {other:?}"),
    }
}

#[test]
fn test_logout_invalidates_the_token() {
    let mut db = open_db();
    seed_operator(&mut db);
    let token: String = login(&mut db);

    match AuthenticationService::logout(&mut db, &token) {
        Ok(()) => {}
        Err(e) => panic!("Failed to log out: {e}"),
    }
    match AuthenticationService::validate_session(&mut db, &token, mid_month()) {
        Err(AuthError::AuthenticationFailed { reason }) => {
            assert_eq!(reason, "Invalid session token");
        }
        other => panic!("Expected the session to be gone, got {other:?}"),
    }
}

#[test]
fn test_an_unknown_token_is_rejected() {
    let mut db = open_db();
    match AuthenticationService::validate_session(&mut db, "session_bogus", mid_month()) {
        Err(AuthError::AuthenticationFailed { .. }) => {}
        other => panic!("Expected authentication failure, got {other:?}"),
    }
}
