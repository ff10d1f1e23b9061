// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operator and session mutations.
//!
//! Passwords are stored as bcrypt hashes; session tokens are opaque
//! strings generated by the server layer.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, info};

use crate::data_models::NewSession;
use crate::diesel_schema::{operators, sessions};
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

/// Creates a new operator.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `login_name` - The login name
/// * `display_name` - The display name
/// * `password` - The plain-text password (will be hashed)
/// * `role` - The role (`admin` is the only role with write access)
/// * `created_at` - Creation timestamp
///
/// # Errors
///
/// Returns an error if the password cannot be hashed or if the login name
/// already exists.
pub fn create_operator(
    conn: &mut SqliteConnection,
    login_name: &str,
    display_name: &str,
    password: &str,
    role: &str,
    created_at: &str,
) -> Result<i64, PersistenceError> {
    info!(
        "Creating operator with login_name: {}, role: {}",
        login_name, role
    );

    let password_hash: String = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))?;

    conn.transaction(|conn| {
        diesel::insert_into(operators::table)
            .values((
                operators::login_name.eq(login_name),
                operators::display_name.eq(display_name),
                operators::password_hash.eq(&password_hash),
                operators::role.eq(role),
                operators::is_disabled.eq(0),
                operators::created_at.eq(created_at),
            ))
            .execute(conn)?;
        get_last_insert_rowid(conn)
    })
}

/// Creates the bootstrap admin account when no operators exist yet.
///
/// Returns the new operator id, or `None` when the table already has at
/// least one account.
///
/// # Errors
///
/// Returns an error if the count query or the insert fails.
pub fn ensure_admin_operator(
    conn: &mut SqliteConnection,
    login_name: &str,
    password: &str,
    created_at: &str,
) -> Result<Option<i64>, PersistenceError> {
    let existing: i64 = operators::table.count().get_result(conn)?;
    if existing > 0 {
        debug!("Operators already present, skipping admin bootstrap");
        return Ok(None);
    }

    let operator_id: i64 =
        create_operator(conn, login_name, login_name, password, "admin", created_at)?;
    info!(operator_id, "Bootstrap admin operator created");
    Ok(Some(operator_id))
}

/// Updates the last login timestamp for an operator.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_last_login(
    conn: &mut SqliteConnection,
    operator_id: i64,
    logged_in_at: &str,
) -> Result<(), PersistenceError> {
    debug!("Updating last_login for operator ID: {}", operator_id);

    diesel::update(operators::table)
        .filter(operators::operator_id.eq(operator_id))
        .set(operators::last_login.eq(logged_in_at))
        .execute(conn)?;

    Ok(())
}

/// Creates a session for an operator.
///
/// # Errors
///
/// Returns an error if the database insert fails.
pub fn create_session(
    conn: &mut SqliteConnection,
    session: &NewSession,
) -> Result<(), PersistenceError> {
    diesel::insert_into(sessions::table)
        .values(session)
        .execute(conn)?;
    Ok(())
}

/// Deletes a session by token. Used on logout.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_session(conn: &mut SqliteConnection, token: &str) -> Result<(), PersistenceError> {
    diesel::delete(sessions::table.filter(sessions::session_token.eq(token))).execute(conn)?;
    Ok(())
}

/// Deletes all sessions that expired at or before `now`.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_expired_sessions(
    conn: &mut SqliteConnection,
    now: &str,
) -> Result<usize, PersistenceError> {
    let deleted: usize =
        diesel::delete(sessions::table.filter(sessions::expires_at.le(now))).execute(conn)?;
    if deleted > 0 {
        debug!("Deleted {} expired sessions", deleted);
    }
    Ok(deleted)
}
