// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operator and session queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::{OperatorData, SessionData};
use crate::diesel_schema::{operators, sessions};
use crate::error::PersistenceError;

/// Retrieves an operator by login name.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the operator is not found.
pub fn get_operator_by_login(
    conn: &mut SqliteConnection,
    login_name: &str,
) -> Result<Option<OperatorData>, PersistenceError> {
    debug!("Looking up operator by login_name: {}", login_name);

    let operator: Option<OperatorData> = operators::table
        .filter(operators::login_name.eq(login_name))
        .first(conn)
        .optional()?;

    Ok(operator)
}

/// Retrieves an operator by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the operator is not found.
pub fn get_operator(
    conn: &mut SqliteConnection,
    operator_id: i64,
) -> Result<Option<OperatorData>, PersistenceError> {
    let operator: Option<OperatorData> = operators::table
        .filter(operators::operator_id.eq(operator_id))
        .first(conn)
        .optional()?;

    Ok(operator)
}

/// Counts operator accounts. Used to decide whether to bootstrap the
/// initial admin.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_operators(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    let count: i64 = operators::table.count().get_result(conn)?;
    Ok(count)
}

/// Retrieves a session and its operator by session token.
///
/// Expiry is not checked here; the caller compares `expires_at` against
/// the current time.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no session has the given token.
pub fn get_session_with_operator(
    conn: &mut SqliteConnection,
    token: &str,
) -> Result<Option<(SessionData, OperatorData)>, PersistenceError> {
    let result: Option<(SessionData, OperatorData)> = sessions::table
        .inner_join(operators::table)
        .filter(sessions::session_token.eq(token))
        .first(conn)
        .optional()?;

    Ok(result)
}
