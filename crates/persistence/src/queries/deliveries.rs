// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Member, delivery option, and delivery request queries.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::{DeliveryOptionRow, DeliveryRequestRow, MemberRow};
use crate::diesel_schema::{delivery_options, delivery_requests, members};
use crate::error::PersistenceError;
use crate::queries::{Page, Paginated};
use harborlight_domain::{DeliveryOption, DeliveryRequest, Member};

/// Retrieves a member by id.
///
/// # Errors
///
/// Returns an error if the query fails. Returns `Ok(None)` if the member
/// is not found.
pub fn get_member(
    conn: &mut SqliteConnection,
    member_id: i64,
) -> Result<Option<Member>, PersistenceError> {
    let row: Option<MemberRow> = members::table
        .filter(members::member_id.eq(member_id))
        .first(conn)
        .optional()?;

    Ok(row.map(Member::from))
}

/// Retrieves a member by email.
///
/// # Errors
///
/// Returns an error if the query fails. Returns `Ok(None)` if no member
/// has the given email.
pub fn get_member_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<Member>, PersistenceError> {
    let row: Option<MemberRow> = members::table
        .filter(members::email.eq(email))
        .first(conn)
        .optional()?;

    Ok(row.map(Member::from))
}

/// Retrieves a delivery option by id.
///
/// # Errors
///
/// Returns an error if the query fails. Returns `Ok(None)` if the option
/// is not found.
pub fn get_delivery_option(
    conn: &mut SqliteConnection,
    delivery_option_id: i64,
) -> Result<Option<DeliveryOption>, PersistenceError> {
    let row: Option<DeliveryOptionRow> = delivery_options::table
        .filter(delivery_options::delivery_option_id.eq(delivery_option_id))
        .first(conn)
        .optional()?;

    Ok(row.map(DeliveryOption::from))
}

/// Lists delivery options. When `active_only` is set, disabled options are
/// excluded; the public surface always sets it.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_delivery_options(
    conn: &mut SqliteConnection,
    active_only: bool,
) -> Result<Vec<DeliveryOption>, PersistenceError> {
    let rows: Vec<DeliveryOptionRow> = if active_only {
        delivery_options::table
            .filter(delivery_options::is_active.eq(1))
            .order(delivery_options::delivery_option_id.asc())
            .load(conn)?
    } else {
        delivery_options::table
            .order(delivery_options::delivery_option_id.asc())
            .load(conn)?
    };

    Ok(rows.into_iter().map(DeliveryOption::from).collect())
}

/// Retrieves a delivery request by id.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row no longer parses.
/// Returns `Ok(None)` if the request is not found.
pub fn get_delivery_request(
    conn: &mut SqliteConnection,
    delivery_request_id: i64,
) -> Result<Option<DeliveryRequest>, PersistenceError> {
    let row: Option<DeliveryRequestRow> = delivery_requests::table
        .filter(delivery_requests::delivery_request_id.eq(delivery_request_id))
        .first(conn)
        .optional()?;

    row.map(DeliveryRequest::try_from).transpose()
}

/// Lists delivery requests, newest first, optionally filtered by status.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row no longer parses.
pub fn list_delivery_requests(
    conn: &mut SqliteConnection,
    status: Option<&str>,
    page: Page,
) -> Result<Paginated<DeliveryRequest>, PersistenceError> {
    let total: i64 = match status {
        Some(status) => delivery_requests::table
            .filter(delivery_requests::status.eq(status))
            .count()
            .get_result(conn)?,
        None => delivery_requests::table.count().get_result(conn)?,
    };

    let rows: Vec<DeliveryRequestRow> = match status {
        Some(status) => delivery_requests::table
            .filter(delivery_requests::status.eq(status))
            .order(delivery_requests::delivery_request_id.desc())
            .limit(page.limit())
            .offset(page.offset())
            .load(conn)?,
        None => delivery_requests::table
            .order(delivery_requests::delivery_request_id.desc())
            .limit(page.limit())
            .offset(page.offset())
            .load(conn)?,
    };

    let items: Vec<DeliveryRequest> = rows
        .into_iter()
        .map(DeliveryRequest::try_from)
        .collect::<Result<_, _>>()?;

    Ok(Paginated { items, total, page })
}
