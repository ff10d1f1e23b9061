// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Member, delivery option, and delivery request mutation operations.

use crate::data_models::{NewDeliveryOption, NewDeliveryRequest, NewMember, NewNotification};
use crate::diesel_schema::{delivery_options, delivery_requests, members};
use crate::error::PersistenceError;
use crate::mutations::{audit, outbox};
use crate::sqlite::get_last_insert_rowid;
use diesel::prelude::*;
use harborlight::Status;
use harborlight_audit::{Actor, AuditRecord};
use harborlight_domain::DeliveryStatus;

/// Insert a member. Returns the new member id.
///
/// # Errors
///
/// Returns an error if the database insert fails.
pub fn create_member(
    conn: &mut SqliteConnection,
    member: &NewMember,
) -> Result<i64, PersistenceError> {
    conn.transaction(|conn| {
        diesel::insert_into(members::table)
            .values(member)
            .execute(conn)?;
        get_last_insert_rowid(conn)
    })
}

/// Insert a delivery option. Returns the new option id.
///
/// # Errors
///
/// Returns an error if the database insert fails.
pub fn create_delivery_option(
    conn: &mut SqliteConnection,
    option: &NewDeliveryOption,
) -> Result<i64, PersistenceError> {
    conn.transaction(|conn| {
        diesel::insert_into(delivery_options::table)
            .values(option)
            .execute(conn)?;
        get_last_insert_rowid(conn)
    })
}

/// Insert a delivery request and flip the member's first-request flag in
/// the same transaction, along with the creation audit record and any
/// notifications. Returns the new request id.
///
/// # Errors
///
/// Returns an error if any of the database writes fail.
pub fn create_delivery_request(
    conn: &mut SqliteConnection,
    request: &NewDeliveryRequest,
    actor: &Actor,
    summary: &str,
    notifications: &[NewNotification],
) -> Result<i64, PersistenceError> {
    conn.transaction(|conn| {
        diesel::insert_into(delivery_requests::table)
            .values(request)
            .execute(conn)?;
        let delivery_request_id: i64 = get_last_insert_rowid(conn)?;

        diesel::update(members::table.filter(members::member_id.eq(request.member_id)))
            .set(members::has_delivery_request.eq(1))
            .execute(conn)?;

        let record: AuditRecord = AuditRecord::creation(
            actor.clone(),
            DeliveryStatus::RESOURCE,
            delivery_request_id,
            summary,
        );
        audit::insert_audit_record(conn, &record, &request.created_at)?;

        for notification in notifications {
            outbox::enqueue(conn, notification)?;
        }
        Ok(delivery_request_id)
    })
}
