// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event, ticket type, and ticket mutation operations.

use crate::data_models::{NewEvent, NewNotification, NewTicket, NewTicketType};
use crate::diesel_schema::{events, ticket_types, tickets};
use crate::error::PersistenceError;
use crate::mutations::{audit, outbox};
use crate::sqlite::get_last_insert_rowid;
use diesel::prelude::*;
use harborlight::Status;
use harborlight_audit::{Actor, AuditRecord};
use harborlight_domain::TicketStatus;

/// Insert an event. Returns the new event id.
///
/// # Errors
///
/// Returns an error if the database insert fails.
pub fn create_event(conn: &mut SqliteConnection, event: &NewEvent) -> Result<i64, PersistenceError> {
    conn.transaction(|conn| {
        diesel::insert_into(events::table)
            .values(event)
            .execute(conn)?;
        get_last_insert_rowid(conn)
    })
}

/// Insert a ticket type for an event. Returns the new ticket type id.
///
/// # Errors
///
/// Returns an error if the database insert fails.
pub fn create_ticket_type(
    conn: &mut SqliteConnection,
    ticket_type: &NewTicketType,
) -> Result<i64, PersistenceError> {
    conn.transaction(|conn| {
        diesel::insert_into(ticket_types::table)
            .values(ticket_type)
            .execute(conn)?;
        get_last_insert_rowid(conn)
    })
}

/// Insert a ticket purchase, its creation audit record, and any
/// notifications in one transaction. Returns the new ticket id.
///
/// The caller supplies the server-derived paid amount and check-in code on
/// the record; nothing here recomputes them.
///
/// # Errors
///
/// Returns an error if any of the database writes fail.
pub fn create_ticket(
    conn: &mut SqliteConnection,
    ticket: &NewTicket,
    actor: &Actor,
    summary: &str,
    notifications: &[NewNotification],
) -> Result<i64, PersistenceError> {
    conn.transaction(|conn| {
        diesel::insert_into(tickets::table)
            .values(ticket)
            .execute(conn)?;
        let ticket_id: i64 = get_last_insert_rowid(conn)?;

        let record: AuditRecord =
            AuditRecord::creation(actor.clone(), TicketStatus::RESOURCE, ticket_id, summary);
        audit::insert_audit_record(conn, &record, &ticket.created_at)?;

        for notification in notifications {
            outbox::enqueue(conn, notification)?;
        }
        Ok(ticket_id)
    })
}
