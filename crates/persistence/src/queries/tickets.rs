// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event, ticket type, and ticket queries.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::{EventRow, TicketRow, TicketTypeRow};
use crate::diesel_schema::{events, ticket_types, tickets};
use crate::error::PersistenceError;
use crate::queries::{Page, Paginated};
use harborlight_domain::{Event, Ticket, TicketType};

/// Retrieves an event by id.
///
/// # Errors
///
/// Returns an error if the query fails. Returns `Ok(None)` if the event is
/// not found.
pub fn get_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Option<Event>, PersistenceError> {
    let row: Option<EventRow> = events::table
        .filter(events::event_id.eq(event_id))
        .first(conn)
        .optional()?;

    Ok(row.map(Event::from))
}

/// Lists events ordered by start time.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_events(conn: &mut SqliteConnection) -> Result<Vec<Event>, PersistenceError> {
    let rows: Vec<EventRow> = events::table.order(events::starts_at.asc()).load(conn)?;
    Ok(rows.into_iter().map(Event::from).collect())
}

/// Retrieves a ticket type by id.
///
/// # Errors
///
/// Returns an error if the query fails. Returns `Ok(None)` if the ticket
/// type is not found.
pub fn get_ticket_type(
    conn: &mut SqliteConnection,
    ticket_type_id: i64,
) -> Result<Option<TicketType>, PersistenceError> {
    let row: Option<TicketTypeRow> = ticket_types::table
        .filter(ticket_types::ticket_type_id.eq(ticket_type_id))
        .first(conn)
        .optional()?;

    Ok(row.map(TicketType::from))
}

/// Lists the ticket types of an event.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_ticket_types(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Vec<TicketType>, PersistenceError> {
    let rows: Vec<TicketTypeRow> = ticket_types::table
        .filter(ticket_types::event_id.eq(event_id))
        .order(ticket_types::ticket_type_id.asc())
        .load(conn)?;

    Ok(rows.into_iter().map(TicketType::from).collect())
}

/// Retrieves a ticket by id.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row no longer parses.
/// Returns `Ok(None)` if the ticket is not found.
pub fn get_ticket(
    conn: &mut SqliteConnection,
    ticket_id: i64,
) -> Result<Option<Ticket>, PersistenceError> {
    let row: Option<TicketRow> = tickets::table
        .filter(tickets::ticket_id.eq(ticket_id))
        .first(conn)
        .optional()?;

    row.map(Ticket::try_from).transpose()
}

/// Lists tickets, newest first, optionally filtered by event and status.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row no longer parses.
pub fn list_tickets(
    conn: &mut SqliteConnection,
    event_id: Option<i64>,
    status: Option<&str>,
    page: Page,
) -> Result<Paginated<Ticket>, PersistenceError> {
    let mut count_query = tickets::table.into_boxed();
    let mut rows_query = tickets::table.into_boxed();

    if let Some(event_id) = event_id {
        count_query = count_query.filter(tickets::event_id.eq(event_id));
        rows_query = rows_query.filter(tickets::event_id.eq(event_id));
    }
    if let Some(status) = status {
        count_query = count_query.filter(tickets::status.eq(status.to_string()));
        rows_query = rows_query.filter(tickets::status.eq(status.to_string()));
    }

    let total: i64 = count_query.count().get_result(conn)?;
    let rows: Vec<TicketRow> = rows_query
        .order(tickets::ticket_id.desc())
        .limit(page.limit())
        .offset(page.offset())
        .load(conn)?;

    let items: Vec<Ticket> = rows
        .into_iter()
        .map(Ticket::try_from)
        .collect::<Result<_, _>>()?;

    Ok(Paginated { items, total, page })
}
