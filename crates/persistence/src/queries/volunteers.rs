// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Volunteer queries.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::VolunteerRow;
use crate::diesel_schema::volunteers;
use crate::error::PersistenceError;
use crate::queries::{Page, Paginated};
use harborlight_domain::Volunteer;

/// Retrieves a volunteer by id.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row no longer parses.
/// Returns `Ok(None)` if the volunteer is not found.
pub fn get_volunteer(
    conn: &mut SqliteConnection,
    volunteer_id: i64,
) -> Result<Option<Volunteer>, PersistenceError> {
    let row: Option<VolunteerRow> = volunteers::table
        .filter(volunteers::volunteer_id.eq(volunteer_id))
        .first(conn)
        .optional()?;

    row.map(Volunteer::try_from).transpose()
}

/// Lists volunteers, newest first, optionally filtered by status.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row no longer parses.
pub fn list_volunteers(
    conn: &mut SqliteConnection,
    status: Option<&str>,
    page: Page,
) -> Result<Paginated<Volunteer>, PersistenceError> {
    let total: i64 = match status {
        Some(status) => volunteers::table
            .filter(volunteers::status.eq(status))
            .count()
            .get_result(conn)?,
        None => volunteers::table.count().get_result(conn)?,
    };

    let rows: Vec<VolunteerRow> = match status {
        Some(status) => volunteers::table
            .filter(volunteers::status.eq(status))
            .order(volunteers::volunteer_id.desc())
            .limit(page.limit())
            .offset(page.offset())
            .load(conn)?,
        None => volunteers::table
            .order(volunteers::volunteer_id.desc())
            .limit(page.limit())
            .offset(page.offset())
            .load(conn)?,
    };

    let items: Vec<Volunteer> = rows
        .into_iter()
        .map(Volunteer::try_from)
        .collect::<Result<_, _>>()?;

    Ok(Paginated { items, total, page })
}
