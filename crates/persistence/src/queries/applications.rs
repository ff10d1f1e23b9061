// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assistance application queries.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::ApplicationRow;
use crate::diesel_schema::assistance_applications;
use crate::error::PersistenceError;
use crate::queries::{Page, Paginated};
use harborlight_domain::AssistanceApplication;

/// Retrieves an application by id.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row no longer parses.
/// Returns `Ok(None)` if the application is not found.
pub fn get_application(
    conn: &mut SqliteConnection,
    application_id: i64,
) -> Result<Option<AssistanceApplication>, PersistenceError> {
    let row: Option<ApplicationRow> = assistance_applications::table
        .filter(assistance_applications::application_id.eq(application_id))
        .first(conn)
        .optional()?;

    row.map(AssistanceApplication::try_from).transpose()
}

/// Lists applications, newest first, optionally filtered by status and
/// submission month (`"YYYY-MM"`).
///
/// # Errors
///
/// Returns an error if the query fails or a stored row no longer parses.
pub fn list_applications(
    conn: &mut SqliteConnection,
    status: Option<&str>,
    submission_month: Option<&str>,
    page: Page,
) -> Result<Paginated<AssistanceApplication>, PersistenceError> {
    let mut count_query = assistance_applications::table.into_boxed();
    let mut rows_query = assistance_applications::table.into_boxed();

    if let Some(status) = status {
        count_query = count_query.filter(assistance_applications::status.eq(status.to_string()));
        rows_query = rows_query.filter(assistance_applications::status.eq(status.to_string()));
    }
    if let Some(month) = submission_month {
        count_query =
            count_query.filter(assistance_applications::submission_month.eq(month.to_string()));
        rows_query =
            rows_query.filter(assistance_applications::submission_month.eq(month.to_string()));
    }

    let total: i64 = count_query.count().get_result(conn)?;
    let rows: Vec<ApplicationRow> = rows_query
        .order(assistance_applications::application_id.desc())
        .limit(page.limit())
        .offset(page.offset())
        .load(conn)?;

    let items: Vec<AssistanceApplication> = rows
        .into_iter()
        .map(AssistanceApplication::try_from)
        .collect::<Result<_, _>>()?;

    Ok(Paginated { items, total, page })
}
