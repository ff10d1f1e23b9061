// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Donation queries.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::DonationRow;
use crate::diesel_schema::donations;
use crate::error::PersistenceError;
use crate::queries::{Page, Paginated};
use harborlight_domain::Donation;

/// Retrieves a donation by id.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row no longer parses.
/// Returns `Ok(None)` if the donation is not found.
pub fn get_donation(
    conn: &mut SqliteConnection,
    donation_id: i64,
) -> Result<Option<Donation>, PersistenceError> {
    let row: Option<DonationRow> = donations::table
        .filter(donations::donation_id.eq(donation_id))
        .first(conn)
        .optional()?;

    row.map(Donation::try_from).transpose()
}

/// Lists donations, newest first, optionally filtered by status.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row no longer parses.
pub fn list_donations(
    conn: &mut SqliteConnection,
    status: Option<&str>,
    page: Page,
) -> Result<Paginated<Donation>, PersistenceError> {
    let total: i64 = match status {
        Some(status) => donations::table
            .filter(donations::status.eq(status))
            .count()
            .get_result(conn)?,
        None => donations::table.count().get_result(conn)?,
    };

    let rows: Vec<DonationRow> = match status {
        Some(status) => donations::table
            .filter(donations::status.eq(status))
            .order(donations::donation_id.desc())
            .limit(page.limit())
            .offset(page.offset())
            .load(conn)?,
        None => donations::table
            .order(donations::donation_id.desc())
            .limit(page.limit())
            .offset(page.offset())
            .load(conn)?,
    };

    let items: Vec<Donation> = rows
        .into_iter()
        .map(Donation::try_from)
        .collect::<Result<_, _>>()?;

    Ok(Paginated { items, total, page })
}
