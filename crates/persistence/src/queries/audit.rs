// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit log queries.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::AuditEntryData;
use crate::diesel_schema::audit_log;
use crate::error::PersistenceError;
use crate::queries::{Page, Paginated};

/// Lists audit entries, newest first, optionally filtered by resource kind
/// and resource id.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_audit_entries(
    conn: &mut SqliteConnection,
    resource: Option<&str>,
    resource_id: Option<i64>,
    page: Page,
) -> Result<Paginated<AuditEntryData>, PersistenceError> {
    let mut count_query = audit_log::table.into_boxed();
    let mut rows_query = audit_log::table.into_boxed();

    if let Some(resource) = resource {
        count_query = count_query.filter(audit_log::resource.eq(resource.to_string()));
        rows_query = rows_query.filter(audit_log::resource.eq(resource.to_string()));
    }
    if let Some(resource_id) = resource_id {
        count_query = count_query.filter(audit_log::resource_id.eq(resource_id));
        rows_query = rows_query.filter(audit_log::resource_id.eq(resource_id));
    }

    let total: i64 = count_query.count().get_result(conn)?;
    let items: Vec<AuditEntryData> = rows_query
        .order(audit_log::entry_id.desc())
        .limit(page.limit())
        .offset(page.offset())
        .load(conn)?;

    Ok(Paginated { items, total, page })
}
