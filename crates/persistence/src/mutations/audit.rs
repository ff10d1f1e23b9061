// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit log mutation operations.
//!
//! The log is append-only. There are deliberately no update or delete
//! functions in this module.

use crate::data_models::NewAuditEntry;
use crate::diesel_schema::audit_log;
use crate::error::PersistenceError;
use diesel::prelude::*;
use harborlight_audit::AuditRecord;

/// Append one audit record.
///
/// Callers are expected to invoke this inside the same transaction as the
/// mutation the record describes.
///
/// # Errors
///
/// Returns an error if the database insert fails.
pub fn insert_audit_record(
    conn: &mut SqliteConnection,
    record: &AuditRecord,
    recorded_at: &str,
) -> Result<(), PersistenceError> {
    let entry: NewAuditEntry = NewAuditEntry {
        actor_id: record.actor.id.clone(),
        actor_type: record.actor.actor_type.clone(),
        action: record.action.clone(),
        resource: record.resource.clone(),
        resource_id: record.resource_id,
        description: record.description.clone(),
        recorded_at: recorded_at.to_string(),
    };

    diesel::insert_into(audit_log::table)
        .values(&entry)
        .execute(conn)?;
    Ok(())
}
