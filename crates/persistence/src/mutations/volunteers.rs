// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Volunteer mutation operations.

use crate::data_models::{NewNotification, NewVolunteer};
use crate::diesel_schema::volunteers;
use crate::error::PersistenceError;
use crate::mutations::{audit, outbox};
use crate::sqlite::get_last_insert_rowid;
use diesel::prelude::*;
use harborlight::Status;
use harborlight_audit::{Actor, AuditRecord};
use harborlight_domain::VolunteerStatus;

/// Insert a volunteer signup, its creation audit record, and any
/// notifications in one transaction. Returns the new volunteer id.
///
/// # Errors
///
/// Returns an error if any of the database writes fail.
pub fn create_volunteer(
    conn: &mut SqliteConnection,
    volunteer: &NewVolunteer,
    actor: &Actor,
    summary: &str,
    notifications: &[NewNotification],
) -> Result<i64, PersistenceError> {
    conn.transaction(|conn| {
        diesel::insert_into(volunteers::table)
            .values(volunteer)
            .execute(conn)?;
        let volunteer_id: i64 = get_last_insert_rowid(conn)?;

        let record: AuditRecord = AuditRecord::creation(
            actor.clone(),
            VolunteerStatus::RESOURCE,
            volunteer_id,
            summary,
        );
        audit::insert_audit_record(conn, &record, &volunteer.created_at)?;

        for notification in notifications {
            outbox::enqueue(conn, notification)?;
        }
        Ok(volunteer_id)
    })
}
