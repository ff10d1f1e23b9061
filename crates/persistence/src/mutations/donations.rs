// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Donation mutation operations.

use crate::data_models::{NewDonation, NewNotification};
use crate::diesel_schema::donations;
use crate::error::PersistenceError;
use crate::mutations::{audit, outbox};
use crate::sqlite::get_last_insert_rowid;
use diesel::prelude::*;
use harborlight::Status;
use harborlight_audit::{Actor, AuditRecord};
use harborlight_domain::DonationStatus;

/// Insert a donation, its creation audit record, and any notifications in
/// one transaction. Returns the new donation id.
///
/// # Errors
///
/// Returns an error if any of the database writes fail.
pub fn create_donation(
    conn: &mut SqliteConnection,
    donation: &NewDonation,
    actor: &Actor,
    summary: &str,
    notifications: &[NewNotification],
) -> Result<i64, PersistenceError> {
    conn.transaction(|conn| {
        diesel::insert_into(donations::table)
            .values(donation)
            .execute(conn)?;
        let donation_id: i64 = get_last_insert_rowid(conn)?;

        let record: AuditRecord = AuditRecord::creation(
            actor.clone(),
            DonationStatus::RESOURCE,
            donation_id,
            summary,
        );
        audit::insert_audit_record(conn, &record, &donation.created_at)?;

        for notification in notifications {
            outbox::enqueue(conn, notification)?;
        }
        Ok(donation_id)
    })
}
