// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assistance application mutation operations.

use crate::data_models::{NewApplication, NewNotification};
use crate::diesel_schema::assistance_applications;
use crate::error::PersistenceError;
use crate::mutations::{audit, outbox};
use crate::sqlite::get_last_insert_rowid;
use diesel::prelude::*;
use harborlight::{ReviewOutcome, Status};
use harborlight_audit::{Actor, AuditRecord};
use harborlight_domain::ApplicationStatus;

/// Insert an application, its creation audit record, and any notifications
/// in one transaction. Returns the new application id.
///
/// # Errors
///
/// Returns an error if any of the database writes fail.
pub fn create_application(
    conn: &mut SqliteConnection,
    application: &NewApplication,
    actor: &Actor,
    summary: &str,
    notifications: &[NewNotification],
) -> Result<i64, PersistenceError> {
    conn.transaction(|conn| {
        diesel::insert_into(assistance_applications::table)
            .values(application)
            .execute(conn)?;
        let application_id: i64 = get_last_insert_rowid(conn)?;

        let record: AuditRecord = AuditRecord::creation(
            actor.clone(),
            ApplicationStatus::RESOURCE,
            application_id,
            summary,
        );
        audit::insert_audit_record(conn, &record, &application.created_at)?;

        for notification in notifications {
            outbox::enqueue(conn, notification)?;
        }
        Ok(application_id)
    })
}

/// Persist a review decision.
///
/// Unlike the plain status update, a review also sets the grant amount,
/// the reviewer fields, and the notes. The revision check and the audit
/// record follow the same rules.
///
/// # Errors
///
/// Returns `NotFound` if the application no longer exists,
/// `RevisionConflict` if it was reviewed concurrently, or a database error
/// if a write fails.
pub fn record_review(
    conn: &mut SqliteConnection,
    outcome: &ReviewOutcome,
    updated_at: &str,
    notifications: &[NewNotification],
) -> Result<(), PersistenceError> {
    let transition = &outcome.transition;
    let application = &outcome.application;

    conn.transaction(|conn| {
        let updated: usize = diesel::update(
            assistance_applications::table
                .filter(assistance_applications::application_id.eq(transition.resource_id))
                .filter(assistance_applications::revision.eq(transition.expected_revision)),
        )
        .set((
            assistance_applications::status.eq(transition.new.as_str()),
            assistance_applications::grant_amount_cents.eq(application.grant_amount_cents),
            assistance_applications::reviewed_by.eq(application.reviewed_by.as_deref()),
            assistance_applications::reviewed_at.eq(application.reviewed_at.as_deref()),
            assistance_applications::review_notes.eq(application.review_notes.as_deref()),
            assistance_applications::updated_at.eq(updated_at),
            assistance_applications::revision.eq(transition.expected_revision + 1),
        ))
        .execute(conn)?;

        if updated == 0 {
            let actual: Option<i64> = assistance_applications::table
                .filter(assistance_applications::application_id.eq(transition.resource_id))
                .select(assistance_applications::revision)
                .first(conn)
                .optional()?;

            return match actual {
                Some(actual) => Err(PersistenceError::RevisionConflict {
                    resource: ApplicationStatus::RESOURCE,
                    resource_id: transition.resource_id,
                    expected: transition.expected_revision,
                    actual,
                }),
                None => Err(PersistenceError::NotFound),
            };
        }

        audit::insert_audit_record(conn, &transition.audit, updated_at)?;
        for notification in notifications {
            outbox::enqueue(conn, notification)?;
        }
        Ok(())
    })
}
