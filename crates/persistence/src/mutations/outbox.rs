// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification outbox mutation operations.
//!
//! Notifications are enqueued in the transaction that performs the
//! triggering mutation, then dispatched later by the drain loop. Delivery
//! is at-least-once: a crash between sending and `mark_sent` re-delivers.

use crate::data_models::{NewNotification, NotificationData};
use crate::diesel_schema::notification_outbox;
use crate::error::PersistenceError;
use diesel::prelude::*;
use harborlight_domain::NotificationStatus;

/// A notification that exceeds this many attempts is parked as FAILED and
/// no longer picked up by the drain loop.
pub const MAX_DELIVERY_ATTEMPTS: i32 = 5;

/// Enqueue one notification.
///
/// # Errors
///
/// Returns an error if the database insert fails.
pub fn enqueue(
    conn: &mut SqliteConnection,
    notification: &NewNotification,
) -> Result<(), PersistenceError> {
    diesel::insert_into(notification_outbox::table)
        .values(notification)
        .execute(conn)?;
    Ok(())
}

/// Fetch up to `limit` pending notifications, oldest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn claim_pending(
    conn: &mut SqliteConnection,
    limit: i64,
) -> Result<Vec<NotificationData>, PersistenceError> {
    let pending: Vec<NotificationData> = notification_outbox::table
        .filter(notification_outbox::status.eq(NotificationStatus::Pending.as_str()))
        .order(notification_outbox::notification_id.asc())
        .limit(limit)
        .load(conn)?;
    Ok(pending)
}

/// Mark a notification as delivered.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn mark_sent(
    conn: &mut SqliteConnection,
    notification_id: i64,
    sent_at: &str,
) -> Result<(), PersistenceError> {
    diesel::update(
        notification_outbox::table
            .filter(notification_outbox::notification_id.eq(notification_id)),
    )
    .set((
        notification_outbox::status.eq(NotificationStatus::Sent.as_str()),
        notification_outbox::sent_at.eq(sent_at),
    ))
    .execute(conn)?;
    Ok(())
}

/// Record a failed delivery attempt.
///
/// The notification stays PENDING and will be retried until it has failed
/// [`MAX_DELIVERY_ATTEMPTS`] times, at which point it is parked as FAILED.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn mark_failed(
    conn: &mut SqliteConnection,
    notification_id: i64,
    error: &str,
) -> Result<(), PersistenceError> {
    conn.transaction(|conn| {
        diesel::update(
            notification_outbox::table
                .filter(notification_outbox::notification_id.eq(notification_id)),
        )
        .set((
            notification_outbox::attempts.eq(notification_outbox::attempts + 1),
            notification_outbox::last_error.eq(error),
        ))
        .execute(conn)?;

        diesel::update(
            notification_outbox::table
                .filter(notification_outbox::notification_id.eq(notification_id))
                .filter(notification_outbox::attempts.ge(MAX_DELIVERY_ATTEMPTS)),
        )
        .set(notification_outbox::status.eq(NotificationStatus::Failed.as_str()))
        .execute(conn)?;
        Ok(())
    })
}
