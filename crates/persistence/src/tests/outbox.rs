// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{open_db, sample_donation, sample_notification, seed_payment_method, LATER};
use crate::mutations::outbox::MAX_DELIVERY_ATTEMPTS;
use crate::Persistence;
use harborlight_audit::Actor;

fn seed_queued_notification(db: &mut Persistence) -> i64 {
    let method_id: i64 = seed_payment_method(db, 0, true);
    if let Err(e) = db.create_donation(
        &sample_donation(method_id),
        &Actor::public("ada@example.org"),
        "25.00 ONE_TIME",
        &[sample_notification("ops@example.org")],
    ) {
        panic!("Failed to seed donation: {e}");
    }

    let pending = match db.claim_pending_notifications(1) {
        Ok(pending) => pending,
        Err(e) => panic!("Failed to claim notifications: {e}"),
    };
    assert_eq!(pending.len(), 1);
    pending[0].notification_id
}

#[test]
fn test_mark_sent_removes_notification_from_pending() {
    let mut db: Persistence = open_db();
    let notification_id: i64 = seed_queued_notification(&mut db);

    if let Err(e) = db.mark_notification_sent(notification_id, LATER) {
        panic!("Failed to mark sent: {e}");
    }

    let pending = match db.claim_pending_notifications(10) {
        Ok(pending) => pending,
        Err(e) => panic!("Failed to claim notifications: {e}"),
    };
    assert!(pending.is_empty());
}

#[test]
fn test_failed_delivery_is_retried_until_attempt_limit() {
    let mut db: Persistence = open_db();
    let notification_id: i64 = seed_queued_notification(&mut db);

    for _ in 0..(MAX_DELIVERY_ATTEMPTS - 1) {
        if let Err(e) = db.mark_notification_failed(notification_id, "connection refused") {
            panic!("Failed to record attempt: {e}");
        }
    }

    // Still pending with the error recorded.
    let pending = match db.claim_pending_notifications(10) {
        Ok(pending) => pending,
        Err(e) => panic!("Failed to claim notifications: {e}"),
    };
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].attempts, MAX_DELIVERY_ATTEMPTS - 1);
    assert_eq!(pending[0].last_error.as_deref(), Some("connection refused"));

    // The final failure parks it.
    if let Err(e) = db.mark_notification_failed(notification_id, "connection refused") {
        panic!("Failed to record attempt: {e}");
    }
    let pending = match db.claim_pending_notifications(10) {
        Ok(pending) => pending,
        Err(e) => panic!("Failed to claim notifications: {e}"),
    };
    assert!(pending.is_empty());
}
