// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{open_db, sample_donation, sample_notification, seed_payment_method, LATER};
use crate::error::PersistenceError;
use crate::queries::Page;
use crate::Persistence;
use harborlight::{apply_status_change, Transition};
use harborlight_audit::Actor;
use harborlight_domain::{Donation, DonationStatus};

fn seed_donation(db: &mut Persistence) -> i64 {
    let method_id: i64 = seed_payment_method(db, 0, true);
    match db.create_donation(
        &sample_donation(method_id),
        &Actor::public("ada@example.org"),
        "25.00 ONE_TIME",
        &[],
    ) {
        Ok(id) => id,
        Err(e) => panic!("Failed to seed donation: {e}"),
    }
}

#[test]
fn test_status_update_bumps_revision_and_appends_audit() {
    let mut db: Persistence = open_db();
    let donation_id: i64 = seed_donation(&mut db);

    let transition: Transition<DonationStatus> = apply_status_change(
        donation_id,
        DonationStatus::Pending,
        DonationStatus::Completed,
        1,
        Actor::admin("root"),
        None,
    );
    if let Err(e) = db.update_donation_status(&transition, LATER, &[]) {
        panic!("Status update failed: {e}");
    }

    let stored: Donation = match db.get_donation(donation_id) {
        Ok(Some(donation)) => donation,
        Ok(None) => panic!("Donation disappeared"),
        Err(e) => panic!("Failed to load donation: {e}"),
    };
    assert_eq!(stored.status, DonationStatus::Completed);
    assert_eq!(stored.revision, 2);
    assert_eq!(stored.updated_at, LATER);

    let log = match db.list_audit_entries(Some("Donation"), Some(donation_id), Page::default()) {
        Ok(log) => log,
        Err(e) => panic!("Failed to list audit entries: {e}"),
    };
    // Creation entry plus the status change, newest first.
    assert_eq!(log.total, 2);
    assert_eq!(
        log.items[0].description,
        "Donation status PENDING -> COMPLETED"
    );
}

#[test]
fn test_status_update_enqueues_its_notifications() {
    let mut db: Persistence = open_db();
    let donation_id: i64 = seed_donation(&mut db);

    let transition: Transition<DonationStatus> = apply_status_change(
        donation_id,
        DonationStatus::Pending,
        DonationStatus::Completed,
        1,
        Actor::admin("root"),
        None,
    );
    if let Err(e) = db.update_donation_status(
        &transition,
        LATER,
        &[
            sample_notification("ada@example.org"),
            sample_notification("ops@harborlight.org"),
        ],
    ) {
        panic!("Status update failed: {e}");
    }

    let pending = match db.claim_pending_notifications(10) {
        Ok(pending) => pending,
        Err(e) => panic!("Failed to claim pending notifications: {e}"),
    };
    assert_eq!(pending.len(), 2);
    assert_eq!(pending[0].recipient, "ada@example.org");
    assert_eq!(pending[1].recipient, "ops@harborlight.org");
}

#[test]
fn test_reapplying_the_same_status_is_audited_again() {
    let mut db: Persistence = open_db();
    let donation_id: i64 = seed_donation(&mut db);

    let transition: Transition<DonationStatus> = apply_status_change(
        donation_id,
        DonationStatus::Pending,
        DonationStatus::Pending,
        1,
        Actor::admin("root"),
        None,
    );
    if let Err(e) = db.update_donation_status(&transition, LATER, &[]) {
        panic!("Status update failed: {e}");
    }

    let log = match db.list_audit_entries(Some("Donation"), Some(donation_id), Page::default()) {
        Ok(log) => log,
        Err(e) => panic!("Failed to list audit entries: {e}"),
    };
    assert_eq!(log.total, 2);
    assert_eq!(
        log.items[0].description,
        "Donation status PENDING -> PENDING"
    );
}

#[test]
fn test_stale_revision_conflicts_without_audit_entry() {
    let mut db: Persistence = open_db();
    let donation_id: i64 = seed_donation(&mut db);

    let first: Transition<DonationStatus> = apply_status_change(
        donation_id,
        DonationStatus::Pending,
        DonationStatus::Completed,
        1,
        Actor::admin("root"),
        None,
    );
    if let Err(e) = db.update_donation_status(&first, LATER, &[]) {
        panic!("First update failed: {e}");
    }

    // A second writer still holding revision 1.
    let stale: Transition<DonationStatus> = apply_status_change(
        donation_id,
        DonationStatus::Pending,
        DonationStatus::Failed,
        1,
        Actor::admin("second"),
        None,
    );
    match db.update_donation_status(&stale, LATER, &[]) {
        Err(PersistenceError::RevisionConflict {
            resource,
            resource_id,
            expected,
            actual,
        }) => {
            assert_eq!(resource, "Donation");
            assert_eq!(resource_id, donation_id);
            assert_eq!(expected, 1);
            assert_eq!(actual, 2);
        }
        Err(e) => panic!("Expected revision conflict, got: {e}"),
        Ok(()) => panic!("Stale update unexpectedly succeeded"),
    }

    let stored: Donation = match db.get_donation(donation_id) {
        Ok(Some(donation)) => donation,
        Ok(None) => panic!("Donation disappeared"),
        Err(e) => panic!("Failed to load donation: {e}"),
    };
    assert_eq!(stored.status, DonationStatus::Completed);

    let log = match db.list_audit_entries(Some("Donation"), Some(donation_id), Page::default()) {
        Ok(log) => log,
        Err(e) => panic!("Failed to list audit entries: {e}"),
    };
    assert_eq!(log.total, 2, "rejected update must not be audited");
}

#[test]
fn test_update_of_missing_row_is_not_found_and_not_audited() {
    let mut db: Persistence = open_db();

    let transition: Transition<DonationStatus> = apply_status_change(
        999,
        DonationStatus::Pending,
        DonationStatus::Completed,
        1,
        Actor::admin("root"),
        None,
    );
    match db.update_donation_status(&transition, LATER, &[]) {
        Err(PersistenceError::NotFound) => {}
        Err(e) => panic!("Expected NotFound, got: {e}"),
        Ok(()) => panic!("Update of missing row unexpectedly succeeded"),
    }

    let log = match db.list_audit_entries(Some("Donation"), Some(999), Page::default()) {
        Ok(log) => log,
        Err(e) => panic!("Failed to list audit entries: {e}"),
    };
    assert_eq!(log.total, 0);
}
