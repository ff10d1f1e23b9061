// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Transition, apply_status_change};
use harborlight_audit::Actor;
use harborlight_domain::{DeliveryStatus, DonationStatus, TicketStatus};

#[test]
fn test_transition_carries_both_statuses() {
    let transition: Transition<DonationStatus> = apply_status_change(
        42,
        DonationStatus::Pending,
        DonationStatus::Completed,
        1,
        Actor::admin("root"),
        None,
    );

    assert_eq!(transition.resource_id, 42);
    assert_eq!(transition.previous, DonationStatus::Pending);
    assert_eq!(transition.new, DonationStatus::Completed);
    assert_eq!(transition.expected_revision, 1);
}

#[test]
fn test_transition_audit_description_format() {
    let transition: Transition<DonationStatus> = apply_status_change(
        42,
        DonationStatus::Pending,
        DonationStatus::Completed,
        1,
        Actor::admin("root"),
        None,
    );

    assert_eq!(
        transition.audit.description,
        "Donation status PENDING -> COMPLETED"
    );
    assert_eq!(transition.audit.resource, "Donation");
    assert_eq!(transition.audit.resource_id, 42);
    assert_eq!(transition.audit.action, "status_change");
}

#[test]
fn test_notes_are_appended_to_the_audit_description() {
    let transition: Transition<DonationStatus> = apply_status_change(
        42,
        DonationStatus::Pending,
        DonationStatus::Refunded,
        1,
        Actor::admin("root"),
        Some("duplicate payment"),
    );

    assert_eq!(
        transition.audit.description,
        "Donation status PENDING -> REFUNDED (duplicate payment)"
    );
}

#[test]
fn test_any_status_reaches_any_other() {
    // No transition graph: a delivered request may be reopened.
    let transition: Transition<DeliveryStatus> = apply_status_change(
        7,
        DeliveryStatus::Delivered,
        DeliveryStatus::Pending,
        3,
        Actor::admin("ops"),
        None,
    );

    assert_eq!(
        transition.audit.description,
        "DeliveryRequest status DELIVERED -> PENDING"
    );
}

#[test]
fn test_reapplying_same_status_is_audited() {
    let transition: Transition<TicketStatus> = apply_status_change(
        5,
        TicketStatus::Approved,
        TicketStatus::Approved,
        2,
        Actor::admin("door"),
        None,
    );

    assert_eq!(transition.previous, transition.new);
    assert_eq!(
        transition.audit.description,
        "Ticket status APPROVED -> APPROVED"
    );
}
