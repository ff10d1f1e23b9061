// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The status-transition engine.
//!
//! Any status may be set to any other status, including itself;
//! accountability comes from the audit trail rather than a transition
//! graph. Every application of the engine produces exactly one audit
//! record naming both the previous and the new status.

use harborlight_audit::{Actor, AuditRecord};
use harborlight_domain::{
    ApplicationStatus, DeliveryStatus, DonationStatus, TicketStatus, VolunteerStatus,
};

/// A status vocabulary the transition engine can drive.
pub trait Status: Copy + Eq + std::fmt::Debug {
    /// The resource kind the vocabulary belongs to, as it appears in
    /// audit descriptions.
    const RESOURCE: &'static str;

    /// Returns the string representation of the status.
    fn as_str(&self) -> &'static str;
}

impl Status for DonationStatus {
    const RESOURCE: &'static str = "Donation";

    fn as_str(&self) -> &'static str {
        Self::as_str(self)
    }
}

impl Status for ApplicationStatus {
    const RESOURCE: &'static str = "AssistanceApplication";

    fn as_str(&self) -> &'static str {
        Self::as_str(self)
    }
}

impl Status for VolunteerStatus {
    const RESOURCE: &'static str = "Volunteer";

    fn as_str(&self) -> &'static str {
        Self::as_str(self)
    }
}

impl Status for DeliveryStatus {
    const RESOURCE: &'static str = "DeliveryRequest";

    fn as_str(&self) -> &'static str {
        Self::as_str(self)
    }
}

impl Status for TicketStatus {
    const RESOURCE: &'static str = "Ticket";

    fn as_str(&self) -> &'static str {
        Self::as_str(self)
    }
}

/// The outcome of applying a status change.
///
/// Carries both statuses and the audit record the persistence layer must
/// append in the same transaction as the update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition<S: Status> {
    /// The id of the record the change applies to.
    pub resource_id: i64,
    /// The status before the change.
    pub previous: S,
    /// The status after the change.
    pub new: S,
    /// The revision the caller read the record at. The write must fail if
    /// the stored revision no longer matches.
    pub expected_revision: i64,
    /// The audit record describing the change.
    pub audit: AuditRecord,
}

/// Applies a status change.
///
/// The change is unconditional: administrators may move a record between
/// any two statuses, and re-applying the current status is permitted and
/// still audited.
///
/// # Arguments
///
/// * `resource_id` - The id of the record being changed
/// * `current` - The status the caller read
/// * `requested` - The status to set
/// * `expected_revision` - The revision the caller read the record at
/// * `actor` - The actor performing the change
/// * `notes` - Optional operator notes, appended to the audit description
#[must_use]
pub fn apply_status_change<S: Status>(
    resource_id: i64,
    current: S,
    requested: S,
    expected_revision: i64,
    actor: Actor,
    notes: Option<&str>,
) -> Transition<S> {
    let mut audit: AuditRecord = AuditRecord::status_change(
        actor,
        S::RESOURCE,
        resource_id,
        current.as_str(),
        requested.as_str(),
    );
    if let Some(notes) = notes {
        audit.description.push_str(&format!(" ({notes})"));
    }

    Transition {
        resource_id,
        previous: current,
        new: requested,
        expected_revision,
        audit,
    }
}
