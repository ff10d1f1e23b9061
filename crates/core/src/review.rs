// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assistance application review.
//!
//! A review writes the status, the grant amount, the reviewer, and the
//! review timestamp together. Re-reviewing overwrites the prior review
//! fields; the audit trail keeps the history.

use crate::error::CoreError;
use crate::transition::{Transition, apply_status_change};
use harborlight_audit::Actor;
use harborlight_domain::{
    ApplicationStatus, AssistanceApplication, DomainError, validate_grant_amount,
};

/// The outcome of reviewing an assistance application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewOutcome {
    /// The application with the review fields written.
    pub application: AssistanceApplication,
    /// The status transition, carrying the audit record.
    pub transition: Transition<ApplicationStatus>,
}

/// Reviews an assistance application.
///
/// A grant amount is required when approving and must fall within the
/// permitted band; it is preserved when issuing an already-approved
/// grant. `reviewed_by` and `reviewed_at` are always set together.
///
/// # Arguments
///
/// * `application` - The application as read from storage
/// * `requested` - The status to set
/// * `grant_amount_cents` - The grant, in cents, when approving
/// * `review_notes` - Optional notes, overwriting any prior notes
/// * `reviewer` - The administrator performing the review
/// * `now` - RFC 3339 timestamp of the review
///
/// # Errors
///
/// Returns `CoreError::DomainViolation` when the grant amount is missing
/// on approval or falls outside the permitted band.
pub fn review_application(
    application: &AssistanceApplication,
    requested: ApplicationStatus,
    grant_amount_cents: Option<i64>,
    review_notes: Option<String>,
    reviewer: &Actor,
    now: &str,
) -> Result<ReviewOutcome, CoreError> {
    let resource_id: i64 = application.id.unwrap_or_default();

    let grant: Option<i64> = match requested {
        ApplicationStatus::Approved => {
            let cents: i64 = grant_amount_cents.ok_or(CoreError::DomainViolation(
                DomainError::IncompleteReview {
                    reason: "a grant amount is required when approving",
                },
            ))?;
            validate_grant_amount(cents)?;
            Some(cents)
        }
        ApplicationStatus::GrantIssued => {
            // Issuing keeps the approved grant unless the reviewer restates it.
            let cents: Option<i64> = grant_amount_cents.or(application.grant_amount_cents);
            if let Some(cents) = cents {
                validate_grant_amount(cents)?;
            }
            cents
        }
        ApplicationStatus::Submitted
        | ApplicationStatus::UnderReview
        | ApplicationStatus::Rejected => {
            if let Some(cents) = grant_amount_cents {
                validate_grant_amount(cents)?;
            }
            grant_amount_cents.or(application.grant_amount_cents)
        }
    };

    let transition: Transition<ApplicationStatus> = apply_status_change(
        resource_id,
        application.status,
        requested,
        application.revision,
        reviewer.clone(),
        None,
    );

    let mut reviewed: AssistanceApplication = application.clone();
    reviewed.status = requested;
    reviewed.grant_amount_cents = grant;
    reviewed.review_notes = review_notes.or(reviewed.review_notes);
    reviewed.reviewed_by = Some(reviewer.id.clone());
    reviewed.reviewed_at = Some(now.to_string());
    reviewed.updated_at = now.to_string();

    Ok(ReviewOutcome {
        application: reviewed,
        transition,
    })
}
