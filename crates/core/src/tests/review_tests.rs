// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::sample_application;
use crate::{CoreError, ReviewOutcome, review_application};
use harborlight_audit::Actor;
use harborlight_domain::{ApplicationStatus, AssistanceApplication, DomainError};

const NOW: &str = "2026-03-05T10:00:00Z";

#[test]
fn test_approval_writes_review_fields_together() {
    let application: AssistanceApplication = sample_application();
    let outcome: ReviewOutcome = match review_application(
        &application,
        ApplicationStatus::Approved,
        Some(75_000),
        Some(String::from("documents verified")),
        &Actor::admin("case-worker"),
        NOW,
    ) {
        Ok(outcome) => outcome,
        Err(e) => panic!("review failed: {e}"),
    };

    assert_eq!(outcome.application.status, ApplicationStatus::Approved);
    assert_eq!(outcome.application.grant_amount_cents, Some(75_000));
    assert_eq!(
        outcome.application.reviewed_by,
        Some(String::from("case-worker"))
    );
    assert_eq!(outcome.application.reviewed_at, Some(String::from(NOW)));
    assert_eq!(
        outcome.application.review_notes,
        Some(String::from("documents verified"))
    );
    assert_eq!(
        outcome.transition.audit.description,
        "AssistanceApplication status UNDER_REVIEW -> APPROVED"
    );
}

#[test]
fn test_approval_requires_grant_amount() {
    let application: AssistanceApplication = sample_application();
    let result = review_application(
        &application,
        ApplicationStatus::Approved,
        None,
        None,
        &Actor::admin("case-worker"),
        NOW,
    );

    match result {
        Err(CoreError::DomainViolation(DomainError::IncompleteReview { .. })) => {}
        other => panic!("expected IncompleteReview, got {other:?}"),
    }
}

#[test]
fn test_grant_amount_band_enforced() {
    let application: AssistanceApplication = sample_application();

    for cents in [49_999, 100_001, 0, -1] {
        let result = review_application(
            &application,
            ApplicationStatus::Approved,
            Some(cents),
            None,
            &Actor::admin("case-worker"),
            NOW,
        );
        match result {
            Err(CoreError::DomainViolation(DomainError::GrantAmountOutOfRange { .. })) => {}
            other => panic!("expected GrantAmountOutOfRange for {cents}, got {other:?}"),
        }
    }
}

#[test]
fn test_issuing_preserves_approved_grant() {
    let mut application: AssistanceApplication = sample_application();
    application.status = ApplicationStatus::Approved;
    application.grant_amount_cents = Some(60_000);

    let outcome: ReviewOutcome = match review_application(
        &application,
        ApplicationStatus::GrantIssued,
        None,
        None,
        &Actor::admin("treasurer"),
        NOW,
    ) {
        Ok(outcome) => outcome,
        Err(e) => panic!("review failed: {e}"),
    };

    assert_eq!(outcome.application.status, ApplicationStatus::GrantIssued);
    assert_eq!(outcome.application.grant_amount_cents, Some(60_000));
}

#[test]
fn test_re_review_overwrites_prior_review() {
    let mut application: AssistanceApplication = sample_application();
    application.status = ApplicationStatus::Rejected;
    application.reviewed_by = Some(String::from("first-reviewer"));
    application.reviewed_at = Some(String::from("2026-03-03T08:00:00Z"));
    application.review_notes = Some(String::from("missing letter"));

    let outcome: ReviewOutcome = match review_application(
        &application,
        ApplicationStatus::Approved,
        Some(50_000),
        Some(String::from("letter arrived")),
        &Actor::admin("second-reviewer"),
        NOW,
    ) {
        Ok(outcome) => outcome,
        Err(e) => panic!("review failed: {e}"),
    };

    assert_eq!(
        outcome.application.reviewed_by,
        Some(String::from("second-reviewer"))
    );
    assert_eq!(outcome.application.reviewed_at, Some(String::from(NOW)));
    assert_eq!(
        outcome.application.review_notes,
        Some(String::from("letter arrived"))
    );
}
