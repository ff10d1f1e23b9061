// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{admin, fixed_time, mid_month, no_notifications, open_db, utc_window, window_open};
use crate::error::ApiError;
use crate::handlers;
use crate::request_response::{ApplicationInfo, ReviewApplicationRequest, SubmitApplicationRequest};
use harborlight_domain::SubmissionWindow;
use harborlight_persistence::{Page, Persistence};

fn application_request() -> SubmitApplicationRequest {
    SubmitApplicationRequest {
        applicant_name: "Niels Holm".to_string(),
        applicant_email: "niels@example.org".to_string(),
        diagnosis_date: "2025-11-20".to_string(),
        monthly_income_cents: 120_000,
        application_pdf: "uploads/application.pdf".to_string(),
        diagnosis_letter: "uploads/letter.pdf".to_string(),
        personal_statement: None,
    }
}

fn submit(db: &mut Persistence) -> ApplicationInfo {
    match handlers::submit_application(
        db,
        application_request(),
        &utc_window(),
        &no_notifications(),
        window_open(),
    ) {
        Ok(info) => info,
        Err(e) => panic!("Failed to submit application: {e}"),
    }
}

#[test]
fn test_submission_inside_the_window_is_tagged_with_the_month() {
    let mut db = open_db();
    let info: ApplicationInfo = submit(&mut db);
    assert_eq!(info.status, "SUBMITTED");
    assert_eq!(info.submission_month, "2026-01");
    assert_eq!(info.revision, 1);
    assert_eq!(info.grant_amount_cents, None);
}

#[test]
fn test_submission_outside_the_window_is_rejected() {
    let mut db = open_db();
    let result = handlers::submit_application(
        &mut db,
        application_request(),
        &utc_window(),
        &no_notifications(),
        mid_month(),
    );
    match result {
        Err(ApiError::WindowClosed { .. }) => {}
        other => panic!("Expected the window to be closed, got {other:?}"),
    }

    // The rejection must leave nothing behind.
    let listed = match handlers::list_applications(&mut db, None, None, Page::default()) {
        Ok(listed) => listed,
        Err(e) => panic!("Failed to list applications: {e}"),
    };
    assert_eq!(listed.total, 0);
}

#[test]
fn test_the_window_follows_the_configured_timezone() {
    // 13:00 UTC on Jan 31 is already Feb 1 in Auckland.
    let window: SubmissionWindow = match SubmissionWindow::from_tz_name("Pacific/Auckland") {
        Ok(window) => window,
        Err(e) => panic!("Failed to build Auckland window: {e}"),
    };
    let mut db = open_db();
    let result = handlers::submit_application(
        &mut db,
        application_request(),
        &window,
        &no_notifications(),
        fixed_time("2026-01-31T13:00:00Z"),
    );
    match result {
        Ok(info) => assert_eq!(info.submission_month, "2026-02"),
        Err(e) => panic!("Expected the Auckland window to be open: {e}"),
    }
}

#[test]
fn test_approval_sets_the_grant_and_reviewer_fields() {
    let mut db = open_db();
    let created: ApplicationInfo = submit(&mut db);

    let request: ReviewApplicationRequest = ReviewApplicationRequest {
        status: "APPROVED".to_string(),
        grant_amount_cents: Some(75_000),
        review_notes: Some("meets the criteria".to_string()),
        revision: created.revision,
    };
    let reviewed = match handlers::review_application_decision(
        &mut db,
        created.id,
        request,
        &admin(),
        &no_notifications(),
        mid_month(),
    ) {
        Ok(reviewed) => reviewed,
        Err(e) => panic!("Failed to review application: {e}"),
    };
    assert_eq!(reviewed.status, "APPROVED");
    assert_eq!(reviewed.grant_amount_cents, Some(75_000));
    assert_eq!(reviewed.reviewed_by.as_deref(), Some("root"));
    assert_eq!(reviewed.reviewed_at.as_deref(), Some("2026-01-15T12:00:00Z"));
    assert_eq!(reviewed.review_notes.as_deref(), Some("meets the criteria"));
    assert_eq!(reviewed.revision, 2);
}

#[test]
fn test_the_applicant_is_notified_of_the_decision() {
    let mut db = open_db();
    let created: ApplicationInfo = submit(&mut db);

    let request: ReviewApplicationRequest = ReviewApplicationRequest {
        status: "REJECTED".to_string(),
        grant_amount_cents: None,
        review_notes: None,
        revision: created.revision,
    };
    match handlers::review_application_decision(
        &mut db,
        created.id,
        request,
        &admin(),
        &no_notifications(),
        mid_month(),
    ) {
        Ok(_) => {}
        Err(e) => panic!("Failed to review application: {e}"),
    }

    let pending = match db.claim_pending_notifications(10) {
        Ok(pending) => pending,
        Err(e) => panic!("Failed to claim notifications: {e}"),
    };
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].recipient, "niels@example.org");
    assert!(pending[0].body.contains("REJECTED"));
}

#[test]
fn test_approval_without_a_grant_amount_is_rejected() {
    let mut db = open_db();
    let created: ApplicationInfo = submit(&mut db);

    let request: ReviewApplicationRequest = ReviewApplicationRequest {
        status: "APPROVED".to_string(),
        grant_amount_cents: None,
        review_notes: None,
        revision: created.revision,
    };
    let result = handlers::review_application_decision(
        &mut db,
        created.id,
        request,
        &admin(),
        &no_notifications(),
        mid_month(),
    );
    match result {
        Err(ApiError::DomainRuleViolation { rule, .. }) => assert_eq!(rule, "complete_review"),
        other => panic!("Expected a domain rule violation, got {other:?}"),
    }
}

#[test]
fn test_a_grant_outside_the_band_is_rejected() {
    let mut db = open_db();
    let created: ApplicationInfo = submit(&mut db);

    let request: ReviewApplicationRequest = ReviewApplicationRequest {
        status: "APPROVED".to_string(),
        grant_amount_cents: Some(30_000),
        review_notes: None,
        revision: created.revision,
    };
    let result = handlers::review_application_decision(
        &mut db,
        created.id,
        request,
        &admin(),
        &no_notifications(),
        mid_month(),
    );
    match result {
        Err(ApiError::DomainRuleViolation { rule, .. }) => assert_eq!(rule, "grant_band"),
        other => panic!("Expected a domain rule violation, got {other:?}"),
    }
}

#[test]
fn test_a_stale_review_is_a_conflict() {
    let mut db = open_db();
    let created: ApplicationInfo = submit(&mut db);

    let first: ReviewApplicationRequest = ReviewApplicationRequest {
        status: "UNDER_REVIEW".to_string(),
        grant_amount_cents: None,
        review_notes: None,
        revision: 1,
    };
    match handlers::review_application_decision(
        &mut db,
        created.id,
        first,
        &admin(),
        &no_notifications(),
        mid_month(),
    ) {
        Ok(_) => {}
        Err(e) => panic!("First review should succeed: {e}"),
    }

    let stale: ReviewApplicationRequest = ReviewApplicationRequest {
        status: "REJECTED".to_string(),
        grant_amount_cents: None,
        review_notes: None,
        revision: 1,
    };
    let result = handlers::review_application_decision(
        &mut db,
        created.id,
        stale,
        &admin(),
        &no_notifications(),
        mid_month(),
    );
    match result {
        Err(ApiError::RevisionConflict {
            expected, actual, ..
        }) => {
            assert_eq!(expected, 1);
            assert_eq!(actual, 2);
        }
        other => panic!("Expected a revision conflict, got {other:?}"),
    }
}
