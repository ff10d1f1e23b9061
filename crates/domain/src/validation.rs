// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field-level validation for public submissions.
//!
//! Each validator inspects the whole input and returns every problem it
//! finds, so a caller can report all invalid fields in one response
//! instead of one at a time.

use chrono::NaiveDate;

/// A single field that failed validation, with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn require_nonempty(field: &'static str, value: &str, errors: &mut Vec<FieldError>) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "must not be empty"));
    }
}

fn require_email(field: &'static str, value: &str, errors: &mut Vec<FieldError>) {
    let trimmed: &str = value.trim();
    let looks_like_email: bool = trimmed
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !looks_like_email {
        errors.push(FieldError::new(field, "must be a valid email address"));
    }
}

fn require_date(field: &'static str, value: &str, errors: &mut Vec<FieldError>) {
    if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        errors.push(FieldError::new(field, "must be a date in YYYY-MM-DD form"));
    }
}

fn finish(errors: Vec<FieldError>) -> Result<(), Vec<FieldError>> {
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Validates a donation submission.
///
/// # Errors
///
/// Returns one `FieldError` per invalid field.
pub fn validate_donation_input(
    donor_name: &str,
    donor_email: &str,
    amount_cents: i64,
    payment_method_id: Option<i64>,
) -> Result<(), Vec<FieldError>> {
    let mut errors: Vec<FieldError> = Vec::new();
    require_nonempty("donor_name", donor_name, &mut errors);
    require_email("donor_email", donor_email, &mut errors);
    if amount_cents <= 0 {
        errors.push(FieldError::new("amount_cents", "must be greater than zero"));
    }
    if payment_method_id.is_none() {
        errors.push(FieldError::new("payment_method_id", "must be selected"));
    }
    finish(errors)
}

/// Validates an assistance application submission.
///
/// The submission window is checked separately; this validator only looks
/// at the fields themselves.
///
/// # Errors
///
/// Returns one `FieldError` per invalid field.
pub fn validate_application_input(
    applicant_name: &str,
    applicant_email: &str,
    diagnosis_date: &str,
    monthly_income_cents: i64,
    application_pdf: &str,
    diagnosis_letter: &str,
) -> Result<(), Vec<FieldError>> {
    let mut errors: Vec<FieldError> = Vec::new();
    require_nonempty("applicant_name", applicant_name, &mut errors);
    require_email("applicant_email", applicant_email, &mut errors);
    require_date("diagnosis_date", diagnosis_date, &mut errors);
    if monthly_income_cents < 0 {
        errors.push(FieldError::new(
            "monthly_income_cents",
            "must not be negative",
        ));
    }
    require_nonempty("application_pdf", application_pdf, &mut errors);
    require_nonempty("diagnosis_letter", diagnosis_letter, &mut errors);
    finish(errors)
}

/// Validates a volunteer signup.
///
/// # Errors
///
/// Returns one `FieldError` per invalid field.
pub fn validate_volunteer_input(
    full_name: &str,
    email: &str,
    interests: &[String],
) -> Result<(), Vec<FieldError>> {
    let mut errors: Vec<FieldError> = Vec::new();
    require_nonempty("full_name", full_name, &mut errors);
    require_email("email", email, &mut errors);
    if interests.is_empty() {
        errors.push(FieldError::new("interests", "must name at least one area"));
    } else if interests.iter().any(|i| i.trim().is_empty()) {
        errors.push(FieldError::new("interests", "must not contain blank entries"));
    }
    finish(errors)
}

/// Validates a member registration.
///
/// # Errors
///
/// Returns one `FieldError` per invalid field.
pub fn validate_member_input(name: &str, email: &str) -> Result<(), Vec<FieldError>> {
    let mut errors: Vec<FieldError> = Vec::new();
    require_nonempty("name", name, &mut errors);
    require_email("email", email, &mut errors);
    finish(errors)
}

/// Validates a delivery request.
///
/// Whether the referenced option is active is checked against the loaded
/// option, not here.
///
/// # Errors
///
/// Returns one `FieldError` per invalid field.
pub fn validate_delivery_request_input(delivery_address: &str) -> Result<(), Vec<FieldError>> {
    let mut errors: Vec<FieldError> = Vec::new();
    require_nonempty("delivery_address", delivery_address, &mut errors);
    finish(errors)
}

/// Validates an offline ticket purchase.
///
/// # Errors
///
/// Returns one `FieldError` per invalid field.
pub fn validate_ticket_input(
    buyer_name: &str,
    buyer_email: &str,
    quantity: i64,
) -> Result<(), Vec<FieldError>> {
    let mut errors: Vec<FieldError> = Vec::new();
    require_nonempty("buyer_name", buyer_name, &mut errors);
    require_email("buyer_email", buyer_email, &mut errors);
    if quantity < 1 {
        errors.push(FieldError::new("quantity", "must be at least 1"));
    }
    finish(errors)
}

/// Validates a payment method definition.
///
/// # Errors
///
/// Returns one `FieldError` per invalid field.
pub fn validate_payment_method_input(
    label: &str,
    instructions: &str,
    fee_percent: f64,
) -> Result<(), Vec<FieldError>> {
    let mut errors: Vec<FieldError> = Vec::new();
    require_nonempty("label", label, &mut errors);
    require_nonempty("instructions", instructions, &mut errors);
    if !fee_percent.is_finite() || fee_percent < 0.0 {
        errors.push(FieldError::new("fee_percent", "must be zero or greater"));
    }
    finish(errors)
}

/// Validates an event definition.
///
/// # Errors
///
/// Returns one `FieldError` per invalid field.
pub fn validate_event_input(
    name: &str,
    starts_at: &str,
    base_price_cents: i64,
) -> Result<(), Vec<FieldError>> {
    let mut errors: Vec<FieldError> = Vec::new();
    require_nonempty("name", name, &mut errors);
    require_nonempty("starts_at", starts_at, &mut errors);
    if base_price_cents < 0 {
        errors.push(FieldError::new("base_price_cents", "must not be negative"));
    }
    finish(errors)
}
