// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    validate_application_input, validate_donation_input, validate_payment_method_input,
    validate_ticket_input, validate_volunteer_input,
};

#[test]
fn test_valid_donation_input() {
    let result = validate_donation_input("Ada Lovelace", "ada@example.org", 2_500, Some(1));
    assert!(result.is_ok());
}

#[test]
fn test_donation_input_collects_every_problem() {
    let result = validate_donation_input("", "not-an-email", 0, None);
    match result {
        Err(errors) => {
            assert_eq!(errors.len(), 4);
            let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
            assert!(fields.contains(&"donor_name"));
            assert!(fields.contains(&"donor_email"));
            assert!(fields.contains(&"amount_cents"));
            assert!(fields.contains(&"payment_method_id"));
        }
        Ok(()) => panic!("expected validation errors"),
    }
}

#[test]
fn test_donation_rejects_negative_amount() {
    let result = validate_donation_input("Ada", "ada@example.org", -100, Some(1));
    match result {
        Err(errors) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field, "amount_cents");
        }
        Ok(()) => panic!("expected validation errors"),
    }
}

#[test]
fn test_application_input_requires_documents() {
    let result = validate_application_input(
        "Grace Hopper",
        "grace@example.org",
        "2025-11-03",
        120_000,
        "",
        "",
    );
    match result {
        Err(errors) => {
            let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
            assert!(fields.contains(&"application_pdf"));
            assert!(fields.contains(&"diagnosis_letter"));
        }
        Ok(()) => panic!("expected validation errors"),
    }
}

#[test]
fn test_application_input_rejects_malformed_date() {
    let result = validate_application_input(
        "Grace Hopper",
        "grace@example.org",
        "03/11/2025",
        120_000,
        "https://files.example.org/app.pdf",
        "https://files.example.org/letter.pdf",
    );
    match result {
        Err(errors) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field, "diagnosis_date");
        }
        Ok(()) => panic!("expected validation errors"),
    }
}

#[test]
fn test_application_input_accepts_zero_income() {
    let result = validate_application_input(
        "Grace Hopper",
        "grace@example.org",
        "2025-11-03",
        0,
        "https://files.example.org/app.pdf",
        "https://files.example.org/letter.pdf",
    );
    assert!(result.is_ok());
}

#[test]
fn test_volunteer_input_requires_interests() {
    let result = validate_volunteer_input("Lin Wen", "lin@example.org", &[]);
    match result {
        Err(errors) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field, "interests");
        }
        Ok(()) => panic!("expected validation errors"),
    }

    let blank: Vec<String> = vec![String::from("outreach"), String::from("  ")];
    assert!(validate_volunteer_input("Lin Wen", "lin@example.org", &blank).is_err());
}

#[test]
fn test_ticket_input_quantity_floor() {
    assert!(validate_ticket_input("Sam Doe", "sam@example.org", 1).is_ok());
    assert!(validate_ticket_input("Sam Doe", "sam@example.org", 0).is_err());
    assert!(validate_ticket_input("Sam Doe", "sam@example.org", -3).is_err());
}

#[test]
fn test_payment_method_input_fee_floor() {
    assert!(validate_payment_method_input("Bank wire", "IBAN DE00", 0.0).is_ok());
    assert!(validate_payment_method_input("Bank wire", "IBAN DE00", -1.0).is_err());
    assert!(validate_payment_method_input("Bank wire", "IBAN DE00", f64::INFINITY).is_err());
}
