// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{sample_event, sample_payment_method, sample_ticket_type};
use crate::{CoreError, price_ticket_purchase};
use harborlight_domain::DomainError;

#[test]
fn test_derived_amount_with_five_percent_fee() {
    // 50.00 x 2 at a 5% fee comes to 105.00.
    let result = price_ticket_purchase(
        &sample_event(5_000),
        None,
        &sample_payment_method(500, true),
        2,
    );
    assert_eq!(result, Ok(10_500));
}

#[test]
fn test_ticket_type_price_wins_over_base_price() {
    let event = sample_event(5_000);
    let tier = sample_ticket_type(4, 12_000);
    let result = price_ticket_purchase(&event, Some(&tier), &sample_payment_method(0, true), 1);
    assert_eq!(result, Ok(12_000));
}

#[test]
fn test_inactive_payment_method_rejected() {
    let result = price_ticket_purchase(
        &sample_event(5_000),
        None,
        &sample_payment_method(500, false),
        1,
    );
    match result {
        Err(CoreError::DomainViolation(DomainError::InactivePaymentMethod(2))) => {}
        other => panic!("expected InactivePaymentMethod, got {other:?}"),
    }
}

#[test]
fn test_zero_quantity_rejected() {
    let result = price_ticket_purchase(
        &sample_event(5_000),
        None,
        &sample_payment_method(500, true),
        0,
    );
    match result {
        Err(CoreError::DomainViolation(DomainError::InvalidQuantity(0))) => {}
        other => panic!("expected InvalidQuantity, got {other:?}"),
    }
}
