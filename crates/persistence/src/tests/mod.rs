// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod deliveries;
mod outbox;
mod status_updates;

use crate::data_models::{
    NewDeliveryOption, NewDonation, NewMember, NewNotification, NewPaymentMethod,
};
use crate::Persistence;

const NOW: &str = "2026-01-15T12:00:00Z";
const LATER: &str = "2026-01-15T13:00:00Z";

fn open_db() -> Persistence {
    match Persistence::new_in_memory() {
        Ok(db) => db,
        Err(e) => panic!("Failed to open in-memory database: {e}"),
    }
}

fn seed_payment_method(db: &mut Persistence, fee_bps: i64, is_active: bool) -> i64 {
    let method: NewPaymentMethod = NewPaymentMethod {
        method_type: "BANK_ACCOUNT".to_string(),
        label: "Main account".to_string(),
        instructions: "Wire to IBAN XX00".to_string(),
        fee_bps,
        is_active: i32::from(is_active),
        is_default: 0,
        created_at: NOW.to_string(),
        updated_at: NOW.to_string(),
    };
    match db.create_payment_method(&method) {
        Ok(id) => id,
        Err(e) => panic!("Failed to seed payment method: {e}"),
    }
}

fn seed_member(db: &mut Persistence) -> i64 {
    let member: NewMember = NewMember {
        name: "Rosa Marchetti".to_string(),
        email: "rosa@example.org".to_string(),
        has_delivery_request: 0,
        created_at: NOW.to_string(),
    };
    match db.create_member(&member) {
        Ok(id) => id,
        Err(e) => panic!("Failed to seed member: {e}"),
    }
}

fn seed_delivery_option(db: &mut Persistence, is_active: bool) -> i64 {
    let option: NewDeliveryOption = NewDeliveryOption {
        label: "Weekly groceries".to_string(),
        description: None,
        is_active: i32::from(is_active),
    };
    match db.create_delivery_option(&option) {
        Ok(id) => id,
        Err(e) => panic!("Failed to seed delivery option: {e}"),
    }
}

fn sample_donation(payment_method_id: i64) -> NewDonation {
    NewDonation {
        donor_name: "Ada Berg".to_string(),
        donor_email: "ada@example.org".to_string(),
        amount_cents: 2_500,
        frequency: "ONE_TIME".to_string(),
        payment_method_id,
        proof_of_payment: None,
        status: "PENDING".to_string(),
        created_at: NOW.to_string(),
        updated_at: NOW.to_string(),
        revision: 1,
    }
}

fn sample_notification(recipient: &str) -> NewNotification {
    NewNotification {
        kind: "donation_received".to_string(),
        recipient: recipient.to_string(),
        subject: "New donation".to_string(),
        body: "A donation of 25.00 was received.".to_string(),
        status: "PENDING".to_string(),
        attempts: 0,
        created_at: NOW.to_string(),
    }
}
