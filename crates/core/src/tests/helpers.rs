// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use harborlight_domain::{
    ApplicationStatus, AssistanceApplication, Event, PaymentMethod, PaymentMethodType, TicketType,
};

pub fn sample_application() -> AssistanceApplication {
    AssistanceApplication {
        id: Some(11),
        applicant_name: String::from("Grace Hopper"),
        applicant_email: String::from("grace@example.org"),
        diagnosis_date: String::from("2025-11-03"),
        monthly_income_cents: 120_000,
        application_pdf: String::from("https://files.example.org/app.pdf"),
        diagnosis_letter: String::from("https://files.example.org/letter.pdf"),
        personal_statement: None,
        status: ApplicationStatus::UnderReview,
        grant_amount_cents: None,
        submission_month: String::from("2026-03"),
        reviewed_by: None,
        reviewed_at: None,
        review_notes: None,
        created_at: String::from("2026-03-02T09:00:00Z"),
        updated_at: String::from("2026-03-02T09:00:00Z"),
        revision: 1,
    }
}

pub fn sample_event(base_price_cents: i64) -> Event {
    Event {
        id: Some(4),
        name: String::from("Spring Gala"),
        description: None,
        starts_at: String::from("2026-05-20T18:00:00Z"),
        location: Some(String::from("City Hall")),
        base_price_cents,
    }
}

pub fn sample_ticket_type(event_id: i64, price_cents: i64) -> TicketType {
    TicketType {
        id: Some(9),
        event_id,
        name: String::from("VIP"),
        price_cents,
    }
}

pub fn sample_payment_method(fee_bps: i64, is_active: bool) -> PaymentMethod {
    PaymentMethod {
        id: Some(2),
        method_type: PaymentMethodType::BankAccount,
        label: String::from("Bank wire"),
        instructions: String::from("IBAN DE00 0000 0000"),
        fee_bps,
        is_active,
        is_default: false,
        created_at: String::from("2026-01-01T00:00:00Z"),
        updated_at: String::from("2026-01-01T00:00:00Z"),
    }
}
