// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod money;
mod status;
mod submission_window;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use money::{
    FeeRate, GRANT_MAX_CENTS, GRANT_MIN_CENTS, paid_amount, validate_grant_amount,
};
pub use status::{
    ApplicationStatus, DeliveryStatus, DonationStatus, NotificationStatus, TicketStatus,
    VolunteerStatus,
};
pub use submission_window::{SubmissionWindow, WINDOW_CLOSES_AFTER, WINDOW_OPENS_ON};
pub use types::{
    AssistanceApplication, DeliveryOption, DeliveryRequest, Donation, DonationFrequency, Event,
    Member, PaymentMethod, PaymentMethodType, Ticket, TicketType, Volunteer,
};
pub use validation::{
    FieldError, validate_application_input, validate_delivery_request_input,
    validate_donation_input, validate_event_input, validate_member_input,
    validate_payment_method_input, validate_ticket_input, validate_volunteer_input,
};
