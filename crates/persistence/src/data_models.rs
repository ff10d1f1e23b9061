// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs bridging Diesel and the domain types.
//!
//! `New*` structs are `Insertable`; `*Row` structs are `Queryable` and
//! convert into their domain counterparts via `TryFrom`, failing with
//! `CorruptRecord` when a stored status or JSON column no longer parses.

use crate::diesel_schema::{
    assistance_applications, audit_log, delivery_options, delivery_requests, donations, events,
    members, notification_outbox, operators, payment_methods, sessions, ticket_types, tickets,
    volunteers,
};
use crate::error::PersistenceError;
use diesel::prelude::*;
use harborlight_domain::{
    AssistanceApplication, DeliveryOption, DeliveryRequest, Donation, Event, Member, PaymentMethod,
    Ticket, TicketType, Volunteer,
};

const fn flag(value: i32) -> bool {
    value != 0
}

fn corrupt(table: &'static str, id: i64, e: impl std::fmt::Display) -> PersistenceError {
    PersistenceError::CorruptRecord {
        table,
        id,
        detail: e.to_string(),
    }
}

// ----------------------------------------------------------------------
// Donations
// ----------------------------------------------------------------------

#[derive(Debug, Insertable)]
#[diesel(table_name = donations)]
pub struct NewDonation {
    pub donor_name: String,
    pub donor_email: String,
    pub amount_cents: i64,
    pub frequency: String,
    pub payment_method_id: i64,
    pub proof_of_payment: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
    pub revision: i64,
}

#[derive(Debug, Queryable)]
pub struct DonationRow {
    pub donation_id: i64,
    pub donor_name: String,
    pub donor_email: String,
    pub amount_cents: i64,
    pub frequency: String,
    pub payment_method_id: i64,
    pub proof_of_payment: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
    pub revision: i64,
}

impl TryFrom<DonationRow> for Donation {
    type Error = PersistenceError;

    fn try_from(row: DonationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(row.donation_id),
            status: row
                .status
                .parse()
                .map_err(|e| corrupt("donations", row.donation_id, e))?,
            frequency: row
                .frequency
                .parse()
                .map_err(|e| corrupt("donations", row.donation_id, e))?,
            donor_name: row.donor_name,
            donor_email: row.donor_email,
            amount_cents: row.amount_cents,
            payment_method_id: row.payment_method_id,
            proof_of_payment: row.proof_of_payment,
            created_at: row.created_at,
            updated_at: row.updated_at,
            revision: row.revision,
        })
    }
}

// ----------------------------------------------------------------------
// Assistance applications
// ----------------------------------------------------------------------

#[derive(Debug, Insertable)]
#[diesel(table_name = assistance_applications)]
pub struct NewApplication {
    pub applicant_name: String,
    pub applicant_email: String,
    pub diagnosis_date: String,
    pub monthly_income_cents: i64,
    pub application_pdf: String,
    pub diagnosis_letter: String,
    pub personal_statement: Option<String>,
    pub status: String,
    pub submission_month: String,
    pub created_at: String,
    pub updated_at: String,
    pub revision: i64,
}

#[derive(Debug, Queryable)]
pub struct ApplicationRow {
    pub application_id: i64,
    pub applicant_name: String,
    pub applicant_email: String,
    pub diagnosis_date: String,
    pub monthly_income_cents: i64,
    pub application_pdf: String,
    pub diagnosis_letter: String,
    pub personal_statement: Option<String>,
    pub status: String,
    pub grant_amount_cents: Option<i64>,
    pub submission_month: String,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<String>,
    pub review_notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub revision: i64,
}

impl TryFrom<ApplicationRow> for AssistanceApplication {
    type Error = PersistenceError;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(row.application_id),
            status: row
                .status
                .parse()
                .map_err(|e| corrupt("assistance_applications", row.application_id, e))?,
            applicant_name: row.applicant_name,
            applicant_email: row.applicant_email,
            diagnosis_date: row.diagnosis_date,
            monthly_income_cents: row.monthly_income_cents,
            application_pdf: row.application_pdf,
            diagnosis_letter: row.diagnosis_letter,
            personal_statement: row.personal_statement,
            grant_amount_cents: row.grant_amount_cents,
            submission_month: row.submission_month,
            reviewed_by: row.reviewed_by,
            reviewed_at: row.reviewed_at,
            review_notes: row.review_notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
            revision: row.revision,
        })
    }
}

// ----------------------------------------------------------------------
// Volunteers
// ----------------------------------------------------------------------

#[derive(Debug, Insertable)]
#[diesel(table_name = volunteers)]
pub struct NewVolunteer {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    /// JSON array of interest strings.
    pub interests: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
    pub revision: i64,
}

#[derive(Debug, Queryable)]
pub struct VolunteerRow {
    pub volunteer_id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub interests: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
    pub revision: i64,
}

impl TryFrom<VolunteerRow> for Volunteer {
    type Error = PersistenceError;

    fn try_from(row: VolunteerRow) -> Result<Self, Self::Error> {
        let interests: Vec<String> = serde_json::from_str(&row.interests)
            .map_err(|e| corrupt("volunteers", row.volunteer_id, e))?;
        Ok(Self {
            id: Some(row.volunteer_id),
            status: row
                .status
                .parse()
                .map_err(|e| corrupt("volunteers", row.volunteer_id, e))?,
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
            interests,
            created_at: row.created_at,
            updated_at: row.updated_at,
            revision: row.revision,
        })
    }
}

// ----------------------------------------------------------------------
// Members and delivery options
// ----------------------------------------------------------------------

#[derive(Debug, Insertable)]
#[diesel(table_name = members)]
pub struct NewMember {
    pub name: String,
    pub email: String,
    pub has_delivery_request: i32,
    pub created_at: String,
}

#[derive(Debug, Queryable)]
pub struct MemberRow {
    pub member_id: i64,
    pub name: String,
    pub email: String,
    pub has_delivery_request: i32,
    pub created_at: String,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Self {
            id: Some(row.member_id),
            name: row.name,
            email: row.email,
            has_delivery_request: flag(row.has_delivery_request),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = delivery_options)]
pub struct NewDeliveryOption {
    pub label: String,
    pub description: Option<String>,
    pub is_active: i32,
}

#[derive(Debug, Queryable)]
pub struct DeliveryOptionRow {
    pub delivery_option_id: i64,
    pub label: String,
    pub description: Option<String>,
    pub is_active: i32,
}

impl From<DeliveryOptionRow> for DeliveryOption {
    fn from(row: DeliveryOptionRow) -> Self {
        Self {
            id: Some(row.delivery_option_id),
            label: row.label,
            description: row.description,
            is_active: flag(row.is_active),
        }
    }
}

// ----------------------------------------------------------------------
// Delivery requests
// ----------------------------------------------------------------------

#[derive(Debug, Insertable)]
#[diesel(table_name = delivery_requests)]
pub struct NewDeliveryRequest {
    pub member_id: i64,
    pub delivery_option_id: i64,
    pub delivery_address: String,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
    pub revision: i64,
}

#[derive(Debug, Queryable)]
pub struct DeliveryRequestRow {
    pub delivery_request_id: i64,
    pub member_id: i64,
    pub delivery_option_id: i64,
    pub delivery_address: String,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
    pub revision: i64,
}

impl TryFrom<DeliveryRequestRow> for DeliveryRequest {
    type Error = PersistenceError;

    fn try_from(row: DeliveryRequestRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(row.delivery_request_id),
            status: row
                .status
                .parse()
                .map_err(|e| corrupt("delivery_requests", row.delivery_request_id, e))?,
            member_id: row.member_id,
            delivery_option_id: row.delivery_option_id,
            delivery_address: row.delivery_address,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
            revision: row.revision,
        })
    }
}

// ----------------------------------------------------------------------
// Events, ticket types, tickets
// ----------------------------------------------------------------------

#[derive(Debug, Insertable)]
#[diesel(table_name = events)]
pub struct NewEvent {
    pub name: String,
    pub description: Option<String>,
    pub starts_at: String,
    pub location: Option<String>,
    pub base_price_cents: i64,
}

#[derive(Debug, Queryable)]
pub struct EventRow {
    pub event_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub starts_at: String,
    pub location: Option<String>,
    pub base_price_cents: i64,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Self {
            id: Some(row.event_id),
            name: row.name,
            description: row.description,
            starts_at: row.starts_at,
            location: row.location,
            base_price_cents: row.base_price_cents,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = ticket_types)]
pub struct NewTicketType {
    pub event_id: i64,
    pub name: String,
    pub price_cents: i64,
}

#[derive(Debug, Queryable)]
pub struct TicketTypeRow {
    pub ticket_type_id: i64,
    pub event_id: i64,
    pub name: String,
    pub price_cents: i64,
}

impl From<TicketTypeRow> for TicketType {
    fn from(row: TicketTypeRow) -> Self {
        Self {
            id: Some(row.ticket_type_id),
            event_id: row.event_id,
            name: row.name,
            price_cents: row.price_cents,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = tickets)]
pub struct NewTicket {
    pub event_id: i64,
    pub ticket_type_id: Option<i64>,
    pub buyer_name: String,
    pub buyer_email: String,
    pub quantity: i64,
    pub paid_amount_cents: i64,
    pub proof_of_payment: Option<String>,
    pub checkin_code: String,
    pub payment_method_id: i64,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
    pub revision: i64,
}

#[derive(Debug, Queryable)]
pub struct TicketRow {
    pub ticket_id: i64,
    pub event_id: i64,
    pub ticket_type_id: Option<i64>,
    pub buyer_name: String,
    pub buyer_email: String,
    pub quantity: i64,
    pub paid_amount_cents: i64,
    pub proof_of_payment: Option<String>,
    pub checkin_code: String,
    pub payment_method_id: i64,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
    pub revision: i64,
}

impl TryFrom<TicketRow> for Ticket {
    type Error = PersistenceError;

    fn try_from(row: TicketRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(row.ticket_id),
            status: row
                .status
                .parse()
                .map_err(|e| corrupt("tickets", row.ticket_id, e))?,
            event_id: row.event_id,
            ticket_type_id: row.ticket_type_id,
            buyer_name: row.buyer_name,
            buyer_email: row.buyer_email,
            quantity: row.quantity,
            paid_amount_cents: row.paid_amount_cents,
            proof_of_payment: row.proof_of_payment,
            checkin_code: row.checkin_code,
            payment_method_id: row.payment_method_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            revision: row.revision,
        })
    }
}

// ----------------------------------------------------------------------
// Payment methods
// ----------------------------------------------------------------------

#[derive(Debug, Insertable)]
#[diesel(table_name = payment_methods)]
pub struct NewPaymentMethod {
    pub method_type: String,
    pub label: String,
    pub instructions: String,
    pub fee_bps: i64,
    pub is_active: i32,
    pub is_default: i32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Queryable)]
pub struct PaymentMethodRow {
    pub payment_method_id: i64,
    pub method_type: String,
    pub label: String,
    pub instructions: String,
    pub fee_bps: i64,
    pub is_active: i32,
    pub is_default: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<PaymentMethodRow> for PaymentMethod {
    type Error = PersistenceError;

    fn try_from(row: PaymentMethodRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(row.payment_method_id),
            method_type: row
                .method_type
                .parse()
                .map_err(|e| corrupt("payment_methods", row.payment_method_id, e))?,
            label: row.label,
            instructions: row.instructions,
            fee_bps: row.fee_bps,
            is_active: flag(row.is_active),
            is_default: flag(row.is_default),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// ----------------------------------------------------------------------
// Audit log
// ----------------------------------------------------------------------

#[derive(Debug, Insertable)]
#[diesel(table_name = audit_log)]
pub struct NewAuditEntry {
    pub actor_id: String,
    pub actor_type: String,
    pub action: String,
    pub resource: String,
    pub resource_id: i64,
    pub description: String,
    pub recorded_at: String,
}

/// A persisted audit log entry, as served by the admin listing.
#[derive(Debug, Clone, PartialEq, Eq, Queryable)]
pub struct AuditEntryData {
    pub entry_id: i64,
    pub actor_id: String,
    pub actor_type: String,
    pub action: String,
    pub resource: String,
    pub resource_id: i64,
    pub description: String,
    pub recorded_at: String,
}

// ----------------------------------------------------------------------
// Notification outbox
// ----------------------------------------------------------------------

#[derive(Debug, Insertable)]
#[diesel(table_name = notification_outbox)]
pub struct NewNotification {
    pub kind: String,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub status: String,
    pub attempts: i32,
    pub created_at: String,
}

/// A queued notification awaiting dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Queryable)]
pub struct NotificationData {
    pub notification_id: i64,
    pub kind: String,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub status: String,
    pub attempts: i32,
    pub last_error: Option<String>,
    pub created_at: String,
    pub sent_at: Option<String>,
}

// ----------------------------------------------------------------------
// Operators and sessions
// ----------------------------------------------------------------------

#[derive(Debug, Insertable)]
#[diesel(table_name = operators)]
pub struct NewOperator {
    pub login_name: String,
    pub display_name: String,
    pub password_hash: String,
    pub role: String,
    pub is_disabled: i32,
    pub created_at: String,
}

/// A stored operator account.
#[derive(Debug, Clone, PartialEq, Eq, Queryable)]
pub struct OperatorData {
    pub operator_id: i64,
    pub login_name: String,
    pub display_name: String,
    pub password_hash: String,
    pub role: String,
    pub is_disabled: i32,
    pub created_at: String,
    pub last_login: Option<String>,
}

impl OperatorData {
    /// Whether the account may authenticate.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.is_disabled == 0
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = sessions)]
pub struct NewSession {
    pub session_token: String,
    pub operator_id: i64,
    pub created_at: String,
    pub expires_at: String,
}

/// A stored session.
#[derive(Debug, Clone, PartialEq, Eq, Queryable)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub operator_id: i64,
    pub created_at: String,
    pub expires_at: String,
}
