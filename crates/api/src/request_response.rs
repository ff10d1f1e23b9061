// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! These are the wire shapes. They are distinct from the domain types;
//! each `*Info` response is built from its domain counterpart after
//! persistence has assigned the id.

use harborlight_domain::{
    AssistanceApplication, DeliveryOption, DeliveryRequest, Donation, Event, Member, PaymentMethod,
    Ticket, TicketType, Volunteer,
};
use harborlight_persistence::{AuditEntryData, Paginated};

fn default_true() -> bool {
    true
}

// ----------------------------------------------------------------------
// Donations
// ----------------------------------------------------------------------

/// Public request to record a donation.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct SubmitDonationRequest {
    /// The donor's name.
    pub donor_name: String,
    /// The donor's email.
    pub donor_email: String,
    /// The donated amount in cents.
    pub amount_cents: i64,
    /// One of `ONE_TIME`, `MONTHLY`, `QUARTERLY`, `YEARLY`.
    pub frequency: String,
    /// The chosen payment method; the default method applies when absent.
    pub payment_method_id: Option<i64>,
    /// Opaque proof-of-payment URL, if the donor attached one.
    pub proof_of_payment: Option<String>,
}

/// One donation, as served by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DonationInfo {
    /// The donation id.
    pub id: i64,
    /// The donor's name.
    pub donor_name: String,
    /// The donor's email.
    pub donor_email: String,
    /// The donated amount in cents.
    pub amount_cents: i64,
    /// The donation frequency.
    pub frequency: String,
    /// The payment method used.
    pub payment_method_id: i64,
    /// Opaque proof-of-payment URL.
    pub proof_of_payment: Option<String>,
    /// The current status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
    /// The optimistic-concurrency revision; echo it back on updates.
    pub revision: i64,
}

impl DonationInfo {
    pub(crate) fn from_domain(donation: Donation, id: i64) -> Self {
        Self {
            id,
            donor_name: donation.donor_name,
            donor_email: donation.donor_email,
            amount_cents: donation.amount_cents,
            frequency: donation.frequency.as_str().to_string(),
            payment_method_id: donation.payment_method_id,
            proof_of_payment: donation.proof_of_payment,
            status: donation.status.as_str().to_string(),
            created_at: donation.created_at,
            updated_at: donation.updated_at,
            revision: donation.revision,
        }
    }
}

// ----------------------------------------------------------------------
// Assistance applications
// ----------------------------------------------------------------------

/// Public request to submit an assistance application.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct SubmitApplicationRequest {
    /// The applicant's name.
    pub applicant_name: String,
    /// The applicant's email.
    pub applicant_email: String,
    /// Diagnosis date, `YYYY-MM-DD`.
    pub diagnosis_date: String,
    /// Monthly income in cents; zero is valid.
    pub monthly_income_cents: i64,
    /// Opaque URL of the application PDF.
    pub application_pdf: String,
    /// Opaque URL of the diagnosis letter.
    pub diagnosis_letter: String,
    /// Optional personal statement.
    pub personal_statement: Option<String>,
}

/// Admin request to review an application.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct ReviewApplicationRequest {
    /// The status to set.
    pub status: String,
    /// The grant amount in cents; required when approving.
    pub grant_amount_cents: Option<i64>,
    /// Reviewer notes.
    pub review_notes: Option<String>,
    /// The revision the reviewer read the application at.
    pub revision: i64,
}

/// One assistance application, as served by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ApplicationInfo {
    /// The application id.
    pub id: i64,
    /// The applicant's name.
    pub applicant_name: String,
    /// The applicant's email.
    pub applicant_email: String,
    /// Diagnosis date, `YYYY-MM-DD`.
    pub diagnosis_date: String,
    /// Monthly income in cents.
    pub monthly_income_cents: i64,
    /// Opaque URL of the application PDF.
    pub application_pdf: String,
    /// Opaque URL of the diagnosis letter.
    pub diagnosis_letter: String,
    /// Optional personal statement.
    pub personal_statement: Option<String>,
    /// The current status.
    pub status: String,
    /// The grant amount, once a review set one.
    pub grant_amount_cents: Option<i64>,
    /// The `YYYY-MM` window tag assigned at submission.
    pub submission_month: String,
    /// Who reviewed the application, if anyone.
    pub reviewed_by: Option<String>,
    /// When it was reviewed.
    pub reviewed_at: Option<String>,
    /// Reviewer notes.
    pub review_notes: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
    /// The optimistic-concurrency revision.
    pub revision: i64,
}

impl ApplicationInfo {
    pub(crate) fn from_domain(application: AssistanceApplication, id: i64) -> Self {
        Self {
            id,
            applicant_name: application.applicant_name,
            applicant_email: application.applicant_email,
            diagnosis_date: application.diagnosis_date,
            monthly_income_cents: application.monthly_income_cents,
            application_pdf: application.application_pdf,
            diagnosis_letter: application.diagnosis_letter,
            personal_statement: application.personal_statement,
            status: application.status.as_str().to_string(),
            grant_amount_cents: application.grant_amount_cents,
            submission_month: application.submission_month,
            reviewed_by: application.reviewed_by,
            reviewed_at: application.reviewed_at,
            review_notes: application.review_notes,
            created_at: application.created_at,
            updated_at: application.updated_at,
            revision: application.revision,
        }
    }
}

// ----------------------------------------------------------------------
// Volunteers
// ----------------------------------------------------------------------

/// Public request to sign up as a volunteer.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct SignupVolunteerRequest {
    /// The volunteer's full name.
    pub full_name: String,
    /// The volunteer's email.
    pub email: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Areas of interest; at least one.
    pub interests: Vec<String>,
}

/// One volunteer, as served by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VolunteerInfo {
    /// The volunteer id.
    pub id: i64,
    /// The volunteer's full name.
    pub full_name: String,
    /// The volunteer's email.
    pub email: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Areas of interest.
    pub interests: Vec<String>,
    /// The current status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
    /// The optimistic-concurrency revision.
    pub revision: i64,
}

impl VolunteerInfo {
    pub(crate) fn from_domain(volunteer: Volunteer, id: i64) -> Self {
        Self {
            id,
            full_name: volunteer.full_name,
            email: volunteer.email,
            phone: volunteer.phone,
            interests: volunteer.interests,
            status: volunteer.status.as_str().to_string(),
            created_at: volunteer.created_at,
            updated_at: volunteer.updated_at,
            revision: volunteer.revision,
        }
    }
}

// ----------------------------------------------------------------------
// Members, delivery options, delivery requests
// ----------------------------------------------------------------------

/// Public request to register as a member.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct RegisterMemberRequest {
    /// The member's name.
    pub name: String,
    /// The member's email.
    pub email: String,
}

/// One member, as served by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MemberInfo {
    /// The member id.
    pub id: i64,
    /// The member's name.
    pub name: String,
    /// The member's email.
    pub email: String,
    /// Whether the member has ever placed a delivery request.
    pub has_delivery_request: bool,
    /// Creation timestamp.
    pub created_at: String,
}

impl MemberInfo {
    pub(crate) fn from_domain(member: Member, id: i64) -> Self {
        Self {
            id,
            name: member.name,
            email: member.email,
            has_delivery_request: member.has_delivery_request,
            created_at: member.created_at,
        }
    }
}

/// Admin request to create a delivery option.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct CreateDeliveryOptionRequest {
    /// The option label shown to members.
    pub label: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Whether the option is immediately available. Defaults to true.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// One delivery option, as served by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeliveryOptionInfo {
    /// The option id.
    pub id: i64,
    /// The option label.
    pub label: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Whether the option is available.
    pub is_active: bool,
}

impl DeliveryOptionInfo {
    pub(crate) fn from_domain(option: DeliveryOption, id: i64) -> Self {
        Self {
            id,
            label: option.label,
            description: option.description,
            is_active: option.is_active,
        }
    }
}

/// Public request to place a delivery request.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct SubmitDeliveryRequestRequest {
    /// The requesting member.
    pub member_id: i64,
    /// The chosen delivery option; must be active.
    pub delivery_option_id: i64,
    /// Where to deliver.
    pub delivery_address: String,
    /// Optional notes for the courier.
    pub notes: Option<String>,
}

/// One delivery request, as served by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeliveryRequestInfo {
    /// The request id.
    pub id: i64,
    /// The requesting member.
    pub member_id: i64,
    /// The chosen delivery option.
    pub delivery_option_id: i64,
    /// Where to deliver.
    pub delivery_address: String,
    /// Optional notes for the courier.
    pub notes: Option<String>,
    /// The current status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
    /// The optimistic-concurrency revision.
    pub revision: i64,
}

impl DeliveryRequestInfo {
    pub(crate) fn from_domain(request: DeliveryRequest, id: i64) -> Self {
        Self {
            id,
            member_id: request.member_id,
            delivery_option_id: request.delivery_option_id,
            delivery_address: request.delivery_address,
            notes: request.notes,
            status: request.status.as_str().to_string(),
            created_at: request.created_at,
            updated_at: request.updated_at,
            revision: request.revision,
        }
    }
}

// ----------------------------------------------------------------------
// Events, ticket types, tickets
// ----------------------------------------------------------------------

/// One ticket tier of a new event.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct CreateTicketTypeRequest {
    /// The tier name (e.g., "General", "VIP").
    pub name: String,
    /// The tier price in cents.
    pub price_cents: i64,
}

/// Admin request to create an event with its ticket tiers.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct CreateEventRequest {
    /// The event name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// When the event starts, RFC 3339.
    pub starts_at: String,
    /// Optional venue.
    pub location: Option<String>,
    /// The price used when a purchase names no tier.
    pub base_price_cents: i64,
    /// The ticket tiers, possibly empty.
    #[serde(default)]
    pub ticket_types: Vec<CreateTicketTypeRequest>,
}

/// One ticket tier, as served by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TicketTypeInfo {
    /// The tier id.
    pub id: i64,
    /// The event it belongs to.
    pub event_id: i64,
    /// The tier name.
    pub name: String,
    /// The tier price in cents.
    pub price_cents: i64,
}

impl TicketTypeInfo {
    pub(crate) fn from_domain(ticket_type: TicketType, id: i64) -> Self {
        Self {
            id,
            event_id: ticket_type.event_id,
            name: ticket_type.name,
            price_cents: ticket_type.price_cents,
        }
    }
}

/// One event with its tiers, as served by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EventInfo {
    /// The event id.
    pub id: i64,
    /// The event name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// When the event starts.
    pub starts_at: String,
    /// Optional venue.
    pub location: Option<String>,
    /// The price used when a purchase names no tier.
    pub base_price_cents: i64,
    /// The ticket tiers.
    pub ticket_types: Vec<TicketTypeInfo>,
}

impl EventInfo {
    pub(crate) fn from_domain(event: Event, id: i64, ticket_types: Vec<TicketTypeInfo>) -> Self {
        Self {
            id,
            name: event.name,
            description: event.description,
            starts_at: event.starts_at,
            location: event.location,
            base_price_cents: event.base_price_cents,
            ticket_types,
        }
    }
}

/// Public request to purchase event tickets.
///
/// The paid amount is always derived server-side; a client-supplied
/// amount would be ignored, so the request does not even carry one.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct PurchaseTicketRequest {
    /// The event.
    pub event_id: i64,
    /// The chosen tier; the event base price applies when absent.
    pub ticket_type_id: Option<i64>,
    /// The buyer's name.
    pub buyer_name: String,
    /// The buyer's email.
    pub buyer_email: String,
    /// How many tickets; at least one.
    pub quantity: i64,
    /// The chosen payment method; the default method applies when absent.
    pub payment_method_id: Option<i64>,
    /// Opaque proof-of-payment URL.
    pub proof_of_payment: Option<String>,
}

/// One ticket purchase, as served by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TicketInfo {
    /// The ticket id.
    pub id: i64,
    /// The event.
    pub event_id: i64,
    /// The tier, when one was chosen.
    pub ticket_type_id: Option<i64>,
    /// The buyer's name.
    pub buyer_name: String,
    /// The buyer's email.
    pub buyer_email: String,
    /// How many tickets.
    pub quantity: i64,
    /// The server-derived amount in cents, fee included.
    pub paid_amount_cents: i64,
    /// Opaque proof-of-payment URL.
    pub proof_of_payment: Option<String>,
    /// The server-generated check-in code.
    pub checkin_code: String,
    /// The payment method used.
    pub payment_method_id: i64,
    /// The current status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
    /// The optimistic-concurrency revision.
    pub revision: i64,
}

impl TicketInfo {
    pub(crate) fn from_domain(ticket: Ticket, id: i64) -> Self {
        Self {
            id,
            event_id: ticket.event_id,
            ticket_type_id: ticket.ticket_type_id,
            buyer_name: ticket.buyer_name,
            buyer_email: ticket.buyer_email,
            quantity: ticket.quantity,
            paid_amount_cents: ticket.paid_amount_cents,
            proof_of_payment: ticket.proof_of_payment,
            checkin_code: ticket.checkin_code,
            payment_method_id: ticket.payment_method_id,
            status: ticket.status.as_str().to_string(),
            created_at: ticket.created_at,
            updated_at: ticket.updated_at,
            revision: ticket.revision,
        }
    }
}

// ----------------------------------------------------------------------
// Payment methods
// ----------------------------------------------------------------------

/// Admin request to create a payment method.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct CreatePaymentMethodRequest {
    /// One of `BANK_ACCOUNT`, `CRYPTO_WALLET`, `MOBILE_PAYMENT`, `OTHER`.
    pub method_type: String,
    /// The label shown to submitters.
    pub label: String,
    /// Payment instructions shown to submitters.
    pub instructions: String,
    /// The processing fee as a percentage (e.g., 2.5).
    pub fee_percent: f64,
    /// Whether the method is immediately usable. Defaults to true.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Whether this becomes the default method.
    #[serde(default)]
    pub is_default: bool,
}

/// Admin request to edit a payment method.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct UpdatePaymentMethodRequest {
    /// The label shown to submitters.
    pub label: String,
    /// Payment instructions shown to submitters.
    pub instructions: String,
    /// The processing fee as a percentage.
    pub fee_percent: f64,
    /// Whether the method is usable.
    pub is_active: bool,
}

/// One payment method, as served by the API.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PaymentMethodInfo {
    /// The method id.
    pub id: i64,
    /// The method type.
    pub method_type: String,
    /// The label shown to submitters.
    pub label: String,
    /// Payment instructions.
    pub instructions: String,
    /// The fee in basis points.
    pub fee_bps: i64,
    /// The fee as a percentage, for display.
    pub fee_percent: f64,
    /// Whether the method is usable.
    pub is_active: bool,
    /// Whether this is the default method.
    pub is_default: bool,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

impl PaymentMethodInfo {
    pub(crate) fn from_domain(method: PaymentMethod, id: i64) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let fee_percent: f64 = method.fee_bps as f64 / 100.0;
        Self {
            id,
            method_type: method.method_type.as_str().to_string(),
            label: method.label,
            instructions: method.instructions,
            fee_bps: method.fee_bps,
            fee_percent,
            is_active: method.is_active,
            is_default: method.is_default,
            created_at: method.created_at,
            updated_at: method.updated_at,
        }
    }
}

// ----------------------------------------------------------------------
// Status updates, audit, listing, auth
// ----------------------------------------------------------------------

/// Admin request to change a record's status.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct UpdateStatusRequest {
    /// The status to set.
    pub status: String,
    /// Optional operator notes, recorded in the audit trail.
    pub notes: Option<String>,
    /// The revision the operator read the record at.
    pub revision: i64,
}

/// One audit log entry, as served by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuditEntryInfo {
    /// The entry id.
    pub id: i64,
    /// Who acted.
    pub actor_id: String,
    /// The actor type (`admin`, `public`, `system`).
    pub actor_type: String,
    /// The verb performed.
    pub action: String,
    /// The resource kind.
    pub resource: String,
    /// The id of the record acted on.
    pub resource_id: i64,
    /// Human-readable summary.
    pub description: String,
    /// When the entry was recorded.
    pub recorded_at: String,
}

impl From<AuditEntryData> for AuditEntryInfo {
    fn from(entry: AuditEntryData) -> Self {
        Self {
            id: entry.entry_id,
            actor_id: entry.actor_id,
            actor_type: entry.actor_type,
            action: entry.action,
            resource: entry.resource,
            resource_id: entry.resource_id,
            description: entry.description,
            recorded_at: entry.recorded_at,
        }
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListResponse<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// The total number of matching items.
    pub total: i64,
    /// The 1-based page number.
    pub page: i64,
    /// The page size.
    pub limit: i64,
}

impl<T> ListResponse<T> {
    pub(crate) fn from_page<U>(page: Paginated<U>, convert: impl Fn(U) -> T) -> Self {
        Self {
            total: page.total,
            page: page.page.number(),
            limit: page.page.limit(),
            items: page.items.into_iter().map(convert).collect(),
        }
    }
}

/// Request to open an admin session.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct LoginRequest {
    /// The operator login name.
    pub login_name: String,
    /// The operator password.
    pub password: String,
}

/// Response to a successful login.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoginResponse {
    /// The bearer token for subsequent admin requests.
    pub token: String,
    /// The operator's display name.
    pub display_name: String,
}
