// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Entity types shared across the platform.
//!
//! Records carry `Option<i64>` ids; `None` means the record has not been
//! persisted yet. All monetary fields are whole cents and all timestamps
//! are RFC 3339 strings in UTC. Every record an administrator can mutate
//! carries a `revision` counter for optimistic concurrency.

use crate::error::DomainError;
use crate::status::{
    ApplicationStatus, DeliveryStatus, DonationStatus, TicketStatus, VolunteerStatus,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How often a donor intends to give.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DonationFrequency {
    OneTime,
    Monthly,
    Quarterly,
    Yearly,
}

impl DonationFrequency {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OneTime => "ONE_TIME",
            Self::Monthly => "MONTHLY",
            Self::Quarterly => "QUARTERLY",
            Self::Yearly => "YEARLY",
        }
    }
}

impl FromStr for DonationFrequency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ONE_TIME" => Ok(Self::OneTime),
            "MONTHLY" => Ok(Self::Monthly),
            "QUARTERLY" => Ok(Self::Quarterly),
            "YEARLY" => Ok(Self::Yearly),
            _ => Err(DomainError::InvalidFrequency(s.to_string())),
        }
    }
}

/// The kind of rail a payment method settles over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethodType {
    BankAccount,
    CryptoWallet,
    MobilePayment,
    Other,
}

impl PaymentMethodType {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BankAccount => "BANK_ACCOUNT",
            Self::CryptoWallet => "CRYPTO_WALLET",
            Self::MobilePayment => "MOBILE_PAYMENT",
            Self::Other => "OTHER",
        }
    }
}

impl FromStr for PaymentMethodType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BANK_ACCOUNT" => Ok(Self::BankAccount),
            "CRYPTO_WALLET" => Ok(Self::CryptoWallet),
            "MOBILE_PAYMENT" => Ok(Self::MobilePayment),
            "OTHER" => Ok(Self::Other),
            _ => Err(DomainError::InvalidMethodType(s.to_string())),
        }
    }
}

/// A donation pledge and its settlement state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Donation {
    pub id: Option<i64>,
    pub donor_name: String,
    pub donor_email: String,
    pub amount_cents: i64,
    pub frequency: DonationFrequency,
    pub payment_method_id: i64,
    /// Opaque URL to the uploaded proof of payment.
    pub proof_of_payment: Option<String>,
    pub status: DonationStatus,
    pub created_at: String,
    pub updated_at: String,
    pub revision: i64,
}

/// A monthly assistance application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistanceApplication {
    pub id: Option<i64>,
    pub applicant_name: String,
    pub applicant_email: String,
    /// Date of diagnosis as supplied by the applicant, `YYYY-MM-DD`.
    pub diagnosis_date: String,
    pub monthly_income_cents: i64,
    /// Opaque URL to the application PDF.
    pub application_pdf: String,
    /// Opaque URL to the diagnosis letter.
    pub diagnosis_letter: String,
    pub personal_statement: Option<String>,
    pub status: ApplicationStatus,
    /// Cents; present once an administrator approves.
    pub grant_amount_cents: Option<i64>,
    /// `YYYY-MM` tag of the window the application arrived in.
    pub submission_month: String,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<String>,
    pub review_notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub revision: i64,
}

/// A volunteer signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volunteer {
    pub id: Option<i64>,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Areas the volunteer wants to help with.
    pub interests: Vec<String>,
    pub status: VolunteerStatus,
    pub created_at: String,
    pub updated_at: String,
    pub revision: i64,
}

/// A registered member who can request deliveries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    /// Set the first time the member files a delivery request.
    pub has_delivery_request: bool,
    pub created_at: String,
}

/// An admin-managed way deliveries can be fulfilled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryOption {
    pub id: Option<i64>,
    pub label: String,
    pub description: Option<String>,
    pub is_active: bool,
}

/// A member's request for a delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryRequest {
    pub id: Option<i64>,
    pub member_id: i64,
    pub delivery_option_id: i64,
    pub delivery_address: String,
    pub notes: Option<String>,
    pub status: DeliveryStatus,
    pub created_at: String,
    pub updated_at: String,
    pub revision: i64,
}

/// A fundraising event tickets can be purchased for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub starts_at: String,
    pub location: Option<String>,
    /// Price applied when a purchase names no ticket type.
    pub base_price_cents: i64,
}

/// A priced tier of admission to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketType {
    pub id: Option<i64>,
    pub event_id: i64,
    pub name: String,
    pub price_cents: i64,
}

/// An offline ticket purchase.
///
/// `paid_amount_cents` is always server-derived from the unit price,
/// quantity, and the payment method's fee rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: Option<i64>,
    pub event_id: i64,
    pub ticket_type_id: Option<i64>,
    pub buyer_name: String,
    pub buyer_email: String,
    pub quantity: i64,
    pub paid_amount_cents: i64,
    pub proof_of_payment: Option<String>,
    /// Presented at the door; generated at purchase time.
    pub checkin_code: String,
    pub payment_method_id: i64,
    pub status: TicketStatus,
    pub created_at: String,
    pub updated_at: String,
    pub revision: i64,
}

/// A way supporters can move money to the organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: Option<i64>,
    pub method_type: PaymentMethodType,
    pub label: String,
    /// Free-form payment instructions shown to supporters.
    pub instructions: String,
    /// Processing fee in basis points.
    pub fee_bps: i64,
    pub is_active: bool,
    pub is_default: bool,
    pub created_at: String,
    pub updated_at: String,
}
