// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A status string does not belong to the resource's vocabulary.
    InvalidStatus {
        /// The resource whose vocabulary was consulted.
        resource: &'static str,
        /// The rejected status string.
        status: String,
    },
    /// A donation frequency string is not recognized.
    InvalidFrequency(String),
    /// A payment method type string is not recognized.
    InvalidMethodType(String),
    /// A monetary amount is outside its permitted range.
    InvalidAmount {
        /// The field carrying the amount.
        field: &'static str,
        /// The rejected value in cents.
        cents: i64,
    },
    /// A grant amount falls outside the 500.00 to 1000.00 band.
    GrantAmountOutOfRange {
        /// The rejected value in cents.
        cents: i64,
    },
    /// A ticket quantity must be at least one.
    InvalidQuantity(i64),
    /// A fee rate must be non-negative.
    InvalidFeeRate {
        /// The rejected rate in basis points.
        basis_points: i64,
    },
    /// Monetary arithmetic overflowed.
    AmountOverflow {
        /// Description of the computation that overflowed.
        operation: &'static str,
    },
    /// The assistance submission window is closed.
    WindowClosed {
        /// The day of month observed in the configured timezone.
        day: u32,
        /// First day of month the window is open.
        opens_on: u32,
        /// Last day of month the window is open.
        closes_after: u32,
    },
    /// A timezone name could not be resolved.
    InvalidTimezone(String),
    /// A purchase or donation arrived without a payment method.
    MissingPaymentMethod,
    /// The referenced payment method is not active.
    InactivePaymentMethod(i64),
    /// The referenced delivery option is not active.
    InactiveDeliveryOption(i64),
    /// Review fields must be written together.
    IncompleteReview {
        /// Description of what was missing.
        reason: &'static str,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStatus { resource, status } => {
                write!(f, "Invalid {resource} status: '{status}'")
            }
            Self::InvalidFrequency(value) => {
                write!(f, "Invalid donation frequency: '{value}'")
            }
            Self::InvalidMethodType(value) => {
                write!(f, "Invalid payment method type: '{value}'")
            }
            Self::InvalidAmount { field, cents } => {
                write!(f, "Invalid amount for {field}: {cents} cents")
            }
            Self::GrantAmountOutOfRange { cents } => {
                write!(
                    f,
                    "Grant amount {cents} cents is outside the permitted range of 50000 to 100000 cents"
                )
            }
            Self::InvalidQuantity(quantity) => {
                write!(f, "Ticket quantity must be at least 1, got {quantity}")
            }
            Self::InvalidFeeRate { basis_points } => {
                write!(f, "Fee rate must be non-negative, got {basis_points} basis points")
            }
            Self::AmountOverflow { operation } => {
                write!(f, "Monetary arithmetic overflow while {operation}")
            }
            Self::WindowClosed {
                day,
                opens_on,
                closes_after,
            } => {
                write!(
                    f,
                    "Applications are accepted from day {opens_on} through day {closes_after} of the month; today is day {day}"
                )
            }
            Self::InvalidTimezone(name) => {
                write!(f, "Unknown timezone: '{name}'")
            }
            Self::MissingPaymentMethod => {
                write!(f, "A payment method must be selected")
            }
            Self::InactivePaymentMethod(id) => {
                write!(f, "Payment method {id} is not active")
            }
            Self::InactiveDeliveryOption(id) => {
                write!(f, "Delivery option {id} is not active")
            }
            Self::IncompleteReview { reason } => {
                write!(f, "Incomplete review: {reason}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
