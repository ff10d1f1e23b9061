// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use harborlight::CoreError;
use harborlight_domain::{DomainError, FieldError};
use harborlight_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// One field-level validation problem, ready for the `errors` array of a
/// 400 response.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FieldErrorInfo {
    /// The offending field.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl From<FieldError> for FieldErrorInfo {
    fn from(e: FieldError) -> Self {
        Self {
            field: e.field.to_string(),
            message: e.message,
        }
    }
}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract; the server maps each variant onto exactly one HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// One or more request fields failed validation (400, with `errors`).
    ValidationFailed {
        /// The field-level problems, all of them.
        errors: Vec<FieldErrorInfo>,
    },
    /// Invalid input was provided (400).
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The submission window is closed (400).
    WindowClosed {
        /// A human-readable description naming the window.
        message: String,
    },
    /// No payment method was selected and no default exists (400).
    MissingPaymentMethod,
    /// Authentication failed (401).
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission (403).
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A requested resource was not found (404).
    ResourceNotFound {
        /// The resource kind.
        resource: String,
        /// The id that was requested.
        id: i64,
    },
    /// The record changed since the caller read it (409).
    RevisionConflict {
        /// The resource kind.
        resource: String,
        /// The id of the record.
        resource_id: i64,
        /// The revision the caller held.
        expected: i64,
        /// The revision actually stored.
        actual: i64,
    },
    /// A domain rule was violated (422).
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// An unexpected internal error (500).
    InternalError {
        /// A human-readable description of the error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ValidationFailed { errors } => {
                write!(f, "Validation failed for {} field(s)", errors.len())
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for '{field}': {message}")
            }
            Self::WindowClosed { message } => write!(f, "{message}"),
            Self::MissingPaymentMethod => {
                write!(f, "No payment method selected and no default is configured")
            }
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::ResourceNotFound { resource, id } => {
                write!(f, "{resource} {id} not found")
            }
            Self::RevisionConflict {
                resource,
                resource_id,
                expected,
                actual,
            } => write!(
                f,
                "{resource} {resource_id} was modified concurrently (expected revision {expected}, found {actual})"
            ),
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule '{rule}' violated: {message}")
            }
            Self::InternalError { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

/// Translates a domain error into the API vocabulary.
#[must_use]
pub fn translate_domain_error(e: DomainError) -> ApiError {
    match e {
        DomainError::WindowClosed { .. } => ApiError::WindowClosed {
            message: e.to_string(),
        },
        DomainError::MissingPaymentMethod => ApiError::MissingPaymentMethod,
        DomainError::InvalidStatus { resource, .. } => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Not a valid {resource} status"),
        },
        DomainError::InvalidFrequency(_) => ApiError::InvalidInput {
            field: String::from("frequency"),
            message: e.to_string(),
        },
        DomainError::InvalidMethodType(_) => ApiError::InvalidInput {
            field: String::from("method_type"),
            message: e.to_string(),
        },
        DomainError::InvalidTimezone(_) => ApiError::InternalError {
            message: e.to_string(),
        },
        DomainError::InvalidAmount { .. } => ApiError::DomainRuleViolation {
            rule: String::from("positive_amount"),
            message: e.to_string(),
        },
        DomainError::GrantAmountOutOfRange { .. } => ApiError::DomainRuleViolation {
            rule: String::from("grant_band"),
            message: e.to_string(),
        },
        DomainError::InvalidQuantity(_) => ApiError::DomainRuleViolation {
            rule: String::from("positive_quantity"),
            message: e.to_string(),
        },
        DomainError::InvalidFeeRate { .. } => ApiError::DomainRuleViolation {
            rule: String::from("fee_rate"),
            message: e.to_string(),
        },
        DomainError::AmountOverflow { .. } => ApiError::DomainRuleViolation {
            rule: String::from("amount_overflow"),
            message: e.to_string(),
        },
        DomainError::InactivePaymentMethod(_) => ApiError::DomainRuleViolation {
            rule: String::from("active_payment_method"),
            message: e.to_string(),
        },
        DomainError::InactiveDeliveryOption(_) => ApiError::DomainRuleViolation {
            rule: String::from("active_delivery_option"),
            message: e.to_string(),
        },
        DomainError::IncompleteReview { .. } => ApiError::DomainRuleViolation {
            rule: String::from("complete_review"),
            message: e.to_string(),
        },
    }
}

/// Translates a core engine error into the API vocabulary.
#[must_use]
pub fn translate_core_error(e: CoreError) -> ApiError {
    match e {
        CoreError::DomainViolation(inner) => translate_domain_error(inner),
        CoreError::RevisionConflict {
            resource,
            resource_id,
            expected,
            actual,
        } => ApiError::RevisionConflict {
            resource: resource.to_string(),
            resource_id,
            expected,
            actual,
        },
    }
}

impl From<PersistenceError> for ApiError {
    fn from(e: PersistenceError) -> Self {
        match e {
            PersistenceError::RevisionConflict {
                resource,
                resource_id,
                expected,
                actual,
            } => Self::RevisionConflict {
                resource: resource.to_string(),
                resource_id,
                expected,
                actual,
            },
            other => Self::InternalError {
                message: other.to_string(),
            },
        }
    }
}
