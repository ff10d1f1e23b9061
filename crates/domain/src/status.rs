// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Status vocabularies for every reviewable record.
//!
//! Statuses are stored and serialized in SCREAMING_SNAKE_CASE. Any status
//! may be set to any other status by an authorized administrator; there is
//! no enforced transition graph. The audit trail, not the vocabulary, is
//! the record of what happened.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle of a donation from submission to settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DonationStatus {
    /// Pledged but not yet confirmed against a payment proof.
    Pending,
    /// Payment confirmed by an administrator.
    Completed,
    /// Payment could not be confirmed.
    Failed,
    /// A completed donation that was returned to the donor.
    Refunded,
}

impl DonationStatus {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
            Self::Refunded => "REFUNDED",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "COMPLETED" => Ok(Self::Completed),
            "FAILED" => Ok(Self::Failed),
            "REFUNDED" => Ok(Self::Refunded),
            _ => Err(DomainError::InvalidStatus {
                resource: "Donation",
                status: s.to_string(),
            }),
        }
    }
}

impl FromStr for DonationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

/// Lifecycle of a monthly assistance application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    /// Received inside the submission window; not yet looked at.
    Submitted,
    /// An administrator has opened the file.
    UnderReview,
    /// Approved for a grant; the grant amount is recorded with the review.
    Approved,
    /// Declined.
    Rejected,
    /// The approved grant has been paid out.
    GrantIssued,
}

impl ApplicationStatus {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "SUBMITTED",
            Self::UnderReview => "UNDER_REVIEW",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::GrantIssued => "GRANT_ISSUED",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "SUBMITTED" => Ok(Self::Submitted),
            "UNDER_REVIEW" => Ok(Self::UnderReview),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            "GRANT_ISSUED" => Ok(Self::GrantIssued),
            _ => Err(DomainError::InvalidStatus {
                resource: "AssistanceApplication",
                status: s.to_string(),
            }),
        }
    }
}

impl FromStr for ApplicationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

/// Lifecycle of a volunteer signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VolunteerStatus {
    /// Signed up, awaiting screening.
    Pending,
    /// Screened and active.
    Active,
    /// No longer volunteering.
    Inactive,
}

impl VolunteerStatus {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "ACTIVE" => Ok(Self::Active),
            "INACTIVE" => Ok(Self::Inactive),
            _ => Err(DomainError::InvalidStatus {
                resource: "Volunteer",
                status: s.to_string(),
            }),
        }
    }
}

impl FromStr for VolunteerStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

/// Lifecycle of a delivery request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryStatus {
    /// Requested, awaiting approval.
    Pending,
    /// Approved and queued for dispatch.
    Approved,
    /// A courier is en route.
    OutForDelivery,
    /// Delivered to the member.
    Delivered,
    /// Cancelled by either side.
    Cancelled,
}

impl DeliveryStatus {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::OutForDelivery => "OUT_FOR_DELIVERY",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "APPROVED" => Ok(Self::Approved),
            "OUT_FOR_DELIVERY" => Ok(Self::OutForDelivery),
            "DELIVERED" => Ok(Self::Delivered),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidStatus {
                resource: "DeliveryRequest",
                status: s.to_string(),
            }),
        }
    }
}

impl FromStr for DeliveryStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

/// Lifecycle of an offline ticket purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    /// Purchase recorded, payment proof not yet verified.
    Pending,
    /// Payment verified; the check-in code is honored at the door.
    Approved,
    /// Payment proof rejected.
    Rejected,
    /// Ticket was used at the event.
    Completed,
}

impl TicketStatus {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Completed => "COMPLETED",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            "COMPLETED" => Ok(Self::Completed),
            _ => Err(DomainError::InvalidStatus {
                resource: "Ticket",
                status: s.to_string(),
            }),
        }
    }
}

impl FromStr for TicketStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

/// Delivery state of a queued notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationStatus {
    /// Queued, not yet handed to the mail transport.
    Pending,
    /// Accepted by the mail transport.
    Sent,
    /// Gave up after the retry budget was exhausted.
    Failed,
}

impl NotificationStatus {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Sent => "SENT",
            Self::Failed => "FAILED",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "SENT" => Ok(Self::Sent),
            "FAILED" => Ok(Self::Failed),
            _ => Err(DomainError::InvalidStatus {
                resource: "Notification",
                status: s.to_string(),
            }),
        }
    }
}

impl FromStr for NotificationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_donation_status_round_trip() {
        let statuses = vec![
            DonationStatus::Pending,
            DonationStatus::Completed,
            DonationStatus::Failed,
            DonationStatus::Refunded,
        ];

        for status in statuses {
            let s = status.as_str();
            match DonationStatus::parse_str(s) {
                Ok(parsed) => assert_eq!(status, parsed),
                Err(e) => panic!("Failed to parse status string: {s}: {e}"),
            }
        }
    }

    #[test]
    fn test_application_status_round_trip() {
        let statuses = vec![
            ApplicationStatus::Submitted,
            ApplicationStatus::UnderReview,
            ApplicationStatus::Approved,
            ApplicationStatus::Rejected,
            ApplicationStatus::GrantIssued,
        ];

        for status in statuses {
            let s = status.as_str();
            match ApplicationStatus::parse_str(s) {
                Ok(parsed) => assert_eq!(status, parsed),
                Err(e) => panic!("Failed to parse status string: {s}: {e}"),
            }
        }
    }

    #[test]
    fn test_delivery_status_uses_screaming_snake_case() {
        assert_eq!(DeliveryStatus::OutForDelivery.as_str(), "OUT_FOR_DELIVERY");
        assert_eq!(
            "OUT_FOR_DELIVERY".parse::<DeliveryStatus>(),
            Ok(DeliveryStatus::OutForDelivery)
        );
    }

    #[test]
    fn test_invalid_status_string() {
        assert!(DonationStatus::parse_str("pending").is_err());
        assert!(ApplicationStatus::parse_str("invalid_status").is_err());
        assert!(VolunteerStatus::parse_str("").is_err());
        assert!(TicketStatus::parse_str("DONE").is_err());
        assert!(NotificationStatus::parse_str("QUEUED").is_err());
    }

    #[test]
    fn test_serde_representation_matches_as_str() {
        let json = match serde_json::to_string(&ApplicationStatus::GrantIssued) {
            Ok(json) => json,
            Err(e) => panic!("serialization failed: {e}"),
        };
        assert_eq!(json, "\"GRANT_ISSUED\"");
    }
}
