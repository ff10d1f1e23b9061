// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification composition.
//!
//! Handlers never talk to SMTP. They build [`NewNotification`] rows here
//! and hand them to persistence, which enqueues them in the same
//! transaction as the write they announce. The server's drain task picks
//! them up later.

use harborlight_domain::NotificationStatus;
use harborlight_persistence::NewNotification;

/// Where notifications go and how links into the admin frontend are
/// built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationSettings {
    /// Admin fan-out recipients.
    pub recipients: Vec<String>,
    /// Base URL of the admin frontend, without a trailing slash.
    pub frontend_url: String,
}

impl NotificationSettings {
    /// Parses the comma-separated `NOTIFY_EMAILS` value. Blank segments
    /// are dropped.
    #[must_use]
    pub fn from_env_values(notify_emails: &str, frontend_url: &str) -> Self {
        let recipients: Vec<String> = notify_emails
            .split(',')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(ToString::to_string)
            .collect();

        Self {
            recipients,
            frontend_url: frontend_url.trim_end_matches('/').to_string(),
        }
    }

    /// Settings that fan out to nobody. Used in tests and when
    /// `NOTIFY_EMAILS` is unset.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            recipients: Vec::new(),
            frontend_url: String::new(),
        }
    }

    fn fan_out(&self, kind: &str, subject: &str, body: &str, created_at: &str) -> Vec<NewNotification> {
        self.recipients
            .iter()
            .map(|recipient| NewNotification {
                kind: kind.to_string(),
                recipient: recipient.clone(),
                subject: subject.to_string(),
                body: body.to_string(),
                status: NotificationStatus::Pending.as_str().to_string(),
                attempts: 0,
                created_at: created_at.to_string(),
            })
            .collect()
    }

    /// One admin notification per recipient for a new donation.
    #[must_use]
    pub fn donation_received(
        &self,
        donor_name: &str,
        amount_cents: i64,
        created_at: &str,
    ) -> Vec<NewNotification> {
        let body: String = format!(
            "{donor_name} donated {}.\n\nReview it at {}/donations",
            format_cents(amount_cents),
            self.frontend_url
        );
        self.fan_out("donation_received", "New donation received", &body, created_at)
    }

    /// One admin notification per recipient for a new assistance
    /// application.
    #[must_use]
    pub fn application_received(&self, applicant_name: &str, created_at: &str) -> Vec<NewNotification> {
        let body: String = format!(
            "{applicant_name} submitted an assistance application.\n\nReview it at {}/applications",
            self.frontend_url
        );
        self.fan_out(
            "application_received",
            "New assistance application",
            &body,
            created_at,
        )
    }

    /// A single notification to the applicant announcing the review
    /// decision, plus the admin fan-out.
    #[must_use]
    pub fn application_reviewed(
        &self,
        applicant_name: &str,
        applicant_email: &str,
        status: &str,
        created_at: &str,
    ) -> Vec<NewNotification> {
        let mut notifications: Vec<NewNotification> = vec![NewNotification {
            kind: "application_reviewed".to_string(),
            recipient: applicant_email.to_string(),
            subject: "Your assistance application was reviewed".to_string(),
            body: format!("Dear {applicant_name},\n\nYour application status is now {status}."),
            status: NotificationStatus::Pending.as_str().to_string(),
            attempts: 0,
            created_at: created_at.to_string(),
        }];
        notifications.extend(self.fan_out(
            "application_reviewed",
            "Assistance application reviewed",
            &format!("The application from {applicant_name} is now {status}."),
            created_at,
        ));
        notifications
    }

    /// One admin notification per recipient for a new volunteer signup.
    #[must_use]
    pub fn volunteer_signup(&self, full_name: &str, created_at: &str) -> Vec<NewNotification> {
        let body: String = format!(
            "{full_name} signed up to volunteer.\n\nReview the signup at {}/volunteers",
            self.frontend_url
        );
        self.fan_out("volunteer_signup", "New volunteer signup", &body, created_at)
    }

    /// One admin notification per recipient for a new delivery request.
    #[must_use]
    pub fn delivery_request_received(&self, member_name: &str, created_at: &str) -> Vec<NewNotification> {
        let body: String = format!(
            "{member_name} placed a delivery request.\n\nReview it at {}/delivery-requests",
            self.frontend_url
        );
        self.fan_out(
            "delivery_request_received",
            "New delivery request",
            &body,
            created_at,
        )
    }

    /// One admin notification per recipient for a ticket purchase, plus a
    /// confirmation to the buyer carrying the check-in code.
    #[must_use]
    pub fn ticket_purchased(
        &self,
        buyer_name: &str,
        buyer_email: &str,
        event_name: &str,
        quantity: i64,
        checkin_code: &str,
        created_at: &str,
    ) -> Vec<NewNotification> {
        let mut notifications: Vec<NewNotification> = vec![NewNotification {
            kind: "ticket_purchased".to_string(),
            recipient: buyer_email.to_string(),
            subject: format!("Your tickets for {event_name}"),
            body: format!(
                "Dear {buyer_name},\n\nWe received your purchase of {quantity} ticket(s) for \
                 {event_name}. Your check-in code is {checkin_code}. It becomes valid once the \
                 payment is confirmed."
            ),
            status: NotificationStatus::Pending.as_str().to_string(),
            attempts: 0,
            created_at: created_at.to_string(),
        }];
        notifications.extend(self.fan_out(
            "ticket_purchased",
            "New ticket purchase",
            &format!(
                "{buyer_name} bought {quantity} ticket(s) for {event_name}.\n\nReview it at {}/tickets",
                self.frontend_url
            ),
            created_at,
        ));
        notifications
    }

    /// A single notification to the donor announcing the new donation
    /// status, plus the admin fan-out.
    #[must_use]
    pub fn donation_status_changed(
        &self,
        donor_name: &str,
        donor_email: &str,
        status: &str,
        created_at: &str,
    ) -> Vec<NewNotification> {
        self.status_change(
            "donation_status_changed",
            donor_email,
            "Your donation status changed",
            &format!("Dear {donor_name},\n\nYour donation status is now {status}."),
            &format!("The donation from {donor_name} is now {status}."),
            created_at,
        )
    }

    /// A single notification to the volunteer announcing the new signup
    /// status, plus the admin fan-out.
    #[must_use]
    pub fn volunteer_status_changed(
        &self,
        full_name: &str,
        email: &str,
        status: &str,
        created_at: &str,
    ) -> Vec<NewNotification> {
        self.status_change(
            "volunteer_status_changed",
            email,
            "Your volunteer signup status changed",
            &format!("Dear {full_name},\n\nYour volunteer signup status is now {status}."),
            &format!("The volunteer signup from {full_name} is now {status}."),
            created_at,
        )
    }

    /// A single notification to the member announcing the new delivery
    /// request status, plus the admin fan-out.
    #[must_use]
    pub fn delivery_request_status_changed(
        &self,
        member_name: &str,
        member_email: &str,
        status: &str,
        created_at: &str,
    ) -> Vec<NewNotification> {
        self.status_change(
            "delivery_request_status_changed",
            member_email,
            "Your delivery request status changed",
            &format!("Dear {member_name},\n\nYour delivery request status is now {status}."),
            &format!("The delivery request from {member_name} is now {status}."),
            created_at,
        )
    }

    /// A single notification to the buyer announcing the new ticket
    /// status, plus the admin fan-out.
    #[must_use]
    pub fn ticket_status_changed(
        &self,
        buyer_name: &str,
        buyer_email: &str,
        status: &str,
        created_at: &str,
    ) -> Vec<NewNotification> {
        self.status_change(
            "ticket_status_changed",
            buyer_email,
            "Your ticket order status changed",
            &format!("Dear {buyer_name},\n\nYour ticket order status is now {status}."),
            &format!("The ticket order from {buyer_name} is now {status}."),
            created_at,
        )
    }

    fn status_change(
        &self,
        kind: &str,
        party_email: &str,
        subject: &str,
        party_body: &str,
        admin_body: &str,
        created_at: &str,
    ) -> Vec<NewNotification> {
        let mut notifications: Vec<NewNotification> = vec![NewNotification {
            kind: kind.to_string(),
            recipient: party_email.to_string(),
            subject: subject.to_string(),
            body: party_body.to_string(),
            status: NotificationStatus::Pending.as_str().to_string(),
            attempts: 0,
            created_at: created_at.to_string(),
        }];
        notifications.extend(self.fan_out(kind, subject, admin_body, created_at));
        notifications
    }
}

/// Renders a cent amount as `12.34` for notification bodies and audit
/// summaries.
pub(crate) fn format_cents(amount_cents: i64) -> String {
    format!("{}.{:02}", amount_cents / 100, (amount_cents % 100).abs())
}
