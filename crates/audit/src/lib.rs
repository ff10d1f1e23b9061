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
    clippy::all
)]

/// Represents the entity performing an action.
///
/// An actor is any identifiable entity that initiates a state change:
/// an administrator, a public submitter, or the system itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "admin", "public", "system").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }

    /// Creates an administrator actor from a login name.
    #[must_use]
    pub fn admin(login: impl Into<String>) -> Self {
        Self::new(login.into(), String::from("admin"))
    }

    /// Creates a public-submitter actor, identified by the email supplied
    /// with the submission.
    #[must_use]
    pub fn public(email: impl Into<String>) -> Self {
        Self::new(email.into(), String::from("public"))
    }

    /// Creates the system actor used for automated work.
    #[must_use]
    pub fn system() -> Self {
        Self::new(String::from("system"), String::from("system"))
    }
}

/// An immutable record of one mutation, ready for the append-only log.
///
/// Every successful creation or status change produces exactly one record.
/// Records reference their subject weakly by resource name and id; deleting
/// the subject never touches the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRecord {
    /// The actor who initiated this change.
    pub actor: Actor,
    /// The verb performed (e.g., "`create`", "`status_change`", "`review`").
    pub action: String,
    /// The resource kind (e.g., "`Donation`", "`Ticket`").
    pub resource: String,
    /// The id of the record acted on.
    pub resource_id: i64,
    /// Human-readable summary of what happened.
    pub description: String,
}

impl AuditRecord {
    /// Creates a new `AuditRecord`. Once created, a record is immutable.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the change
    /// * `action` - The verb performed
    /// * `resource` - The resource kind
    /// * `resource_id` - The id of the record acted on
    /// * `description` - Human-readable summary
    #[must_use]
    pub const fn new(
        actor: Actor,
        action: String,
        resource: String,
        resource_id: i64,
        description: String,
    ) -> Self {
        Self {
            actor,
            action,
            resource,
            resource_id,
            description,
        }
    }

    /// Creates the record for a status change.
    ///
    /// The description always names both statuses, even when they are the
    /// same, so repeated applications remain visible in the log.
    #[must_use]
    pub fn status_change(
        actor: Actor,
        resource: &str,
        resource_id: i64,
        previous: &str,
        new: &str,
    ) -> Self {
        Self::new(
            actor,
            String::from("status_change"),
            resource.to_string(),
            resource_id,
            status_change_description(resource, previous, new),
        )
    }

    /// Creates the record for a newly created resource.
    #[must_use]
    pub fn creation(actor: Actor, resource: &str, resource_id: i64, summary: &str) -> Self {
        Self::new(
            actor,
            String::from("create"),
            resource.to_string(),
            resource_id,
            format!("{resource} created: {summary}"),
        )
    }
}

/// Formats the canonical status-change description,
/// `"<Resource> status <PREV> -> <NEXT>"`.
#[must_use]
pub fn status_change_description(resource: &str, previous: &str, new: &str) -> String {
    format!("{resource} status {previous} -> {new}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_creation_requires_all_fields() {
        let actor: Actor = Actor::new(String::from("ops@example.org"), String::from("admin"));

        assert_eq!(actor.id, "ops@example.org");
        assert_eq!(actor.actor_type, "admin");
    }

    #[test]
    fn test_actor_constructors() {
        assert_eq!(Actor::admin("root").actor_type, "admin");
        assert_eq!(Actor::public("donor@example.org").actor_type, "public");
        assert_eq!(Actor::system().id, "system");
    }

    #[test]
    fn test_status_change_description_format() {
        let description: String = status_change_description("Donation", "PENDING", "COMPLETED");
        assert_eq!(description, "Donation status PENDING -> COMPLETED");
    }

    #[test]
    fn test_status_change_description_repeats_same_status() {
        let description: String = status_change_description("Ticket", "APPROVED", "APPROVED");
        assert_eq!(description, "Ticket status APPROVED -> APPROVED");
    }

    #[test]
    fn test_status_change_record_carries_both_statuses() {
        let record: AuditRecord = AuditRecord::status_change(
            Actor::admin("root"),
            "Volunteer",
            7,
            "PENDING",
            "ACTIVE",
        );

        assert_eq!(record.action, "status_change");
        assert_eq!(record.resource, "Volunteer");
        assert_eq!(record.resource_id, 7);
        assert_eq!(record.description, "Volunteer status PENDING -> ACTIVE");
    }

    #[test]
    fn test_creation_record() {
        let record: AuditRecord = AuditRecord::creation(
            Actor::public("donor@example.org"),
            "Donation",
            3,
            "25.00 ONE_TIME",
        );

        assert_eq!(record.action, "create");
        assert_eq!(record.resource_id, 3);
        assert_eq!(record.description, "Donation created: 25.00 ONE_TIME");
    }

    #[test]
    fn test_audit_record_is_immutable_once_created() {
        let record: AuditRecord = AuditRecord::status_change(
            Actor::admin("root"),
            "Donation",
            1,
            "PENDING",
            "COMPLETED",
        );

        let cloned: AuditRecord = record.clone();
        assert_eq!(record, cloned);
        assert_eq!(record.actor.id, "root");
    }
}
