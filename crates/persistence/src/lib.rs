// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Harborlight charity backend.
//!
//! This crate stores donations, assistance applications, volunteers,
//! delivery requests, tickets, payment methods, the append-only audit log,
//! and the notification outbox. It is built on Diesel over `SQLite`.
//!
//! Two rules hold everywhere:
//!
//! - Every mutation that changes domain state appends its audit record in
//!   the same transaction, and enqueues its notifications there too.
//! - Status updates are revision-checked: the write carries the revision
//!   the caller read, and a mismatch fails with `RevisionConflict` without
//!   touching the row or the log.
//!
//! In-memory databases are used for unit and integration tests; the server
//! opens a file-backed database with WAL enabled.

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
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use harborlight::{ReviewOutcome, Transition};
use harborlight_audit::Actor;
use harborlight_domain::{
    AssistanceApplication, DeliveryOption, DeliveryRequest, DeliveryStatus,
    Donation, DonationStatus, Event, Member, PaymentMethod, Ticket, TicketStatus, TicketType,
    Volunteer, VolunteerStatus,
};

pub mod data_models;
pub mod diesel_schema;
pub mod error;
pub mod mutations;
pub mod queries;
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::{
    AuditEntryData, NewApplication, NewDeliveryOption, NewDeliveryRequest, NewDonation, NewEvent,
    NewMember, NewNotification, NewPaymentMethod, NewSession, NewTicket, NewTicketType,
    NewVolunteer, NotificationData, OperatorData, SessionData,
};
pub use error::PersistenceError;
pub use queries::{Page, Paginated, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID, so
/// tests are isolated without time-based collisions.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// The persistence adapter.
///
/// Owns one `SQLite` connection and exposes one method per operation; the
/// transactional rules live in the `mutations` module.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite`
    /// database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_test_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite`
    /// database, with WAL enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = sqlite::initialize_database(path_str)?;
        sqlite::enable_wal_mode(&mut conn)?;

        Ok(Self { conn })
    }

    // ------------------------------------------------------------------
    // Donations
    // ------------------------------------------------------------------

    /// Inserts a donation with its creation audit record and
    /// notifications. Returns the new id.
    ///
    /// # Errors
    ///
    /// Returns an error if the writes fail.
    pub fn create_donation(
        &mut self,
        donation: &NewDonation,
        actor: &Actor,
        summary: &str,
        notifications: &[NewNotification],
    ) -> Result<i64, PersistenceError> {
        mutations::donations::create_donation(&mut self.conn, donation, actor, summary, notifications)
    }

    /// Retrieves a donation by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_donation(&mut self, donation_id: i64) -> Result<Option<Donation>, PersistenceError> {
        queries::donations::get_donation(&mut self.conn, donation_id)
    }

    /// Lists donations, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_donations(
        &mut self,
        status: Option<&str>,
        page: Page,
    ) -> Result<Paginated<Donation>, PersistenceError> {
        queries::donations::list_donations(&mut self.conn, status, page)
    }

    /// Applies a revision-checked status transition to a donation.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `RevisionConflict`, or a database error.
    pub fn update_donation_status(
        &mut self,
        transition: &Transition<DonationStatus>,
        updated_at: &str,
        notifications: &[NewNotification],
    ) -> Result<(), PersistenceError> {
        mutations::status::update_donation_status(&mut self.conn, transition, updated_at, notifications)
    }

    // ------------------------------------------------------------------
    // Assistance applications
    // ------------------------------------------------------------------

    /// Inserts an application with its creation audit record and
    /// notifications. Returns the new id.
    ///
    /// # Errors
    ///
    /// Returns an error if the writes fail.
    pub fn create_application(
        &mut self,
        application: &NewApplication,
        actor: &Actor,
        summary: &str,
        notifications: &[NewNotification],
    ) -> Result<i64, PersistenceError> {
        mutations::applications::create_application(
            &mut self.conn,
            application,
            actor,
            summary,
            notifications,
        )
    }

    /// Retrieves an application by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_application(
        &mut self,
        application_id: i64,
    ) -> Result<Option<AssistanceApplication>, PersistenceError> {
        queries::applications::get_application(&mut self.conn, application_id)
    }

    /// Lists applications, optionally filtered by status and submission
    /// month.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_applications(
        &mut self,
        status: Option<&str>,
        submission_month: Option<&str>,
        page: Page,
    ) -> Result<Paginated<AssistanceApplication>, PersistenceError> {
        queries::applications::list_applications(&mut self.conn, status, submission_month, page)
    }

    /// Persists a review decision, revision-checked.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `RevisionConflict`, or a database error.
    pub fn record_review(
        &mut self,
        outcome: &ReviewOutcome,
        updated_at: &str,
        notifications: &[NewNotification],
    ) -> Result<(), PersistenceError> {
        mutations::applications::record_review(&mut self.conn, outcome, updated_at, notifications)
    }

    // ------------------------------------------------------------------
    // Volunteers
    // ------------------------------------------------------------------

    /// Inserts a volunteer with its creation audit record and
    /// notifications. Returns the new id.
    ///
    /// # Errors
    ///
    /// Returns an error if the writes fail.
    pub fn create_volunteer(
        &mut self,
        volunteer: &NewVolunteer,
        actor: &Actor,
        summary: &str,
        notifications: &[NewNotification],
    ) -> Result<i64, PersistenceError> {
        mutations::volunteers::create_volunteer(&mut self.conn, volunteer, actor, summary, notifications)
    }

    /// Retrieves a volunteer by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_volunteer(
        &mut self,
        volunteer_id: i64,
    ) -> Result<Option<Volunteer>, PersistenceError> {
        queries::volunteers::get_volunteer(&mut self.conn, volunteer_id)
    }

    /// Lists volunteers, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_volunteers(
        &mut self,
        status: Option<&str>,
        page: Page,
    ) -> Result<Paginated<Volunteer>, PersistenceError> {
        queries::volunteers::list_volunteers(&mut self.conn, status, page)
    }

    /// Applies a revision-checked status transition to a volunteer.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `RevisionConflict`, or a database error.
    pub fn update_volunteer_status(
        &mut self,
        transition: &Transition<VolunteerStatus>,
        updated_at: &str,
        notifications: &[NewNotification],
    ) -> Result<(), PersistenceError> {
        mutations::status::update_volunteer_status(&mut self.conn, transition, updated_at, notifications)
    }

    // ------------------------------------------------------------------
    // Members, delivery options, delivery requests
    // ------------------------------------------------------------------

    /// Inserts a member. Returns the new id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_member(&mut self, member: &NewMember) -> Result<i64, PersistenceError> {
        mutations::deliveries::create_member(&mut self.conn, member)
    }

    /// Retrieves a member by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_member(&mut self, member_id: i64) -> Result<Option<Member>, PersistenceError> {
        queries::deliveries::get_member(&mut self.conn, member_id)
    }

    /// Retrieves a member by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_member_by_email(&mut self, email: &str) -> Result<Option<Member>, PersistenceError> {
        queries::deliveries::get_member_by_email(&mut self.conn, email)
    }

    /// Inserts a delivery option. Returns the new id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_delivery_option(
        &mut self,
        option: &NewDeliveryOption,
    ) -> Result<i64, PersistenceError> {
        mutations::deliveries::create_delivery_option(&mut self.conn, option)
    }

    /// Retrieves a delivery option by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_delivery_option(
        &mut self,
        delivery_option_id: i64,
    ) -> Result<Option<DeliveryOption>, PersistenceError> {
        queries::deliveries::get_delivery_option(&mut self.conn, delivery_option_id)
    }

    /// Lists delivery options, active-only when requested.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_delivery_options(
        &mut self,
        active_only: bool,
    ) -> Result<Vec<DeliveryOption>, PersistenceError> {
        queries::deliveries::list_delivery_options(&mut self.conn, active_only)
    }

    /// Inserts a delivery request, flips the member's first-request flag,
    /// and appends the audit record, all in one transaction. Returns the
    /// new id.
    ///
    /// # Errors
    ///
    /// Returns an error if the writes fail.
    pub fn create_delivery_request(
        &mut self,
        request: &NewDeliveryRequest,
        actor: &Actor,
        summary: &str,
        notifications: &[NewNotification],
    ) -> Result<i64, PersistenceError> {
        mutations::deliveries::create_delivery_request(&mut self.conn, request, actor, summary, notifications)
    }

    /// Retrieves a delivery request by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_delivery_request(
        &mut self,
        delivery_request_id: i64,
    ) -> Result<Option<DeliveryRequest>, PersistenceError> {
        queries::deliveries::get_delivery_request(&mut self.conn, delivery_request_id)
    }

    /// Lists delivery requests, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_delivery_requests(
        &mut self,
        status: Option<&str>,
        page: Page,
    ) -> Result<Paginated<DeliveryRequest>, PersistenceError> {
        queries::deliveries::list_delivery_requests(&mut self.conn, status, page)
    }

    /// Applies a revision-checked status transition to a delivery request.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `RevisionConflict`, or a database error.
    pub fn update_delivery_request_status(
        &mut self,
        transition: &Transition<DeliveryStatus>,
        updated_at: &str,
        notifications: &[NewNotification],
    ) -> Result<(), PersistenceError> {
        mutations::status::update_delivery_request_status(
            &mut self.conn,
            transition,
            updated_at,
            notifications,
        )
    }

    // ------------------------------------------------------------------
    // Events, ticket types, tickets
    // ------------------------------------------------------------------

    /// Inserts an event. Returns the new id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_event(&mut self, event: &NewEvent) -> Result<i64, PersistenceError> {
        mutations::tickets::create_event(&mut self.conn, event)
    }

    /// Retrieves an event by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_event(&mut self, event_id: i64) -> Result<Option<Event>, PersistenceError> {
        queries::tickets::get_event(&mut self.conn, event_id)
    }

    /// Lists events ordered by start time.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_events(&mut self) -> Result<Vec<Event>, PersistenceError> {
        queries::tickets::list_events(&mut self.conn)
    }

    /// Inserts a ticket type. Returns the new id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_ticket_type(
        &mut self,
        ticket_type: &NewTicketType,
    ) -> Result<i64, PersistenceError> {
        mutations::tickets::create_ticket_type(&mut self.conn, ticket_type)
    }

    /// Retrieves a ticket type by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_ticket_type(
        &mut self,
        ticket_type_id: i64,
    ) -> Result<Option<TicketType>, PersistenceError> {
        queries::tickets::get_ticket_type(&mut self.conn, ticket_type_id)
    }

    /// Lists the ticket types of an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_ticket_types(
        &mut self,
        event_id: i64,
    ) -> Result<Vec<TicketType>, PersistenceError> {
        queries::tickets::list_ticket_types(&mut self.conn, event_id)
    }

    /// Inserts a ticket with its creation audit record and notifications.
    /// Returns the new id.
    ///
    /// # Errors
    ///
    /// Returns an error if the writes fail.
    pub fn create_ticket(
        &mut self,
        ticket: &NewTicket,
        actor: &Actor,
        summary: &str,
        notifications: &[NewNotification],
    ) -> Result<i64, PersistenceError> {
        mutations::tickets::create_ticket(&mut self.conn, ticket, actor, summary, notifications)
    }

    /// Retrieves a ticket by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_ticket(&mut self, ticket_id: i64) -> Result<Option<Ticket>, PersistenceError> {
        queries::tickets::get_ticket(&mut self.conn, ticket_id)
    }

    /// Lists tickets, optionally filtered by event and status.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_tickets(
        &mut self,
        event_id: Option<i64>,
        status: Option<&str>,
        page: Page,
    ) -> Result<Paginated<Ticket>, PersistenceError> {
        queries::tickets::list_tickets(&mut self.conn, event_id, status, page)
    }

    /// Applies a revision-checked status transition to a ticket.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `RevisionConflict`, or a database error.
    pub fn update_ticket_status(
        &mut self,
        transition: &Transition<TicketStatus>,
        updated_at: &str,
        notifications: &[NewNotification],
    ) -> Result<(), PersistenceError> {
        mutations::status::update_ticket_status(&mut self.conn, transition, updated_at, notifications)
    }

    // ------------------------------------------------------------------
    // Payment methods
    // ------------------------------------------------------------------

    /// Inserts a payment method. Returns the new id.
    ///
    /// # Errors
    ///
    /// Returns an error if the writes fail.
    pub fn create_payment_method(
        &mut self,
        method: &NewPaymentMethod,
    ) -> Result<i64, PersistenceError> {
        mutations::payment_methods::create_payment_method(&mut self.conn, method)
    }

    /// Updates a payment method's editable fields.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error.
    #[allow(clippy::too_many_arguments)]
    pub fn update_payment_method(
        &mut self,
        payment_method_id: i64,
        label: &str,
        instructions: &str,
        fee_bps: i64,
        is_active: bool,
        updated_at: &str,
    ) -> Result<(), PersistenceError> {
        mutations::payment_methods::update_payment_method(
            &mut self.conn,
            payment_method_id,
            label,
            instructions,
            fee_bps,
            is_active,
            updated_at,
        )
    }

    /// Flips a payment method's active flag. Returns the new state.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error.
    pub fn toggle_payment_method_active(
        &mut self,
        payment_method_id: i64,
        updated_at: &str,
    ) -> Result<bool, PersistenceError> {
        mutations::payment_methods::toggle_payment_method_active(
            &mut self.conn,
            payment_method_id,
            updated_at,
        )
    }

    /// Deletes a payment method.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, a foreign-key error when the method is still
    /// referenced, or another database error.
    pub fn delete_payment_method(
        &mut self,
        payment_method_id: i64,
    ) -> Result<(), PersistenceError> {
        mutations::payment_methods::delete_payment_method(&mut self.conn, payment_method_id)
    }

    /// Makes one payment method the default, clearing the flag elsewhere.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error.
    pub fn set_default_payment_method(
        &mut self,
        payment_method_id: i64,
        updated_at: &str,
    ) -> Result<(), PersistenceError> {
        mutations::payment_methods::set_default_payment_method(
            &mut self.conn,
            payment_method_id,
            updated_at,
        )
    }

    /// Retrieves a payment method by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_payment_method(
        &mut self,
        payment_method_id: i64,
    ) -> Result<Option<PaymentMethod>, PersistenceError> {
        queries::payment_methods::get_payment_method(&mut self.conn, payment_method_id)
    }

    /// Retrieves the default payment method, if one is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_default_payment_method(
        &mut self,
    ) -> Result<Option<PaymentMethod>, PersistenceError> {
        queries::payment_methods::get_default_payment_method(&mut self.conn)
    }

    /// Lists payment methods, optionally filtered by method type,
    /// active-only when requested.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_payment_methods(
        &mut self,
        method_type: Option<&str>,
        active_only: bool,
    ) -> Result<Vec<PaymentMethod>, PersistenceError> {
        queries::payment_methods::list_payment_methods(&mut self.conn, method_type, active_only)
    }

    // ------------------------------------------------------------------
    // Audit log
    // ------------------------------------------------------------------

    /// Lists audit entries, optionally filtered by resource kind and id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_audit_entries(
        &mut self,
        resource: Option<&str>,
        resource_id: Option<i64>,
        page: Page,
    ) -> Result<Paginated<AuditEntryData>, PersistenceError> {
        queries::audit::list_audit_entries(&mut self.conn, resource, resource_id, page)
    }

    // ------------------------------------------------------------------
    // Notification outbox
    // ------------------------------------------------------------------

    /// Fetches up to `limit` pending notifications, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn claim_pending_notifications(
        &mut self,
        limit: i64,
    ) -> Result<Vec<NotificationData>, PersistenceError> {
        mutations::outbox::claim_pending(&mut self.conn, limit)
    }

    /// Marks a notification as delivered.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn mark_notification_sent(
        &mut self,
        notification_id: i64,
        sent_at: &str,
    ) -> Result<(), PersistenceError> {
        mutations::outbox::mark_sent(&mut self.conn, notification_id, sent_at)
    }

    /// Records a failed delivery attempt.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn mark_notification_failed(
        &mut self,
        notification_id: i64,
        error: &str,
    ) -> Result<(), PersistenceError> {
        mutations::outbox::mark_failed(&mut self.conn, notification_id, error)
    }

    // ------------------------------------------------------------------
    // Operators and sessions
    // ------------------------------------------------------------------

    /// Creates an operator account. Returns the new id.
    ///
    /// # Errors
    ///
    /// Returns an error if hashing or the insert fails.
    pub fn create_operator(
        &mut self,
        login_name: &str,
        display_name: &str,
        password: &str,
        role: &str,
        created_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::operators::create_operator(
            &mut self.conn,
            login_name,
            display_name,
            password,
            role,
            created_at,
        )
    }

    /// Creates the bootstrap admin account when no operators exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the count query or the insert fails.
    pub fn ensure_admin_operator(
        &mut self,
        login_name: &str,
        password: &str,
        created_at: &str,
    ) -> Result<Option<i64>, PersistenceError> {
        mutations::operators::ensure_admin_operator(&mut self.conn, login_name, password, created_at)
    }

    /// Retrieves an operator by login name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_operator_by_login(
        &mut self,
        login_name: &str,
    ) -> Result<Option<OperatorData>, PersistenceError> {
        queries::operators::get_operator_by_login(&mut self.conn, login_name)
    }

    /// Updates the last login timestamp for an operator.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_last_login(
        &mut self,
        operator_id: i64,
        logged_in_at: &str,
    ) -> Result<(), PersistenceError> {
        mutations::operators::update_last_login(&mut self.conn, operator_id, logged_in_at)
    }

    /// Creates a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_session(&mut self, session: &NewSession) -> Result<(), PersistenceError> {
        mutations::operators::create_session(&mut self.conn, session)
    }

    /// Deletes a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_session(&mut self, token: &str) -> Result<(), PersistenceError> {
        mutations::operators::delete_session(&mut self.conn, token)
    }

    /// Deletes sessions that expired at or before `now`. Returns how many
    /// were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_expired_sessions(&mut self, now: &str) -> Result<usize, PersistenceError> {
        mutations::operators::delete_expired_sessions(&mut self.conn, now)
    }

    /// Retrieves a session and its operator by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_session_with_operator(
        &mut self,
        token: &str,
    ) -> Result<Option<(SessionData, OperatorData)>, PersistenceError> {
        queries::operators::get_session_with_operator(&mut self.conn, token)
    }
}
