// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API operation handlers.
//!
//! Each handler is a plain function over an explicit `&mut Persistence`
//! plus the request data and the clock value, so tests drive them with an
//! in-memory database and a fixed time. The HTTP layer does nothing but
//! decode requests, pick the handler, and encode the result.

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::notifications::{NotificationSettings, format_cents};
use crate::request_response::{
    ApplicationInfo, AuditEntryInfo, CreateDeliveryOptionRequest, CreateEventRequest,
    CreatePaymentMethodRequest, DeliveryOptionInfo, DeliveryRequestInfo, DonationInfo, EventInfo,
    ListResponse, MemberInfo, PaymentMethodInfo, PurchaseTicketRequest, RegisterMemberRequest,
    ReviewApplicationRequest, SignupVolunteerRequest, SubmitApplicationRequest,
    SubmitDeliveryRequestRequest, SubmitDonationRequest, TicketInfo, TicketTypeInfo,
    UpdatePaymentMethodRequest, UpdateStatusRequest, VolunteerInfo,
};
use chrono::{DateTime, SecondsFormat, Utc};
use harborlight::{
    ReviewOutcome, Transition, apply_status_change, price_ticket_purchase, review_application,
};
use harborlight_audit::Actor;
use harborlight_domain::{
    ApplicationStatus, AssistanceApplication, DeliveryOption, DeliveryRequest, DeliveryStatus,
    Donation, DonationFrequency, DonationStatus, Event, FeeRate, FieldError, Member, PaymentMethod,
    PaymentMethodType, SubmissionWindow, Ticket, TicketStatus, TicketType, Volunteer,
    VolunteerStatus, validate_application_input, validate_delivery_request_input,
    validate_donation_input, validate_event_input, validate_member_input,
    validate_payment_method_input, validate_ticket_input, validate_volunteer_input,
};
use harborlight_persistence::{
    NewApplication, NewDeliveryOption, NewDeliveryRequest, NewDonation, NewEvent, NewMember,
    NewPaymentMethod, NewTicket, NewTicketType, NewVolunteer, Page, Persistence, PersistenceError,
};

fn rfc3339(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn not_found(resource: &str, id: i64) -> ApiError {
    ApiError::ResourceNotFound {
        resource: resource.to_string(),
        id,
    }
}

fn validation_failed(errors: Vec<FieldError>) -> ApiError {
    ApiError::ValidationFailed {
        errors: errors.into_iter().map(Into::into).collect(),
    }
}

/// Resolves the payment method a submission settles over: the requested
/// one when given, otherwise the configured default.
fn resolve_payment_method(
    db: &mut Persistence,
    requested: Option<i64>,
) -> Result<PaymentMethod, ApiError> {
    match requested {
        Some(payment_method_id) => db
            .get_payment_method(payment_method_id)?
            .ok_or_else(|| not_found("PaymentMethod", payment_method_id)),
        None => db
            .get_default_payment_method()?
            .ok_or(ApiError::MissingPaymentMethod),
    }
}

fn generate_checkin_code() -> String {
    format!("HL-{:010X}", rand::random::<u64>() & 0xFF_FFFF_FFFF)
}

// ----------------------------------------------------------------------
// Donations
// ----------------------------------------------------------------------

/// Records a public donation and fans out the admin notifications.
///
/// # Errors
///
/// Returns `ValidationFailed`, `MissingPaymentMethod`, a domain-rule
/// error for an inactive payment method, or a persistence error.
pub fn submit_donation(
    db: &mut Persistence,
    request: SubmitDonationRequest,
    settings: &NotificationSettings,
    now: DateTime<Utc>,
) -> Result<DonationInfo, ApiError> {
    let method: PaymentMethod = resolve_payment_method(db, request.payment_method_id)?;
    let method_id: i64 = method.id.unwrap_or_default();

    validate_donation_input(
        &request.donor_name,
        &request.donor_email,
        request.amount_cents,
        Some(method_id),
    )
    .map_err(validation_failed)?;

    if !method.is_active {
        return Err(translate_domain_error(
            harborlight_domain::DomainError::InactivePaymentMethod(method_id),
        ));
    }

    let frequency: DonationFrequency = request.frequency.parse().map_err(translate_domain_error)?;
    let timestamp: String = rfc3339(now);

    let new_donation: NewDonation = NewDonation {
        donor_name: request.donor_name.clone(),
        donor_email: request.donor_email.clone(),
        amount_cents: request.amount_cents,
        frequency: frequency.as_str().to_string(),
        payment_method_id: method_id,
        proof_of_payment: request.proof_of_payment,
        status: DonationStatus::Pending.as_str().to_string(),
        created_at: timestamp.clone(),
        updated_at: timestamp.clone(),
        revision: 1,
    };

    let summary: String = format!("{} {}", format_cents(request.amount_cents), frequency.as_str());
    let notifications = settings.donation_received(&request.donor_name, request.amount_cents, &timestamp);
    let donation_id: i64 = db.create_donation(
        &new_donation,
        &Actor::public(request.donor_email),
        &summary,
        &notifications,
    )?;

    tracing::info!(donation_id, amount_cents = request.amount_cents, "donation recorded");
    let donation: Donation = db
        .get_donation(donation_id)?
        .ok_or_else(|| not_found("Donation", donation_id))?;
    Ok(DonationInfo::from_domain(donation, donation_id))
}

/// Retrieves one donation.
///
/// # Errors
///
/// Returns `ResourceNotFound` or a persistence error.
pub fn get_donation_details(
    db: &mut Persistence,
    donation_id: i64,
) -> Result<DonationInfo, ApiError> {
    let donation: Donation = db
        .get_donation(donation_id)?
        .ok_or_else(|| not_found("Donation", donation_id))?;
    Ok(DonationInfo::from_domain(donation, donation_id))
}

/// Lists donations, newest first, optionally filtered by status.
///
/// # Errors
///
/// Returns a persistence error.
pub fn list_donations(
    db: &mut Persistence,
    status: Option<&str>,
    page: Page,
) -> Result<ListResponse<DonationInfo>, ApiError> {
    let donations = db.list_donations(status, page)?;
    Ok(ListResponse::from_page(donations, |donation: Donation| {
        let id: i64 = donation.id.unwrap_or_default();
        DonationInfo::from_domain(donation, id)
    }))
}

/// Applies an admin status change to a donation and notifies the donor.
///
/// # Errors
///
/// Returns `Unauthorized`, `ResourceNotFound`, `RevisionConflict`,
/// `InvalidInput` for an unknown status, or a persistence error.
pub fn update_donation_status(
    db: &mut Persistence,
    donation_id: i64,
    request: UpdateStatusRequest,
    actor: &AuthenticatedActor,
    settings: &NotificationSettings,
    now: DateTime<Utc>,
) -> Result<DonationInfo, ApiError> {
    AuthorizationService::require_admin(actor, "update donation status")?;
    let donation: Donation = db
        .get_donation(donation_id)?
        .ok_or_else(|| not_found("Donation", donation_id))?;
    let requested: DonationStatus = request.status.parse().map_err(translate_domain_error)?;

    let transition: Transition<DonationStatus> = apply_status_change(
        donation_id,
        donation.status,
        requested,
        request.revision,
        actor.to_audit_actor(),
        request.notes.as_deref(),
    );
    let timestamp: String = rfc3339(now);
    let notifications = settings.donation_status_changed(
        &donation.donor_name,
        &donation.donor_email,
        requested.as_str(),
        &timestamp,
    );
    match db.update_donation_status(&transition, &timestamp, &notifications) {
        Ok(()) => {}
        Err(PersistenceError::NotFound) => return Err(not_found("Donation", donation_id)),
        Err(e) => return Err(e.into()),
    }

    get_donation_details(db, donation_id)
}

// ----------------------------------------------------------------------
// Assistance applications
// ----------------------------------------------------------------------

/// Accepts an assistance application, provided the submission window is
/// open in the configured timezone.
///
/// # Errors
///
/// Returns `WindowClosed`, `ValidationFailed`, or a persistence error.
pub fn submit_application(
    db: &mut Persistence,
    request: SubmitApplicationRequest,
    window: &SubmissionWindow,
    settings: &NotificationSettings,
    now: DateTime<Utc>,
) -> Result<ApplicationInfo, ApiError> {
    window.check(now).map_err(translate_domain_error)?;
    validate_application_input(
        &request.applicant_name,
        &request.applicant_email,
        &request.diagnosis_date,
        request.monthly_income_cents,
        &request.application_pdf,
        &request.diagnosis_letter,
    )
    .map_err(validation_failed)?;

    let timestamp: String = rfc3339(now);
    let submission_month: String = window.submission_month(now);

    let new_application: NewApplication = NewApplication {
        applicant_name: request.applicant_name.clone(),
        applicant_email: request.applicant_email.clone(),
        diagnosis_date: request.diagnosis_date,
        monthly_income_cents: request.monthly_income_cents,
        application_pdf: request.application_pdf,
        diagnosis_letter: request.diagnosis_letter,
        personal_statement: request.personal_statement,
        status: ApplicationStatus::Submitted.as_str().to_string(),
        submission_month: submission_month.clone(),
        created_at: timestamp.clone(),
        updated_at: timestamp.clone(),
        revision: 1,
    };

    let summary: String = format!("submitted for {submission_month}");
    let notifications = settings.application_received(&request.applicant_name, &timestamp);
    let application_id: i64 = db.create_application(
        &new_application,
        &Actor::public(request.applicant_email),
        &summary,
        &notifications,
    )?;

    tracing::info!(application_id, month = %submission_month, "assistance application received");
    let application: AssistanceApplication = db
        .get_application(application_id)?
        .ok_or_else(|| not_found("AssistanceApplication", application_id))?;
    Ok(ApplicationInfo::from_domain(application, application_id))
}

/// Retrieves one application.
///
/// # Errors
///
/// Returns `ResourceNotFound` or a persistence error.
pub fn get_application_details(
    db: &mut Persistence,
    application_id: i64,
) -> Result<ApplicationInfo, ApiError> {
    let application: AssistanceApplication = db
        .get_application(application_id)?
        .ok_or_else(|| not_found("AssistanceApplication", application_id))?;
    Ok(ApplicationInfo::from_domain(application, application_id))
}

/// Lists applications, optionally filtered by status and submission
/// month.
///
/// # Errors
///
/// Returns a persistence error.
pub fn list_applications(
    db: &mut Persistence,
    status: Option<&str>,
    submission_month: Option<&str>,
    page: Page,
) -> Result<ListResponse<ApplicationInfo>, ApiError> {
    let applications = db.list_applications(status, submission_month, page)?;
    Ok(ListResponse::from_page(
        applications,
        |application: AssistanceApplication| {
            let id: i64 = application.id.unwrap_or_default();
            ApplicationInfo::from_domain(application, id)
        },
    ))
}

/// Reviews an application: sets the status, the grant amount where one
/// applies, and the reviewer fields, then notifies the applicant.
///
/// # Errors
///
/// Returns `Unauthorized`, `ResourceNotFound`, `RevisionConflict`, a
/// domain-rule error for a bad grant amount, or a persistence error.
pub fn review_application_decision(
    db: &mut Persistence,
    application_id: i64,
    request: ReviewApplicationRequest,
    actor: &AuthenticatedActor,
    settings: &NotificationSettings,
    now: DateTime<Utc>,
) -> Result<ApplicationInfo, ApiError> {
    AuthorizationService::require_admin(actor, "review application")?;
    let mut application: AssistanceApplication = db
        .get_application(application_id)?
        .ok_or_else(|| not_found("AssistanceApplication", application_id))?;
    // The revision check compares against what the reviewer read, not
    // what is currently stored.
    application.revision = request.revision;

    let requested: ApplicationStatus = request.status.parse().map_err(translate_domain_error)?;
    let timestamp: String = rfc3339(now);
    let outcome: ReviewOutcome = review_application(
        &application,
        requested,
        request.grant_amount_cents,
        request.review_notes,
        &actor.to_audit_actor(),
        &timestamp,
    )
    .map_err(translate_core_error)?;

    let notifications = settings.application_reviewed(
        &application.applicant_name,
        &application.applicant_email,
        requested.as_str(),
        &timestamp,
    );
    match db.record_review(&outcome, &timestamp, &notifications) {
        Ok(()) => {}
        Err(PersistenceError::NotFound) => {
            return Err(not_found("AssistanceApplication", application_id));
        }
        Err(e) => return Err(e.into()),
    }

    get_application_details(db, application_id)
}

// ----------------------------------------------------------------------
// Volunteers
// ----------------------------------------------------------------------

/// Records a volunteer signup.
///
/// # Errors
///
/// Returns `ValidationFailed` or a persistence error.
pub fn signup_volunteer(
    db: &mut Persistence,
    request: SignupVolunteerRequest,
    settings: &NotificationSettings,
    now: DateTime<Utc>,
) -> Result<VolunteerInfo, ApiError> {
    validate_volunteer_input(&request.full_name, &request.email, &request.interests)
        .map_err(validation_failed)?;

    let timestamp: String = rfc3339(now);
    let interests_json: String = serde_json::to_string(&request.interests)
        .map_err(|e| ApiError::InternalError { message: e.to_string() })?;

    let new_volunteer: NewVolunteer = NewVolunteer {
        full_name: request.full_name.clone(),
        email: request.email.clone(),
        phone: request.phone,
        interests: interests_json,
        status: VolunteerStatus::Pending.as_str().to_string(),
        created_at: timestamp.clone(),
        updated_at: timestamp.clone(),
        revision: 1,
    };

    let summary: String = request.interests.join(", ");
    let notifications = settings.volunteer_signup(&request.full_name, &timestamp);
    let volunteer_id: i64 = db.create_volunteer(
        &new_volunteer,
        &Actor::public(request.email),
        &summary,
        &notifications,
    )?;

    let volunteer: Volunteer = db
        .get_volunteer(volunteer_id)?
        .ok_or_else(|| not_found("Volunteer", volunteer_id))?;
    Ok(VolunteerInfo::from_domain(volunteer, volunteer_id))
}

/// Retrieves one volunteer.
///
/// # Errors
///
/// Returns `ResourceNotFound` or a persistence error.
pub fn get_volunteer_details(
    db: &mut Persistence,
    volunteer_id: i64,
) -> Result<VolunteerInfo, ApiError> {
    let volunteer: Volunteer = db
        .get_volunteer(volunteer_id)?
        .ok_or_else(|| not_found("Volunteer", volunteer_id))?;
    Ok(VolunteerInfo::from_domain(volunteer, volunteer_id))
}

/// Lists volunteers, optionally filtered by status.
///
/// # Errors
///
/// Returns a persistence error.
pub fn list_volunteers(
    db: &mut Persistence,
    status: Option<&str>,
    page: Page,
) -> Result<ListResponse<VolunteerInfo>, ApiError> {
    let volunteers = db.list_volunteers(status, page)?;
    Ok(ListResponse::from_page(volunteers, |volunteer: Volunteer| {
        let id: i64 = volunteer.id.unwrap_or_default();
        VolunteerInfo::from_domain(volunteer, id)
    }))
}

/// Applies an admin status change to a volunteer and notifies them.
///
/// # Errors
///
/// Returns `Unauthorized`, `ResourceNotFound`, `RevisionConflict`,
/// `InvalidInput` for an unknown status, or a persistence error.
pub fn update_volunteer_status(
    db: &mut Persistence,
    volunteer_id: i64,
    request: UpdateStatusRequest,
    actor: &AuthenticatedActor,
    settings: &NotificationSettings,
    now: DateTime<Utc>,
) -> Result<VolunteerInfo, ApiError> {
    AuthorizationService::require_admin(actor, "update volunteer status")?;
    let volunteer: Volunteer = db
        .get_volunteer(volunteer_id)?
        .ok_or_else(|| not_found("Volunteer", volunteer_id))?;
    let requested: VolunteerStatus = request.status.parse().map_err(translate_domain_error)?;

    let transition: Transition<VolunteerStatus> = apply_status_change(
        volunteer_id,
        volunteer.status,
        requested,
        request.revision,
        actor.to_audit_actor(),
        request.notes.as_deref(),
    );
    let timestamp: String = rfc3339(now);
    let notifications = settings.volunteer_status_changed(
        &volunteer.full_name,
        &volunteer.email,
        requested.as_str(),
        &timestamp,
    );
    match db.update_volunteer_status(&transition, &timestamp, &notifications) {
        Ok(()) => {}
        Err(PersistenceError::NotFound) => return Err(not_found("Volunteer", volunteer_id)),
        Err(e) => return Err(e.into()),
    }

    get_volunteer_details(db, volunteer_id)
}

// ----------------------------------------------------------------------
// Members, delivery options, delivery requests
// ----------------------------------------------------------------------

/// Registers a member. Registration is idempotent on email: registering
/// an address that already exists returns the existing member.
///
/// # Errors
///
/// Returns `ValidationFailed` or a persistence error.
pub fn register_member(
    db: &mut Persistence,
    request: RegisterMemberRequest,
    now: DateTime<Utc>,
) -> Result<MemberInfo, ApiError> {
    validate_member_input(&request.name, &request.email).map_err(validation_failed)?;

    if let Some(existing) = db.get_member_by_email(&request.email)? {
        let id: i64 = existing.id.unwrap_or_default();
        return Ok(MemberInfo::from_domain(existing, id));
    }

    let new_member: NewMember = NewMember {
        name: request.name,
        email: request.email,
        has_delivery_request: 0,
        created_at: rfc3339(now),
    };
    let member_id: i64 = db.create_member(&new_member)?;
    let member: Member = db
        .get_member(member_id)?
        .ok_or_else(|| not_found("Member", member_id))?;
    Ok(MemberInfo::from_domain(member, member_id))
}

/// Creates a delivery option.
///
/// # Errors
///
/// Returns `Unauthorized`, `ValidationFailed`, or a persistence error.
pub fn create_delivery_option(
    db: &mut Persistence,
    request: CreateDeliveryOptionRequest,
    actor: &AuthenticatedActor,
) -> Result<DeliveryOptionInfo, ApiError> {
    AuthorizationService::require_admin(actor, "create delivery option")?;
    if request.label.trim().is_empty() {
        return Err(validation_failed(vec![FieldError::new(
            "label",
            "must not be empty",
        )]));
    }

    let new_option: NewDeliveryOption = NewDeliveryOption {
        label: request.label,
        description: request.description,
        is_active: i32::from(request.is_active),
    };
    let option_id: i64 = db.create_delivery_option(&new_option)?;
    let option: DeliveryOption = db
        .get_delivery_option(option_id)?
        .ok_or_else(|| not_found("DeliveryOption", option_id))?;
    Ok(DeliveryOptionInfo::from_domain(option, option_id))
}

/// Lists delivery options; the public surface passes `active_only`.
///
/// # Errors
///
/// Returns a persistence error.
pub fn list_delivery_options(
    db: &mut Persistence,
    active_only: bool,
) -> Result<Vec<DeliveryOptionInfo>, ApiError> {
    let options: Vec<DeliveryOption> = db.list_delivery_options(active_only)?;
    Ok(options
        .into_iter()
        .map(|option: DeliveryOption| {
            let id: i64 = option.id.unwrap_or_default();
            DeliveryOptionInfo::from_domain(option, id)
        })
        .collect())
}

/// Places a delivery request for a registered member. The chosen option
/// must be active, and the member's first-request flag is set in the
/// same transaction as the insert.
///
/// # Errors
///
/// Returns `ValidationFailed`, `ResourceNotFound` for an unknown member
/// or option, a domain-rule error for an inactive option, or a
/// persistence error.
pub fn submit_delivery_request(
    db: &mut Persistence,
    request: SubmitDeliveryRequestRequest,
    settings: &NotificationSettings,
    now: DateTime<Utc>,
) -> Result<DeliveryRequestInfo, ApiError> {
    validate_delivery_request_input(&request.delivery_address).map_err(validation_failed)?;

    let member: Member = db
        .get_member(request.member_id)?
        .ok_or_else(|| not_found("Member", request.member_id))?;
    let option: DeliveryOption = db
        .get_delivery_option(request.delivery_option_id)?
        .ok_or_else(|| not_found("DeliveryOption", request.delivery_option_id))?;
    if !option.is_active {
        return Err(translate_domain_error(
            harborlight_domain::DomainError::InactiveDeliveryOption(request.delivery_option_id),
        ));
    }

    let timestamp: String = rfc3339(now);
    let new_request: NewDeliveryRequest = NewDeliveryRequest {
        member_id: request.member_id,
        delivery_option_id: request.delivery_option_id,
        delivery_address: request.delivery_address,
        notes: request.notes,
        status: DeliveryStatus::Pending.as_str().to_string(),
        created_at: timestamp.clone(),
        updated_at: timestamp.clone(),
        revision: 1,
    };

    let summary: String = format!("{} requested by {}", option.label, member.name);
    let notifications = settings.delivery_request_received(&member.name, &timestamp);
    let request_id: i64 = db.create_delivery_request(
        &new_request,
        &Actor::public(member.email),
        &summary,
        &notifications,
    )?;

    let created: DeliveryRequest = db
        .get_delivery_request(request_id)?
        .ok_or_else(|| not_found("DeliveryRequest", request_id))?;
    Ok(DeliveryRequestInfo::from_domain(created, request_id))
}

/// Retrieves one delivery request.
///
/// # Errors
///
/// Returns `ResourceNotFound` or a persistence error.
pub fn get_delivery_request_details(
    db: &mut Persistence,
    delivery_request_id: i64,
) -> Result<DeliveryRequestInfo, ApiError> {
    let request: DeliveryRequest = db
        .get_delivery_request(delivery_request_id)?
        .ok_or_else(|| not_found("DeliveryRequest", delivery_request_id))?;
    Ok(DeliveryRequestInfo::from_domain(request, delivery_request_id))
}

/// Lists delivery requests, optionally filtered by status.
///
/// # Errors
///
/// Returns a persistence error.
pub fn list_delivery_requests(
    db: &mut Persistence,
    status: Option<&str>,
    page: Page,
) -> Result<ListResponse<DeliveryRequestInfo>, ApiError> {
    let requests = db.list_delivery_requests(status, page)?;
    Ok(ListResponse::from_page(
        requests,
        |request: DeliveryRequest| {
            let id: i64 = request.id.unwrap_or_default();
            DeliveryRequestInfo::from_domain(request, id)
        },
    ))
}

/// Applies an admin status change to a delivery request and notifies
/// the member behind it.
///
/// # Errors
///
/// Returns `Unauthorized`, `ResourceNotFound`, `RevisionConflict`,
/// `InvalidInput` for an unknown status, or a persistence error.
pub fn update_delivery_request_status(
    db: &mut Persistence,
    delivery_request_id: i64,
    request: UpdateStatusRequest,
    actor: &AuthenticatedActor,
    settings: &NotificationSettings,
    now: DateTime<Utc>,
) -> Result<DeliveryRequestInfo, ApiError> {
    AuthorizationService::require_admin(actor, "update delivery request status")?;
    let existing: DeliveryRequest = db
        .get_delivery_request(delivery_request_id)?
        .ok_or_else(|| not_found("DeliveryRequest", delivery_request_id))?;
    let requested: DeliveryStatus = request.status.parse().map_err(translate_domain_error)?;

    let transition: Transition<DeliveryStatus> = apply_status_change(
        delivery_request_id,
        existing.status,
        requested,
        request.revision,
        actor.to_audit_actor(),
        request.notes.as_deref(),
    );
    let member: Member = db
        .get_member(existing.member_id)?
        .ok_or_else(|| not_found("Member", existing.member_id))?;
    let timestamp: String = rfc3339(now);
    let notifications = settings.delivery_request_status_changed(
        &member.name,
        &member.email,
        requested.as_str(),
        &timestamp,
    );
    match db.update_delivery_request_status(&transition, &timestamp, &notifications) {
        Ok(()) => {}
        Err(PersistenceError::NotFound) => {
            return Err(not_found("DeliveryRequest", delivery_request_id));
        }
        Err(e) => return Err(e.into()),
    }

    get_delivery_request_details(db, delivery_request_id)
}

// ----------------------------------------------------------------------
// Events and tickets
// ----------------------------------------------------------------------

/// Creates an event together with its ticket tiers.
///
/// # Errors
///
/// Returns `Unauthorized`, `ValidationFailed`, or a persistence error.
pub fn create_event(
    db: &mut Persistence,
    request: CreateEventRequest,
    actor: &AuthenticatedActor,
) -> Result<EventInfo, ApiError> {
    AuthorizationService::require_admin(actor, "create event")?;

    let mut errors: Vec<FieldError> = Vec::new();
    if let Err(mut event_errors) =
        validate_event_input(&request.name, &request.starts_at, request.base_price_cents)
    {
        errors.append(&mut event_errors);
    }
    for tier in &request.ticket_types {
        if tier.name.trim().is_empty() {
            errors.push(FieldError::new("ticket_types", "tier name must not be empty"));
        }
        if tier.price_cents < 0 {
            errors.push(FieldError::new(
                "ticket_types",
                "tier price must not be negative",
            ));
        }
    }
    if !errors.is_empty() {
        return Err(validation_failed(errors));
    }

    let new_event: NewEvent = NewEvent {
        name: request.name,
        description: request.description,
        starts_at: request.starts_at,
        location: request.location,
        base_price_cents: request.base_price_cents,
    };
    let event_id: i64 = db.create_event(&new_event)?;

    for tier in request.ticket_types {
        let new_tier: NewTicketType = NewTicketType {
            event_id,
            name: tier.name,
            price_cents: tier.price_cents,
        };
        db.create_ticket_type(&new_tier)?;
    }

    get_event_details(db, event_id)
}

/// Retrieves one event with its ticket tiers.
///
/// # Errors
///
/// Returns `ResourceNotFound` or a persistence error.
pub fn get_event_details(db: &mut Persistence, event_id: i64) -> Result<EventInfo, ApiError> {
    let event: Event = db
        .get_event(event_id)?
        .ok_or_else(|| not_found("Event", event_id))?;
    let tiers: Vec<TicketTypeInfo> = db
        .list_ticket_types(event_id)?
        .into_iter()
        .map(|tier: TicketType| {
            let id: i64 = tier.id.unwrap_or_default();
            TicketTypeInfo::from_domain(tier, id)
        })
        .collect();
    Ok(EventInfo::from_domain(event, event_id, tiers))
}

/// Lists all events with their ticket tiers, soonest first.
///
/// # Errors
///
/// Returns a persistence error.
pub fn list_events(db: &mut Persistence) -> Result<Vec<EventInfo>, ApiError> {
    let events: Vec<Event> = db.list_events()?;
    let mut infos: Vec<EventInfo> = Vec::with_capacity(events.len());
    for event in events {
        let id: i64 = event.id.unwrap_or_default();
        let tiers: Vec<TicketTypeInfo> = db
            .list_ticket_types(id)?
            .into_iter()
            .map(|tier: TicketType| {
                let tier_id: i64 = tier.id.unwrap_or_default();
                TicketTypeInfo::from_domain(tier, tier_id)
            })
            .collect();
        infos.push(EventInfo::from_domain(event, id, tiers));
    }
    Ok(infos)
}

/// Records an offline ticket purchase. The paid amount is derived from
/// the tier (or event base) price, the quantity, and the payment
/// method's fee; a check-in code is generated server-side.
///
/// # Errors
///
/// Returns `ValidationFailed`, `ResourceNotFound` for an unknown event
/// or tier, `InvalidInput` for a tier of a different event,
/// `MissingPaymentMethod`, a domain-rule error for an inactive method,
/// or a persistence error.
pub fn purchase_ticket(
    db: &mut Persistence,
    request: PurchaseTicketRequest,
    settings: &NotificationSettings,
    now: DateTime<Utc>,
) -> Result<TicketInfo, ApiError> {
    validate_ticket_input(&request.buyer_name, &request.buyer_email, request.quantity)
        .map_err(validation_failed)?;

    let event: Event = db
        .get_event(request.event_id)?
        .ok_or_else(|| not_found("Event", request.event_id))?;
    let tier: Option<TicketType> = match request.ticket_type_id {
        Some(ticket_type_id) => {
            let tier: TicketType = db
                .get_ticket_type(ticket_type_id)?
                .ok_or_else(|| not_found("TicketType", ticket_type_id))?;
            if tier.event_id != request.event_id {
                return Err(ApiError::InvalidInput {
                    field: "ticket_type_id".to_string(),
                    message: "ticket type does not belong to the event".to_string(),
                });
            }
            Some(tier)
        }
        None => None,
    };

    let method: PaymentMethod = resolve_payment_method(db, request.payment_method_id)?;
    let paid_amount_cents: i64 =
        price_ticket_purchase(&event, tier.as_ref(), &method, request.quantity)
            .map_err(translate_core_error)?;

    let timestamp: String = rfc3339(now);
    let checkin_code: String = generate_checkin_code();
    let new_ticket: NewTicket = NewTicket {
        event_id: request.event_id,
        ticket_type_id: request.ticket_type_id,
        buyer_name: request.buyer_name.clone(),
        buyer_email: request.buyer_email.clone(),
        quantity: request.quantity,
        paid_amount_cents,
        proof_of_payment: request.proof_of_payment,
        checkin_code: checkin_code.clone(),
        payment_method_id: method.id.unwrap_or_default(),
        status: TicketStatus::Pending.as_str().to_string(),
        created_at: timestamp.clone(),
        updated_at: timestamp.clone(),
        revision: 1,
    };

    let summary: String = format!(
        "{} x {} = {}",
        request.quantity,
        event.name,
        format_cents(paid_amount_cents)
    );
    let notifications = settings.ticket_purchased(
        &request.buyer_name,
        &request.buyer_email,
        &event.name,
        request.quantity,
        &checkin_code,
        &timestamp,
    );
    let ticket_id: i64 = db.create_ticket(
        &new_ticket,
        &Actor::public(request.buyer_email),
        &summary,
        &notifications,
    )?;

    tracing::info!(ticket_id, paid_amount_cents, "ticket purchase recorded");
    let ticket: Ticket = db
        .get_ticket(ticket_id)?
        .ok_or_else(|| not_found("Ticket", ticket_id))?;
    Ok(TicketInfo::from_domain(ticket, ticket_id))
}

/// Retrieves one ticket.
///
/// # Errors
///
/// Returns `ResourceNotFound` or a persistence error.
pub fn get_ticket_details(db: &mut Persistence, ticket_id: i64) -> Result<TicketInfo, ApiError> {
    let ticket: Ticket = db
        .get_ticket(ticket_id)?
        .ok_or_else(|| not_found("Ticket", ticket_id))?;
    Ok(TicketInfo::from_domain(ticket, ticket_id))
}

/// Lists tickets, optionally filtered by event and status.
///
/// # Errors
///
/// Returns a persistence error.
pub fn list_tickets(
    db: &mut Persistence,
    event_id: Option<i64>,
    status: Option<&str>,
    page: Page,
) -> Result<ListResponse<TicketInfo>, ApiError> {
    let tickets = db.list_tickets(event_id, status, page)?;
    Ok(ListResponse::from_page(tickets, |ticket: Ticket| {
        let id: i64 = ticket.id.unwrap_or_default();
        TicketInfo::from_domain(ticket, id)
    }))
}

/// Applies an admin status change to a ticket and notifies the buyer.
///
/// # Errors
///
/// Returns `Unauthorized`, `ResourceNotFound`, `RevisionConflict`,
/// `InvalidInput` for an unknown status, or a persistence error.
pub fn update_ticket_status(
    db: &mut Persistence,
    ticket_id: i64,
    request: UpdateStatusRequest,
    actor: &AuthenticatedActor,
    settings: &NotificationSettings,
    now: DateTime<Utc>,
) -> Result<TicketInfo, ApiError> {
    AuthorizationService::require_admin(actor, "update ticket status")?;
    let ticket: Ticket = db
        .get_ticket(ticket_id)?
        .ok_or_else(|| not_found("Ticket", ticket_id))?;
    let requested: TicketStatus = request.status.parse().map_err(translate_domain_error)?;

    let transition: Transition<TicketStatus> = apply_status_change(
        ticket_id,
        ticket.status,
        requested,
        request.revision,
        actor.to_audit_actor(),
        request.notes.as_deref(),
    );
    let timestamp: String = rfc3339(now);
    let notifications = settings.ticket_status_changed(
        &ticket.buyer_name,
        &ticket.buyer_email,
        requested.as_str(),
        &timestamp,
    );
    match db.update_ticket_status(&transition, &timestamp, &notifications) {
        Ok(()) => {}
        Err(PersistenceError::NotFound) => return Err(not_found("Ticket", ticket_id)),
        Err(e) => return Err(e.into()),
    }

    get_ticket_details(db, ticket_id)
}

// ----------------------------------------------------------------------
// Payment methods
// ----------------------------------------------------------------------

/// Creates a payment method. Marking it the default clears the flag on
/// every other method.
///
/// # Errors
///
/// Returns `Unauthorized`, `ValidationFailed`, `InvalidInput` for an
/// unknown method type, a domain-rule error for a bad fee, or a
/// persistence error.
pub fn create_payment_method(
    db: &mut Persistence,
    request: CreatePaymentMethodRequest,
    actor: &AuthenticatedActor,
    now: DateTime<Utc>,
) -> Result<PaymentMethodInfo, ApiError> {
    AuthorizationService::require_admin(actor, "create payment method")?;
    validate_payment_method_input(&request.label, &request.instructions, request.fee_percent)
        .map_err(validation_failed)?;
    let method_type: PaymentMethodType =
        request.method_type.parse().map_err(translate_domain_error)?;
    let fee: FeeRate = FeeRate::from_percent(request.fee_percent).map_err(translate_domain_error)?;

    let timestamp: String = rfc3339(now);
    let new_method: NewPaymentMethod = NewPaymentMethod {
        method_type: method_type.as_str().to_string(),
        label: request.label,
        instructions: request.instructions,
        fee_bps: fee.basis_points(),
        is_active: i32::from(request.is_active),
        is_default: i32::from(request.is_default),
        created_at: timestamp.clone(),
        updated_at: timestamp,
    };
    let method_id: i64 = db.create_payment_method(&new_method)?;
    get_payment_method_details(db, method_id)
}

/// Retrieves one payment method.
///
/// # Errors
///
/// Returns `ResourceNotFound` or a persistence error.
pub fn get_payment_method_details(
    db: &mut Persistence,
    payment_method_id: i64,
) -> Result<PaymentMethodInfo, ApiError> {
    let method: PaymentMethod = db
        .get_payment_method(payment_method_id)?
        .ok_or_else(|| not_found("PaymentMethod", payment_method_id))?;
    Ok(PaymentMethodInfo::from_domain(method, payment_method_id))
}

/// Lists payment methods. The public surface passes `active_only`
/// unconditionally; the admin surface may filter by method type.
///
/// # Errors
///
/// Returns a persistence error.
pub fn list_payment_methods(
    db: &mut Persistence,
    method_type: Option<&str>,
    active_only: bool,
) -> Result<Vec<PaymentMethodInfo>, ApiError> {
    let methods: Vec<PaymentMethod> = db.list_payment_methods(method_type, active_only)?;
    Ok(methods
        .into_iter()
        .map(|method: PaymentMethod| {
            let id: i64 = method.id.unwrap_or_default();
            PaymentMethodInfo::from_domain(method, id)
        })
        .collect())
}

/// Edits a payment method's label, instructions, fee, and active flag.
///
/// # Errors
///
/// Returns `Unauthorized`, `ValidationFailed`, `ResourceNotFound`, a
/// domain-rule error for a bad fee, or a persistence error.
pub fn update_payment_method(
    db: &mut Persistence,
    payment_method_id: i64,
    request: UpdatePaymentMethodRequest,
    actor: &AuthenticatedActor,
    now: DateTime<Utc>,
) -> Result<PaymentMethodInfo, ApiError> {
    AuthorizationService::require_admin(actor, "update payment method")?;
    validate_payment_method_input(&request.label, &request.instructions, request.fee_percent)
        .map_err(validation_failed)?;
    let fee: FeeRate = FeeRate::from_percent(request.fee_percent).map_err(translate_domain_error)?;

    match db.update_payment_method(
        payment_method_id,
        &request.label,
        &request.instructions,
        fee.basis_points(),
        request.is_active,
        &rfc3339(now),
    ) {
        Ok(()) => {}
        Err(PersistenceError::NotFound) => {
            return Err(not_found("PaymentMethod", payment_method_id));
        }
        Err(e) => return Err(e.into()),
    }
    get_payment_method_details(db, payment_method_id)
}

/// Flips a payment method between active and inactive.
///
/// # Errors
///
/// Returns `Unauthorized`, `ResourceNotFound`, or a persistence error.
pub fn toggle_payment_method(
    db: &mut Persistence,
    payment_method_id: i64,
    actor: &AuthenticatedActor,
    now: DateTime<Utc>,
) -> Result<PaymentMethodInfo, ApiError> {
    AuthorizationService::require_admin(actor, "toggle payment method")?;
    match db.toggle_payment_method_active(payment_method_id, &rfc3339(now)) {
        Ok(_) => {}
        Err(PersistenceError::NotFound) => {
            return Err(not_found("PaymentMethod", payment_method_id));
        }
        Err(e) => return Err(e.into()),
    }
    get_payment_method_details(db, payment_method_id)
}

/// Deletes a payment method.
///
/// # Errors
///
/// Returns `Unauthorized`, `ResourceNotFound`, or a persistence error
/// (including a foreign-key failure when the method is still referenced
/// by donations or tickets).
pub fn delete_payment_method(
    db: &mut Persistence,
    payment_method_id: i64,
    actor: &AuthenticatedActor,
) -> Result<(), ApiError> {
    AuthorizationService::require_admin(actor, "delete payment method")?;
    match db.delete_payment_method(payment_method_id) {
        Ok(()) => Ok(()),
        Err(PersistenceError::NotFound) => Err(not_found("PaymentMethod", payment_method_id)),
        Err(e) => Err(e.into()),
    }
}

/// Makes a payment method the default.
///
/// # Errors
///
/// Returns `Unauthorized`, `ResourceNotFound`, or a persistence error.
pub fn set_default_payment_method(
    db: &mut Persistence,
    payment_method_id: i64,
    actor: &AuthenticatedActor,
    now: DateTime<Utc>,
) -> Result<PaymentMethodInfo, ApiError> {
    AuthorizationService::require_admin(actor, "set default payment method")?;
    match db.set_default_payment_method(payment_method_id, &rfc3339(now)) {
        Ok(()) => {}
        Err(PersistenceError::NotFound) => {
            return Err(not_found("PaymentMethod", payment_method_id));
        }
        Err(e) => return Err(e.into()),
    }
    get_payment_method_details(db, payment_method_id)
}

// ----------------------------------------------------------------------
// Audit log
// ----------------------------------------------------------------------

/// Lists audit entries, newest first, optionally filtered by resource
/// kind and id.
///
/// # Errors
///
/// Returns `Unauthorized` or a persistence error.
pub fn list_audit_entries(
    db: &mut Persistence,
    resource: Option<&str>,
    resource_id: Option<i64>,
    page: Page,
    actor: &AuthenticatedActor,
) -> Result<ListResponse<AuditEntryInfo>, ApiError> {
    AuthorizationService::require_admin(actor, "read audit log")?;
    let entries = db.list_audit_entries(resource, resource_id, page)?;
    Ok(ListResponse::from_page(entries, Into::into))
}
