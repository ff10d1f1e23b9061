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
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use chrono::{SecondsFormat, Utc};
use clap::Parser;
use harborlight_api::{
    ApiError, AuthenticationService, FieldErrorInfo, NotificationSettings,
    handlers as api,
    request_response::{
        ApplicationInfo, AuditEntryInfo, CreateDeliveryOptionRequest, CreateEventRequest,
        CreatePaymentMethodRequest, DeliveryOptionInfo, DeliveryRequestInfo, DonationInfo,
        EventInfo, ListResponse, LoginRequest, LoginResponse, MemberInfo, PaymentMethodInfo,
        PurchaseTicketRequest, RegisterMemberRequest, ReviewApplicationRequest,
        SignupVolunteerRequest, SubmitApplicationRequest, SubmitDeliveryRequestRequest,
        SubmitDonationRequest, TicketInfo, UpdatePaymentMethodRequest, UpdateStatusRequest,
        VolunteerInfo,
    },
};
use harborlight_domain::SubmissionWindow;
use harborlight_notify::{NoopNotifier, Notifier, SmtpConfig, SmtpNotifier};
use harborlight_persistence::{DEFAULT_PAGE_LIMIT, Page, Persistence};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

mod outbox;
mod session;

use session::{SessionAdmin, bearer_token};

/// Harborlight Server - HTTP server for the Harborlight charity platform
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// The persistence layer is wrapped in a Mutex for safe concurrent
/// access; the submission window and notification settings are read-only
/// after startup.
#[derive(Clone)]
pub struct AppState {
    /// The persistence layer.
    pub persistence: Arc<Mutex<Persistence>>,
    /// The assistance-application submission window.
    pub window: SubmissionWindow,
    /// Outbox fan-out settings.
    pub notifications: NotificationSettings,
}

/// Settings read from the environment at startup.
struct ServerConfig {
    window: SubmissionWindow,
    notifications: NotificationSettings,
    smtp: Option<SmtpConfig>,
    bootstrap_admin: Option<(String, String)>,
}

impl ServerConfig {
    /// Loads server settings from the environment.
    ///
    /// `SUBMISSION_WINDOW_TZ` defaults to UTC; `NOTIFY_EMAILS` unset
    /// disables admin fan-out; SMTP settings are only honored when the
    /// full set is present, so a half-configured mail relay falls back
    /// to the no-op notifier instead of failing sends at runtime.
    fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let tz_name: String =
            std::env::var("SUBMISSION_WINDOW_TZ").unwrap_or_else(|_| String::from("UTC"));
        let window: SubmissionWindow = SubmissionWindow::from_tz_name(&tz_name)?;

        let notifications: NotificationSettings = match std::env::var("NOTIFY_EMAILS") {
            Ok(emails) => {
                let frontend_url: String = std::env::var("FRONTEND_URL").unwrap_or_default();
                NotificationSettings::from_env_values(&emails, &frontend_url)
            }
            Err(_) => NotificationSettings::disabled(),
        };

        let smtp: Option<SmtpConfig> = match (
            std::env::var("SMTP_HOST"),
            std::env::var("SMTP_USERNAME"),
            std::env::var("SMTP_PASSWORD"),
            std::env::var("SMTP_FROM"),
        ) {
            (Ok(host), Ok(username), Ok(password), Ok(from_address)) => {
                let port: u16 = std::env::var("SMTP_PORT")
                    .ok()
                    .and_then(|raw: String| raw.parse().ok())
                    .unwrap_or(587);
                Some(SmtpConfig {
                    host,
                    port,
                    username,
                    password,
                    from_address,
                })
            }
            _ => None,
        };

        let bootstrap_admin: Option<(String, String)> = match (
            std::env::var("ADMIN_LOGIN"),
            std::env::var("ADMIN_PASSWORD"),
        ) {
            (Ok(login), Ok(password)) => Some((login, password)),
            _ => None,
        };

        Ok(Self {
            window,
            notifications,
            smtp,
            bootstrap_admin,
        })
    }
}

/// Success envelope carried by every non-error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ApiResponse<T> {
    /// Human-readable outcome description.
    message: String,
    /// The response payload.
    data: T,
}

fn ok<T>(message: &str, data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        message: message.to_string(),
        data,
    })
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error message.
    message: String,
    /// Field-level problems, present on validation failures only.
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<FieldErrorInfo>>,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
    /// Field-level problems, for 400 validation responses.
    errors: Option<Vec<FieldErrorInfo>>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            message: self.message,
            errors: self.errors,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let message: String = err.to_string();
        match err {
            ApiError::ValidationFailed { errors } => Self {
                status: StatusCode::BAD_REQUEST,
                message,
                errors: Some(errors),
            },
            ApiError::InvalidInput { .. }
            | ApiError::WindowClosed { .. }
            | ApiError::MissingPaymentMethod => Self {
                status: StatusCode::BAD_REQUEST,
                message,
                errors: None,
            },
            ApiError::AuthenticationFailed { .. } => Self {
                status: StatusCode::UNAUTHORIZED,
                message,
                errors: None,
            },
            ApiError::Unauthorized { .. } => Self {
                status: StatusCode::FORBIDDEN,
                message,
                errors: None,
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message,
                errors: None,
            },
            ApiError::RevisionConflict { .. } => Self {
                status: StatusCode::CONFLICT,
                message,
                errors: None,
            },
            ApiError::DomainRuleViolation { .. } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message,
                errors: None,
            },
            ApiError::InternalError { .. } => {
                error!(error = %message, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message,
                    errors: None,
                }
            }
        }
    }
}

/// Pagination query parameters shared by most list endpoints.
#[derive(Debug, Deserialize)]
struct ListQuery {
    page: Option<i64>,
    limit: Option<i64>,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApplicationListQuery {
    page: Option<i64>,
    limit: Option<i64>,
    status: Option<String>,
    submission_month: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TicketListQuery {
    page: Option<i64>,
    limit: Option<i64>,
    status: Option<String>,
    event_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct MethodListQuery {
    method_type: Option<String>,
    active: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct OptionListQuery {
    active: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct AuditListQuery {
    page: Option<i64>,
    limit: Option<i64>,
    resource: Option<String>,
    resource_id: Option<i64>,
}

fn page_from(page: Option<i64>, limit: Option<i64>) -> Page {
    Page::new(page.unwrap_or(1), limit.unwrap_or(DEFAULT_PAGE_LIMIT))
}

// --- Donations ---

async fn handle_submit_donation(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<SubmitDonationRequest>,
) -> Result<Json<ApiResponse<DonationInfo>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let donation: DonationInfo =
        api::submit_donation(&mut persistence, request, &state.notifications, Utc::now())?;
    Ok(ok("Donation recorded", donation))
}

async fn handle_list_donations(
    AxumState(state): AxumState<AppState>,
    SessionAdmin(_actor): SessionAdmin,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<ListResponse<DonationInfo>>>, HttpError> {
    let page: Page = page_from(query.page, query.limit);
    let mut persistence = state.persistence.lock().await;
    let donations: ListResponse<DonationInfo> =
        api::list_donations(&mut persistence, query.status.as_deref(), page)?;
    Ok(ok("Donations listed", donations))
}

async fn handle_get_donation(
    AxumState(state): AxumState<AppState>,
    SessionAdmin(_actor): SessionAdmin,
    Path(donation_id): Path<i64>,
) -> Result<Json<ApiResponse<DonationInfo>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let donation: DonationInfo = api::get_donation_details(&mut persistence, donation_id)?;
    Ok(ok("Donation retrieved", donation))
}

async fn handle_update_donation_status(
    AxumState(state): AxumState<AppState>,
    SessionAdmin(actor): SessionAdmin,
    Path(donation_id): Path<i64>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<DonationInfo>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let donation: DonationInfo = api::update_donation_status(
        &mut persistence,
        donation_id,
        request,
        &actor,
        &state.notifications,
        Utc::now(),
    )?;
    Ok(ok("Donation status updated", donation))
}

// --- Assistance applications ---

async fn handle_submit_application(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<SubmitApplicationRequest>,
) -> Result<Json<ApiResponse<ApplicationInfo>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let application: ApplicationInfo = api::submit_application(
        &mut persistence,
        request,
        &state.window,
        &state.notifications,
        Utc::now(),
    )?;
    Ok(ok("Application received", application))
}

async fn handle_list_applications(
    AxumState(state): AxumState<AppState>,
    SessionAdmin(_actor): SessionAdmin,
    Query(query): Query<ApplicationListQuery>,
) -> Result<Json<ApiResponse<ListResponse<ApplicationInfo>>>, HttpError> {
    let page: Page = page_from(query.page, query.limit);
    let mut persistence = state.persistence.lock().await;
    let applications: ListResponse<ApplicationInfo> = api::list_applications(
        &mut persistence,
        query.status.as_deref(),
        query.submission_month.as_deref(),
        page,
    )?;
    Ok(ok("Applications listed", applications))
}

async fn handle_get_application(
    AxumState(state): AxumState<AppState>,
    SessionAdmin(_actor): SessionAdmin,
    Path(application_id): Path<i64>,
) -> Result<Json<ApiResponse<ApplicationInfo>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let application: ApplicationInfo =
        api::get_application_details(&mut persistence, application_id)?;
    Ok(ok("Application retrieved", application))
}

async fn handle_review_application(
    AxumState(state): AxumState<AppState>,
    SessionAdmin(actor): SessionAdmin,
    Path(application_id): Path<i64>,
    Json(request): Json<ReviewApplicationRequest>,
) -> Result<Json<ApiResponse<ApplicationInfo>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let application: ApplicationInfo = api::review_application_decision(
        &mut persistence,
        application_id,
        request,
        &actor,
        &state.notifications,
        Utc::now(),
    )?;
    Ok(ok("Application reviewed", application))
}

// --- Volunteers ---

async fn handle_signup_volunteer(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<SignupVolunteerRequest>,
) -> Result<Json<ApiResponse<VolunteerInfo>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let volunteer: VolunteerInfo =
        api::signup_volunteer(&mut persistence, request, &state.notifications, Utc::now())?;
    Ok(ok("Volunteer signup received", volunteer))
}

async fn handle_list_volunteers(
    AxumState(state): AxumState<AppState>,
    SessionAdmin(_actor): SessionAdmin,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<ListResponse<VolunteerInfo>>>, HttpError> {
    let page: Page = page_from(query.page, query.limit);
    let mut persistence = state.persistence.lock().await;
    let volunteers: ListResponse<VolunteerInfo> =
        api::list_volunteers(&mut persistence, query.status.as_deref(), page)?;
    Ok(ok("Volunteers listed", volunteers))
}

async fn handle_get_volunteer(
    AxumState(state): AxumState<AppState>,
    SessionAdmin(_actor): SessionAdmin,
    Path(volunteer_id): Path<i64>,
) -> Result<Json<ApiResponse<VolunteerInfo>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let volunteer: VolunteerInfo = api::get_volunteer_details(&mut persistence, volunteer_id)?;
    Ok(ok("Volunteer retrieved", volunteer))
}

async fn handle_update_volunteer_status(
    AxumState(state): AxumState<AppState>,
    SessionAdmin(actor): SessionAdmin,
    Path(volunteer_id): Path<i64>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<VolunteerInfo>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let volunteer: VolunteerInfo = api::update_volunteer_status(
        &mut persistence,
        volunteer_id,
        request,
        &actor,
        &state.notifications,
        Utc::now(),
    )?;
    Ok(ok("Volunteer status updated", volunteer))
}

// --- Members and deliveries ---

async fn handle_register_member(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<RegisterMemberRequest>,
) -> Result<Json<ApiResponse<MemberInfo>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let member: MemberInfo = api::register_member(&mut persistence, request, Utc::now())?;
    Ok(ok("Member registered", member))
}

async fn handle_create_delivery_option(
    AxumState(state): AxumState<AppState>,
    SessionAdmin(actor): SessionAdmin,
    Json(request): Json<CreateDeliveryOptionRequest>,
) -> Result<Json<ApiResponse<DeliveryOptionInfo>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let option: DeliveryOptionInfo =
        api::create_delivery_option(&mut persistence, request, &actor)?;
    Ok(ok("Delivery option created", option))
}

async fn handle_list_delivery_options(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<OptionListQuery>,
) -> Result<Json<ApiResponse<Vec<DeliveryOptionInfo>>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let options: Vec<DeliveryOptionInfo> =
        api::list_delivery_options(&mut persistence, query.active.unwrap_or(false))?;
    Ok(ok("Delivery options listed", options))
}

async fn handle_submit_delivery_request(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<SubmitDeliveryRequestRequest>,
) -> Result<Json<ApiResponse<DeliveryRequestInfo>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let delivery_request: DeliveryRequestInfo =
        api::submit_delivery_request(&mut persistence, request, &state.notifications, Utc::now())?;
    Ok(ok("Delivery request received", delivery_request))
}

async fn handle_list_delivery_requests(
    AxumState(state): AxumState<AppState>,
    SessionAdmin(_actor): SessionAdmin,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<ListResponse<DeliveryRequestInfo>>>, HttpError> {
    let page: Page = page_from(query.page, query.limit);
    let mut persistence = state.persistence.lock().await;
    let requests: ListResponse<DeliveryRequestInfo> =
        api::list_delivery_requests(&mut persistence, query.status.as_deref(), page)?;
    Ok(ok("Delivery requests listed", requests))
}

async fn handle_get_delivery_request(
    AxumState(state): AxumState<AppState>,
    SessionAdmin(_actor): SessionAdmin,
    Path(delivery_request_id): Path<i64>,
) -> Result<Json<ApiResponse<DeliveryRequestInfo>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let delivery_request: DeliveryRequestInfo =
        api::get_delivery_request_details(&mut persistence, delivery_request_id)?;
    Ok(ok("Delivery request retrieved", delivery_request))
}

async fn handle_update_delivery_request_status(
    AxumState(state): AxumState<AppState>,
    SessionAdmin(actor): SessionAdmin,
    Path(delivery_request_id): Path<i64>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<DeliveryRequestInfo>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let delivery_request: DeliveryRequestInfo = api::update_delivery_request_status(
        &mut persistence,
        delivery_request_id,
        request,
        &actor,
        &state.notifications,
        Utc::now(),
    )?;
    Ok(ok("Delivery request status updated", delivery_request))
}

// --- Events and tickets ---

async fn handle_create_event(
    AxumState(state): AxumState<AppState>,
    SessionAdmin(actor): SessionAdmin,
    Json(request): Json<CreateEventRequest>,
) -> Result<Json<ApiResponse<EventInfo>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let event: EventInfo = api::create_event(&mut persistence, request, &actor)?;
    Ok(ok("Event created", event))
}

async fn handle_list_events(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<ApiResponse<Vec<EventInfo>>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let events: Vec<EventInfo> = api::list_events(&mut persistence)?;
    Ok(ok("Events listed", events))
}

async fn handle_get_event(
    AxumState(state): AxumState<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<ApiResponse<EventInfo>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let event: EventInfo = api::get_event_details(&mut persistence, event_id)?;
    Ok(ok("Event retrieved", event))
}

async fn handle_purchase_ticket(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<PurchaseTicketRequest>,
) -> Result<Json<ApiResponse<TicketInfo>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let ticket: TicketInfo =
        api::purchase_ticket(&mut persistence, request, &state.notifications, Utc::now())?;
    Ok(ok("Ticket purchase recorded", ticket))
}

async fn handle_list_tickets(
    AxumState(state): AxumState<AppState>,
    SessionAdmin(_actor): SessionAdmin,
    Query(query): Query<TicketListQuery>,
) -> Result<Json<ApiResponse<ListResponse<TicketInfo>>>, HttpError> {
    let page: Page = page_from(query.page, query.limit);
    let mut persistence = state.persistence.lock().await;
    let tickets: ListResponse<TicketInfo> = api::list_tickets(
        &mut persistence,
        query.event_id,
        query.status.as_deref(),
        page,
    )?;
    Ok(ok("Tickets listed", tickets))
}

async fn handle_get_ticket(
    AxumState(state): AxumState<AppState>,
    SessionAdmin(_actor): SessionAdmin,
    Path(ticket_id): Path<i64>,
) -> Result<Json<ApiResponse<TicketInfo>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let ticket: TicketInfo = api::get_ticket_details(&mut persistence, ticket_id)?;
    Ok(ok("Ticket retrieved", ticket))
}

async fn handle_update_ticket_status(
    AxumState(state): AxumState<AppState>,
    SessionAdmin(actor): SessionAdmin,
    Path(ticket_id): Path<i64>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<TicketInfo>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let ticket: TicketInfo = api::update_ticket_status(
        &mut persistence,
        ticket_id,
        request,
        &actor,
        &state.notifications,
        Utc::now(),
    )?;
    Ok(ok("Ticket status updated", ticket))
}

// --- Payment methods ---

async fn handle_create_payment_method(
    AxumState(state): AxumState<AppState>,
    SessionAdmin(actor): SessionAdmin,
    Json(request): Json<CreatePaymentMethodRequest>,
) -> Result<Json<ApiResponse<PaymentMethodInfo>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let method: PaymentMethodInfo =
        api::create_payment_method(&mut persistence, request, &actor, Utc::now())?;
    Ok(ok("Payment method created", method))
}

async fn handle_list_payment_methods(
    AxumState(state): AxumState<AppState>,
    SessionAdmin(_actor): SessionAdmin,
    Query(query): Query<MethodListQuery>,
) -> Result<Json<ApiResponse<Vec<PaymentMethodInfo>>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let methods: Vec<PaymentMethodInfo> = api::list_payment_methods(
        &mut persistence,
        query.method_type.as_deref(),
        query.active.unwrap_or(false),
    )?;
    Ok(ok("Payment methods listed", methods))
}

/// Public listing. Only active methods are returned no matter what the
/// query says.
async fn handle_list_active_payment_methods(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<MethodListQuery>,
) -> Result<Json<ApiResponse<Vec<PaymentMethodInfo>>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let methods: Vec<PaymentMethodInfo> =
        api::list_payment_methods(&mut persistence, query.method_type.as_deref(), true)?;
    Ok(ok("Payment methods listed", methods))
}

async fn handle_update_payment_method(
    AxumState(state): AxumState<AppState>,
    SessionAdmin(actor): SessionAdmin,
    Path(payment_method_id): Path<i64>,
    Json(request): Json<UpdatePaymentMethodRequest>,
) -> Result<Json<ApiResponse<PaymentMethodInfo>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let method: PaymentMethodInfo = api::update_payment_method(
        &mut persistence,
        payment_method_id,
        request,
        &actor,
        Utc::now(),
    )?;
    Ok(ok("Payment method updated", method))
}

async fn handle_toggle_payment_method(
    AxumState(state): AxumState<AppState>,
    SessionAdmin(actor): SessionAdmin,
    Path(payment_method_id): Path<i64>,
) -> Result<Json<ApiResponse<PaymentMethodInfo>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let method: PaymentMethodInfo =
        api::toggle_payment_method(&mut persistence, payment_method_id, &actor, Utc::now())?;
    Ok(ok("Payment method toggled", method))
}

async fn handle_delete_payment_method(
    AxumState(state): AxumState<AppState>,
    SessionAdmin(actor): SessionAdmin,
    Path(payment_method_id): Path<i64>,
) -> Result<Json<serde_json::Value>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    api::delete_payment_method(&mut persistence, payment_method_id, &actor)?;
    Ok(Json(
        serde_json::json!({ "message": "Payment method deleted" }),
    ))
}

async fn handle_set_default_payment_method(
    AxumState(state): AxumState<AppState>,
    SessionAdmin(actor): SessionAdmin,
    Path(payment_method_id): Path<i64>,
) -> Result<Json<ApiResponse<PaymentMethodInfo>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let method: PaymentMethodInfo =
        api::set_default_payment_method(&mut persistence, payment_method_id, &actor, Utc::now())?;
    Ok(ok("Default payment method set", method))
}

// --- Audit and auth ---

async fn handle_list_audit(
    AxumState(state): AxumState<AppState>,
    SessionAdmin(actor): SessionAdmin,
    Query(query): Query<AuditListQuery>,
) -> Result<Json<ApiResponse<ListResponse<AuditEntryInfo>>>, HttpError> {
    let page: Page = page_from(query.page, query.limit);
    let mut persistence = state.persistence.lock().await;
    let entries: ListResponse<AuditEntryInfo> = api::list_audit_entries(
        &mut persistence,
        query.resource.as_deref(),
        query.resource_id,
        page,
        &actor,
    )?;
    Ok(ok("Audit entries listed", entries))
}

async fn handle_login(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let (token, operator) = AuthenticationService::login(
        &mut persistence,
        &request.login_name,
        &request.password,
        Utc::now(),
    )
    .map_err(ApiError::from)?;
    info!(operator = %operator.login_name, "Operator logged in");
    Ok(ok(
        "Login successful",
        LoginResponse {
            token,
            display_name: operator.display_name,
        },
    ))
}

async fn handle_logout(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, HttpError> {
    let token: &str = bearer_token(&headers).ok_or_else(|| HttpError {
        status: StatusCode::UNAUTHORIZED,
        message: String::from("Missing Authorization header. Expected: 'Bearer <token>'"),
        errors: None,
    })?;
    let mut persistence = state.persistence.lock().await;
    AuthenticationService::logout(&mut persistence, token).map_err(ApiError::from)?;
    Ok(Json(serde_json::json!({ "message": "Logged out" })))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/donations",
            post(handle_submit_donation).get(handle_list_donations),
        )
        .route("/donations/{id}", get(handle_get_donation))
        .route("/donations/{id}/status", patch(handle_update_donation_status))
        .route(
            "/applications",
            post(handle_submit_application).get(handle_list_applications),
        )
        .route("/applications/{id}", get(handle_get_application))
        .route("/applications/{id}/review", patch(handle_review_application))
        .route(
            "/volunteers",
            post(handle_signup_volunteer).get(handle_list_volunteers),
        )
        .route("/volunteers/{id}", get(handle_get_volunteer))
        .route(
            "/volunteers/{id}/status",
            patch(handle_update_volunteer_status),
        )
        .route("/members", post(handle_register_member))
        .route(
            "/delivery-options",
            post(handle_create_delivery_option).get(handle_list_delivery_options),
        )
        .route(
            "/delivery-requests",
            post(handle_submit_delivery_request).get(handle_list_delivery_requests),
        )
        .route("/delivery-requests/{id}", get(handle_get_delivery_request))
        .route(
            "/delivery-requests/{id}/status",
            patch(handle_update_delivery_request_status),
        )
        .route("/events", post(handle_create_event).get(handle_list_events))
        .route("/events/{id}", get(handle_get_event))
        .route(
            "/tickets",
            post(handle_purchase_ticket).get(handle_list_tickets),
        )
        .route("/tickets/{id}", get(handle_get_ticket))
        .route("/tickets/{id}/status", patch(handle_update_ticket_status))
        .route(
            "/payment-methods",
            post(handle_create_payment_method).get(handle_list_payment_methods),
        )
        .route(
            "/payment-methods/active",
            get(handle_list_active_payment_methods),
        )
        .route(
            "/payment-methods/{id}",
            patch(handle_update_payment_method).delete(handle_delete_payment_method),
        )
        .route(
            "/payment-methods/{id}/toggle",
            post(handle_toggle_payment_method),
        )
        .route(
            "/payment-methods/{id}/default",
            post(handle_set_default_payment_method),
        )
        .route("/audit", get(handle_list_audit))
        .route("/auth/login", post(handle_login))
        .route("/auth/logout", post(handle_logout))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Harborlight Server");

    let config: ServerConfig = ServerConfig::from_env()?;
    info!(
        timezone = %config.window.timezone(),
        "Submission window configured"
    );

    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    if let Some((login, password)) = &config.bootstrap_admin {
        let now: String = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        match persistence.ensure_admin_operator(login, password, &now)? {
            Some(operator_id) => {
                info!(operator_id, login = %login, "Bootstrap admin operator created");
            }
            None => debug!("Operators already exist, skipping admin bootstrap"),
        }
    }

    let notifier: Arc<dyn Notifier> = match &config.smtp {
        Some(smtp) => Arc::new(SmtpNotifier::new(smtp)?),
        None => {
            info!("No SMTP settings found, notifications will be discarded");
            Arc::new(NoopNotifier)
        }
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        window: config.window,
        notifications: config.notifications,
    };

    outbox::spawn_outbox_drain(app_state.clone(), notifier);
    outbox::spawn_session_sweep(app_state.clone());

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use tower::ServiceExt;

    /// Helper to create test app state with in-memory persistence.
    fn create_test_app_state() -> AppState {
        let persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
            window: SubmissionWindow::default(),
            notifications: NotificationSettings::disabled(),
        }
    }

    /// Seeds an admin operator and logs in, returning the bearer token.
    async fn admin_token(app_state: &AppState, app: &Router) -> String {
        {
            let mut persistence = app_state.persistence.lock().await;
            persistence
                .create_operator(
                    "root",
                    "Root Operator",
                    "hunter2",
                    "admin",
                    "2026-01-01T00:00:00Z",
                )
                .expect("Failed to seed operator");
        }

        let login: serde_json::Value = serde_json::json!({
            "login_name": "root",
            "password": "hunter2",
        });
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/auth/login")
                    .header("content-type", "application/json")
                    .body(Body::from(login.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let login_response: ApiResponse<LoginResponse> =
            serde_json::from_slice(&body_bytes).unwrap();
        login_response.data.token
    }

    /// Creates a payment method over the API, returning its id.
    async fn seed_payment_method(app: &Router, token: &str) -> i64 {
        let request: serde_json::Value = serde_json::json!({
            "method_type": "BANK_ACCOUNT",
            "label": "Main account",
            "instructions": "Transfer to account 12-3456-7890",
            "fee_percent": 0.0,
            "is_default": true,
        });
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/payment-methods")
                    .header("content-type", "application/json")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::from(request.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let method: ApiResponse<PaymentMethodInfo> = serde_json::from_slice(&body_bytes).unwrap();
        method.data.id
    }

    #[tokio::test]
    async fn test_donation_round_trip_with_audit() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state.clone());
        let token: String = admin_token(&app_state, &app).await;
        let method_id: i64 = seed_payment_method(&app, &token).await;

        let submit: serde_json::Value = serde_json::json!({
            "donor_name": "Alice Donor",
            "donor_email": "alice@example.org",
            "amount_cents": 2_500,
            "frequency": "ONE_TIME",
            "payment_method_id": method_id,
        });
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/donations")
                    .header("content-type", "application/json")
                    .body(Body::from(submit.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let donation: ApiResponse<DonationInfo> = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(donation.message, "Donation recorded");
        assert_eq!(donation.data.status, "PENDING");
        assert_eq!(donation.data.revision, 1);

        let update: serde_json::Value = serde_json::json!({
            "status": "COMPLETED",
            "notes": "verified by bank statement",
            "revision": 1,
        });
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("PATCH")
                    .uri(format!("/donations/{}/status", donation.data.id))
                    .header("content-type", "application/json")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::from(update.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let updated: ApiResponse<DonationInfo> = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(updated.data.status, "COMPLETED");
        assert_eq!(updated.data.revision, 2);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(format!(
                        "/audit?resource=Donation&resource_id={}",
                        donation.data.id
                    ))
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let audit: ApiResponse<ListResponse<AuditEntryInfo>> =
            serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(audit.data.total, 2);
        let status_entry = audit
            .data
            .items
            .iter()
            .find(|entry| entry.action == "status_change")
            .expect("Missing status change audit entry");
        assert_eq!(
            status_entry.description,
            "Donation status PENDING -> COMPLETED (verified by bank statement)"
        );
        assert_eq!(status_entry.actor_id, "root");
    }

    #[tokio::test]
    async fn test_admin_route_without_token_returns_401() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/donations")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ErrorResponse = serde_json::from_slice(&body_bytes).unwrap();
        assert!(error.message.contains("Authorization"));
    }

    #[tokio::test]
    async fn test_unknown_donation_returns_404() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state.clone());
        let token: String = admin_token(&app_state, &app).await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/donations/999")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ErrorResponse = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(error.message, "Donation 999 not found");
    }

    #[tokio::test]
    async fn test_stale_revision_returns_409() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state.clone());
        let token: String = admin_token(&app_state, &app).await;
        let method_id: i64 = seed_payment_method(&app, &token).await;

        let submit: serde_json::Value = serde_json::json!({
            "donor_name": "Bob Donor",
            "donor_email": "bob@example.org",
            "amount_cents": 1_000,
            "frequency": "MONTHLY",
            "payment_method_id": method_id,
        });
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/donations")
                    .header("content-type", "application/json")
                    .body(Body::from(submit.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let donation: ApiResponse<DonationInfo> = serde_json::from_slice(&body_bytes).unwrap();

        // First update succeeds and bumps the revision to 2.
        let update: serde_json::Value = serde_json::json!({
            "status": "COMPLETED",
            "revision": 1,
        });
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("PATCH")
                    .uri(format!("/donations/{}/status", donation.data.id))
                    .header("content-type", "application/json")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::from(update.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        // Replaying the same revision must conflict.
        let stale: serde_json::Value = serde_json::json!({
            "status": "REFUNDED",
            "revision": 1,
        });
        let response = app
            .oneshot(
                Request::builder()
                    .method("PATCH")
                    .uri(format!("/donations/{}/status", donation.data.id))
                    .header("content-type", "application/json")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::from(stale.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_invalid_donation_returns_400_with_field_errors() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state.clone());
        let token: String = admin_token(&app_state, &app).await;
        seed_payment_method(&app, &token).await;

        let submit: serde_json::Value = serde_json::json!({
            "donor_name": "",
            "donor_email": "not-an-email",
            "amount_cents": -5,
            "frequency": "ONE_TIME",
        });
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/donations")
                    .header("content-type", "application/json")
                    .body(Body::from(submit.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ErrorResponse = serde_json::from_slice(&body_bytes).unwrap();
        let errors: Vec<FieldErrorInfo> = error.errors.expect("Missing errors array");
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"donor_name"));
        assert!(fields.contains(&"donor_email"));
        assert!(fields.contains(&"amount_cents"));
    }

    #[tokio::test]
    async fn test_active_payment_method_listing_ignores_query() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state.clone());
        let token: String = admin_token(&app_state, &app).await;
        seed_payment_method(&app, &token).await;

        // Second method, created inactive via toggle.
        let request: serde_json::Value = serde_json::json!({
            "method_type": "MOBILE_PAYMENT",
            "label": "Old wallet",
            "instructions": "Deprecated",
            "fee_percent": 1.0,
        });
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/payment-methods")
                    .header("content-type", "application/json")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::from(request.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let wallet: ApiResponse<PaymentMethodInfo> = serde_json::from_slice(&body_bytes).unwrap();
        app.clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/payment-methods/{}/toggle", wallet.data.id))
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        // Asking the public route for inactive methods must still return
        // only active ones.
        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/payment-methods/active?active=false")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let methods: ApiResponse<Vec<PaymentMethodInfo>> =
            serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(methods.data.len(), 1);
        assert_eq!(methods.data[0].label, "Main account");
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_returns_401() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state.clone());
        admin_token(&app_state, &app).await;

        let login: serde_json::Value = serde_json::json!({
            "login_name": "root",
            "password": "wrong",
        });
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/auth/login")
                    .header("content-type", "application/json")
                    .body(Body::from(login.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ErrorResponse = serde_json::from_slice(&body_bytes).unwrap();
        assert!(error.message.contains("Invalid credentials"));
    }

    #[tokio::test]
    async fn test_logout_invalidates_session() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state.clone());
        let token: String = admin_token(&app_state, &app).await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/auth/logout")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/donations")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_public_event_listing_requires_no_token() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state.clone());
        let token: String = admin_token(&app_state, &app).await;

        let request: serde_json::Value = serde_json::json!({
            "name": "Winter Gala",
            "description": "Annual fundraiser",
            "starts_at": "2026-07-01T18:00:00Z",
            "location": "Town Hall",
            "base_price_cents": 2_000,
            "ticket_types": [
                { "name": "General", "price_cents": 5_000 },
            ],
        });
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/events")
                    .header("content-type", "application/json")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::from(request.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/events")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let events: ApiResponse<Vec<EventInfo>> = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(events.data.len(), 1);
        assert_eq!(events.data[0].name, "Winter Gala");
        assert_eq!(events.data[0].ticket_types.len(), 1);
    }
}
