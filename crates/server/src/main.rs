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

mod session;

use axum::{
    Json, Router,
    extract::{ConnectInfo, Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use labourdesk_api::{
    ApiError, AuditQuery, CaptchaChallenge, CaptchaResponse, CaptchaStore, ChangePasswordRequest,
    CreateOfficerRequest, CreateOfficerResponse, DashboardResponse, DeleteOfficerResponse,
    ListAuditEventsResponse, ListOfficersResponse, ListReturnsResponse, LoginRequest,
    LoginResponse, MessageResponse, MyReturnResponse, OfficerActionResponse, OfficerInfo,
    PeriodQuery, ResetPasswordResponse, ReturnFormResponse, SubmitReturnRequest,
    SubmitReturnResponse, SubordinatesResponse, SuperiorsResponse, UpdateOfficerRequest,
    WhoAmIResponse, change_password, create_officer, current_period, dashboard, delete_officer,
    get_officer, issue_captcha, list_audit_events, list_officers, list_returns,
    list_subordinates, list_superiors, login, logout, my_return, reset_password, return_form,
    seed_demo_roster, submit_return, toggle_officer_status, update_officer, whoami,
};
use labourdesk_audit::Cause;
use labourdesk_domain::FieldErrors;
use labourdesk_persistence::SqlitePersistence;

use crate::session::SessionOperator;

/// Labour department returns server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Load the demo officer roster into an empty database
    #[arg(long)]
    seed_demo: bool,
}

/// Application state shared across handlers.
///
/// Every database operation goes through the one connection behind the
/// persistence mutex. The CAPTCHA store has its own lock.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<SqlitePersistence>>,
    captchas: Arc<Mutex<CaptchaStore>>,
}

impl AppState {
    fn new(persistence: SqlitePersistence) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            captchas: Arc::new(Mutex::new(CaptchaStore::default())),
        }
    }
}

/// Query parameters for the superior picker.
#[derive(Debug, Deserialize)]
struct SuperiorsQuery {
    role: String,
}

/// Error response body.
#[derive(Debug, Clone, Serialize)]
struct ErrorResponse {
    /// Always `true`.
    error: bool,
    message: String,
    /// A fresh challenge after a refused login.
    #[serde(skip_serializing_if = "Option::is_none")]
    captcha: Option<CaptchaChallenge>,
    /// Per-field messages for a rejected form.
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<FieldErrors>,
}

impl ErrorResponse {
    const fn message(message: String) -> Self {
        Self {
            error: true,
            message,
            captcha: None,
            errors: None,
        }
    }
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    status: StatusCode,
    body: ErrorResponse,
}

impl HttpError {
    const fn new(status: StatusCode, message: String) -> Self {
        Self {
            status,
            body: ErrorResponse::message(message),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let message: String = err.to_string();
        match err {
            ApiError::AuthenticationFailed { .. } => Self::new(StatusCode::UNAUTHORIZED, message),
            ApiError::LoginFailed { captcha, .. } => {
                let mut http: Self = Self::new(StatusCode::UNAUTHORIZED, message);
                http.body.captcha = Some(captcha);
                http
            }
            ApiError::Unauthorized { .. } => Self::new(StatusCode::FORBIDDEN, message),
            ApiError::DomainRuleViolation { .. } => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
            }
            ApiError::InvalidInput { .. } | ApiError::PasswordPolicyViolation { .. } => {
                Self::new(StatusCode::BAD_REQUEST, message)
            }
            ApiError::FormValidation { errors } => {
                let mut http: Self = Self::new(StatusCode::BAD_REQUEST, message);
                http.body.errors = Some(errors);
                http
            }
            ApiError::ResourceNotFound { .. } => Self::new(StatusCode::NOT_FOUND, message),
            ApiError::Internal { .. } => {
                error!(error = %message, "Internal error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        }
    }
}

/// The cause recorded against writes made through the HTTP API.
fn request_cause(action: &str) -> Cause {
    Cause::new(format!("http-{action}"), format!("{action} via HTTP API"))
}

// ========================================================================
// Authentication
// ========================================================================

/// Handler for GET `/captcha`.
async fn handle_captcha(
    AxumState(app_state): AxumState<AppState>,
    ConnectInfo(client): ConnectInfo<SocketAddr>,
) -> Json<CaptchaResponse> {
    let mut captchas = app_state.captchas.lock().await;
    Json(issue_captcha(&mut captchas, client.ip()))
}

/// Handler for POST `/auth/login`.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    info!(username = %req.username, "Handling login request");

    let mut persistence = app_state.persistence.lock().await;
    let mut captchas = app_state.captchas.lock().await;
    let response: LoginResponse = login(&mut persistence, &mut captchas, &req)?;
    drop(captchas);
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/auth/logout`.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, token): SessionOperator,
) -> Result<Json<MessageResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(logout(&mut persistence, &actor, &token)?))
}

/// Handler for GET `/auth/whoami`.
async fn handle_whoami(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
) -> Result<Json<WhoAmIResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(whoami(&mut persistence, &actor)?))
}

/// Handler for POST `/auth/change_password`.
async fn handle_change_password(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, HttpError> {
    info!(officer_id = %actor.id(), "Handling change_password request");

    let mut persistence = app_state.persistence.lock().await;
    let response: MessageResponse = change_password(
        &mut persistence,
        &req,
        &actor,
        request_cause("change_password"),
    )?;
    Ok(Json(response))
}

// ========================================================================
// Officers
// ========================================================================

/// Handler for GET `/officers`.
async fn handle_list_officers(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
) -> Result<Json<ListOfficersResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_officers(&mut persistence, &actor)?))
}

/// Handler for POST `/officers`.
async fn handle_create_officer(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Json(req): Json<CreateOfficerRequest>,
) -> Result<Json<CreateOfficerResponse>, HttpError> {
    info!(
        actor = %actor.id(),
        username = %req.username,
        role = %req.role,
        "Handling create_officer request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateOfficerResponse = create_officer(
        &mut persistence,
        req,
        &actor,
        request_cause("create_officer"),
    )?;
    Ok(Json(response))
}

/// Handler for GET `/officers/{id}`.
async fn handle_get_officer(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(officer_id): Path<String>,
) -> Result<Json<OfficerInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_officer(&mut persistence, &officer_id, &actor)?))
}

/// Handler for PUT `/officers/{id}`.
async fn handle_update_officer(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(officer_id): Path<String>,
    Json(req): Json<UpdateOfficerRequest>,
) -> Result<Json<OfficerActionResponse>, HttpError> {
    info!(actor = %actor.id(), officer_id = %officer_id, "Handling update_officer request");

    let mut persistence = app_state.persistence.lock().await;
    let response: OfficerActionResponse = update_officer(
        &mut persistence,
        &officer_id,
        req,
        &actor,
        request_cause("update_officer"),
    )?;
    Ok(Json(response))
}

/// Handler for DELETE `/officers/{id}`.
async fn handle_delete_officer(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(officer_id): Path<String>,
) -> Result<Json<DeleteOfficerResponse>, HttpError> {
    info!(actor = %actor.id(), officer_id = %officer_id, "Handling delete_officer request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteOfficerResponse = delete_officer(
        &mut persistence,
        &officer_id,
        &actor,
        request_cause("delete_officer"),
    )?;
    Ok(Json(response))
}

/// Handler for POST `/officers/{id}/toggle_status`.
async fn handle_toggle_status(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(officer_id): Path<String>,
) -> Result<Json<OfficerActionResponse>, HttpError> {
    info!(actor = %actor.id(), officer_id = %officer_id, "Handling toggle_status request");

    let mut persistence = app_state.persistence.lock().await;
    let response: OfficerActionResponse = toggle_officer_status(
        &mut persistence,
        &officer_id,
        &actor,
        request_cause("toggle_status"),
    )?;
    Ok(Json(response))
}

/// Handler for POST `/officers/{id}/reset_password`.
async fn handle_reset_password(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Path(officer_id): Path<String>,
) -> Result<Json<ResetPasswordResponse>, HttpError> {
    info!(actor = %actor.id(), officer_id = %officer_id, "Handling reset_password request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ResetPasswordResponse = reset_password(
        &mut persistence,
        &officer_id,
        &actor,
        request_cause("reset_password"),
    )?;
    Ok(Json(response))
}

// ========================================================================
// Hierarchy
// ========================================================================

/// Handler for GET `/hierarchy/superiors?role=ROLE`.
async fn handle_list_superiors(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Query(query): Query<SuperiorsQuery>,
) -> Result<Json<SuperiorsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_superiors(&mut persistence, &query.role, &actor)?))
}

/// Handler for GET `/hierarchy/subordinates`.
async fn handle_list_subordinates(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
) -> Result<Json<SubordinatesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_subordinates(&mut persistence, &actor)?))
}

// ========================================================================
// Returns and dashboards
// ========================================================================

/// Handler for GET `/returns/form`.
async fn handle_return_form(
    SessionOperator(actor, _): SessionOperator,
) -> Result<Json<ReturnFormResponse>, HttpError> {
    Ok(Json(return_form(&actor)?))
}

/// Handler for GET `/returns/mine`.
async fn handle_my_return(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<MyReturnResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(my_return(
        &mut persistence,
        query,
        &actor,
        current_period(),
    )?))
}

/// Handler for POST `/returns`.
async fn handle_submit_return(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Json(req): Json<SubmitReturnRequest>,
) -> Result<Json<SubmitReturnResponse>, HttpError> {
    info!(
        officer_id = %actor.id(),
        year = req.year,
        month = req.month,
        seal = req.seal,
        "Handling submit_return request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: SubmitReturnResponse = submit_return(
        &mut persistence,
        req,
        &actor,
        request_cause("submit_return"),
        current_period(),
    )?;
    Ok(Json(response))
}

/// Handler for GET `/returns`.
async fn handle_list_returns(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<ListReturnsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_returns(
        &mut persistence,
        query,
        &actor,
        current_period(),
    )?))
}

/// Handler for GET `/dashboard`.
async fn handle_dashboard(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<DashboardResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(dashboard(
        &mut persistence,
        query,
        &actor,
        current_period(),
    )?))
}

/// Handler for GET `/audit`.
async fn handle_list_audit(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor, _): SessionOperator,
    Query(query): Query<AuditQuery>,
) -> Result<Json<ListAuditEventsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_audit_events(&mut persistence, query, &actor)?))
}

/// Builds the application router with all endpoints under `/api`.
fn build_router(app_state: AppState) -> Router {
    let api: Router<AppState> = Router::new()
        .route("/captcha", get(handle_captcha))
        .route("/auth/login", post(handle_login))
        .route("/auth/logout", post(handle_logout))
        .route("/auth/whoami", get(handle_whoami))
        .route("/auth/change_password", post(handle_change_password))
        .route(
            "/officers",
            get(handle_list_officers).post(handle_create_officer),
        )
        .route(
            "/officers/{id}",
            get(handle_get_officer)
                .put(handle_update_officer)
                .delete(handle_delete_officer),
        )
        .route("/officers/{id}/toggle_status", post(handle_toggle_status))
        .route("/officers/{id}/reset_password", post(handle_reset_password))
        .route("/hierarchy/superiors", get(handle_list_superiors))
        .route("/hierarchy/subordinates", get(handle_list_subordinates))
        .route("/returns/form", get(handle_return_form))
        .route("/returns/mine", get(handle_my_return))
        .route(
            "/returns",
            get(handle_list_returns).post(handle_submit_return),
        )
        .route("/dashboard", get(handle_dashboard))
        .route("/audit", get(handle_list_audit));

    Router::new().nest("/api", api).with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing labourdesk server");

    let mut persistence: SqlitePersistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqlitePersistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqlitePersistence::new_in_memory()?
    };

    if args.seed_demo {
        let seeded: usize = seed_demo_roster(&mut persistence)?;
        info!(seeded, "Demo seed finished");
    }

    let app: Router = build_router(AppState::new(persistence));

    let listener = tokio::net::TcpListener::bind((args.bind.as_str(), args.port)).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
