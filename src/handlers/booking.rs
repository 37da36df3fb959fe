use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::calendar::MonthGrid;
use crate::errors::AppError;
use crate::models::{BookingRecord, DayPeriod, MonthDirection, Service};
use crate::services::calendar::generate_ics;
use crate::services::sessions::SharedWizard;
use crate::services::wizard::{BookingWizard, WizardSnapshot};
use crate::state::AppState;

const UPCOMING_DAYS: usize = 7;

#[derive(Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub session: WizardSnapshot,
    pub upcoming_dates: Vec<NaiveDate>,
}

impl SessionView {
    fn new(id: Uuid, wizard: &BookingWizard) -> Self {
        Self {
            id,
            session: wizard.snapshot(),
            upcoming_dates: wizard.upcoming_dates(UPCOMING_DAYS),
        }
    }
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("booking session {id}"))
}

fn find_session(state: &AppState, id: Uuid) -> Result<SharedWizard, AppError> {
    state.sessions.get(&id).ok_or_else(|| session_not_found(id))
}

// POST /api/booking/sessions
pub async fn create_session(State(state): State<Arc<AppState>>) -> (StatusCode, Json<SessionView>) {
    let (id, session) = state.sessions.insert(state.new_wizard());
    let view = SessionView::new(id, &*session.lock().await);
    tracing::debug!(session = %id, active = state.sessions.len(), "booking session started");

    (StatusCode::CREATED, Json(view))
}

// GET /api/booking/sessions/:id
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = find_session(&state, id)?;
    let wizard = session.lock().await;
    Ok(Json(SessionView::new(id, &wizard)))
}

// DELETE /api/booking/sessions/:id
pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.sessions.remove(&id) {
        return Err(session_not_found(id));
    }
    tracing::debug!(session = %id, "booking session discarded");
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/booking/sessions/:id/otp
#[derive(Deserialize)]
pub struct OtpRequest {
    pub name: String,
    pub phone: String,
}

pub async fn request_otp(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<OtpRequest>,
) -> Result<Json<WizardSnapshot>, AppError> {
    let session = find_session(&state, id)?;
    let mut wizard = session.lock().await;
    wizard.request_otp(&payload.name, &payload.phone).await?;
    Ok(Json(wizard.snapshot()))
}

// POST /api/booking/sessions/:id/otp/verify
#[derive(Deserialize)]
pub struct OtpVerify {
    pub code: String,
}

pub async fn verify_otp(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<OtpVerify>,
) -> Result<Json<WizardSnapshot>, AppError> {
    let session = find_session(&state, id)?;
    let mut wizard = session.lock().await;
    wizard.verify_otp(&payload.code).await?;
    Ok(Json(wizard.snapshot()))
}

// POST /api/booking/sessions/:id/service
#[derive(Deserialize)]
pub struct ServiceChoice {
    pub service: Service,
}

pub async fn select_service(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ServiceChoice>,
) -> Result<Json<WizardSnapshot>, AppError> {
    let session = find_session(&state, id)?;
    let mut wizard = session.lock().await;
    wizard.select_service(payload.service)?;
    Ok(Json(wizard.snapshot()))
}

// POST /api/booking/sessions/:id/date
#[derive(Deserialize)]
pub struct DateChoice {
    pub date: NaiveDate,
}

pub async fn select_date(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<DateChoice>,
) -> Result<Json<WizardSnapshot>, AppError> {
    let session = find_session(&state, id)?;
    let mut wizard = session.lock().await;
    wizard.select_date(payload.date)?;
    Ok(Json(wizard.snapshot()))
}

// POST /api/booking/sessions/:id/month
#[derive(Deserialize)]
pub struct MonthChange {
    pub direction: MonthDirection,
}

pub async fn change_month(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<MonthChange>,
) -> Result<Json<WizardSnapshot>, AppError> {
    let session = find_session(&state, id)?;
    let mut wizard = session.lock().await;
    wizard.change_displayed_month(payload.direction)?;
    Ok(Json(wizard.snapshot()))
}

// GET /api/booking/sessions/:id/calendar
pub async fn calendar_grid(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<MonthGrid>, AppError> {
    let session = find_session(&state, id)?;
    let wizard = session.lock().await;
    let (year, month) = wizard.displayed_month();
    Ok(Json(MonthGrid::new(
        year,
        month as i32,
        wizard.calendar_grid(),
    )))
}

// POST /api/booking/sessions/:id/calendar/open
pub async fn open_calendar(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardSnapshot>, AppError> {
    let session = find_session(&state, id)?;
    let mut wizard = session.lock().await;
    wizard.open_calendar()?;
    Ok(Json(wizard.snapshot()))
}

// POST /api/booking/sessions/:id/calendar/close
pub async fn close_calendar(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardSnapshot>, AppError> {
    let session = find_session(&state, id)?;
    let mut wizard = session.lock().await;
    wizard.close_calendar()?;
    Ok(Json(wizard.snapshot()))
}

// POST /api/booking/sessions/:id/period
#[derive(Deserialize)]
pub struct PeriodChoice {
    pub period: DayPeriod,
}

pub async fn select_period(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PeriodChoice>,
) -> Result<Json<WizardSnapshot>, AppError> {
    let session = find_session(&state, id)?;
    let mut wizard = session.lock().await;
    wizard.select_period(payload.period)?;
    Ok(Json(wizard.snapshot()))
}

// POST /api/booking/sessions/:id/time
#[derive(Deserialize)]
pub struct TimeChoice {
    pub time: String,
}

pub async fn select_time(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TimeChoice>,
) -> Result<Json<WizardSnapshot>, AppError> {
    let session = find_session(&state, id)?;
    let mut wizard = session.lock().await;
    wizard.select_time(&payload.time)?;
    Ok(Json(wizard.snapshot()))
}

// POST /api/booking/sessions/:id/proceed
pub async fn proceed(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardSnapshot>, AppError> {
    let session = find_session(&state, id)?;
    let mut wizard = session.lock().await;
    wizard.proceed_to_confirmation()?;
    Ok(Json(wizard.snapshot()))
}

// POST /api/booking/sessions/:id/back
pub async fn go_back(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardSnapshot>, AppError> {
    let session = find_session(&state, id)?;
    let mut wizard = session.lock().await;
    wizard.go_back()?;
    Ok(Json(wizard.snapshot()))
}

// POST /api/booking/sessions/:id/confirm
#[derive(Serialize)]
pub struct ConfirmResponse {
    pub booking: BookingRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ics: Option<String>,
    pub session: WizardSnapshot,
}

pub async fn confirm(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ConfirmResponse>, AppError> {
    let session = find_session(&state, id)?;
    let mut wizard = session.lock().await;
    let booking = wizard.confirm_booking().await?;

    let ics = generate_ics(&booking, &state.config.clinic_name, Utc::now().naive_utc());
    if ics.is_none() {
        tracing::warn!(reference = %booking.reference, time = %booking.time, "could not build calendar invite");
    }

    Ok(Json(ConfirmResponse {
        session: wizard.snapshot(),
        booking,
        ics,
    }))
}
