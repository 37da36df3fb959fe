pub mod booking;
pub mod calendar;
pub mod health;
pub mod site;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/intro", get(site::intro))
        .route("/api/services", get(site::services))
        .route("/api/time-slots", get(site::time_slots))
        .route("/api/contact", post(site::contact))
        .route("/api/calendar", get(calendar::month_grid))
        .route("/api/booking/sessions", post(booking::create_session))
        .route(
            "/api/booking/sessions/:id",
            get(booking::get_session).delete(booking::delete_session),
        )
        .route("/api/booking/sessions/:id/otp", post(booking::request_otp))
        .route(
            "/api/booking/sessions/:id/otp/verify",
            post(booking::verify_otp),
        )
        .route(
            "/api/booking/sessions/:id/service",
            post(booking::select_service),
        )
        .route("/api/booking/sessions/:id/date", post(booking::select_date))
        .route(
            "/api/booking/sessions/:id/month",
            post(booking::change_month),
        )
        .route(
            "/api/booking/sessions/:id/calendar",
            get(booking::calendar_grid),
        )
        .route(
            "/api/booking/sessions/:id/calendar/open",
            post(booking::open_calendar),
        )
        .route(
            "/api/booking/sessions/:id/calendar/close",
            post(booking::close_calendar),
        )
        .route(
            "/api/booking/sessions/:id/period",
            post(booking::select_period),
        )
        .route("/api/booking/sessions/:id/time", post(booking::select_time))
        .route(
            "/api/booking/sessions/:id/proceed",
            post(booking::proceed),
        )
        .route("/api/booking/sessions/:id/back", post(booking::go_back))
        .route(
            "/api/booking/sessions/:id/confirm",
            post(booking::confirm),
        )
        .with_state(state)
}
