use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::{ContactMessage, Service, ServiceInfo, SlotTable};
use crate::state::AppState;

#[derive(Serialize)]
pub struct IntroResponse {
    pub show_intro: bool,
}

// GET /api/intro
pub async fn intro(State(state): State<Arc<AppState>>) -> Json<IntroResponse> {
    Json(IntroResponse {
        show_intro: state.intro.take_first_show(),
    })
}

// GET /api/services
pub async fn services() -> Json<Vec<ServiceInfo>> {
    Json(Service::ALL.iter().map(Service::info).collect())
}

// GET /api/time-slots
pub async fn time_slots() -> Json<SlotTable> {
    Json(SlotTable::fixed())
}

#[derive(Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}

// POST /api/contact
pub async fn contact(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ContactMessage>,
) -> Result<Json<ContactResponse>, AppError> {
    payload.validate().map_err(AppError::Validation)?;

    tracing::info!(
        name = %payload.name.trim(),
        email = %payload.email.trim(),
        phone = payload.phone.as_deref().unwrap_or(""),
        length = payload.message.len(),
        "contact message received"
    );

    Ok(Json(ContactResponse {
        success: true,
        message: format!(
            "Thank you for contacting {}. We will get back to you shortly.",
            state.config.clinic_name
        ),
    }))
}
