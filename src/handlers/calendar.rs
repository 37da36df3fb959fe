use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::models::CalendarDayCell;
use crate::services::calendar::{build_month_grid, normalize_month};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct MonthQuery {
    pub year: Option<i32>,
    /// Zero-based; out-of-range values carry into the year.
    pub month: Option<i32>,
}

#[derive(Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<CalendarDayCell>,
}

impl MonthGrid {
    pub fn new(year: i32, month: i32, cells: Vec<CalendarDayCell>) -> Self {
        let (year, month) = normalize_month(year, month);
        Self { year, month, cells }
    }
}

// GET /api/calendar
pub async fn month_grid(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MonthQuery>,
) -> Json<MonthGrid> {
    let today = state.clock.today();
    let year = query.year.unwrap_or(today.year());
    let month = query.month.unwrap_or(today.month0() as i32);

    let cells = build_month_grid(year, month, today);
    Json(MonthGrid::new(year, month, cells))
}
