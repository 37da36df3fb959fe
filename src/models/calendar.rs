use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One cell of the 6x7 month view.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CalendarDayCell {
    pub date: NaiveDate,
    pub day_number: u32,
    pub is_current_month: bool,
    pub is_today: bool,
    pub is_past: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MonthDirection {
    Previous,
    Next,
}
