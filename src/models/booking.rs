use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Service;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    SelectingDetails,
    ConfirmingBooking,
}

impl WizardStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            WizardStep::SelectingDetails => "selecting_details",
            WizardStep::ConfirmingBooking => "confirming_booking",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingSelection {
    pub service: Service,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub step: WizardStep,
}

impl BookingSelection {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            service: Service::default(),
            date: today,
            time: None,
            step: WizardStep::default(),
        }
    }
}

/// A finalized appointment request. Handed to a sink, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingRecord {
    pub reference: Uuid,
    pub name: String,
    pub phone: String,
    pub service: String,
    pub duration_minutes: i32,
    pub date: NaiveDate,
    pub time: String,
}

impl BookingRecord {
    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        NaiveTime::parse_from_str(&self.time, "%I:%M %p")
            .ok()
            .map(|t| self.date.and_time(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(time: &str) -> BookingRecord {
        BookingRecord {
            reference: Uuid::new_v4(),
            name: "Jane".to_string(),
            phone: "9999999999".to_string(),
            service: "In-Person Consultation".to_string(),
            duration_minutes: 50,
            date: NaiveDate::from_ymd_opt(2025, 6, 20).unwrap(),
            time: time.to_string(),
        }
    }

    #[test]
    fn test_starts_at_afternoon() {
        let dt = record("02:30 PM").starts_at().unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2025-06-20 14:30");
    }

    #[test]
    fn test_starts_at_noon_and_morning() {
        assert_eq!(
            record("12:00 PM").starts_at().unwrap().format("%H:%M").to_string(),
            "12:00"
        );
        assert_eq!(
            record("09:00 AM").starts_at().unwrap().format("%H:%M").to_string(),
            "09:00"
        );
    }

    #[test]
    fn test_starts_at_garbage() {
        assert!(record("soon").starts_at().is_none());
    }
}
