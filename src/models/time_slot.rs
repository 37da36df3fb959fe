use serde::{Deserialize, Serialize};

const MORNING_SLOTS: &[&str] = &[
    "09:00 AM", "09:30 AM", "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM",
];

const AFTERNOON_SLOTS: &[&str] = &[
    "12:00 PM", "12:30 PM", "01:00 PM", "01:30 PM", "02:00 PM", "02:30 PM", "03:00 PM",
    "03:30 PM",
];

const EVENING_SLOTS: &[&str] = &[
    "04:00 PM", "04:30 PM", "05:00 PM", "05:30 PM", "06:00 PM", "06:30 PM",
];

/// Tab grouping of the bookable time slots.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DayPeriod {
    #[default]
    Morning,
    Afternoon,
    Evening,
}

impl DayPeriod {
    pub const ALL: [DayPeriod; 3] = [DayPeriod::Morning, DayPeriod::Afternoon, DayPeriod::Evening];

    pub fn slots(&self) -> &'static [&'static str] {
        match self {
            DayPeriod::Morning => MORNING_SLOTS,
            DayPeriod::Afternoon => AFTERNOON_SLOTS,
            DayPeriod::Evening => EVENING_SLOTS,
        }
    }

    pub fn contains(&self, slot: &str) -> bool {
        self.slots().contains(&slot)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SlotTable {
    pub morning: &'static [&'static str],
    pub afternoon: &'static [&'static str],
    pub evening: &'static [&'static str],
}

impl SlotTable {
    pub fn fixed() -> Self {
        Self {
            morning: MORNING_SLOTS,
            afternoon: AFTERNOON_SLOTS,
            evening: EVENING_SLOTS,
        }
    }
}
