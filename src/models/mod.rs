pub mod booking;
pub mod calendar;
pub mod contact;
pub mod service;
pub mod time_slot;
pub mod verification;

pub use booking::{BookingRecord, BookingSelection, WizardStep};
pub use calendar::{CalendarDayCell, MonthDirection};
pub use contact::ContactMessage;
pub use service::{Service, ServiceInfo};
pub use time_slot::{DayPeriod, SlotTable};
pub use verification::{VerificationState, VerificationStatus};
