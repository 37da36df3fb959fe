use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::{ValidationError, VerificationError, WizardError};
use crate::models::{
    BookingRecord, BookingSelection, CalendarDayCell, DayPeriod, MonthDirection, Service,
    ServiceInfo, VerificationState, VerificationStatus, WizardStep,
};
use crate::services::booking_sink::BookingSink;
use crate::services::calendar::{build_month_grid, shift_month};
use crate::services::clock::Clock;
use crate::services::otp::OtpProvider;

const MIN_PHONE_LEN: usize = 10;

/// One visitor's walk through verification, selection and confirmation.
pub struct BookingWizard {
    otp: Arc<dyn OtpProvider>,
    sink: Arc<dyn BookingSink>,
    clock: Arc<dyn Clock>,
    verification: VerificationState,
    selection: BookingSelection,
    period: DayPeriod,
    displayed_year: i32,
    displayed_month: u32,
    calendar_open: bool,
    error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WizardSnapshot {
    pub status: VerificationStatus,
    pub name: String,
    pub phone: String,
    pub verification_error: Option<String>,
    pub service: ServiceInfo,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub step: WizardStep,
    pub period: DayPeriod,
    pub time_slots: &'static [&'static str],
    pub displayed_year: i32,
    /// Zero-based.
    pub displayed_month: u32,
    pub calendar_open: bool,
    pub error: Option<String>,
}

impl BookingWizard {
    pub fn new(
        otp: Arc<dyn OtpProvider>,
        sink: Arc<dyn BookingSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let today = clock.today();
        Self {
            otp,
            sink,
            clock,
            verification: VerificationState::default(),
            selection: BookingSelection::new(today),
            period: DayPeriod::default(),
            displayed_year: today.year(),
            displayed_month: today.month0(),
            calendar_open: false,
            error: None,
        }
    }

    pub fn status(&self) -> VerificationStatus {
        self.verification.status()
    }

    pub fn verification(&self) -> &VerificationState {
        &self.verification
    }

    pub fn selection(&self) -> &BookingSelection {
        &self.selection
    }

    pub fn period(&self) -> DayPeriod {
        self.period
    }

    pub fn displayed_month(&self) -> (i32, u32) {
        (self.displayed_year, self.displayed_month)
    }

    pub fn is_calendar_open(&self) -> bool {
        self.calendar_open
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // ── Verification ──

    pub async fn request_otp(&mut self, name: &str, phone: &str) -> Result<(), WizardError> {
        if self.verification.is_verified {
            return Ok(());
        }

        let name = name.trim();
        let phone = phone.trim();
        if name.is_empty() {
            return Err(self.verification_failed(ValidationError::EmptyName.into()));
        }
        if phone.chars().count() < MIN_PHONE_LEN {
            return Err(self.verification_failed(ValidationError::ShortPhone.into()));
        }

        if let Err(e) = self.otp.send(phone, name).await {
            tracing::warn!(error = %e, phone = %phone, "failed to dispatch OTP");
            return Err(self.verification_failed(WizardError::Delivery(e.to_string())));
        }

        self.verification.name = name.to_string();
        self.verification.phone = phone.to_string();
        self.verification.otp.clear();
        self.verification.otp_requested = true;
        self.verification.error = None;

        tracing::info!(phone = %phone, "OTP requested");
        Ok(())
    }

    pub async fn verify_otp(&mut self, code: &str) -> Result<(), WizardError> {
        match self.verification.status() {
            VerificationStatus::Verified => return Ok(()),
            VerificationStatus::Unverified => {
                return Err(self.verification_failed(VerificationError::OtpNotRequested.into()));
            }
            VerificationStatus::OtpRequested => {}
        }

        let code = code.trim();
        self.verification.otp = code.to_string();
        if !self.otp.verify(&self.verification.phone, code).await {
            tracing::info!(phone = %self.verification.phone, "invalid OTP entered");
            return Err(self.verification_failed(VerificationError::InvalidCode.into()));
        }

        self.verification.is_verified = true;
        self.verification.error = None;
        tracing::info!(phone = %self.verification.phone, "phone verified");
        Ok(())
    }

    fn verification_failed(&mut self, err: WizardError) -> WizardError {
        self.verification.error = Some(err.to_string());
        err
    }

    // ── Selection ──

    pub fn select_service(&mut self, service: Service) -> Result<(), WizardError> {
        self.ensure_selecting("choosing a service")?;
        self.selection.service = service;
        self.selection.time = None;
        self.error = None;
        Ok(())
    }

    pub fn select_date(&mut self, date: NaiveDate) -> Result<(), WizardError> {
        self.ensure_selecting("choosing a date")?;
        if date < self.clock.today() {
            return Err(self.selection_failed(ValidationError::PastDate.into()));
        }
        self.selection.date = date;
        self.selection.time = None;
        self.calendar_open = false;
        self.error = None;
        Ok(())
    }

    pub fn change_displayed_month(&mut self, direction: MonthDirection) -> Result<(), WizardError> {
        self.ensure_selecting("changing the month")?;
        let (year, month) = shift_month(self.displayed_year, self.displayed_month, direction);
        self.displayed_year = year;
        self.displayed_month = month;
        Ok(())
    }

    pub fn open_calendar(&mut self) -> Result<(), WizardError> {
        self.ensure_selecting("opening the calendar")?;
        self.displayed_year = self.selection.date.year();
        self.displayed_month = self.selection.date.month0();
        self.calendar_open = true;
        Ok(())
    }

    pub fn close_calendar(&mut self) -> Result<(), WizardError> {
        self.ensure_selecting("closing the calendar")?;
        self.calendar_open = false;
        Ok(())
    }

    pub fn select_period(&mut self, period: DayPeriod) -> Result<(), WizardError> {
        self.ensure_selecting("choosing a time of day")?;
        self.period = period;
        Ok(())
    }

    pub fn select_time(&mut self, slot: &str) -> Result<(), WizardError> {
        self.ensure_selecting("choosing a time")?;
        if !self.period.contains(slot) {
            return Err(self.selection_failed(ValidationError::UnknownSlot(slot.to_string()).into()));
        }
        self.selection.time = Some(slot.to_string());
        self.error = None;
        Ok(())
    }

    pub fn proceed_to_confirmation(&mut self) -> Result<(), WizardError> {
        self.ensure_selecting("continuing to confirmation")?;
        if self.selection.time.is_none() {
            return Err(self.selection_failed(ValidationError::NoTimeSelected.into()));
        }
        self.selection.step = WizardStep::ConfirmingBooking;
        self.error = None;
        Ok(())
    }

    pub fn go_back(&mut self) -> Result<(), WizardError> {
        self.ensure_verified()?;
        if self.selection.step == WizardStep::ConfirmingBooking {
            self.selection.step = WizardStep::SelectingDetails;
        }
        Ok(())
    }

    /// Hands the booking to the sink and starts over with a fresh date and time.
    pub async fn confirm_booking(&mut self) -> Result<BookingRecord, WizardError> {
        self.ensure_verified()?;
        if self.selection.step != WizardStep::ConfirmingBooking {
            return Err(self.selection_failed(WizardError::WrongStep("confirming a booking")));
        }
        let Some(time) = self.selection.time.clone() else {
            return Err(self.selection_failed(ValidationError::NoTimeSelected.into()));
        };

        let service = self.selection.service;
        let record = BookingRecord {
            reference: Uuid::new_v4(),
            name: self.verification.name.clone(),
            phone: self.verification.phone.clone(),
            service: service.title().to_string(),
            duration_minutes: service.duration_minutes(),
            date: self.selection.date,
            time,
        };

        self.sink.submit(&record).await;

        self.selection.date = self.clock.today();
        self.selection.time = None;
        self.selection.step = WizardStep::SelectingDetails;
        self.error = None;

        tracing::info!(
            reference = %record.reference,
            step = self.selection.step.as_str(),
            "wizard reset after confirmation"
        );
        Ok(record)
    }

    // ── Views ──

    pub fn calendar_grid(&self) -> Vec<CalendarDayCell> {
        build_month_grid(
            self.displayed_year,
            self.displayed_month as i32,
            self.clock.today(),
        )
    }

    /// Quick-pick strip of consecutive dates starting today.
    pub fn upcoming_dates(&self, count: usize) -> Vec<NaiveDate> {
        self.clock.today().iter_days().take(count).collect()
    }

    pub fn snapshot(&self) -> WizardSnapshot {
        WizardSnapshot {
            status: self.status(),
            name: self.verification.name.clone(),
            phone: self.verification.phone.clone(),
            verification_error: self.verification.error.clone(),
            service: self.selection.service.info(),
            date: self.selection.date,
            time: self.selection.time.clone(),
            step: self.selection.step,
            period: self.period,
            time_slots: self.period.slots(),
            displayed_year: self.displayed_year,
            displayed_month: self.displayed_month,
            calendar_open: self.calendar_open,
            error: self.error.clone(),
        }
    }

    fn ensure_verified(&mut self) -> Result<(), WizardError> {
        if !self.verification.is_verified {
            return Err(self.selection_failed(WizardError::NotVerified));
        }
        Ok(())
    }

    fn ensure_selecting(&mut self, action: &'static str) -> Result<(), WizardError> {
        self.ensure_verified()?;
        if self.selection.step != WizardStep::SelectingDetails {
            return Err(self.selection_failed(WizardError::WrongStep(action)));
        }
        Ok(())
    }

    fn selection_failed(&mut self, err: WizardError) -> WizardError {
        self.error = Some(err.to_string());
        err
    }
}
