use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::services::booking_sink::BookingSink;
use crate::services::clock::Clock;
use crate::services::intro::IntroGate;
use crate::services::otp::OtpProvider;
use crate::services::sessions::SessionStore;
use crate::services::wizard::BookingWizard;

pub struct AppState {
    pub config: AppConfig,
    pub otp: Arc<dyn OtpProvider>,
    pub sink: Arc<dyn BookingSink>,
    pub clock: Arc<dyn Clock>,
    pub intro: IntroGate,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        otp: Arc<dyn OtpProvider>,
        sink: Arc<dyn BookingSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let sessions = SessionStore::new(Duration::from_secs(config.session_ttl_secs));
        Self {
            config,
            otp,
            sink,
            clock,
            intro: IntroGate::new(),
            sessions,
        }
    }

    pub fn new_wizard(&self) -> BookingWizard {
        BookingWizard::new(
            Arc::clone(&self.otp),
            Arc::clone(&self.sink),
            Arc::clone(&self.clock),
        )
    }
}
