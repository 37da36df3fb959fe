use std::env;

use crate::services::otp::DEFAULT_OTP_CODE;

pub const DEFAULT_SESSION_TTL_SECS: u64 = 30 * 60;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub clinic_name: String,
    /// Number that receives a text for every confirmed booking. Empty disables it.
    pub clinic_phone: String,
    /// `fixed` (never sends anything) or `sms`.
    pub otp_provider: String,
    pub otp_code: String,
    pub twilio_account_sid: String,
    pub twilio_auth_token: String,
    pub twilio_phone_number: String,
    /// Booking sessions idle for longer than this are dropped.
    pub session_ttl_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            clinic_name: env::var("CLINIC_NAME")
                .unwrap_or_else(|_| "Physiotherapy Clinic".to_string()),
            clinic_phone: env::var("CLINIC_PHONE").unwrap_or_default(),
            otp_provider: env::var("OTP_PROVIDER").unwrap_or_else(|_| "fixed".to_string()),
            otp_code: env::var("OTP_CODE")
                .ok()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_OTP_CODE.to_string()),
            twilio_account_sid: env::var("TWILIO_ACCOUNT_SID").unwrap_or_default(),
            twilio_auth_token: env::var("TWILIO_AUTH_TOKEN").unwrap_or_default(),
            twilio_phone_number: env::var("TWILIO_PHONE_NUMBER").unwrap_or_default(),
            session_ttl_secs: env::var("SESSION_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SESSION_TTL_SECS),
        }
    }

    pub fn twilio_configured(&self) -> bool {
        !self.twilio_account_sid.is_empty()
            && !self.twilio_auth_token.is_empty()
            && !self.twilio_phone_number.is_empty()
    }
}
