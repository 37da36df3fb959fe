use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Unverified,
    OtpRequested,
    Verified,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VerificationState {
    pub name: String,
    pub phone: String,
    /// Last code the visitor typed.
    pub otp: String,
    pub is_verified: bool,
    pub otp_requested: bool,
    pub error: Option<String>,
}

impl VerificationState {
    pub fn status(&self) -> VerificationStatus {
        if self.is_verified {
            VerificationStatus::Verified
        } else if self.otp_requested {
            VerificationStatus::OtpRequested
        } else {
            VerificationStatus::Unverified
        }
    }
}
