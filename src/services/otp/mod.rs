pub mod sms;

use async_trait::async_trait;

pub const DEFAULT_OTP_CODE: &str = "123456";

/// Issues and checks the one-time code that gates booking.
#[async_trait]
pub trait OtpProvider: Send + Sync {
    async fn send(&self, phone: &str, name: &str) -> anyhow::Result<()>;
    async fn verify(&self, phone: &str, code: &str) -> bool;
}

/// Accepts one provisioned code for every phone and never sends anything.
pub struct FixedCodeOtpProvider {
    code: String,
}

impl FixedCodeOtpProvider {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

impl Default for FixedCodeOtpProvider {
    fn default() -> Self {
        Self::new(DEFAULT_OTP_CODE)
    }
}

#[async_trait]
impl OtpProvider for FixedCodeOtpProvider {
    async fn send(&self, phone: &str, name: &str) -> anyhow::Result<()> {
        tracing::info!(phone = %phone, name = %name, "verification code issued (not sent)");
        Ok(())
    }

    async fn verify(&self, _phone: &str, code: &str) -> bool {
        code == self.code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_code_accepts_only_provisioned_code() {
        let otp = FixedCodeOtpProvider::default();
        otp.send("9999999999", "Jane").await.unwrap();
        assert!(otp.verify("9999999999", "123456").await);
        assert!(!otp.verify("9999999999", "000000").await);
        assert!(!otp.verify("9999999999", "").await);
    }

    #[tokio::test]
    async fn test_fixed_code_custom() {
        let otp = FixedCodeOtpProvider::new("4242");
        assert!(otp.verify("1", "4242").await);
        assert!(!otp.verify("1", "123456").await);
    }
}
