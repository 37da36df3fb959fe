use async_trait::async_trait;

use super::OtpProvider;
use crate::services::messaging::MessagingProvider;

/// Texts the provisioned code to the visitor.
pub struct SmsOtpProvider {
    messaging: Box<dyn MessagingProvider>,
    clinic_name: String,
    code: String,
}

impl SmsOtpProvider {
    pub fn new(
        messaging: Box<dyn MessagingProvider>,
        clinic_name: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            messaging,
            clinic_name: clinic_name.into(),
            code: code.into(),
        }
    }
}

#[async_trait]
impl OtpProvider for SmsOtpProvider {
    async fn send(&self, phone: &str, name: &str) -> anyhow::Result<()> {
        let body = format!(
            "Hi {name}, your {} booking code is {}",
            self.clinic_name, self.code
        );
        self.messaging.send_message(phone, &body).await?;
        tracing::info!(phone = %phone, "verification code sent");
        Ok(())
    }

    async fn verify(&self, _phone: &str, code: &str) -> bool {
        code == self.code
    }
}
