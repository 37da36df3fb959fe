use async_trait::async_trait;

use crate::models::BookingRecord;
use crate::services::messaging::MessagingProvider;

/// Receives confirmed bookings. Fire-and-forget: failures stay inside the sink.
#[async_trait]
pub trait BookingSink: Send + Sync {
    async fn submit(&self, record: &BookingRecord);
}

pub struct LogBookingSink;

#[async_trait]
impl BookingSink for LogBookingSink {
    async fn submit(&self, record: &BookingRecord) {
        log_booking(record);
    }
}

/// Logs the booking and texts a summary to the clinic.
pub struct ClinicNotifySink {
    messaging: Box<dyn MessagingProvider>,
    clinic_phone: String,
}

impl ClinicNotifySink {
    pub fn new(messaging: Box<dyn MessagingProvider>, clinic_phone: impl Into<String>) -> Self {
        Self {
            messaging,
            clinic_phone: clinic_phone.into(),
        }
    }
}

#[async_trait]
impl BookingSink for ClinicNotifySink {
    async fn submit(&self, record: &BookingRecord) {
        log_booking(record);

        let body = notification_text(record);
        if let Err(e) = self.messaging.send_message(&self.clinic_phone, &body).await {
            tracing::warn!(
                error = %e,
                reference = %record.reference,
                "failed to notify clinic of booking"
            );
        }
    }
}

fn log_booking(record: &BookingRecord) {
    tracing::info!(
        reference = %record.reference,
        name = %record.name,
        phone = %record.phone,
        service = %record.service,
        date = %record.date,
        time = %record.time,
        "booking confirmed"
    );
}

pub fn notification_text(record: &BookingRecord) -> String {
    format!(
        "New booking: {} for {} ({}) on {} at {}",
        record.service,
        record.name,
        record.phone,
        record.date.format("%a %d %b %Y"),
        record.time,
    )
}
