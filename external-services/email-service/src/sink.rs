use crate::service::EmailService;
use async_trait::async_trait;
use logger_redacted::redact_email;
use scheduling_service::{BookingNotice, CancellationNotice, NotificationSink};
use tracing::{debug, info};

/// Adapter from the scheduling core's notification port to email.
///
/// Patients without an email address on file are skipped silently —
/// a missing address is not a delivery failure.
pub struct EmailNotificationSink {
    email: EmailService,
}

impl EmailNotificationSink {
    pub fn new(email: EmailService) -> Self {
        Self { email }
    }
}

#[async_trait]
impl NotificationSink for EmailNotificationSink {
    async fn notify_booking(&self, notice: &BookingNotice) -> anyhow::Result<()> {
        let Some(to) = notice.patient_email.as_deref() else {
            debug!(patient = %notice.patient_name, "no email on file, booking notice skipped");
            return Ok(());
        };

        let message_id = self
            .email
            .send_booking_confirmation(
                to,
                &notice.patient_name,
                &notice.doctor_name,
                notice.start_time,
                &notice.reason,
            )
            .await?;
        info!(recipient = %redact_email(to), %message_id, "booking confirmation sent");
        Ok(())
    }

    async fn notify_cancellation(&self, notice: &CancellationNotice) -> anyhow::Result<()> {
        let Some(to) = notice.patient_email.as_deref() else {
            debug!(patient = %notice.patient_name, "no email on file, cancellation notice skipped");
            return Ok(());
        };

        let message_id = self
            .email
            .send_cancellation_notice(
                to,
                &notice.patient_name,
                &notice.doctor_name,
                notice.start_time,
                &notice.reason,
            )
            .await?;
        info!(recipient = %redact_email(to), %message_id, "cancellation notice sent");
        Ok(())
    }
}
