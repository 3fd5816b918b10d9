use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Payload for a booking confirmation.
#[derive(Debug, Clone)]
pub struct BookingNotice {
    pub patient_name: String,
    pub patient_email: Option<String>,
    pub doctor_name: String,
    pub start_time: DateTime<Utc>,
    pub reason: String,
}

/// Payload for a cancellation notice.
#[derive(Debug, Clone)]
pub struct CancellationNotice {
    pub patient_name: String,
    pub patient_email: Option<String>,
    pub doctor_name: String,
    pub start_time: DateTime<Utc>,
    pub reason: String,
}

/// Outbound notification port.
///
/// Fire-and-forget from the scheduling core's perspective: the service
/// catches and logs errors from these calls, it never propagates them.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify_booking(&self, notice: &BookingNotice) -> anyhow::Result<()>;
    async fn notify_cancellation(&self, notice: &CancellationNotice) -> anyhow::Result<()>;
}

/// Sink that drops every notice, for development and tests.
pub struct NullNotificationSink;

#[async_trait]
impl NotificationSink for NullNotificationSink {
    async fn notify_booking(&self, notice: &BookingNotice) -> anyhow::Result<()> {
        debug!(patient = %notice.patient_name, "booking notice dropped (null sink)");
        Ok(())
    }

    async fn notify_cancellation(&self, notice: &CancellationNotice) -> anyhow::Result<()> {
        debug!(patient = %notice.patient_name, "cancellation notice dropped (null sink)");
        Ok(())
    }
}
