// Email service implementation over plain SMTP
use crate::error::{EmailError, EmailResult};
use chrono::{DateTime, Utc};
use mail_builder::MessageBuilder;
use mail_send::SmtpClientBuilder;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

/// Email service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    pub use_tls: bool,
    pub from_email: String,
    pub from_name: String,
    pub email_enabled: bool,
}

impl EmailConfig {
    /// Load email configuration from environment variables
    pub fn from_env() -> EmailResult<Self> {
        let email_enabled = std::env::var("EMAIL_ENABLED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(true);

        let from_email = std::env::var("EMAIL_FROM")
            .unwrap_or_else(|_| "noreply@cliniccore.local".to_string());

        let from_name = std::env::var("EMAIL_FROM_NAME")
            .unwrap_or_else(|_| "ClinicCore".to_string());

        Ok(Self {
            smtp_host: std::env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(587),
            smtp_username: std::env::var("SMTP_USERNAME").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
            use_tls: std::env::var("SMTP_TLS_ENABLED")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(true),
            from_email,
            from_name,
            email_enabled,
        })
    }
}

/// Email service for clinic notifications
pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    /// Create a new email service
    pub fn new(config: EmailConfig) -> EmailResult<Self> {
        if !config.email_enabled {
            info!("Email service disabled by configuration");
        }
        Ok(Self { config })
    }

    /// Send a plain text email
    pub async fn send_email(&self, to: &str, subject: &str, body: &str) -> EmailResult<String> {
        if !self.config.email_enabled {
            debug!("Email disabled, skipping send");
            return Ok(format!("disabled-{}", Uuid::new_v4()));
        }

        let message = MessageBuilder::new()
            .from((
                self.config.from_name.as_str(),
                self.config.from_email.as_str(),
            ))
            .to(to)
            .subject(subject)
            .text_body(body);

        self.send_message(message).await
    }

    /// Send an appointment confirmation
    pub async fn send_booking_confirmation(
        &self,
        to_email: &str,
        patient_name: &str,
        doctor_name: &str,
        start_time: DateTime<Utc>,
        reason: &str,
    ) -> EmailResult<String> {
        let subject = format!("Appointment confirmed with {}", doctor_name);
        let body = format!(
            "Hello {patient_name},\n\n\
             Your appointment has been booked.\n\n\
             Doctor:  {doctor_name}\n\
             When:    {}\n\
             Reason:  {reason}\n\n\
             Please arrive ten minutes early. If you need to change or\n\
             cancel the appointment, contact the front desk.\n\n\
             ClinicCore",
            format_appointment_time(start_time),
        );

        info!(doctor = doctor_name, "Sending booking confirmation");
        self.send_email(to_email, &subject, &body).await
    }

    /// Send a cancellation notice with the recorded reason
    pub async fn send_cancellation_notice(
        &self,
        to_email: &str,
        patient_name: &str,
        doctor_name: &str,
        start_time: DateTime<Utc>,
        reason: &str,
    ) -> EmailResult<String> {
        let subject = format!("Appointment with {} cancelled", doctor_name);
        let body = format!(
            "Hello {patient_name},\n\n\
             Your appointment with {doctor_name} on {} has been cancelled.\n\n\
             Reason: {reason}\n\n\
             Contact the front desk to book a new time.\n\n\
             ClinicCore",
            format_appointment_time(start_time),
        );

        info!(doctor = doctor_name, "Sending cancellation notice");
        self.send_email(to_email, &subject, &body).await
    }

    /// Internal method to send a constructed message
    async fn send_message(&self, message: MessageBuilder<'_>) -> EmailResult<String> {
        let mut smtp_client =
            SmtpClientBuilder::new(self.config.smtp_host.as_str(), self.config.smtp_port)
                .implicit_tls(self.config.use_tls);

        // Add credentials if provided
        if let (Some(user), Some(pass)) = (&self.config.smtp_username, &self.config.smtp_password)
        {
            smtp_client = smtp_client.credentials((user.as_str(), pass.as_str()));
        }

        let mut client = smtp_client
            .connect()
            .await
            .map_err(|e| EmailError::SendFailed(format!("SMTP connection failed: {}", e)))?;

        let message_id = Uuid::new_v4().to_string();
        client
            .send(message)
            .await
            .map_err(|e| EmailError::SendFailed(format!("Failed to send email: {}", e)))?;

        debug!(message_id = %message_id, "Email sent successfully");
        Ok(message_id)
    }
}

fn format_appointment_time(start_time: DateTime<Utc>) -> String {
    start_time.format("%A, %B %e %Y at %H:%M UTC").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_email_config_from_env() {
        std::env::set_var("SMTP_HOST", "mail.example.com");
        std::env::set_var("SMTP_PORT", "2525");
        std::env::set_var("EMAIL_ENABLED", "true");

        let config = EmailConfig::from_env().unwrap();
        std::env::remove_var("SMTP_HOST");
        std::env::remove_var("SMTP_PORT");
        std::env::remove_var("EMAIL_ENABLED");

        assert!(config.email_enabled);
        assert_eq!(config.smtp_host, "mail.example.com");
        assert_eq!(config.smtp_port, 2525);
    }

    #[tokio::test]
    async fn disabled_service_short_circuits() {
        let service = EmailService::new(EmailConfig {
            smtp_host: "localhost".to_string(),
            smtp_port: 587,
            smtp_username: None,
            smtp_password: None,
            use_tls: false,
            from_email: "noreply@cliniccore.local".to_string(),
            from_name: "ClinicCore".to_string(),
            email_enabled: false,
        })
        .unwrap();

        let message_id = service
            .send_email("patient@example.com", "subject", "body")
            .await
            .unwrap();
        assert!(message_id.starts_with("disabled-"));
    }

    #[test]
    fn appointment_time_is_human_readable() {
        let when = Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap();
        let text = format_appointment_time(when);
        assert!(text.contains("March"));
        assert!(text.contains("10:00 UTC"));
    }
}
