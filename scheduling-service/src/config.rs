// Scheduling configuration
use serde::{Deserialize, Serialize};

/// Business rules the booking path enforces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingConfig {
    /// Hour of day (UTC) the clinic opens.
    pub business_hours_start: u32,
    /// Hour of day (UTC) the clinic closes; appointments must end by it.
    pub business_hours_end: u32,
    pub min_duration_minutes: i64,
    pub max_duration_minutes: i64,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            business_hours_start: 8,
            business_hours_end: 20,
            min_duration_minutes: 5,
            max_duration_minutes: 480,
        }
    }
}

impl SchedulingConfig {
    /// Load configuration from environment variables, falling back to
    /// the defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            business_hours_start: env_parse(
                "CLINIC_BUSINESS_HOURS_START",
                defaults.business_hours_start,
            ),
            business_hours_end: env_parse(
                "CLINIC_BUSINESS_HOURS_END",
                defaults.business_hours_end,
            ),
            min_duration_minutes: env_parse(
                "CLINIC_MIN_APPOINTMENT_MINUTES",
                defaults.min_duration_minutes,
            ),
            max_duration_minutes: env_parse(
                "CLINIC_MAX_APPOINTMENT_MINUTES",
                defaults.max_duration_minutes,
            ),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
