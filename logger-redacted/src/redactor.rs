use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b").unwrap();
    static ref PHONE_REGEX: Regex =
        Regex::new(r"\b(?:\+1[-.\s]?)?\(?([0-9]{3})\)?[-.\s]?([0-9]{3})[-.\s]?([0-9]{4})\b")
            .unwrap();
}

/// PII redaction configuration
#[derive(Debug, Clone)]
pub struct RedactionConfig {
    pub redact_emails: bool,
    pub redact_phones: bool,
    pub custom_patterns: Vec<(Regex, String)>,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            redact_emails: true,
            redact_phones: true,
            custom_patterns: Vec::new(),
        }
    }
}

/// Masks patient contact details in log text.
pub struct PiiRedactor {
    config: RedactionConfig,
}

impl PiiRedactor {
    pub fn new(config: RedactionConfig) -> Self {
        Self { config }
    }

    pub fn redact(&self, text: &str) -> String {
        let mut result = text.to_string();

        if self.config.redact_emails {
            result = redact_emails(&result);
        }

        if self.config.redact_phones {
            result = PHONE_REGEX.replace_all(&result, "(***) ***-****").to_string();
        }

        for (pattern, replacement) in &self.config.custom_patterns {
            result = pattern.replace_all(&result, replacement.as_str()).to_string();
        }

        result
    }
}

impl Default for PiiRedactor {
    fn default() -> Self {
        Self::new(RedactionConfig::default())
    }
}

/// Mask an email address, keeping the first character of the local part
/// and domain so operators can still distinguish recipients at a glance.
pub fn redact_email(email: &str) -> String {
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() == 2 && !parts[0].is_empty() && !parts[1].is_empty() {
        format!(
            "{}***@{}***",
            &parts[0][..1.min(parts[0].len())],
            &parts[1][..1.min(parts[1].len())]
        )
    } else {
        "***@***".to_string()
    }
}

fn redact_emails(text: &str) -> String {
    EMAIL_REGEX
        .replace_all(text, |caps: &regex::Captures| redact_email(&caps[0]))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_redaction() {
        let redactor = PiiRedactor::default();

        let text = "confirmation sent to john.doe@example.com";
        let redacted = redactor.redact(text);
        assert!(redacted.contains("j***@e***"));
        assert!(!redacted.contains("john.doe"));
    }

    #[test]
    fn test_phone_redaction() {
        let redactor = PiiRedactor::default();

        let text = "Call me at (555) 123-4567";
        let redacted = redactor.redact(text);
        assert!(redacted.contains("(***) ***-****"));
    }

    #[test]
    fn test_single_address_helper() {
        assert_eq!(redact_email("jane@clinic.org"), "j***@c***");
        assert_eq!(redact_email("not-an-email"), "***@***");
    }

    #[test]
    fn test_custom_pattern() {
        let config = RedactionConfig {
            custom_patterns: vec![(Regex::new(r"MRN\d+").unwrap(), "MRN[REDACTED]".to_string())],
            ..Default::default()
        };
        let redactor = PiiRedactor::new(config);

        let redacted = redactor.redact("patient MRN123456 checked in");
        assert!(redacted.contains("MRN[REDACTED]"));
    }
}
