//! Booking configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Booking and checkout configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfig {
    /// Frontend base URL used for checkout redirect targets
    #[serde(default = "default_frontend_base_url")]
    pub frontend_base_url: String,

    /// ISO currency code for session pricing, lowercase
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl BookingConfig {
    /// Redirect target after a completed checkout.
    pub fn checkout_success_url(&self, session_id: &str) -> String {
        format!(
            "{}/mentoring/sessions/{}?payment=success",
            self.frontend_base_url.trim_end_matches('/'),
            session_id
        )
    }

    /// Redirect target after an abandoned checkout.
    pub fn checkout_cancel_url(&self, session_id: &str) -> String {
        format!(
            "{}/mentoring/sessions/{}?payment=cancelled",
            self.frontend_base_url.trim_end_matches('/'),
            session_id
        )
    }

    /// Validate booking configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.frontend_base_url.starts_with("http://")
            && !self.frontend_base_url.starts_with("https://")
        {
            return Err(ValidationError::InvalidFrontendUrl);
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(ValidationError::InvalidCurrency);
        }
        Ok(())
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            frontend_base_url: default_frontend_base_url(),
            currency: default_currency(),
        }
    }
}

fn default_frontend_base_url() -> String {
    "http://localhost:5173".to_string()
}

fn default_currency() -> String {
    "usd".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_redirect_urls_without_double_slash() {
        let config = BookingConfig {
            frontend_base_url: "https://app.example.com/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.checkout_success_url("abc"),
            "https://app.example.com/mentoring/sessions/abc?payment=success"
        );
        assert_eq!(
            config.checkout_cancel_url("abc"),
            "https://app.example.com/mentoring/sessions/abc?payment=cancelled"
        );
    }

    #[test]
    fn rejects_non_http_url_and_bad_currency() {
        let config = BookingConfig {
            frontend_base_url: "app.example.com".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = BookingConfig {
            currency: "USD".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = BookingConfig {
            currency: "dollars".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_config_is_valid() {
        assert!(BookingConfig::default().validate().is_ok());
    }
}
