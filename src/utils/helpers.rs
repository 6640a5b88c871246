//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use std::sync::OnceLock;

use chrono::{NaiveDate, Utc};
use regex::Regex;

use crate::utils::errors::{DormHubError, Result};

static TIME_RE: OnceLock<Regex> = OnceLock::new();
static CONTACT_RE: OnceLock<Regex> = OnceLock::new();

/// Current calendar date used for submission, approval and completion stamps
pub fn current_date() -> NaiveDate {
    Utc::now().date_naive()
}

/// Validate a 24-hour `HH:MM` time-of-day string
pub fn is_valid_time(value: &str) -> bool {
    TIME_RE
        .get_or_init(|| Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").expect("valid time pattern"))
        .is_match(value)
}

/// Validate a contact number (digits with optional +, -, spaces; at least 10 chars)
pub fn is_valid_contact_number(value: &str) -> bool {
    CONTACT_RE
        .get_or_init(|| Regex::new(r"^\+?[0-9][0-9 \-]{8,}[0-9]$").expect("valid contact pattern"))
        .is_match(value)
}

/// Reject a checkout window whose return date precedes the intended date
pub fn validate_checkout_window(intended_date: NaiveDate, return_date: NaiveDate) -> Result<()> {
    if return_date < intended_date {
        return Err(DormHubError::Validation(format!(
            "Return date {} is before intended date {}",
            return_date, intended_date
        )));
    }
    Ok(())
}

/// Require a non-empty trimmed value for a named field
pub fn require_field(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DormHubError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_time() {
        assert!(is_valid_time("00:00"));
        assert!(is_valid_time("09:30"));
        assert!(is_valid_time("23:59"));

        assert!(!is_valid_time("24:00"));
        assert!(!is_valid_time("9:30"));
        assert!(!is_valid_time("09:60"));
        assert!(!is_valid_time("09:30:00"));
        assert!(!is_valid_time("noonish"));
    }

    #[test]
    fn test_is_valid_contact_number() {
        assert!(is_valid_contact_number("09123456789"));
        assert!(is_valid_contact_number("+63 912 345 6789"));
        assert!(is_valid_contact_number("0912-345-6789"));

        assert!(!is_valid_contact_number("12345"));
        assert!(!is_valid_contact_number("call me maybe"));
    }

    #[test]
    fn test_validate_checkout_window() {
        let earlier = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let later = NaiveDate::from_ymd_opt(2024, 3, 12).unwrap();

        assert!(validate_checkout_window(earlier, later).is_ok());
        assert!(validate_checkout_window(earlier, earlier).is_ok());
        assert!(validate_checkout_window(later, earlier).is_err());
    }

    #[test]
    fn test_require_field() {
        assert!(require_field("reason", "family visit").is_ok());
        assert!(require_field("reason", "   ").is_err());
        assert!(require_field("reason", "").is_err());
    }
}
