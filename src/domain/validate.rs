// Submission validation. Fail-fast: the first violated rule is reported and
// nothing is persisted.
use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use std::sync::OnceLock;

use super::fields::{needs_location_qualifier, RawSubmission};
use crate::error::{AppError, Result};

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static MOBILE_RE: OnceLock<Regex> = OnceLock::new();

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"))
}

fn mobile_re() -> &'static Regex {
    MOBILE_RE.get_or_init(|| Regex::new(r"^09\d{2} \d{3} \d{4}$").expect("mobile regex"))
}

/// Validates the raw submission and returns the parsed event date and time.
pub fn validate(raw: &RawSubmission) -> Result<(NaiveDate, NaiveTime)> {
    let required = [
        &raw.reporter_name,
        &raw.item_name,
        &raw.category,
        &raw.occupation,
        &raw.floor,
        &raw.location,
        &raw.date,
        &raw.time,
        &raw.contact_number,
        &raw.contact_email,
    ];
    if required.iter().any(|value| value.trim().is_empty()) {
        return Err(AppError::Validation(
            "Please fill in all required fields".to_string(),
        ));
    }

    if needs_location_qualifier(&raw.location) && raw.specific_location.trim().is_empty() {
        return Err(AppError::Validation(
            "Please specify the exact location".to_string(),
        ));
    }

    if raw.category == "Others" && raw.specific_category.trim().is_empty() {
        return Err(AppError::Validation(
            "Please specify the item category".to_string(),
        ));
    }

    if !email_re().is_match(raw.contact_email.trim()) {
        return Err(AppError::Validation(
            "Please enter a valid email address".to_string(),
        ));
    }

    let digits: String = raw
        .contact_number
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    if digits.len() < 10 || digits.len() > 13 {
        return Err(AppError::Validation(
            "Please enter a valid contact number".to_string(),
        ));
    }

    let event_date = NaiveDate::parse_from_str(raw.date.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Please enter a valid date".to_string()))?;
    let event_time = parse_time(raw.time.trim())
        .ok_or_else(|| AppError::Validation("Please enter a valid time".to_string()))?;

    Ok((event_date, event_time))
}

// HTML time inputs post either HH:MM or HH:MM:SS.
fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}

/// Stricter local-mobile shape used by the form UI: `09xx xxx xxxx`.
pub fn is_ph_mobile_format(number: &str) -> bool {
    mobile_re().is_match(number)
}
