use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer};

use crate::errors::{SubmissionError, SubmissionResult};

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("email pattern is valid"));

/// Field checks shared by every submission form
pub struct ValidationService;

impl ValidationService {
    /// Trimmed value, or `MissingField` when blank
    pub fn required(value: &str, field: &'static str) -> SubmissionResult<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(SubmissionError::MissingField(field));
        }
        Ok(trimmed.to_string())
    }

    /// Blank becomes `None`
    pub fn optional(value: &str) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    pub fn email(value: &str, field: &'static str) -> SubmissionResult<String> {
        let email = Self::required(value, field)?;
        if !EMAIL_REGEX.is_match(&email) {
            return Err(SubmissionError::invalid(
                field,
                format!("'{}' is not a valid email address", email),
            ));
        }
        Ok(email)
    }

    /// Whole-dollar amount. Blank is `None`; a fractional part is dropped.
    pub fn whole_dollars(value: &str, field: &'static str) -> SubmissionResult<Option<i64>> {
        match Self::decimal(value, field)? {
            Some(amount) if amount.trunc() >= i64::MAX as f64 => Err(SubmissionError::invalid(
                field,
                format!("'{}' is too large", value.trim()),
            )),
            Some(amount) => Ok(Some(amount.trunc() as i64)),
            None => Ok(None),
        }
    }

    /// Non-negative decimal amount. Blank is `None`.
    pub fn decimal(value: &str, field: &'static str) -> SubmissionResult<Option<f64>> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let amount: f64 = trimmed
            .parse()
            .map_err(|_| SubmissionError::invalid(field, format!("'{}' is not a number", trimmed)))?;
        Self::non_negative(amount, field).map(Some)
    }

    /// Currency as typed into a formatted input: everything except digits and `.`
    /// is dropped, so `$1,250.50` reads as 1250.5. Nothing left means `None`.
    pub fn currency(value: &str, field: &'static str) -> SubmissionResult<Option<f64>> {
        let numeric: String = value
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        if numeric.is_empty() || numeric == "." {
            return Ok(None);
        }
        let amount: f64 = numeric
            .parse()
            .map_err(|_| SubmissionError::invalid(field, format!("'{}' is not a valid amount", value.trim())))?;
        Self::non_negative(amount, field).map(Some)
    }

    pub fn date(value: &str, field: &'static str) -> SubmissionResult<Option<NaiveDate>> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| SubmissionError::invalid(field, format!("'{}' is not a YYYY-MM-DD date", trimmed)))
    }

    pub fn required_date(value: &str, field: &'static str) -> SubmissionResult<NaiveDate> {
        Self::date(value, field)?.ok_or(SubmissionError::MissingField(field))
    }

    /// Comma-separated list with blank entries removed
    pub fn list(value: &str) -> Vec<String> {
        value
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn non_negative(amount: f64, field: &'static str) -> SubmissionResult<f64> {
        if !amount.is_finite() {
            return Err(SubmissionError::invalid(field, "must be a finite number"));
        }
        if amount < 0.0 {
            return Err(SubmissionError::invalid(field, "must not be negative"));
        }
        Ok(amount)
    }
}

/// Accepts a JSON string, number or null for a form field that is parsed later.
/// HTML forms always send strings; JSON clients often send numbers.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
        Null(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
        Raw::Null(()) => String::new(),
    })
}

/// Checkbox value: `true` from JSON, or `on`/`true`/`1`/`yes` from a form post.
pub fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Flag(bool),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Flag(flag) => flag,
        Raw::Text(text) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "on" | "true" | "1" | "yes"
        ),
    })
}
