use crate::error::{AppError, AppResult};
use regex::Regex;
use std::sync::OnceLock;

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("valid url regex"))
}

fn zip_code_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9A-Za-z][0-9A-Za-z -]{1,9}$").expect("valid zip regex"))
}

/// Trims `value` and checks it is non-empty and at most `max` characters.
pub fn required_text(field: &str, value: &str, max: usize) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > max {
        return Err(AppError::ValidationError(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Like [`required_text`] but blank input becomes `None`.
pub fn optional_text(field: &str, value: Option<String>, max: usize) -> AppResult<Option<String>> {
    match value {
        Some(v) if !v.trim().is_empty() => required_text(field, &v, max).map(Some),
        _ => Ok(None),
    }
}

pub fn validate_url(field: &str, value: &str) -> AppResult<()> {
    if value.len() > 200 || !url_regex().is_match(value) {
        return Err(AppError::ValidationError(format!(
            "{field} must be an http(s) URL of at most 200 characters"
        )));
    }
    Ok(())
}

pub fn validate_zip_code(value: &str) -> AppResult<()> {
    if !zip_code_regex().is_match(value) {
        return Err(AppError::ValidationError("Invalid zip code".to_string()));
    }
    Ok(())
}

pub fn non_negative(field: &str, value: i64) -> AppResult<()> {
    if value < 0 {
        return Err(AppError::ValidationError(format!("{field} must not be negative")));
    }
    Ok(())
}
