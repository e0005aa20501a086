pub mod health;
pub mod learn;
pub mod speech;

use crate::error::{AppError, AppResult};

/// Longest text accepted for a single request
pub const MAX_TEXT_CHARS: usize = 10_000;

/// Reject blank or oversized text fields
pub(crate) fn validate_text(field: &str, text: &str) -> AppResult<()> {
    if text.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{} cannot be empty", field)));
    }

    if text.chars().count() > MAX_TEXT_CHARS {
        return Err(AppError::PayloadTooLarge(format!(
            "{} must be 10,000 characters or less",
            field
        )));
    }

    Ok(())
}
