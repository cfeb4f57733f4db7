//! Signup form validation.

use crate::error::AppError;
use crate::service::SignupForm;
use regex::Regex;

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_FIELD_LENGTH: usize = 255;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

pub struct SignupValidator;

impl SignupValidator {
    /// Both emails must match and look like an address; both passwords must match and be long enough.
    pub fn validate(form: &SignupForm) -> Result<(), AppError> {
        let email = required("signupFormEmail", &form.email)?;
        validate_email("signupFormEmail", email)?;
        if email != form.email_again.trim() {
            return Err(AppError::Validation("email addresses do not match".into()));
        }

        let password = required("signupFormPassword", &form.password)?;
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::Validation(format!(
                "signupFormPassword must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }
        if password != form.password_again.trim() {
            return Err(AppError::Validation("passwords do not match".into()));
        }
        Ok(())
    }
}

fn required<'a>(field: &str, value: &'a str) -> Result<&'a str, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    if value.len() > MAX_FIELD_LENGTH {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            field, MAX_FIELD_LENGTH
        )));
    }
    Ok(value)
}

fn validate_email(field: &str, value: &str) -> Result<(), AppError> {
    let re = Regex::new(EMAIL_PATTERN).map_err(|_| AppError::Validation(format!("invalid pattern for {}", field)))?;
    if !re.is_match(value) {
        return Err(AppError::Validation(format!("{} must be a valid email", field)));
    }
    Ok(())
}
