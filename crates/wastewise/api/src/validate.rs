use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use wastewise_core::error::ApiError;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("Email cannot start with a number")]
    EmailLeadingDigit,
    #[error("Email contains invalid characters")]
    EmailInvalidCharacters,
    #[error("Please enter a valid email")]
    EmailMalformed,
    #[error("Please enter exactly 10 digits: {0}")]
    ContactNumber(String),
    #[error("Number of cleaners must be at least 1")]
    CleanersTooFew,
    #[error("Rating must be between 1 and 5, but given {0}")]
    RatingOutOfRange(i32),
    #[error("Latitude must be between -90 and 90, but given {0}")]
    LatitudeOutOfRange(f64),
    #[error("Longitude must be between -180 and 180, but given {0}")]
    LongitudeOutOfRange(f64),
    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        Self::bad_request(error)
    }
}

pub type Result<T = (), E = ValidationError> = ::core::result::Result<T, E>;

pub fn require(field: &'static str, value: &str) -> Result {
    if value.trim().is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(())
    }
}

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9._%+-]*@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("the email pattern is a valid regex")
});

pub fn email(value: &str) -> Result {
    require("Email", value)?;

    if EMAIL.is_match(value) {
        return Ok(());
    }

    let is_allowed = |c: char| c.is_ascii_alphanumeric() || "._%+-@".contains(c);
    if value.starts_with(|c: char| c.is_ascii_digit()) {
        Err(ValidationError::EmailLeadingDigit)
    } else if !value.chars().all(is_allowed) {
        Err(ValidationError::EmailInvalidCharacters)
    } else {
        Err(ValidationError::EmailMalformed)
    }
}

pub fn contact_number(value: &str) -> Result {
    require("Contact number", value)?;
    if value.len() == 10 && value.bytes().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::ContactNumber(value.into()))
    }
}

pub fn rating(value: i32) -> Result {
    if (1..=5).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::RatingOutOfRange(value))
    }
}

pub fn coordinates(latitude: f64, longitude: f64) -> Result {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ValidationError::LatitudeOutOfRange(latitude));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ValidationError::LongitudeOutOfRange(longitude));
    }
    Ok(())
}

pub fn password(value: &str) -> Result {
    const MIN: usize = 6;

    if value.chars().count() < MIN {
        Err(ValidationError::PasswordTooShort { min: MIN })
    } else {
        Ok(())
    }
}
