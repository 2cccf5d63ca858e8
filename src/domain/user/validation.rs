//! User validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::DomainError;

/// Required length of a phone number, in characters
pub const PHONE_NUMBER_LENGTH: usize = 11;

/// Length of a national code, in digits
pub const NATIONAL_CODE_LENGTH: usize = 10;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$")
        .unwrap()
});

/// Check whether a string is a well-formed email address
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Check whether a phone number has the required length
pub fn is_valid_phone_number(phone_number: &str) -> bool {
    phone_number.chars().count() == PHONE_NUMBER_LENGTH
}

/// Check a 10-digit national code against its check digit
///
/// Codes made of a single repeated digit are rejected even though some of
/// them satisfy the checksum.
pub fn is_valid_national_code(code: &str) -> bool {
    if code.len() != NATIONAL_CODE_LENGTH || !code.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let digits: Vec<u32> = code.bytes().map(|b| u32::from(b - b'0')).collect();

    if digits.iter().all(|d| *d == digits[0]) {
        return false;
    }

    let check = digits[9];
    let sum: u32 = digits[..9]
        .iter()
        .zip((2..=10u32).rev())
        .map(|(d, weight)| d * weight)
        .sum();
    let remainder = sum % 11;

    if remainder < 2 {
        check == remainder
    } else {
        check == 11 - remainder
    }
}

/// Phone number rule shared by users and addresses
pub fn check_phone_number(phone_number: &str) -> Result<(), DomainError> {
    DomainError::check_string(phone_number, "phone_number")?;

    if !is_valid_phone_number(phone_number) {
        return Err(DomainError::invalid_format(format!(
            "Phone number must be exactly {} characters",
            PHONE_NUMBER_LENGTH
        )));
    }

    Ok(())
}
