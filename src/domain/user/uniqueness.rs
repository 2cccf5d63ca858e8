//! Uniqueness lookups consumed by the user aggregate

#[cfg(test)]
use mockall::automock;

/// Answers whether a phone number or email is already claimed by any user.
///
/// The aggregate only asks when the candidate differs from its own stored
/// value, so a positive answer always means another user owns it.
#[cfg_attr(test, automock)]
pub trait UserUniquenessService: Send + Sync {
    /// Check whether the phone number is assigned to any user
    fn is_phone_number_registered(&self, phone_number: &str) -> bool;

    /// Check whether the email is assigned to any user
    fn is_email_registered(&self, email: &str) -> bool;
}
