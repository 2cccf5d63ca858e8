//! User domain
//!
//! The `User` aggregate together with the addresses, roles and wallet
//! entries it owns, the uniqueness port it consults and the repository
//! port used to persist it.

mod address;
mod entity;
mod repository;
mod role;
mod uniqueness;
mod validation;
mod wallet;

pub use address::{AddressDetails, AddressId, UserAddress};
pub use entity::{Gender, User, UserId, DEFAULT_AVATAR};
pub use repository::UserRepository;
pub use role::{RoleId, UserRole};
pub use uniqueness::UserUniquenessService;
pub use validation::{
    is_valid_email, is_valid_national_code, is_valid_phone_number, NATIONAL_CODE_LENGTH,
    PHONE_NUMBER_LENGTH,
};
pub use wallet::{Wallet, WalletType, MIN_WALLET_PRICE};

#[cfg(test)]
pub(crate) use address::fixtures;
#[cfg(test)]
pub use uniqueness::MockUserUniquenessService;
