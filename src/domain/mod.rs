//! Domain layer - Core business logic and entities

pub mod error;
pub mod user;

pub use error::DomainError;
pub use user::{
    AddressDetails, AddressId, Gender, RoleId, User, UserAddress, UserId, UserRepository,
    UserRole, UserUniquenessService, Wallet, WalletType,
};
