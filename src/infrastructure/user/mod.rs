//! User infrastructure module
//!
//! In-memory storage for the user aggregate, password hashing and the user
//! service that ties them together.

mod password;
mod repository;
mod service;

pub use password::{Argon2Hasher, PasswordHasher};
pub use repository::InMemoryUserRepository;
pub use service::{
    ChangePasswordRequest, CreateUserRequest, EditUserRequest, UserService,
    DEFAULT_MIN_PASSWORD_LENGTH,
};
