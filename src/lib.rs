//! Shop Users
//!
//! The `User` aggregate of an online shop with support for:
//! - Full and phone-only registration guarded by format and uniqueness rules
//! - Postal addresses owned by the user
//! - Role assignments and wallet entries
//! - An in-memory store and a user service for wiring it together

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{DomainError, User};
