//! Infrastructure layer - storage, hashing and logging adapters

pub mod logging;
pub mod user;
