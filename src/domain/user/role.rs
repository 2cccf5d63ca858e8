//! Role assignments owned by a user

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a role defined elsewhere in the shop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(i64);

impl RoleId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for RoleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single role granted to a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRole {
    role_id: RoleId,
    created_at: DateTime<Utc>,
}

impl UserRole {
    pub fn new(role_id: RoleId) -> Self {
        Self {
            role_id,
            created_at: Utc::now(),
        }
    }

    pub fn role_id(&self) -> RoleId {
        self.role_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
