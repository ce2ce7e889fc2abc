//! Account roles.
//!
//! The set is closed: ids are seeded in `20240101000002_create_roles_and_users.sql`
//! in the order below and mirrored here, like animal statuses.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_STAFF: &str = "staff";

/// What an account may do. Admins also manage users, lookups and deletions.
#[repr(i64)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin = 1,
    Staff = 2,
}

impl UserRole {
    pub const ALL: [UserRole; 2] = [UserRole::Admin, UserRole::Staff];

    /// Seeded `roles.id`.
    pub fn id(self) -> DbId {
        self as DbId
    }

    pub fn from_id(id: DbId) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.id() == id)
    }

    /// Resolve a role name exactly as stored (`admin`, `staff`).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => ROLE_ADMIN,
            Self::Staff => ROLE_STAFF,
        }
    }
}
