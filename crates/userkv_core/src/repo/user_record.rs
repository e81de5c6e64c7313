//! Storage-side user record and its mapping to the domain model.
//!
//! # Invariants
//! - Field set is identical to `User`; only attribute naming and timestamp
//!   encoding are owned here.
//! - `UserRecord::from_domain(u).into_domain() == u` for every `u`.

use crate::model::user::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Row shape written to the users table.
///
/// Timestamps serialize as integer epoch seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn from_domain(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone: user.phone.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }

    pub fn into_domain(self) -> User {
        User {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<&User> for UserRecord {
    fn from(value: &User) -> Self {
        Self::from_domain(value)
    }
}

impl From<UserRecord> for User {
    fn from(value: UserRecord) -> Self {
        value.into_domain()
    }
}
