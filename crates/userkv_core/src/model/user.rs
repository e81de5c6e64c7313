//! User domain model.
//!
//! # Responsibility
//! - Define the canonical user shape seen by callers.
//!
//! # Invariants
//! - `id` is assigned by the repository on create; caller values are ignored.
//! - `created_at == updated_at` right after creation.
//! - Business fields are opaque and never validated by core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Business-facing user record.
///
/// `User::default()` is the "not yet persisted" shape: empty `id` and both
/// timestamps at the Unix epoch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Globally unique identifier, empty until saved.
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// Free-form phone text; no format checks.
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates an unsaved user carrying only business fields.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: phone.into(),
            ..Self::default()
        }
    }

    /// Returns whether an identifier has been assigned.
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }
}
