//! Repository configuration.
//!
//! # Invariants
//! - Table names follow key-value store naming rules: 3..=255 chars of
//!   `[A-Za-z0-9_.-]`.
//! - A constructed `RepositoryConfig` is always valid and immutable.

use thiserror::Error;

/// Table used when callers do not pick one.
pub const DEFAULT_USER_TABLE: &str = "users";

const MIN_TABLE_NAME_LEN: usize = 3;
const MAX_TABLE_NAME_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("table name length must be 3..=255, got {0}")]
    TableNameLength(usize),
    #[error("table name `{name}` contains invalid character `{invalid}`")]
    TableNameCharacter { name: String, invalid: char },
}

/// Settings injected into a user repository at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    table_name: String,
}

impl RepositoryConfig {
    /// Validates and wraps a table name. Surrounding whitespace is trimmed.
    pub fn new(table_name: impl AsRef<str>) -> Result<Self, ConfigError> {
        let name = table_name.as_ref().trim();
        let len = name.chars().count();
        if !(MIN_TABLE_NAME_LEN..=MAX_TABLE_NAME_LEN).contains(&len) {
            return Err(ConfigError::TableNameLength(len));
        }
        if let Some(invalid) = name
            .chars()
            .find(|&c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')))
        {
            return Err(ConfigError::TableNameCharacter {
                name: name.to_string(),
                invalid,
            });
        }

        Ok(Self {
            table_name: name.to_string(),
        })
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_USER_TABLE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, RepositoryConfig, DEFAULT_USER_TABLE};

    #[test]
    fn default_uses_users_table() {
        assert_eq!(RepositoryConfig::default().table_name(), DEFAULT_USER_TABLE);
    }

    #[test]
    fn new_trims_and_accepts_valid_names() {
        let config = RepositoryConfig::new("  prod.users-v2_a ").unwrap();
        assert_eq!(config.table_name(), "prod.users-v2_a");
    }

    #[test]
    fn new_rejects_short_and_empty_names() {
        assert_eq!(
            RepositoryConfig::new("   ").unwrap_err(),
            ConfigError::TableNameLength(0)
        );
        assert_eq!(
            RepositoryConfig::new("ab").unwrap_err(),
            ConfigError::TableNameLength(2)
        );
    }

    #[test]
    fn new_rejects_invalid_characters() {
        let err = RepositoryConfig::new("user table").unwrap_err();
        assert_eq!(
            err,
            ConfigError::TableNameCharacter {
                name: "user table".to_string(),
                invalid: ' ',
            }
        );
    }
}
