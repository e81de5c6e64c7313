//! Core persistence logic for userkv.
//! Saves user records into a key-value table store behind narrow ports.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod provider;
pub mod repo;
pub mod service;
pub mod store;

pub use config::{ConfigError, RepositoryConfig, DEFAULT_USER_TABLE};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::user::User;
pub use provider::clock::{Clock, SystemClock};
pub use provider::id::{IdGenerator, UuidV4Generator};
pub use repo::user_record::UserRecord;
pub use repo::user_repo::{KvUserRepository, RepoError, RepoResult, UserRepository};
pub use service::user_service::{CreateUserRequest, UserService};
pub use store::context::{ContextError, RequestContext};
pub use store::item::{to_item, AttributeValue, Item, ItemCodecError};
pub use store::memory::InMemoryKeyValueStore;
pub use store::sqlite::SqliteKeyValueStore;
pub use store::{KeyValueStore, PutItemInput, StoreError, StoreResult, DEFAULT_PARTITION_KEY};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
