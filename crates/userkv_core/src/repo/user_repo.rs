//! User repository contract and key-value store adapter.
//!
//! # Responsibility
//! - Run the create-and-persist flow for one user.
//! - Keep id/timestamp assignment and item encoding out of callers.
//!
//! # Invariants
//! - Caller-supplied `id`/timestamps are overwritten on save.
//! - `created_at == updated_at` on every saved user.
//! - Exactly one `put_item` per successful save; none when encoding fails.
//! - The caller's `RequestContext` reaches the store untouched.

use crate::config::RepositoryConfig;
use crate::model::user::User;
use crate::provider::clock::{Clock, SystemClock};
use crate::provider::id::{IdGenerator, UuidV4Generator};
use crate::repo::user_record::UserRecord;
use crate::store::context::RequestContext;
use crate::store::item::{to_item, ItemCodecError};
use crate::store::{KeyValueStore, PutItemInput, StoreError};
use chrono::SubsecRound;
use log::{debug, error, info};
use std::time::Instant;
use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

/// Failure of a repository operation. No partial entity accompanies it.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("failed to encode user item: {0}")]
    Serialization(#[from] ItemCodecError),
    #[error("failed to write user item to table `{table}`: {source}")]
    StoreWrite {
        table: String,
        #[source]
        source: StoreError,
    },
}

impl RepoError {
    /// Stable machine-readable code for logs and CLI output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Serialization(_) => "serialization_failed",
            Self::StoreWrite { .. } => "store_write_failed",
        }
    }
}

/// Persistence contract for users.
pub trait UserRepository: Send + Sync {
    /// Assigns identity and timestamps to `user`, persists it and returns the
    /// stored state.
    fn save(&self, ctx: &RequestContext, user: User) -> RepoResult<User>;
}

/// `UserRepository` over any `KeyValueStore`.
pub struct KvUserRepository<S, C = SystemClock, G = UuidV4Generator> {
    store: S,
    config: RepositoryConfig,
    clock: C,
    ids: G,
}

impl<S: KeyValueStore> KvUserRepository<S> {
    /// Uses the system clock and random UUID v4 identifiers.
    pub fn with_defaults(store: S, config: RepositoryConfig) -> Self {
        Self::new(store, config, SystemClock, UuidV4Generator)
    }
}

impl<S, C, G> KvUserRepository<S, C, G>
where
    S: KeyValueStore,
    C: Clock,
    G: IdGenerator,
{
    pub fn new(store: S, config: RepositoryConfig, clock: C, ids: G) -> Self {
        Self {
            store,
            config,
            clock,
            ids,
        }
    }

    pub fn table_name(&self) -> &str {
        self.config.table_name()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S, C, G> UserRepository for KvUserRepository<S, C, G>
where
    S: KeyValueStore,
    C: Clock,
    G: IdGenerator,
{
    fn save(&self, ctx: &RequestContext, user: User) -> RepoResult<User> {
        let started_at = Instant::now();
        let table = self.config.table_name();
        debug!("event=user_save module=repo status=start table={table}");

        // Item timestamps carry whole seconds; keep the returned user identical.
        let now = self.clock.now().trunc_subsecs(0);
        let record = UserRecord {
            id: self.ids.next_id(),
            created_at: now,
            updated_at: now,
            ..UserRecord::from_domain(&user)
        };

        let item = to_item(&record).map_err(|err| {
            error!(
                "event=user_save module=repo status=error table={table} error_code=serialization_failed error={err}"
            );
            RepoError::Serialization(err)
        })?;

        let input = PutItemInput {
            table_name: table.to_string(),
            item,
        };
        if let Err(source) = self.store.put_item(ctx, input) {
            error!(
                "event=user_save module=repo status=error table={table} duration_ms={} error_code=store_write_failed error={source}",
                started_at.elapsed().as_millis()
            );
            return Err(RepoError::StoreWrite {
                table: table.to_string(),
                source,
            });
        }

        info!(
            "event=user_save module=repo status=ok table={table} user_id={} duration_ms={}",
            record.id,
            started_at.elapsed().as_millis()
        );
        Ok(record.into_domain())
    }
}

impl<R: UserRepository + ?Sized> UserRepository for &R {
    fn save(&self, ctx: &RequestContext, user: User) -> RepoResult<User> {
        (**self).save(ctx, user)
    }
}

impl<R: UserRepository + ?Sized> UserRepository for std::sync::Arc<R> {
    fn save(&self, ctx: &RequestContext, user: User) -> RepoResult<User> {
        (**self).save(ctx, user)
    }
}
