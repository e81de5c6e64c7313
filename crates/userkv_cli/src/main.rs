//! Command-line entry point for userkv.
//!
//! # Responsibility
//! - Wire `userkv_core` to a SQLite-backed key-value store.
//! - Print saved users as JSON so the output can be piped.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;
use std::time::Duration;
use userkv_core::{
    default_log_level, init_logging, CreateUserRequest, KvUserRepository, RepositoryConfig,
    RequestContext, SqliteKeyValueStore, UserService, DEFAULT_PARTITION_KEY, DEFAULT_USER_TABLE,
};

#[derive(Debug, Parser)]
#[command(name = "userkv", version, about = "Save user records into a key-value table store")]
struct Cli {
    /// SQLite database file backing the store.
    #[arg(long, default_value = "userkv.sqlite3")]
    db: PathBuf,

    /// Target table name.
    #[arg(long, default_value = DEFAULT_USER_TABLE)]
    table: String,

    /// Absolute directory for rolling log files; logging is off when omitted.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Register the table with partition key `id` (idempotent).
    CreateTable,
    /// Save one user and print it as JSON.
    Save {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        phone: String,
        /// Abort the write if it cannot complete within this many milliseconds.
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or_else(|| default_log_level());
        init_logging(level, log_dir).context("failed to initialize logging")?;
    }

    let config = RepositoryConfig::new(&cli.table).context("invalid table name")?;
    let store = SqliteKeyValueStore::open(&cli.db)
        .with_context(|| format!("failed to open store at `{}`", cli.db.display()))?;

    match cli.command {
        Command::CreateTable => {
            store
                .ensure_table(config.table_name(), DEFAULT_PARTITION_KEY)
                .with_context(|| format!("failed to create table `{}`", config.table_name()))?;
            info!("event=table_ready module=cli table={}", config.table_name());
            println!("table `{}` ready", config.table_name());
        }
        Command::Save {
            first_name,
            last_name,
            phone,
            timeout_ms,
        } => {
            let ctx = match timeout_ms {
                Some(ms) => RequestContext::with_timeout(Duration::from_millis(ms)),
                None => RequestContext::background(),
            };
            let service = UserService::new(KvUserRepository::with_defaults(store, config));
            let request = CreateUserRequest {
                first_name,
                last_name,
                phone,
            };

            let user = service
                .create_user(&ctx, &request)
                .context("failed to save user")?;
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
    }

    Ok(())
}
