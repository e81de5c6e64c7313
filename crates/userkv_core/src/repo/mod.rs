//! Repository layer: user persistence over the key-value store port.
//!
//! # Responsibility
//! - Define the use-case oriented persistence contract for users.
//! - Isolate storage record shape and item encoding from services.
//!
//! # Invariants
//! - Every failure is surfaced to the caller; nothing is swallowed.
//! - One `save` issues at most one store write and never retries.

pub mod user_record;
pub mod user_repo;
