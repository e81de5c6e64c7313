//! Domain model for persisted entities.
//!
//! # Responsibility
//! - Define the business-facing shapes handed to and returned by core APIs.
//! - Stay independent of any storage encoding.

pub mod user;
