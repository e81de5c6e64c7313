//! Injectable providers for time and identity.
//!
//! # Responsibility
//! - Keep wall-clock reads and id generation behind narrow traits.
//! - Let tests substitute deterministic closures.

pub mod clock;
pub mod id;
