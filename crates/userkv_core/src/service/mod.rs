//! Core use-case services.
//!
//! # Responsibility
//! - Turn caller requests into repository calls.
//! - Keep CLI and embedding layers decoupled from storage details.

pub mod user_service;
