//! Infrastructure adapters. Implement outbound ports.
//!
//! SQLite / Supabase persistence, filesystem term sheets, credentials, terminal UI.
//! Map errors to DomainError.

pub mod auth;
pub mod clock;
pub mod documents;
pub mod persistence;
pub mod ui;
