//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{Document, DomainError, LtipTool, ResponseRecord, User};

/// Persistence sink for completed responses. Insert only.
#[async_trait::async_trait]
pub trait ResponseSink: Send + Sync {
    /// Store one record. Called once per submitted survey.
    async fn insert(&self, record: &ResponseRecord) -> Result<(), DomainError>;
}

/// Term sheet storage keyed by tool.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns `Ok(None)` when no term sheet exists for the tool.
    async fn fetch(&self, tool: LtipTool) -> Result<Option<Document>, DomainError>;
}

/// Credential check. Returns the user on a match, `None` otherwise.
pub trait Authenticator: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> Option<User>;
}

/// Source of record timestamps.
pub trait Clock: Send + Sync {
    /// Current time as ISO-8601 text.
    fn now_iso8601(&self) -> String;
}
