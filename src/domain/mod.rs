//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod classifier;
pub mod entities;
pub mod errors;
pub mod normalizer;
pub mod survey;

pub use classifier::{CategoryTable, TableError, classify, classify_code};
pub use entities::{
    Choice, Classification, DOCX_MIME, Document, DocumentLookup, LtipTool, RawAnswer,
    ResponseRecord, SurveyData, User,
};
pub use errors::DomainError;
pub use normalizer::{normalize, normalize_now};
pub use survey::{Question, QuestionKind, SurveyPages};
