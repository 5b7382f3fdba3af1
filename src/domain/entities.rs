//! Domain entities. Pure data structures for the core business.
//!
//! No UI/IO types here — adapters map into these.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// MIME type of every term sheet (Word .docx).
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Answer object recorded by the survey widgets for one question.
/// `value` is absent until the user has interacted with the question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAnswer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl RawAnswer {
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            label: None,
            value: Some(value.into()),
        }
    }
}

/// Raw survey state: question id -> answer object.
pub type SurveyData = BTreeMap<String, RawAnswer>;

/// One completed survey response. Built once by the normalizer, then only read.
///
/// Serializes flat: `{"timestamp": .., "id": .., "q1": .., ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub timestamp: String,
    /// User identifier (display name of the logged-in user).
    pub id: String,
    #[serde(flatten)]
    pub answers: BTreeMap<String, String>,
}

impl ResponseRecord {
    pub fn answer(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }
}

/// Binary discriminant of a multiple-choice option ("A. ..." / "B. ...").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    A,
    B,
}

impl Choice {
    pub const ALL: [Choice; 2] = [Choice::A, Choice::B];

    pub fn as_char(self) -> char {
        match self {
            Choice::A => 'A',
            Choice::B => 'B',
        }
    }
}

/// The five incentive tools a response can be classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LtipTool {
    RestrictedShare,
    ShareOption,
    PhantomShare,
    ShareAppreciationRight,
    PerformanceShare,
}

impl LtipTool {
    pub const ALL: [LtipTool; 5] = [
        LtipTool::RestrictedShare,
        LtipTool::ShareOption,
        LtipTool::PhantomShare,
        LtipTool::ShareAppreciationRight,
        LtipTool::PerformanceShare,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LtipTool::RestrictedShare => "Restricted Share",
            LtipTool::ShareOption => "Share Option",
            LtipTool::PhantomShare => "Phantom Share",
            LtipTool::ShareAppreciationRight => "Share Appreciation Right",
            LtipTool::PerformanceShare => "Performance Share",
        }
    }

    /// Term sheet file name, e.g. `Share_Option.docx`.
    pub fn term_sheet_file_name(self) -> String {
        format!("{}.docx", self.name().replace(' ', "_"))
    }
}

impl fmt::Display for LtipTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of classifying a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Tool(LtipTool),
    Undetermined,
}

impl Classification {
    pub const UNDETERMINED: &'static str = "undetermined";

    pub fn tool(self) -> Option<LtipTool> {
        match self {
            Classification::Tool(t) => Some(t),
            Classification::Undetermined => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Classification::Tool(t) => t.name(),
            Classification::Undetermined => Self::UNDETERMINED,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A downloadable term sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// Outcome of looking up the term sheet for a classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentLookup {
    Found(Document),
    NotFound,
    /// Classification was undetermined; nothing to look up.
    NotApplicable,
}

/// Authenticated survey user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub name: String,
}
