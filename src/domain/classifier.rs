//! Response classification: four A/B answers -> LTIP tool.
//!
//! The code is the first letter of the answers to q1..q4, in that order.
//! Absent or empty answers are skipped, so a partial response yields a
//! shorter code that matches nothing.

use super::entities::{Choice, Classification, LtipTool, ResponseRecord};
use std::collections::HashMap;
use thiserror::Error;

/// Questions contributing to the classification code, in code order.
pub const CLASSIFIED_QUESTIONS: [&str; 4] = ["q1", "q2", "q3", "q4"];

/// Length of a complete classification code.
pub const CODE_LEN: usize = CLASSIFIED_QUESTIONS.len();

/// Tool -> codes that select it.
const TABLE: &[(LtipTool, &[&str])] = &[
    (LtipTool::RestrictedShare, &["AAAA", "ABAA"]),
    (LtipTool::ShareOption, &["AAAB", "ABAB", "BAAB", "BBAB"]),
    (LtipTool::PhantomShare, &["AABA", "ABBA", "BABA", "BBBA"]),
    (
        LtipTool::ShareAppreciationRight,
        &["AABB", "ABBB", "BABB", "BBBB"],
    ),
    (LtipTool::PerformanceShare, &["BAAA", "BBAA"]),
];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TableError {
    #[error("code {code} is claimed by both {first} and {second}")]
    Overlap {
        code: String,
        first: LtipTool,
        second: LtipTool,
    },

    #[error("code {0} is not mapped to any tool")]
    Uncovered(String),

    #[error("code {0} is not a 4-letter A/B code")]
    Malformed(String),

    #[error("{0} owns no code")]
    Unused(LtipTool),
}

/// Static category table.
pub struct CategoryTable;

impl CategoryTable {
    /// Check that the table partitions every A/B code of length 4:
    /// each code well-formed, no code owned twice, no code left out,
    /// and every tool reachable by at least one code.
    pub fn verify() -> Result<(), TableError> {
        Self::verify_entries(TABLE)
    }

    fn verify_entries(entries: &[(LtipTool, &[&str])]) -> Result<(), TableError> {
        let mut owner: HashMap<&str, LtipTool> = HashMap::new();
        for &(tool, codes) in entries {
            for &code in codes {
                let well_formed = code.len() == CODE_LEN
                    && code.chars().all(|c| Choice::ALL.iter().any(|ch| ch.as_char() == c));
                if !well_formed {
                    return Err(TableError::Malformed(code.to_string()));
                }
                if let Some(&first) = owner.get(code) {
                    return Err(TableError::Overlap {
                        code: code.to_string(),
                        first,
                        second: tool,
                    });
                }
                owner.insert(code, tool);
            }
        }
        for code in all_codes() {
            if !owner.contains_key(code.as_str()) {
                return Err(TableError::Uncovered(code));
            }
        }
        if let Some(tool) = LtipTool::ALL
            .into_iter()
            .find(|tool| !owner.values().any(|owned| owned == tool))
        {
            return Err(TableError::Unused(tool));
        }
        Ok(())
    }
}

/// Every A/B code of length 4, in lexicographic order.
pub fn all_codes() -> Vec<String> {
    (0..1u32 << CODE_LEN)
        .map(|bits| {
            (0..CODE_LEN)
                .rev()
                .map(|i| {
                    if bits & (1 << i) == 0 {
                        Choice::A.as_char()
                    } else {
                        Choice::B.as_char()
                    }
                })
                .collect()
        })
        .collect()
}

/// Build the classification code from a record. Empty answers count as missing.
pub fn code_for(record: &ResponseRecord) -> String {
    CLASSIFIED_QUESTIONS
        .iter()
        .filter_map(|q| record.answer(q).and_then(|v| v.chars().next()))
        .collect()
}

/// Look up a raw code in the table.
pub fn classify_code(code: &str) -> Classification {
    TABLE
        .iter()
        .find(|(_, codes)| codes.contains(&code))
        .map(|&(tool, _)| Classification::Tool(tool))
        .unwrap_or(Classification::Undetermined)
}

/// Classify a normalized response.
pub fn classify(record: &ResponseRecord) -> Classification {
    classify_code(&code_for(record))
}
