//! Submission use case: normalize -> validate -> persist -> classify -> fetch term sheet.

use crate::domain::classifier::CLASSIFIED_QUESTIONS;
use crate::domain::{
    Classification, DocumentLookup, DomainError, ResponseRecord, SurveyData, classify,
    normalize_now,
};
use crate::ports::{Clock, DocumentStore, ResponseSink};
use std::sync::Arc;
use tracing::info;

/// Result of submitting a survey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Some classified questions have no answer; nothing was stored.
    Incomplete { missing: Vec<&'static str> },
    Submitted(Submission),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub record: ResponseRecord,
    pub classification: Classification,
    pub document: DocumentLookup,
}

pub struct SurveyService {
    sink: Arc<dyn ResponseSink>,
    documents: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
}

impl SurveyService {
    pub fn new(
        sink: Arc<dyn ResponseSink>,
        documents: Arc<dyn DocumentStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sink,
            documents,
            clock,
        }
    }

    /// Submit a finished survey for `user_id`. The record is persisted only
    /// when all of q1..q4 carry a non-empty answer.
    pub async fn submit(
        &self,
        data: &SurveyData,
        user_id: &str,
    ) -> Result<SubmitOutcome, DomainError> {
        let record = normalize_now(data, user_id, self.clock.as_ref());

        let missing: Vec<&'static str> = CLASSIFIED_QUESTIONS
            .iter()
            .copied()
            .filter(|q| record.answer(q).is_none_or(str::is_empty))
            .collect();
        if !missing.is_empty() {
            info!(user = %user_id, ?missing, "submission incomplete");
            return Ok(SubmitOutcome::Incomplete { missing });
        }

        self.sink.insert(&record).await?;

        let classification = classify(&record);
        let document = match classification.tool() {
            Some(tool) => match self.documents.fetch(tool).await? {
                Some(doc) => DocumentLookup::Found(doc),
                None => DocumentLookup::NotFound,
            },
            None => DocumentLookup::NotApplicable,
        };
        info!(
            user = %user_id,
            classification = %classification,
            term_sheet = matches!(document, DocumentLookup::Found(_)),
            "survey submitted"
        );

        Ok(SubmitOutcome::Submitted(Submission {
            record,
            classification,
            document,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DOCX_MIME, Document, LtipTool, RawAnswer};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemorySink {
        rows: Mutex<Vec<ResponseRecord>>,
    }

    #[async_trait::async_trait]
    impl ResponseSink for MemorySink {
        async fn insert(&self, record: &ResponseRecord) -> Result<(), DomainError> {
            self.rows.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    struct FailingSink;

    #[async_trait::async_trait]
    impl ResponseSink for FailingSink {
        async fn insert(&self, _record: &ResponseRecord) -> Result<(), DomainError> {
            Err(DomainError::Repo("offline".into()))
        }
    }

    /// Has a term sheet for Restricted Share only.
    struct OneSheet;

    #[async_trait::async_trait]
    impl DocumentStore for OneSheet {
        async fn fetch(&self, tool: LtipTool) -> Result<Option<Document>, DomainError> {
            Ok((tool == LtipTool::RestrictedShare).then(|| Document {
                file_name: tool.term_sheet_file_name(),
                mime: DOCX_MIME,
                bytes: b"sheet".to_vec(),
            }))
        }
    }

    struct FixedClock;

    impl Clock for FixedClock {
        fn now_iso8601(&self) -> String {
            "2024-03-01T09:30:00.000000".into()
        }
    }

    fn survey(answers: &[(&str, &str)]) -> SurveyData {
        answers
            .iter()
            .map(|(q, v)| (q.to_string(), RawAnswer::with_value(*v)))
            .collect()
    }

    fn service(sink: Arc<dyn ResponseSink>) -> SurveyService {
        SurveyService::new(sink, Arc::new(OneSheet), Arc::new(FixedClock))
    }

    #[tokio::test]
    async fn test_submit_found_sheet() {
        let sink = Arc::new(MemorySink::default());
        let svc = service(sink.clone());
        let data = survey(&[
            ("q1", "A. Retention-Focused"),
            ("q2", "A. Retention-Focused"),
            ("q3", "A. Yes"),
            ("q4", "A. Yes"),
        ]);

        let outcome = svc.submit(&data, "Jane Doe").await.unwrap();
        let SubmitOutcome::Submitted(sub) = outcome else {
            panic!("expected submission");
        };
        assert_eq!(
            sub.classification,
            Classification::Tool(LtipTool::RestrictedShare)
        );
        assert!(matches!(sub.document, DocumentLookup::Found(ref d) if d.file_name == "Restricted_Share.docx"));
        let rows = sink.rows.lock().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "Jane Doe");
        assert_eq!(rows[0].timestamp, "2024-03-01T09:30:00.000000");
    }

    #[tokio::test]
    async fn test_submit_missing_sheet() {
        let sink = Arc::new(MemorySink::default());
        let svc = service(sink.clone());
        let data = survey(&[
            ("q1", "B. Performance-Focused"),
            ("q2", "B. Performance-Focused"),
            ("q3", "B. No"),
            ("q3_1", "Planning an IPO in 2027"),
            ("q4", "B. No"),
        ]);

        let SubmitOutcome::Submitted(sub) = svc.submit(&data, "Jane Doe").await.unwrap() else {
            panic!("expected submission");
        };
        assert_eq!(
            sub.classification,
            Classification::Tool(LtipTool::ShareAppreciationRight)
        );
        assert_eq!(sub.document, DocumentLookup::NotFound);
        assert_eq!(sub.record.answer("q3_1"), Some("Planning an IPO in 2027"));
    }

    #[tokio::test]
    async fn test_submit_unusual_answer_is_undetermined() {
        let sink = Arc::new(MemorySink::default());
        let svc = service(sink.clone());
        let data = survey(&[("q1", "A"), ("q2", "A"), ("q3", "A"), ("q4", "Maybe")]);

        let SubmitOutcome::Submitted(sub) = svc.submit(&data, "Jane Doe").await.unwrap() else {
            panic!("expected submission");
        };
        assert_eq!(sub.classification, Classification::Undetermined);
        assert_eq!(sub.document, DocumentLookup::NotApplicable);
        assert_eq!(sink.rows.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_incomplete_not_persisted() {
        let sink = Arc::new(MemorySink::default());
        let svc = service(sink.clone());
        let mut data = survey(&[
            ("q1", "A. Retention-Focused"),
            ("q2", ""),
            ("q3", "A. Yes"),
        ]);
        data.insert("q4".into(), RawAnswer::default());

        let outcome = svc.submit(&data, "Jane Doe").await.unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Incomplete {
                missing: vec!["q2", "q4"]
            }
        );
        assert!(sink.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sink_failure_propagates() {
        let svc = service(Arc::new(FailingSink));
        let data = survey(&[("q1", "A"), ("q2", "A"), ("q3", "A"), ("q4", "A")]);
        let err = svc.submit(&data, "Jane Doe").await.unwrap_err();
        assert!(matches!(err, DomainError::Repo(_)));
    }
}
