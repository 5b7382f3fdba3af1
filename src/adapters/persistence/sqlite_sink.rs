//! SQLite-backed response sink via libsql. Implements ResponseSink.
//!
//! One `survey` table in data/survey.db. Answers are stored as a JSON object
//! next to the timestamp and user id; rows are only ever inserted.

use crate::domain::{DomainError, ResponseRecord};
use crate::ports::ResponseSink;
use libsql::{Database, params};
use std::path::{Path, PathBuf};
use tracing::info;

const SURVEY_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS survey (
    rowid INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp TEXT NOT NULL,
    id TEXT NOT NULL,
    answers_json TEXT NOT NULL
)"#;

pub struct SqliteSink {
    db: Database,
    db_path: PathBuf,
}

impl SqliteSink {
    /// Connect to (or create) `survey.db` under `base_dir` and ensure the schema exists.
    pub async fn connect(base_dir: impl AsRef<Path>) -> Result<Self, DomainError> {
        let base = base_dir.as_ref();
        std::fs::create_dir_all(base).map_err(|e| DomainError::Repo(e.to_string()))?;
        let db_path = base.join("survey.db");
        let path_str = db_path.to_string_lossy();
        let db = libsql::Builder::new_local(path_str.as_ref())
            .build()
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        let conn = db.connect().map_err(|e| DomainError::Repo(e.to_string()))?;

        // PRAGMA returns a row; consume it (execute fails when rows are returned).
        let mut wal_rows = conn
            .query("PRAGMA journal_mode=WAL", ())
            .await
            .map_err(|e| DomainError::Repo(format!("WAL pragma failed: {}", e)))?;
        while wal_rows
            .next()
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?
            .is_some()
        {}

        conn.execute(SURVEY_TABLE, ())
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;

        info!(path = %db_path.display(), "SQLite response store ready");

        Ok(Self { db, db_path })
    }
}

#[async_trait::async_trait]
impl ResponseSink for SqliteSink {
    async fn insert(&self, record: &ResponseRecord) -> Result<(), DomainError> {
        let answers_json =
            serde_json::to_string(&record.answers).map_err(|e| DomainError::Repo(e.to_string()))?;
        let conn = self
            .db
            .connect()
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        conn.execute(
            "INSERT INTO survey (timestamp, id, answers_json) VALUES (?1, ?2, ?3)",
            params![record.timestamp.as_str(), record.id.as_str(), answers_json],
        )
        .await
        .map_err(|e| DomainError::Repo(e.to_string()))?;
        info!(
            path = %self.db_path.display(),
            user = %record.id,
            answers = record.answers.len(),
            "response recorded"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn record(user: &str) -> ResponseRecord {
        let mut answers = BTreeMap::new();
        answers.insert("q1".to_string(), "A. Retention-Focused".to_string());
        answers.insert("q4".to_string(), "B. No".to_string());
        ResponseRecord {
            timestamp: "2024-03-01T09:30:00.000000".to_string(),
            id: user.to_string(),
            answers,
        }
    }

    /// All stored responses, oldest first.
    async fn stored(sink: &SqliteSink) -> Vec<ResponseRecord> {
        let conn = sink.db.connect().unwrap();
        let mut rows = conn
            .query(
                "SELECT timestamp, id, answers_json FROM survey ORDER BY rowid",
                (),
            )
            .await
            .unwrap();
        let mut records = Vec::new();
        while let Some(row) = rows.next().await.unwrap() {
            let answers_json: String = row.get(2).unwrap();
            records.push(ResponseRecord {
                timestamp: row.get(0).unwrap(),
                id: row.get(1).unwrap(),
                answers: serde_json::from_str(&answers_json).unwrap(),
            });
        }
        records
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let dir = tempfile::tempdir().unwrap();
        let sink = SqliteSink::connect(dir.path()).await.unwrap();
        assert!(dir.path().join("survey.db").exists());

        sink.insert(&record("Jane")).await.unwrap();
        sink.insert(&record("John")).await.unwrap();

        let stored = stored(&sink).await;
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0], record("Jane"));
        assert_eq!(stored[1].id, "John");
    }

    #[tokio::test]
    async fn test_reconnect_keeps_rows() {
        let dir = tempfile::tempdir().unwrap();
        {
            let sink = SqliteSink::connect(dir.path()).await.unwrap();
            sink.insert(&record("Jane")).await.unwrap();
        }
        let sink = SqliteSink::connect(dir.path()).await.unwrap();
        assert_eq!(stored(&sink).await.len(), 1);
    }
}
