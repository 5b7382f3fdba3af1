//! Implements DocumentStore over a directory of `.docx` term sheets.
//! One file per tool: `<dir>/<Tool_Name>.docx`.

use crate::domain::{DOCX_MIME, Document, DomainError, LtipTool};
use crate::ports::DocumentStore;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

pub struct FsDocumentStore {
    base_dir: PathBuf,
}

impl FsDocumentStore {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    fn sheet_path(&self, tool: LtipTool) -> PathBuf {
        self.base_dir.join(tool.term_sheet_file_name())
    }
}

#[async_trait::async_trait]
impl DocumentStore for FsDocumentStore {
    async fn fetch(&self, tool: LtipTool) -> Result<Option<Document>, DomainError> {
        let path = self.sheet_path(tool);
        match fs::read(&path).await {
            Ok(bytes) => {
                debug!(path = %path.display(), size = bytes.len(), "term sheet loaded");
                Ok(Some(Document {
                    file_name: tool.term_sheet_file_name(),
                    mime: DOCX_MIME,
                    bytes,
                }))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), %tool, "term sheet not found");
                Ok(None)
            }
            Err(e) => Err(DomainError::Documents(format!("{}: {}", path.display(), e))),
        }
    }
}

/// Write a document into `dest_dir` (created if missing). Returns the written path.
pub async fn save_download(doc: &Document, dest_dir: &Path) -> Result<PathBuf, DomainError> {
    fs::create_dir_all(dest_dir)
        .await
        .map_err(|e| DomainError::Download(e.to_string()))?;
    let path = dest_dir.join(&doc.file_name);
    fs::write(&path, &doc.bytes)
        .await
        .map_err(|e| DomainError::Download(format!("{}: {}", path.display(), e)))?;
    info!(path = %path.display(), size = doc.bytes.len(), "term sheet saved");
    Ok(path)
}
