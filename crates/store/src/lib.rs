//! File-backed document store: one JSON file per document under
//! `<data_dir>/documents/`, addressed by document id.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

use askdoc_core::{DocId, DocumentSummary, QueryRecord, StoredDocument};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document not found: {0}")]
    NotFound(DocId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub struct DocumentStore {
    documents_dir: PathBuf,
    /// Serializes read-modify-write history appends so concurrent answers
    /// to the same document never lose entries.
    append_lock: Mutex<()>,
}

impl DocumentStore {
    pub async fn new(data_dir: &Path) -> Result<Self, StoreError> {
        let documents_dir = data_dir.join("documents");
        tokio::fs::create_dir_all(&documents_dir).await?;
        Ok(Self {
            documents_dir,
            append_lock: Mutex::new(()),
        })
    }

    fn document_path(&self, id: DocId) -> PathBuf {
        self.documents_dir.join(format!("{id}.json"))
    }

    /// Persist a new document with an empty query history.
    pub async fn create(
        &self,
        title: &str,
        text_content: &str,
    ) -> Result<StoredDocument, StoreError> {
        let doc = StoredDocument::new(title, text_content);
        self.write_document(&doc).await?;
        info!("Created document {} ('{}', {} chars)", doc.id, doc.title, doc.text_content.len());
        Ok(doc)
    }

    pub async fn get(&self, id: DocId) -> Result<StoredDocument, StoreError> {
        let path = self.document_path(id);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(id));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// List every stored document as an id + title pair.
    pub async fn list(&self) -> Result<Vec<DocumentSummary>, StoreError> {
        let mut entries = tokio::fs::read_dir(&self.documents_dir).await?;
        let mut summaries = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let bytes = tokio::fs::read(&path).await?;
            let doc: StoredDocument = serde_json::from_slice(&bytes)?;
            summaries.push(DocumentSummary {
                id: doc.id,
                title: doc.title,
            });
        }
        summaries.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(summaries)
    }

    pub async fn history(&self, id: DocId) -> Result<Vec<QueryRecord>, StoreError> {
        Ok(self.get(id).await?.query_history)
    }

    /// Append one record to a document's history. Entries are only ever
    /// appended, in arrival order.
    pub async fn append_history(&self, id: DocId, record: QueryRecord) -> Result<(), StoreError> {
        let _guard = self.append_lock.lock().await;
        let mut doc = self.get(id).await?;
        doc.query_history.push(record);
        self.write_document(&doc).await
    }

    async fn write_document(&self, doc: &StoredDocument) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(doc)?;
        tokio::fs::write(self.document_path(doc.id), json).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    async fn store() -> (tempfile::TempDir, DocumentStore) {
        let tmp = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(tmp.path()).await.unwrap();
        (tmp, store)
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let (_tmp, store) = store().await;
        let created = store.create("a.txt, b.pdf", "File: a.txt\nalpha\n\n").await.unwrap();
        let fetched = store.get(created.id).await.unwrap();
        assert_eq!(fetched.title, "a.txt, b.pdf");
        assert_eq!(fetched.text_content, created.text_content);
        assert!(fetched.query_history.is_empty());
    }

    #[tokio::test]
    async fn missing_document_is_not_found() {
        let (_tmp, store) = store().await;
        let id = Uuid::new_v4();
        let err = store.get(id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn list_returns_created_documents() {
        let (_tmp, store) = store().await;
        store.create("beta.txt", "b").await.unwrap();
        store.create("alpha.txt", "a").await.unwrap();
        let list = store.list().await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].title, "alpha.txt");
        assert_eq!(list[1].title, "beta.txt");
    }

    #[tokio::test]
    async fn history_appends_preserve_order_and_grow_by_one() {
        let (_tmp, store) = store().await;
        let doc = store.create("a.txt", "text").await.unwrap();

        for i in 0..3 {
            store
                .append_history(doc.id, QueryRecord::new(format!("q{i}"), format!("a{i}"), "ctx"))
                .await
                .unwrap();
            let history = store.history(doc.id).await.unwrap();
            assert_eq!(history.len(), i + 1);
        }

        let history = store.history(doc.id).await.unwrap();
        let questions: Vec<&str> = history.iter().map(|r| r.question.as_str()).collect();
        assert_eq!(questions, ["q0", "q1", "q2"]);
    }

    #[tokio::test]
    async fn append_to_missing_document_fails() {
        let (_tmp, store) = store().await;
        let err = store
            .append_history(Uuid::new_v4(), QueryRecord::new("q", "a", "c"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
