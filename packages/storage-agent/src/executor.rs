// ABOUTME: A2A executor for the storage agent
// ABOUTME: Parses message parts, ingests PDFs or pasted text, replies with JSON

use async_trait::async_trait;
use base64::Engine;
use tracing::{info, warn};

use pacta_a2a::{
    A2aError, A2aResult, AgentExecutor, FileContent, Part, RequestContext, TaskUpdater,
};
use pacta_pdf::{extract_text, pdf_metadata, validate_pdf};

use crate::response::{should_store_text, Envelope};
use crate::store::{DocumentStore, StoreError, StoredDocument};

/// One decoded PDF attachment.
struct PdfAttachment {
    filename: String,
    content: Vec<u8>,
}

pub struct StorageExecutor {
    store: DocumentStore,
}

impl StorageExecutor {
    pub fn new(store: DocumentStore) -> Self {
        StorageExecutor { store }
    }

    /// Decodes file parts into PDF attachments. Non-PDF files and URI
    /// references are skipped with a warning, matching the ingest contract:
    /// only inline PDFs are processed.
    fn collect_attachments(parts: &[Part]) -> Vec<PdfAttachment> {
        let mut attachments = Vec::new();

        for part in parts {
            let Part::File { file } = part else {
                continue;
            };
            let FileContent {
                name, bytes, uri, ..
            } = file;

            if bytes.is_none() {
                if let Some(uri) = uri {
                    warn!(%uri, "file-by-reference not supported, skipping");
                }
                continue;
            }

            let filename = name
                .clone()
                .or_else(|| {
                    uri.as_deref()
                        .and_then(|u| u.rsplit('/').next())
                        .map(str::to_string)
                })
                .unwrap_or_else(|| "document.pdf".to_string());

            if !filename.to_lowercase().ends_with(".pdf") {
                warn!(%filename, "ignoring non-PDF attachment");
                continue;
            }

            let encoded = bytes.as_deref().unwrap_or_default();
            let content = match base64::engine::general_purpose::STANDARD.decode(encoded) {
                Ok(decoded) => decoded,
                Err(e) => {
                    warn!(%filename, error = %e, "attachment is not valid base64, skipping");
                    continue;
                }
            };

            if !validate_pdf(&content) {
                warn!(%filename, "attachment missing PDF signature, skipping");
                continue;
            }

            attachments.push(PdfAttachment { filename, content });
        }

        attachments
    }

    async fn ingest_pdfs(
        &self,
        attachments: Vec<PdfAttachment>,
        updater: &TaskUpdater,
    ) -> Result<Vec<StoredDocument>, Envelope> {
        let mut stored = Vec::new();

        for attachment in attachments {
            let metadata = pdf_metadata(&attachment.content)
                .map_err(|e| Envelope::error("store_pdf", "PdfError", e.to_string()))?;
            info!(
                filename = %attachment.filename,
                pages = metadata.num_pages,
                has_text = metadata.has_text,
                "processing PDF"
            );

            let text = extract_text(&attachment.content)
                .map_err(|e| Envelope::error("store_pdf", "PdfError", e.to_string()))?;

            updater
                .working(format!(
                    "Extracted {} characters from '{}', storing...",
                    text.chars().count(),
                    attachment.filename
                ))
                .await
                .ok();

            let document = self
                .store
                .store_document(&attachment.filename, &text)
                .await
                .map_err(|e| match e {
                    StoreError::EmptyDocument => {
                        Envelope::error("store_pdf", "EmptyDocument", e.to_string())
                    }
                    StoreError::Qdrant(inner) => {
                        Envelope::error("store_pdf", "QdrantError", inner.to_string())
                    }
                })?;
            stored.push(document);
        }

        Ok(stored)
    }

    async fn ingest_text(&self, user_text: &str) -> Result<StoredDocument, Envelope> {
        // Pasted analyses get a synthetic filename so they can be listed
        // and retrieved like any other document.
        let filename = format!("analysis-{}.txt", chrono::Utc::now().format("%Y%m%d%H%M%S"));
        self.store
            .store_document(&filename, user_text)
            .await
            .map_err(|e| Envelope::error("store_response", "StoreError", e.to_string()))
    }

    fn pdf_success_envelope(stored: &[StoredDocument]) -> Envelope {
        let documents: Vec<serde_json::Value> = stored
            .iter()
            .map(|d| {
                serde_json::json!({
                    "document_id": d.document_id,
                    "filename": d.filename,
                    "chunks_stored": d.chunks_stored,
                    "total_characters": d.total_characters,
                })
            })
            .collect();
        let chunks_total: usize = stored.iter().map(|d| d.chunks_stored).sum();
        let chars_total: usize = stored.iter().map(|d| d.total_characters).sum();
        let collection = stored
            .first()
            .map(|d| d.collection.clone())
            .unwrap_or_default();

        Envelope::success(
            "store_pdf",
            serde_json::json!({
                "documents": documents,
                "chunks_stored": chunks_total,
                "total_characters": chars_total,
                "collection": collection,
            }),
            format!(
                "Stored {} document(s) in {} chunk(s)",
                stored.len(),
                chunks_total
            ),
        )
    }

    async fn reply(&self, updater: &TaskUpdater, envelope: Envelope) -> A2aResult<()> {
        let json = envelope.to_json();
        updater
            .add_artifact(vec![Part::text(json.clone())], Some("result".to_string()))
            .await?;
        if envelope.status == "success" {
            updater.complete_with(json).await
        } else {
            updater.fail(json).await
        }
    }
}

#[async_trait]
impl AgentExecutor for StorageExecutor {
    async fn execute(&self, context: RequestContext, updater: TaskUpdater) -> A2aResult<()> {
        info!(task_id = %context.task_id, "storage agent request");
        updater.start_work().await?;

        let user_text = context.message.text_content();
        let attachments = Self::collect_attachments(&context.message.parts);

        if !attachments.is_empty() {
            updater
                .working(format!("Processing {} PDF attachment(s)...", attachments.len()))
                .await?;

            match self.ingest_pdfs(attachments, &updater).await {
                Ok(stored) => {
                    return self.reply(&updater, Self::pdf_success_envelope(&stored)).await
                }
                Err(envelope) => return self.reply(&updater, envelope).await,
            }
        }

        if should_store_text(&user_text) {
            updater.working("Storing analysis text...").await?;
            match self.ingest_text(&user_text).await {
                Ok(stored) => {
                    let envelope = Envelope::success(
                        "store_response",
                        serde_json::json!({
                            "document_id": stored.document_id,
                            "filename": stored.filename,
                            "chunks_stored": stored.chunks_stored,
                            "total_characters": stored.total_characters,
                            "collection": stored.collection,
                        }),
                        "Analysis text stored",
                    );
                    return self.reply(&updater, envelope).await;
                }
                Err(envelope) => return self.reply(&updater, envelope).await,
            }
        }

        let envelope = Envelope::error(
            "store",
            "NoInput",
            "No PDF attachment or storable text received. Attach a PDF or paste the analysis to store.",
        );
        self.reply(&updater, envelope).await?;
        Err(A2aError::Executor("no storable input".into()))
    }
}
