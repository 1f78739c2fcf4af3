// ABOUTME: Qdrant REST client used by the storage and analyzer agents
// ABOUTME: Collection management, point upsert, filtered scroll, and search

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use pacta_core::constants::{SCROLL_PAGE_SIZE, VECTOR_SIZE};
use pacta_core::QdrantConfig;

use crate::types::{CollectionInfo, PointStruct, ScoredPoint, ScrollPoint};

#[derive(Error, Debug)]
pub enum QdrantError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Qdrant returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Failed to decode Qdrant response: {0}")]
    Decode(String),
}

pub type QdrantResult<T> = Result<T, QdrantError>;

/// Envelope every Qdrant REST response uses.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    result: T,
}

#[derive(Debug, Deserialize)]
struct ExistsResult {
    exists: bool,
}

#[derive(Debug, Deserialize)]
struct ScrollResult {
    points: Vec<ScrollPoint>,
    #[serde(default)]
    next_page_offset: Option<serde_json::Value>,
}

pub struct QdrantClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    collection: String,
}

impl QdrantClient {
    pub fn new(config: QdrantConfig) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client");

        QdrantClient {
            http,
            base_url: config.url,
            api_key: config.api_key,
            collection: config.collection,
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(key) = &self.api_key {
            builder = builder.header("api-key", key);
        }
        builder
    }

    async fn decode<T: for<'de> Deserialize<'de>>(
        response: reqwest::Response,
    ) -> QdrantResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Qdrant API error: {} - {}", status, body);
            return Err(QdrantError::Api {
                status: status.as_u16(),
                body,
            });
        }
        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| QdrantError::Decode(e.to_string()))?;
        Ok(envelope.result)
    }

    pub async fn collection_exists(&self) -> QdrantResult<bool> {
        let response = self
            .request(
                reqwest::Method::GET,
                &format!("/collections/{}/exists", self.collection),
            )
            .send()
            .await?;
        let result: ExistsResult = Self::decode(response).await?;
        Ok(result.exists)
    }

    /// Creates the collection (768-dim, cosine) when it does not exist yet.
    pub async fn ensure_collection(&self) -> QdrantResult<()> {
        if self.collection_exists().await? {
            info!(collection = %self.collection, "using existing collection");
            return Ok(());
        }

        info!(collection = %self.collection, "creating collection");
        let body = serde_json::json!({
            "vectors": { "size": VECTOR_SIZE, "distance": "Cosine" }
        });
        let response = self
            .request(
                reqwest::Method::PUT,
                &format!("/collections/{}", self.collection),
            )
            .json(&body)
            .send()
            .await?;
        Self::decode::<serde_json::Value>(response).await?;
        Ok(())
    }

    pub async fn collection_info(&self) -> QdrantResult<CollectionInfo> {
        let response = self
            .request(
                reqwest::Method::GET,
                &format!("/collections/{}", self.collection),
            )
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn upsert(&self, points: Vec<PointStruct>) -> QdrantResult<()> {
        info!(count = points.len(), collection = %self.collection, "upserting points");
        let body = serde_json::json!({ "points": points });
        let response = self
            .request(
                reqwest::Method::PUT,
                &format!("/collections/{}/points?wait=true", self.collection),
            )
            .json(&body)
            .send()
            .await?;
        Self::decode::<serde_json::Value>(response).await?;
        Ok(())
    }

    /// One page of a scroll. `offset` is the opaque cursor from the
    /// previous page.
    pub async fn scroll(
        &self,
        filter: Option<serde_json::Value>,
        limit: usize,
        offset: Option<serde_json::Value>,
    ) -> QdrantResult<(Vec<ScrollPoint>, Option<serde_json::Value>)> {
        let mut body = serde_json::json!({
            "limit": limit,
            "with_payload": true,
            "with_vector": false,
        });
        if let Some(filter) = filter {
            body["filter"] = filter;
        }
        if let Some(offset) = offset {
            body["offset"] = offset;
        }

        let response = self
            .request(
                reqwest::Method::POST,
                &format!("/collections/{}/points/scroll", self.collection),
            )
            .json(&body)
            .send()
            .await?;
        let result: ScrollResult = Self::decode(response).await?;
        Ok((result.points, result.next_page_offset))
    }

    /// Scrolls every page. Large documents span many chunks, so retrieval
    /// must paginate rather than trust a single page.
    pub async fn scroll_all(
        &self,
        filter: Option<serde_json::Value>,
    ) -> QdrantResult<Vec<ScrollPoint>> {
        let mut all_points = Vec::new();
        let mut offset = None;

        loop {
            let (points, next_offset) =
                self.scroll(filter.clone(), SCROLL_PAGE_SIZE, offset).await?;
            all_points.extend(points);
            match next_offset {
                Some(next) if !next.is_null() => offset = Some(next),
                _ => break,
            }
        }

        Ok(all_points)
    }

    pub async fn search(
        &self,
        vector: Vec<f32>,
        limit: usize,
        score_threshold: Option<f32>,
    ) -> QdrantResult<Vec<ScoredPoint>> {
        let mut body = serde_json::json!({
            "vector": vector,
            "limit": limit,
            "with_payload": true,
        });
        if let Some(threshold) = score_threshold {
            body["score_threshold"] = serde_json::json!(threshold);
        }

        let response = self
            .request(
                reqwest::Method::POST,
                &format!("/collections/{}/points/search", self.collection),
            )
            .json(&body)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Filter matching every chunk of one document.
    pub fn document_filter(document_id: &str) -> serde_json::Value {
        serde_json::json!({
            "must": [
                { "key": "document_id", "match": { "value": document_id } }
            ]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> QdrantClient {
        QdrantClient::new(QdrantConfig {
            url: server.uri(),
            api_key: Some("secret".into()),
            collection: "contracts".into(),
        })
    }

    #[tokio::test]
    async fn ensure_collection_creates_when_missing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/collections/contracts/exists"))
            .and(header("api-key", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "result": {"exists": false}, "status": "ok", "time": 0.0
            })))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/collections/contracts"))
            .and(body_partial_json(serde_json::json!({
                "vectors": {"size": 768, "distance": "Cosine"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "result": true, "status": "ok", "time": 0.0
            })))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).ensure_collection().await.unwrap();
    }

    #[tokio::test]
    async fn ensure_collection_skips_existing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/collections/contracts/exists"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "result": {"exists": true}, "status": "ok", "time": 0.0
            })))
            .mount(&server)
            .await;

        // No PUT mock mounted: a create attempt would fail the test.
        client_for(&server).ensure_collection().await.unwrap();
    }

    #[tokio::test]
    async fn scroll_all_follows_pagination_cursor() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/collections/contracts/points/scroll"))
            .and(body_partial_json(serde_json::json!({"offset": "cursor-1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "result": {
                    "points": [{"id": "p2", "payload": {"x": 2}}],
                    "next_page_offset": null
                },
                "status": "ok", "time": 0.0
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/collections/contracts/points/scroll"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "result": {
                    "points": [{"id": "p1", "payload": {"x": 1}}],
                    "next_page_offset": "cursor-1"
                },
                "status": "ok", "time": 0.0
            })))
            .mount(&server)
            .await;

        let points = client_for(&server).scroll_all(None).await.unwrap();
        assert_eq!(points.len(), 2);
    }

    #[tokio::test]
    async fn api_errors_carry_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/collections/contracts"))
            .respond_with(ResponseTemplate::new(404).set_body_string("collection not found"))
            .mount(&server)
            .await;

        let err = client_for(&server).collection_info().await.unwrap_err();
        match err {
            QdrantError::Api { status, body } => {
                assert_eq!(status, 404);
                assert!(body.contains("not found"));
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }
}
