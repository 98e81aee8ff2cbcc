//! HTTP client for the recalls backend API
//!
//! The backend exposes three resources (recalls, makes, models) with
//! paginated GET, chunked PATCH upserts and keyed DELETE. Every request
//! carries correlation headers so calls can be traced across services.
//! Any 4xx/5xx response is treated the same as a transport failure.

use rand::RngCore;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::app::models::{MakeRecord, ModelRecord, RecallRecord};
use crate::config::Config;
use crate::constants::{
    API_KEY_HEADER, CALLER_NAME_HEADER, EXCLUSIVE_START_KEY_PARAM, PARENT_REQUEST_ID_HEADER,
    PATCH_PAGE_SIZE, REQUEST_ID_BYTES,
};
use crate::{Error, Result};

/// Remote recall store operations used by the data-update pipeline.
///
/// The pipeline is generic over this trait so tests can substitute an
/// in-memory double for the HTTP client.
#[allow(async_fn_in_trait)]
pub trait RecallsApi {
    async fn get_all_recalls(&self) -> Result<Vec<RecallRecord>>;
    async fn get_all_makes(&self) -> Result<Vec<MakeRecord>>;
    async fn get_all_models(&self) -> Result<Vec<ModelRecord>>;

    async fn update_recalls(&self, recalls: &[RecallRecord]) -> Result<()>;
    async fn update_makes(&self, makes: &[MakeRecord]) -> Result<()>;
    async fn update_models(&self, models: &[ModelRecord]) -> Result<()>;

    async fn delete_recalls(&self, keys: &[String]) -> Result<()>;
    async fn delete_makes(&self, keys: &[String]) -> Result<()>;
    async fn delete_models(&self, keys: &[String]) -> Result<()>;
}

/// One page of a paginated listing from the backend
#[derive(Debug, serde::Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(rename = "lastEvaluatedKey")]
    pub last_evaluated_key: Option<String>,
}

/// HTTP implementation of [`RecallsApi`]
#[derive(Debug, Clone)]
pub struct RecallsApiClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    caller_name: String,
}

impl RecallsApiClient {
    /// Create a client from the run configuration
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: config.backend_base_url.trim_end_matches('/').to_string(),
            api_key: config.backend_api_key.clone(),
            caller_name: config.caller_name.clone(),
        }
    }

    fn resource_url(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource)
    }

    /// Attach the correlation (and optional API key) headers
    fn with_headers(&self, builder: RequestBuilder) -> RequestBuilder {
        let mut builder = builder
            .header(PARENT_REQUEST_ID_HEADER, generate_request_id())
            .header(CALLER_NAME_HEADER, &self.caller_name);
        if let Some(key) = &self.api_key {
            builder = builder.header(API_KEY_HEADER, key);
        }
        builder
    }

    /// Fetch every page of a resource listing, following continuation tokens
    async fn get_all<T: DeserializeOwned>(&self, resource: &str) -> Result<Vec<T>> {
        let url = self.resource_url(resource);
        let operation = format!("GET /{}", resource);
        let mut items = Vec::new();
        let mut start_key: Option<String> = None;

        loop {
            let mut request = self.with_headers(self.client.get(&url));
            if let Some(key) = &start_key {
                request = request.query(&[(EXCLUSIVE_START_KEY_PARAM, key)]);
            }

            let response = request
                .send()
                .await
                .and_then(|response| response.error_for_status())
                .map_err(|e| Error::api_transport(operation.clone(), e))?;
            let page: Page<T> = response
                .json()
                .await
                .map_err(|e| Error::api_transport(operation.clone(), e))?;

            items.extend(page.items);

            match page.last_evaluated_key {
                Some(key) => {
                    debug!(
                        "{} returned a continuation token, requesting the next page",
                        operation
                    );
                    start_key = Some(key);
                }
                None => break,
            }
        }

        info!("{} returned {} items", operation, items.len());
        Ok(items)
    }

    /// Upsert a payload in page-sized chunks, strictly sequentially.
    /// The first failed chunk aborts the remaining ones.
    async fn patch_chunked<T: Serialize>(&self, resource: &str, items: &[T]) -> Result<()> {
        let operation = format!("PATCH /{}", resource);
        if items.is_empty() {
            info!("{} - payload contains no items, skipping request", operation);
            return Ok(());
        }

        let url = self.resource_url(resource);
        let chunks: Vec<&[T]> = payload_chunks(items).collect();
        let chunk_count = chunks.len();

        for (index, chunk) in chunks.into_iter().enumerate() {
            debug!(
                "{} - submitting chunk {}/{} with {} items",
                operation,
                index + 1,
                chunk_count,
                chunk.len()
            );
            self.with_headers(self.client.patch(&url))
                .json(chunk)
                .send()
                .await
                .and_then(|response| response.error_for_status())
                .map_err(|e| Error::api_transport(operation.clone(), e))?;
        }

        info!(
            "{} submitted {} items in {} requests",
            operation,
            items.len(),
            chunk_count
        );
        Ok(())
    }

    /// Delete entities by primary key
    async fn delete_keys(&self, resource: &str, keys: &[String]) -> Result<()> {
        let operation = format!("DELETE /{}", resource);
        if keys.is_empty() {
            info!("{} - payload contains no keys, skipping request", operation);
            return Ok(());
        }

        self.with_headers(self.client.delete(self.resource_url(resource)))
            .json(keys)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| Error::api_transport(operation.clone(), e))?;

        info!("{} deleted {} entities", operation, keys.len());
        Ok(())
    }
}

impl RecallsApi for RecallsApiClient {
    async fn get_all_recalls(&self) -> Result<Vec<RecallRecord>> {
        self.get_all("recalls").await
    }

    async fn get_all_makes(&self) -> Result<Vec<MakeRecord>> {
        self.get_all("makes").await
    }

    async fn get_all_models(&self) -> Result<Vec<ModelRecord>> {
        self.get_all("models").await
    }

    async fn update_recalls(&self, recalls: &[RecallRecord]) -> Result<()> {
        self.patch_chunked("recalls", recalls).await
    }

    async fn update_makes(&self, makes: &[MakeRecord]) -> Result<()> {
        self.patch_chunked("makes", makes).await
    }

    async fn update_models(&self, models: &[ModelRecord]) -> Result<()> {
        self.patch_chunked("models", models).await
    }

    async fn delete_recalls(&self, keys: &[String]) -> Result<()> {
        self.delete_keys("recalls", keys).await
    }

    async fn delete_makes(&self, keys: &[String]) -> Result<()> {
        self.delete_keys("makes", keys).await
    }

    async fn delete_models(&self, keys: &[String]) -> Result<()> {
        self.delete_keys("models", keys).await
    }
}

/// Split a payload into the page-sized chunks submitted per PATCH request
pub fn payload_chunks<T>(items: &[T]) -> impl Iterator<Item = &[T]> {
    items.chunks(PATCH_PAGE_SIZE)
}

/// Generate the hex-encoded random identifier for the correlation header
fn generate_request_id() -> String {
    let mut bytes = [0u8; REQUEST_ID_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|byte| format!("{:02x}", byte)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_chunking() {
        let items: Vec<u32> = (0..1001).collect();
        let sizes: Vec<usize> = payload_chunks(&items).map(|chunk| chunk.len()).collect();
        assert_eq!(sizes, vec![500, 500, 1]);

        let items: Vec<u32> = (0..500).collect();
        assert_eq!(payload_chunks(&items).count(), 1);
    }

    #[test]
    fn test_request_id_is_hex_encoded() {
        let id = generate_request_id();
        assert_eq!(id.len(), REQUEST_ID_BYTES * 2);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_page_deserializes_continuation_token() {
        let page: Page<String> =
            serde_json::from_str(r#"{"items": ["a", "b"], "lastEvaluatedKey": "next"}"#).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.last_evaluated_key.as_deref(), Some("next"));

        let page: Page<String> = serde_json::from_str(r#"{"items": []}"#).unwrap();
        assert!(page.last_evaluated_key.is_none());
    }
}
