//! Blob storage adapter (`/storage/v1`).

use async_trait::async_trait;
use reqwest::Method;

use super::wire::error_message;
use super::SupabaseClient;
use crate::infrastructure::ports::{MediaStorePort, UploadError};

/// Object uploads to public buckets.
pub struct SupabaseMediaStore {
    client: SupabaseClient,
}

impl SupabaseMediaStore {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MediaStorePort for SupabaseMediaStore {
    async fn put_object(
        &self,
        bucket: &str,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), UploadError> {
        tracing::debug!(bucket, name, size = bytes.len(), "Uploading object");

        let response = self
            .client
            .authorized(Method::POST, &format!("/storage/v1/object/{bucket}/{name}"))
            .await?
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await
            .map_err(UploadError::network)?;

        if !response.status().is_success() {
            return Err(UploadError::Storage(error_message(response).await));
        }
        Ok(())
    }

    fn public_url(&self, bucket: &str, name: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.client.base_url(),
            bucket,
            name
        )
    }
}
