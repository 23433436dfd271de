//! Row store adapter (PostgREST-compatible `/rest/v1`).

use async_trait::async_trait;
use pineat_domain::{Location, LocationId, UserId};
use reqwest::{Method, Response};

use super::wire::error_message;
use super::SupabaseClient;
use crate::infrastructure::ports::{LocationRepo, RepoError};

/// The `locations` table over HTTP.
pub struct SupabaseLocationRepo {
    client: SupabaseClient,
    path: String,
}

impl SupabaseLocationRepo {
    pub fn new(client: SupabaseClient, table: &str) -> Self {
        Self {
            client,
            path: format!("/rest/v1/{table}"),
        }
    }
}

#[async_trait]
impl LocationRepo for SupabaseLocationRepo {
    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Location>, RepoError> {
        tracing::debug!(%owner, "Listing locations");

        let response = self
            .client
            .authorized(Method::GET, &self.path)
            .await?
            .query(&[
                ("select", "*".to_string()),
                ("user_id", format!("eq.{owner}")),
                ("order", "created_at.desc".to_string()),
            ])
            .send()
            .await
            .map_err(RepoError::network)?;

        let response = ensure_success("list", response).await?;
        response.json().await.map_err(RepoError::serialization)
    }

    async fn insert(&self, location: &Location) -> Result<(), RepoError> {
        tracing::debug!(location_id = %location.id(), "Inserting location");

        let response = self
            .client
            .authorized(Method::POST, &self.path)
            .await?
            .header("Prefer", "return=minimal")
            .json(location)
            .send()
            .await
            .map_err(RepoError::network)?;

        ensure_success("insert", response).await?;
        Ok(())
    }

    async fn delete(&self, id: LocationId) -> Result<(), RepoError> {
        tracing::debug!(location_id = %id, "Deleting location");

        let response = self
            .client
            .authorized(Method::DELETE, &self.path)
            .await?
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await
            .map_err(RepoError::network)?;

        ensure_success("delete", response).await?;
        Ok(())
    }
}

async fn ensure_success(
    operation: &'static str,
    response: Response,
) -> Result<Response, RepoError> {
    if response.status().is_success() {
        return Ok(response);
    }
    Err(RepoError::persistence(operation, error_message(response).await))
}
