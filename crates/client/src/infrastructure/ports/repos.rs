//! Repository port traits for row storage.

use async_trait::async_trait;
use pineat_domain::{Location, LocationId, UserId};

use super::error::RepoError;

// =============================================================================
// Row Store Ports
// =============================================================================

/// Access to the `locations` table.
///
/// Implementations are thin: they do not check sessions or build records.
/// Row-level policy on the backend decides what a caller may read or delete.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationRepo: Send + Sync {
    /// All rows owned by `owner`, newest first.
    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Location>, RepoError>;

    async fn insert(&self, location: &Location) -> Result<(), RepoError>;

    /// Delete by id only. No owner filter is sent.
    async fn delete(&self, id: LocationId) -> Result<(), RepoError>;
}
