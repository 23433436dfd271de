//! Location entity operations.

use std::sync::Arc;

use pineat_domain::{Location, LocationId, NewLocation};

use crate::infrastructure::ports::{AuthPort, LocationRepo, RandomPort, RepoError, Session};

/// Location CRUD scoped to the signed-in user.
///
/// Every call is one round trip. Listing and creating need a session; deleting
/// goes out by id alone and leaves ownership to the backend's row policy.
pub struct LocationRepository {
    repo: Arc<dyn LocationRepo>,
    auth: Arc<dyn AuthPort>,
    random: Arc<dyn RandomPort>,
}

impl LocationRepository {
    pub fn new(
        repo: Arc<dyn LocationRepo>,
        auth: Arc<dyn AuthPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self { repo, auth, random }
    }

    /// The signed-in user's locations, newest first.
    pub async fn list_for_current_user(&self) -> Result<Vec<Location>, RepoError> {
        let session = self.require_session().await?;
        self.repo.list_by_owner(session.user_id()).await
    }

    /// Persist a new location owned by the signed-in user.
    ///
    /// Returns the record as submitted; `created_at` is assigned by the backend
    /// and shows up on the next listing.
    pub async fn create(&self, fields: NewLocation) -> Result<Location, RepoError> {
        let session = self.require_session().await?;
        let id = LocationId::from_uuid(self.random.gen_uuid());
        let location = Location::new(id, session.user_id(), fields);

        self.repo.insert(&location).await?;

        tracing::info!(
            location_id = %location.id(),
            owner_id = %location.owner_id(),
            "Location created"
        );
        Ok(location)
    }

    pub async fn delete(&self, id: LocationId) -> Result<(), RepoError> {
        self.repo.delete(id).await?;
        tracing::info!(location_id = %id, "Location deleted");
        Ok(())
    }

    async fn require_session(&self) -> Result<Session, RepoError> {
        self.auth
            .current_session()
            .await?
            .ok_or(RepoError::Unauthenticated)
    }
}
