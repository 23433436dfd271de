//! Application composition.

use std::sync::Arc;

use crate::config::{ClientConfig, ConfigError};
use crate::infrastructure::{
    clock::SystemRandom,
    memory::InMemoryBackend,
    ports::{AuthPort, LocationRepo, MediaStorePort, RandomPort},
    supabase::{SupabaseAuth, SupabaseClient, SupabaseLocationRepo, SupabaseMediaStore},
};
use crate::repositories::{LocationRepository, MediaStore};
use crate::use_cases::{AuthFlow, ListPresenter, PinComposer};

/// Wired-up client: gateways plus factories for the presenters.
///
/// Built explicitly and passed to whoever needs it; there is no global
/// instance.
pub struct App {
    pub auth: Arc<dyn AuthPort>,
    pub locations: Arc<LocationRepository>,
    pub media: Arc<MediaStore>,
}

impl App {
    pub fn new(
        auth: Arc<dyn AuthPort>,
        location_repo: Arc<dyn LocationRepo>,
        media_port: Arc<dyn MediaStorePort>,
        images_bucket: &str,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        let locations = Arc::new(LocationRepository::new(
            location_repo,
            auth.clone(),
            random.clone(),
        ));
        let media = Arc::new(MediaStore::new(media_port, random, images_bucket));

        Self {
            auth,
            locations,
            media,
        }
    }

    /// Client for the hosted backend described by `config`.
    pub fn supabase(config: &ClientConfig) -> Result<Self, ConfigError> {
        let client = SupabaseClient::new(config)?;

        tracing::info!(
            url = %client.base_url(),
            table = %config.locations_table,
            bucket = %config.images_bucket,
            "Hosted backend client ready"
        );

        Ok(Self::new(
            Arc::new(SupabaseAuth::new(client.clone())),
            Arc::new(SupabaseLocationRepo::new(
                client.clone(),
                &config.locations_table,
            )),
            Arc::new(SupabaseMediaStore::new(client)),
            &config.images_bucket,
            Arc::new(SystemRandom::new()),
        ))
    }

    /// Client over a fresh in-memory backend. The backend is returned as
    /// well so callers can seed accounts.
    pub fn in_memory() -> (Self, InMemoryBackend) {
        let backend = InMemoryBackend::default();
        let app = Self::new(
            Arc::new(backend.clone()),
            Arc::new(backend.clone()),
            Arc::new(backend.clone()),
            crate::config::DEFAULT_IMAGES_BUCKET,
            Arc::new(SystemRandom::new()),
        );
        (app, backend)
    }

    pub fn list_presenter(&self) -> ListPresenter {
        ListPresenter::new(self.locations.clone())
    }

    pub fn pin_composer(&self) -> PinComposer {
        PinComposer::new(self.locations.clone(), self.media.clone())
    }

    pub fn auth_flow(&self) -> AuthFlow {
        AuthFlow::new(self.auth.clone())
    }

    pub async fn has_session(&self) -> bool {
        self.auth_flow().has_session().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::RepoError;
    use crate::use_cases::SaveOutcome;
    use pineat_domain::Coordinates;

    #[tokio::test]
    async fn pins_and_list_share_one_backend() {
        let (app, backend) = App::in_memory();
        backend.add_user("ada@pineat.app", "secret-pass");

        let mut auth = app.auth_flow();
        assert!(auth.sign_in("ada@pineat.app", "secret-pass").await);
        assert!(app.has_session().await);

        let mut composer = app.pin_composer();
        composer.choose(Coordinates::new(41.0, 29.0));
        let outcome = composer.save("Pizza Place", "", None).await;
        assert!(matches!(outcome, SaveOutcome::Saved(_)));

        let mut list = app.list_presenter();
        list.refresh().await;
        assert_eq!(list.locations().len(), 1);
        assert_eq!(list.locations()[0].title(), "Pizza Place");
        assert_eq!(list.locations()[0].latitude(), 41.0);
        assert_eq!(list.locations()[0].longitude(), 29.0);
        assert_eq!(list.locations()[0].image_url(), Some(""));
    }

    #[tokio::test]
    async fn other_users_never_see_my_locations() {
        let (app, backend) = App::in_memory();
        backend.add_user("ada@pineat.app", "secret-pass");
        backend.add_user("bob@pineat.app", "secret-pass");
        let mut auth = app.auth_flow();

        auth.sign_in("ada@pineat.app", "secret-pass").await;
        app.pin_composer().save("Ada's cafe", "", None).await;

        auth.sign_in("bob@pineat.app", "secret-pass").await;
        let mut list = app.list_presenter();
        list.refresh().await;

        assert!(list.all().is_empty());
        assert_eq!(list.error_message(), None);
    }

    #[tokio::test]
    async fn failed_sign_in_blocks_create() {
        let (app, backend) = App::in_memory();
        backend.add_user("ada@pineat.app", "secret-pass");

        let mut auth = app.auth_flow();
        assert!(!auth.sign_in("ada@pineat.app", "wrong").await);
        assert_eq!(auth.error_message(), Some("Invalid login credentials"));

        let err = app
            .locations
            .create(pineat_domain::NewLocation::new("Pizza Place", Coordinates::new(41.0, 29.0)))
            .await
            .unwrap_err();
        assert_eq!(err, RepoError::Unauthenticated);
    }

    #[tokio::test]
    async fn deleted_location_never_comes_back() {
        let (app, backend) = App::in_memory();
        backend.add_user("ada@pineat.app", "secret-pass");
        app.auth_flow().sign_in("ada@pineat.app", "secret-pass").await;
        let mut composer = app.pin_composer();
        let SaveOutcome::Saved(saved) = composer.save("Pizza Place", "", None).await else {
            panic!("Expected Saved");
        };

        let mut list = app.list_presenter();
        list.refresh().await;
        list.remove(saved.id()).await;
        list.refresh().await;

        assert!(list.all().iter().all(|l| l.id() != saved.id()));
        assert_eq!(backend.row_count(), 0);
    }

    #[test]
    fn supabase_app_builds_from_config() {
        let config = ClientConfig::new("https://xyzcompany.supabase.co", "anon-key").unwrap();

        let app = App::supabase(&config).unwrap();

        assert_eq!(app.media.bucket(), "images");
    }
}
