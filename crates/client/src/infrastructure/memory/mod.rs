//! In-process backend for offline use and tests.
//!
//! Implements the auth, row store and blob store ports against in-memory maps,
//! with the same observable rules the hosted backend enforces: rows are only
//! visible to and deletable by their owner, and blob names are never
//! overwritten.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::RwLock;

use pineat_domain::{Location, LocationId, UserId};

use crate::infrastructure::clock::{SystemClock, SystemRandom};
use crate::infrastructure::ports::{
    AuthError, AuthPort, AuthUser, ClockPort, LocationRepo, MediaStorePort, RandomPort, RepoError,
    Session, UploadError,
};

/// Shortest password accepted on sign-up.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone)]
struct StoredUser {
    id: UserId,
    password: String,
}

#[derive(Debug, Clone)]
struct StoredRow {
    /// Insertion order, breaks ties between equal timestamps.
    seq: u64,
    location: Location,
}

struct Inner {
    users: DashMap<String, StoredUser>,
    rows: DashMap<LocationId, StoredRow>,
    blobs: DashMap<String, Vec<u8>>,
    session: RwLock<Option<Session>>,
    seq: AtomicU64,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
}

/// Backend that lives entirely in memory.
///
/// Cheap to clone; clones share state, so one instance can be handed out as
/// the auth, row store and blob store at once.
#[derive(Clone)]
pub struct InMemoryBackend {
    inner: Arc<Inner>,
}

impl InMemoryBackend {
    pub fn new(clock: Arc<dyn ClockPort>, random: Arc<dyn RandomPort>) -> Self {
        Self {
            inner: Arc::new(Inner {
                users: DashMap::new(),
                rows: DashMap::new(),
                blobs: DashMap::new(),
                session: RwLock::new(None),
                seq: AtomicU64::new(0),
                clock,
                random,
            }),
        }
    }

    /// Register an account without signing in.
    pub fn add_user(&self, email: &str, password: &str) -> UserId {
        let id = UserId::from_uuid(self.inner.random.gen_uuid());
        self.inner.users.insert(
            email.to_string(),
            StoredUser {
                id,
                password: password.to_string(),
            },
        );
        id
    }

    /// Number of rows across all users.
    pub fn row_count(&self) -> usize {
        self.inner.rows.len()
    }

    /// Number of stored blobs across all buckets.
    pub fn blob_count(&self) -> usize {
        self.inner.blobs.len()
    }

    pub fn blob(&self, bucket: &str, name: &str) -> Option<Vec<u8>> {
        self.inner
            .blobs
            .get(&blob_key(bucket, name))
            .map(|entry| entry.value().clone())
    }

    async fn start_session(&self, email: &str, user_id: UserId) -> AuthUser {
        let user = AuthUser {
            id: user_id,
            email: Some(email.to_string()),
        };
        let session = Session {
            access_token: format!("memory-{}", self.inner.random.gen_uuid()),
            refresh_token: None,
            expires_at: None,
            user: user.clone(),
        };
        *self.inner.session.write().await = Some(session);
        user
    }

    async fn session_user(&self) -> Option<UserId> {
        self.inner.session.read().await.as_ref().map(Session::user_id)
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock::new()), Arc::new(SystemRandom::new()))
    }
}

fn blob_key(bucket: &str, name: &str) -> String {
    format!("{bucket}/{name}")
}

#[async_trait]
impl AuthPort for InMemoryBackend {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        let user_id = match self.inner.users.get(email) {
            Some(user) if user.password == password => user.id,
            _ => return Err(AuthError::rejected("Invalid login credentials")),
        };

        let user = self.start_session(email, user_id).await;
        tracing::info!(user_id = %user.id, "Signed in");
        Ok(user)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        if !email.contains('@') {
            return Err(AuthError::rejected(
                "Unable to validate email address: invalid format",
            ));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::rejected(format!(
                "Password should be at least {MIN_PASSWORD_LEN} characters."
            )));
        }
        if self.inner.users.contains_key(email) {
            return Err(AuthError::rejected("User already registered"));
        }

        let user_id = self.add_user(email, password);
        let user = self.start_session(email, user_id).await;
        tracing::info!(user_id = %user.id, "Signed up");
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        if let Some(session) = self.inner.session.write().await.take() {
            tracing::info!(user_id = %session.user.id, "Signed out");
        }
        Ok(())
    }

    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        Ok(self.inner.session.read().await.clone())
    }
}

#[async_trait]
impl LocationRepo for InMemoryBackend {
    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Location>, RepoError> {
        // Rows of other users are invisible, whatever owner is asked for.
        if self.session_user().await != Some(owner) {
            return Ok(Vec::new());
        }

        let mut rows: Vec<StoredRow> = self
            .inner
            .rows
            .iter()
            .filter(|entry| entry.value().location.owner_id() == owner)
            .map(|entry| entry.value().clone())
            .collect();
        rows.sort_by(|a, b| {
            b.location
                .created_at()
                .cmp(&a.location.created_at())
                .then(b.seq.cmp(&a.seq))
        });

        Ok(rows.into_iter().map(|row| row.location).collect())
    }

    async fn insert(&self, location: &Location) -> Result<(), RepoError> {
        if self.session_user().await != Some(location.owner_id()) {
            return Err(RepoError::persistence(
                "insert",
                "new row violates row-level security policy for table \"locations\"",
            ));
        }
        if self.inner.rows.contains_key(&location.id()) {
            return Err(RepoError::persistence(
                "insert",
                "duplicate key value violates unique constraint \"locations_pkey\"",
            ));
        }

        let seq = self.inner.seq.fetch_add(1, Ordering::SeqCst);
        let location = location.clone().with_created_at(self.inner.clock.now());
        self.inner
            .rows
            .insert(location.id(), StoredRow { seq, location });
        Ok(())
    }

    async fn delete(&self, id: LocationId) -> Result<(), RepoError> {
        // Deleting a row that is missing or not ours matches zero rows.
        let Some(user_id) = self.session_user().await else {
            return Ok(());
        };
        self.inner
            .rows
            .remove_if(&id, |_, row| row.location.owner_id() == user_id);
        Ok(())
    }
}

#[async_trait]
impl MediaStorePort for InMemoryBackend {
    async fn put_object(
        &self,
        bucket: &str,
        name: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<(), UploadError> {
        let key = blob_key(bucket, name);
        match self.inner.blobs.entry(key) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                Err(UploadError::storage("The resource already exists"))
            }
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(bytes);
                Ok(())
            }
        }
    }

    fn public_url(&self, bucket: &str, name: &str) -> String {
        format!("memory://{bucket}/{name}")
    }
}
