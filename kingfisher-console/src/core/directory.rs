//! Directory repository
//!
//! Client-held cache of the remote directory listing plus the three
//! mutation paths. The cache is the single source of truth for the
//! view layer. The service owns id assignment and full-name
//! derivation, so create and update re-fetch the listing; disable is
//! the one narrow flip applied to the cache in place.

use chrono::{DateTime, Utc};
use kingfisher_client::{DirectoryApi, DirectoryError, DirectoryResult};
use shared::models::{Employee, EmployeeCreate, EmployeeStatus, EmployeeUpdate};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::session::SessionStore;

pub struct DirectoryRepository {
    api: Arc<dyn DirectoryApi>,
    session: SessionStore,
    cache: RwLock<Vec<Employee>>,
    refreshed_at: RwLock<Option<DateTime<Utc>>>,
}

impl DirectoryRepository {
    pub fn new(api: Arc<dyn DirectoryApi>, session: SessionStore) -> Self {
        Self {
            api,
            session,
            cache: RwLock::new(Vec::new()),
            refreshed_at: RwLock::new(None),
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn token(&self) -> DirectoryResult<String> {
        self.session.token().ok_or(DirectoryError::Unauthorized)
    }

    /// Snapshot of the cached listing
    pub async fn employees(&self) -> Vec<Employee> {
        self.cache.read().await.clone()
    }

    pub async fn find(&self, id: i64) -> Option<Employee> {
        self.cache.read().await.iter().find(|e| e.id == id).cloned()
    }

    pub async fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        *self.refreshed_at.read().await
    }

    /// Fetch the authoritative listing and replace the whole cache.
    ///
    /// Filter state is untouched; the view re-derives its subset from
    /// the new cache on the next read.
    pub async fn refresh(&self) -> DirectoryResult<Vec<Employee>> {
        let token = self.token()?;
        let remote = self.api.list_users(&token).await?;

        let employees = remote
            .into_iter()
            .map(|user| {
                Employee::try_from(user).map_err(|e| {
                    tracing::warn!(error = %e, "Directory record failed to normalize");
                    DirectoryError::Decode(e.to_string())
                })
            })
            .collect::<DirectoryResult<Vec<_>>>()?;

        *self.cache.write().await = employees.clone();
        *self.refreshed_at.write().await = Some(Utc::now());
        tracing::debug!(count = employees.len(), "Directory cache refreshed");
        Ok(employees)
    }

    /// Create an account, then re-fetch the listing.
    ///
    /// The service assigns the id and derives the full name, so the
    /// fresh record is never inserted speculatively.
    pub async fn create(&self, payload: EmployeeCreate) -> DirectoryResult<()> {
        let token = self.token()?;
        self.api.create_user(&token, &payload).await?;
        tracing::info!(username = %payload.username, "Employee created");
        self.refresh().await?;
        Ok(())
    }

    /// Update an account, then re-fetch the listing
    pub async fn update(&self, id: i64, payload: EmployeeUpdate) -> DirectoryResult<()> {
        let token = self.token()?;
        self.api.update_user(&token, id, &payload).await?;
        tracing::info!(id, "Employee updated");
        self.refresh().await?;
        Ok(())
    }

    /// Archive an account: flip the remote disabled flag, then mark the
    /// cached record inactive in place.
    ///
    /// Converges under repeated calls; outgoing calls are not deduped,
    /// callers are expected to confirm before invoking.
    pub async fn disable(&self, id: i64) -> DirectoryResult<()> {
        let token = self.token()?;
        self.api.disable_user(&token, id).await?;

        let mut cache = self.cache.write().await;
        if let Some(employee) = cache.iter_mut().find(|e| e.id == id) {
            employee.status = EmployeeStatus::Inactive;
        }
        tracing::info!(id, "Employee archived");
        Ok(())
    }
}
