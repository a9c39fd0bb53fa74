//! Console composition root
//!
//! Wires the local store, session accessor, directory client and the
//! preference sync together. Views are created per screen from the
//! shared repository.

use anyhow::Context;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use kingfisher_client::ClientConfig;

use crate::core::{DEFAULT_POLL_INTERVAL, DirectoryRepository, LocalStore, SessionStore, SidebarSync};
use crate::view::DirectoryView;

/// Console settings
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Base URL of the user-directory service
    pub service_url: String,
    /// Directory holding the local store and logs
    pub data_dir: PathBuf,
    /// Sidebar reconciliation interval
    pub sidebar_poll_interval: Duration,
}

impl ConsoleConfig {
    pub fn new(service_url: impl Into<String>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            service_url: service_url.into(),
            data_dir: data_dir.into(),
            sidebar_poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Assembled console services
pub struct Console {
    store: LocalStore,
    session: SessionStore,
    repository: Arc<DirectoryRepository>,
    sidebar: Arc<SidebarSync>,
}

impl Console {
    pub fn bootstrap(config: &ConsoleConfig) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&config.data_dir)
            .context("create console data directory")?;

        let store = LocalStore::new(&config.data_dir);
        let session = SessionStore::new(store.clone());
        let api = ClientConfig::new(&config.service_url)
            .build()
            .context("build directory client")?;
        let repository = Arc::new(DirectoryRepository::new(Arc::new(api), session.clone()));
        let sidebar = Arc::new(SidebarSync::with_poll_interval(
            store.clone(),
            config.sidebar_poll_interval,
        ));

        tracing::info!(service_url = %config.service_url, "Console bootstrapped");
        Ok(Self {
            store,
            session,
            repository,
            sidebar,
        })
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn repository(&self) -> &Arc<DirectoryRepository> {
        &self.repository
    }

    pub fn sidebar(&self) -> &Arc<SidebarSync> {
        &self.sidebar
    }

    /// Start the sidebar polling task; callers keep the handle to stop
    /// it on shutdown.
    pub fn start_sidebar_sync(&self) -> JoinHandle<()> {
        self.sidebar.spawn_poll()
    }

    /// A fresh controller over the shared repository
    pub fn directory_view(&self) -> DirectoryView {
        DirectoryView::new(Arc::clone(&self.repository))
    }
}
