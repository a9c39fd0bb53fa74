//! Directory view controller
//!
//! Derives the visible row subset from the repository cache and wires
//! the row actions to the form engine and the repository. Filtering is
//! a pure view over the cache and never mutates it.

use serde::Serialize;
use std::sync::Arc;

use kingfisher_client::DirectoryResult;
use shared::models::{Employee, Role, System};

use crate::core::DirectoryRepository;
use crate::form::{EmployeeForm, SubmitOutcome};

/// Search text plus the two dropdown filters.
///
/// Dimensions combine with AND; inside the text search a row matches on
/// name OR email, case-insensitive substring.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DirectoryFilter {
    pub search: String,
    pub role: Option<Role>,
    pub system: Option<System>,
}

impl DirectoryFilter {
    pub fn matches(&self, employee: &Employee) -> bool {
        let term = self.search.to_lowercase();
        let text_match = employee.full_name.to_lowercase().contains(&term)
            || employee.email.to_lowercase().contains(&term);
        let role_match = self.role.is_none_or(|r| employee.role == r);
        let system_match = self.system.is_none_or(|s| employee.system == Some(s));
        text_match && role_match && system_match
    }
}

/// Controller behind the employee records screen
pub struct DirectoryView {
    repo: Arc<DirectoryRepository>,
    filter: DirectoryFilter,
    form: EmployeeForm,
    viewing: Option<Employee>,
}

impl DirectoryView {
    pub fn new(repo: Arc<DirectoryRepository>) -> Self {
        Self {
            repo,
            filter: DirectoryFilter::default(),
            form: EmployeeForm::new(),
            viewing: None,
        }
    }

    /// Initial load, guarded by session validity.
    ///
    /// An `Unauthorized` result means the caller must redirect to the
    /// auth entry point instead of rendering the table.
    pub async fn load(&self) -> DirectoryResult<Vec<Employee>> {
        self.repo.refresh().await
    }

    pub fn filter(&self) -> &DirectoryFilter {
        &self.filter
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filter.search = term.into();
    }

    pub fn set_role_filter(&mut self, role: Option<Role>) {
        self.filter.role = role;
    }

    pub fn set_system_filter(&mut self, system: Option<System>) {
        self.filter.system = system;
    }

    /// The filtered subset, re-derived from the cache on every call
    pub async fn visible_rows(&self) -> Vec<Employee> {
        self.repo
            .employees()
            .await
            .into_iter()
            .filter(|e| self.filter.matches(e))
            .collect()
    }

    // ---- row actions ----

    /// Read-only detail; no form engine involvement
    pub async fn open_view(&mut self, id: i64) -> Option<&Employee> {
        self.viewing = self.repo.find(id).await;
        self.viewing.as_ref()
    }

    pub fn viewing(&self) -> Option<&Employee> {
        self.viewing.as_ref()
    }

    pub fn close_view(&mut self) {
        self.viewing = None;
    }

    pub fn open_add(&mut self) {
        self.form.open_create();
    }

    /// Open the edit modal pre-seeded from the cached record
    pub async fn open_edit(&mut self, id: i64) -> bool {
        match self.repo.find(id).await {
            Some(employee) => {
                self.form.open_edit(&employee);
                true
            }
            None => false,
        }
    }

    pub fn form(&self) -> &EmployeeForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut EmployeeForm {
        &mut self.form
    }

    pub async fn submit_form(&mut self) -> SubmitOutcome {
        let repo = Arc::clone(&self.repo);
        self.form.submit(&repo).await
    }

    /// Archive the record. Callers run the confirmation gate first; the
    /// row stays in the listing with `Inactive` status afterwards.
    pub async fn archive(&self, id: i64) -> DirectoryResult<()> {
        self.repo.disable(id).await
    }
}
