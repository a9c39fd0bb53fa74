//! End-to-end flows over the console core with an in-memory directory
//! service double: load, filter, create, edit and archive.

use async_trait::async_trait;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use kingfisher_client::{DirectoryApi, DirectoryError, DirectoryResult};
use kingfisher_console::core::{AUTH_TOKEN_KEY, DirectoryRepository, LocalStore, SessionStore};
use kingfisher_console::form::FormField;
use kingfisher_console::view::DirectoryView;
use kingfisher_console::{FormPhase, SubmitOutcome};
use serde_json::json;
use shared::models::{
    Employee, EmployeeCreate, EmployeeStatus, EmployeeUpdate, RemoteUser, Role, System,
};

/// Mimics the directory service: assigns ids, derives full names,
/// flips the disabled flag in place.
#[derive(Default)]
struct FakeDirectory {
    users: Mutex<Vec<RemoteUser>>,
    next_id: AtomicI64,
    list_calls: AtomicUsize,
    disable_calls: AtomicUsize,
    last_create: Mutex<Option<EmployeeCreate>>,
    last_update: Mutex<Option<(i64, EmployeeUpdate)>>,
    reject_create_with: Mutex<Option<String>>,
}

impl FakeDirectory {
    fn seeded() -> Arc<Self> {
        let fake = Self::default();
        fake.next_id.store(100, Ordering::SeqCst);
        fake.users.lock().unwrap().extend([
            remote_user(1, "Maria Santos", "msantos", "maria@example.com", "manager", Some("POS")),
            remote_user(2, "Jose Cruz", "jcruz", "jose@example.com", "cashier", Some("POS")),
            remote_user(3, "Ana Reyes", "areyes", "ana@example.com", "staff", Some("IMS")),
        ]);
        Arc::new(fake)
    }
}

fn remote_user(
    id: i64,
    full_name: &str,
    username: &str,
    email: &str,
    role: &str,
    system: Option<&str>,
) -> RemoteUser {
    serde_json::from_value(json!({
        "userID": id,
        "fullName": full_name,
        "firstName": full_name.split(' ').next().unwrap(),
        "lastName": full_name.split(' ').next_back().unwrap(),
        "username": username,
        "email": email,
        "userRole": role,
        "system": system,
        "isDisabled": false
    }))
    .unwrap()
}

#[async_trait]
impl DirectoryApi for FakeDirectory {
    async fn list_users(&self, _token: &str) -> DirectoryResult<Vec<RemoteUser>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.users.lock().unwrap().clone())
    }

    async fn create_user(&self, _token: &str, payload: &EmployeeCreate) -> DirectoryResult<()> {
        if let Some(detail) = self.reject_create_with.lock().unwrap().clone() {
            return Err(DirectoryError::Rejected { detail });
        }
        *self.last_create.lock().unwrap() = Some(payload.clone());

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let full_name = [
            payload.first_name.as_str(),
            payload.middle_name.as_str(),
            payload.last_name.as_str(),
            payload.suffix.as_str(),
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

        self.users.lock().unwrap().push(remote_user(
            id,
            &full_name,
            &payload.username,
            &payload.email,
            payload.role.as_str(),
            Some(payload.system.as_str()),
        ));
        Ok(())
    }

    async fn update_user(
        &self,
        _token: &str,
        id: i64,
        payload: &EmployeeUpdate,
    ) -> DirectoryResult<()> {
        *self.last_update.lock().unwrap() = Some((id, payload.clone()));

        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.user_id == id) {
            user.email = payload.email.clone();
            user.user_role = payload.role.as_str().to_string();
            user.system = Some(payload.system.as_str().to_string());
        }
        Ok(())
    }

    async fn disable_user(&self, _token: &str, id: i64) -> DirectoryResult<()> {
        self.disable_calls.fetch_add(1, Ordering::SeqCst);
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.user_id == id) {
            user.is_disabled = true;
        }
        Ok(())
    }
}

struct Harness {
    _dir: tempfile::TempDir,
    fake: Arc<FakeDirectory>,
    store: LocalStore,
    view: DirectoryView,
}

fn signed_in_harness() -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path());
    store.set(AUTH_TOKEN_KEY, json!("token-1")).unwrap();

    let fake = FakeDirectory::seeded();
    let session = SessionStore::new(store.clone());
    let api: Arc<dyn DirectoryApi> = fake.clone();
    let repo = Arc::new(DirectoryRepository::new(api, session));
    Harness {
        _dir: dir,
        fake,
        store,
        view: DirectoryView::new(repo),
    }
}

fn by_username<'a>(rows: &'a [Employee], username: &str) -> Option<&'a Employee> {
    rows.iter().find(|e| e.username == username)
}

#[tokio::test]
async fn load_without_a_token_is_unauthorized() {
    let harness = signed_in_harness();
    harness.store.remove(AUTH_TOKEN_KEY).unwrap();

    let err = harness.view.load().await.unwrap_err();
    assert!(matches!(err, DirectoryError::Unauthorized));
    assert!(harness.view.visible_rows().await.is_empty());
}

#[tokio::test]
async fn load_fills_the_cache_and_empty_filters_show_everything() {
    let harness = signed_in_harness();
    let loaded = harness.view.load().await.unwrap();

    assert_eq!(loaded.len(), 3);
    assert_eq!(harness.view.visible_rows().await, loaded);
}

#[tokio::test]
async fn create_round_trip_for_a_pos_manager() {
    let mut harness = signed_in_harness();
    harness.view.load().await.unwrap();

    harness.view.open_add();
    let form = harness.view.form_mut();
    form.set_text(FormField::FirstName, "Bea");
    form.set_text(FormField::LastName, "Torres");
    form.set_text(FormField::Username, "btorres");
    form.set_text(FormField::Email, "bea@example.com");
    form.set_role(Some(Role::Manager));
    form.set_system(Some(System::Pos));
    form.set_text(FormField::Password, "longenough12");
    form.set_text(FormField::ConfirmPassword, "longenough12");
    form.set_text(FormField::Pin, "4321");

    assert_eq!(harness.view.submit_form().await, SubmitOutcome::Saved);
    assert_eq!(harness.view.form().phase(), FormPhase::Closed);

    // listing immediately after create shows the server-assigned record
    let rows = harness.view.visible_rows().await;
    let created = by_username(&rows, "btorres").expect("created record listed");
    assert_eq!(created.id, 100);
    assert_eq!(created.role, Role::Manager);
    assert_eq!(created.system, Some(System::Pos));
    assert_eq!(created.status, EmployeeStatus::Active);

    let sent = harness.fake.last_create.lock().unwrap().clone().unwrap();
    assert_eq!(sent.pin.as_deref(), Some("4321"));
}

#[tokio::test]
async fn create_refreshes_instead_of_inserting_speculatively() {
    let mut harness = signed_in_harness();
    harness.view.load().await.unwrap();
    assert_eq!(harness.fake.list_calls.load(Ordering::SeqCst), 1);

    harness.view.open_add();
    let form = harness.view.form_mut();
    form.set_text(FormField::FirstName, "Bea");
    form.set_text(FormField::LastName, "Torres");
    form.set_text(FormField::Username, "btorres");
    form.set_text(FormField::Email, "bea@example.com");
    form.set_role(Some(Role::Staff));
    form.set_system(Some(System::Oos));
    form.set_text(FormField::Password, "longenough12");
    form.set_text(FormField::ConfirmPassword, "longenough12");

    assert_eq!(harness.view.submit_form().await, SubmitOutcome::Saved);
    assert_eq!(harness.fake.list_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn archive_flips_the_row_in_place_and_converges() {
    let harness = signed_in_harness();
    harness.view.load().await.unwrap();

    harness.view.archive(2).await.unwrap();
    let rows = harness.view.visible_rows().await;
    let archived = by_username(&rows, "jcruz").unwrap();
    assert_eq!(archived.status, EmployeeStatus::Inactive);

    // archived, not deleted: still listed, no refetch happened
    assert_eq!(rows.len(), 3);
    assert_eq!(harness.fake.list_calls.load(Ordering::SeqCst), 1);

    // a second archive converges to the same state
    harness.view.archive(2).await.unwrap();
    let rows = harness.view.visible_rows().await;
    assert_eq!(
        by_username(&rows, "jcruz").unwrap().status,
        EmployeeStatus::Inactive
    );
    // outgoing calls are not deduped
    assert_eq!(harness.fake.disable_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn edit_with_blank_password_omits_the_credential_fields() {
    let mut harness = signed_in_harness();
    harness.view.load().await.unwrap();

    assert!(harness.view.open_edit(1).await);
    let form = harness.view.form_mut();
    assert_eq!(form.values().username, "msantos");
    form.set_text(FormField::Email, "maria.santos@example.com");
    // confirmation content is irrelevant while the password stays blank
    form.set_text(FormField::ConfirmPassword, "whatever");

    assert_eq!(harness.view.submit_form().await, SubmitOutcome::Saved);

    let (id, payload) = harness.fake.last_update.lock().unwrap().clone().unwrap();
    assert_eq!(id, 1);
    assert_eq!(payload.password, None);
    assert_eq!(payload.pin, None);
    assert_eq!(payload.email, "maria.santos@example.com");
}

#[tokio::test]
async fn rejected_create_keeps_the_form_open_with_data_intact() {
    let mut harness = signed_in_harness();
    harness.view.load().await.unwrap();
    *harness.fake.reject_create_with.lock().unwrap() =
        Some("Email is already used".to_string());

    harness.view.open_add();
    let form = harness.view.form_mut();
    form.set_text(FormField::FirstName, "Bea");
    form.set_text(FormField::LastName, "Torres");
    form.set_text(FormField::Username, "btorres");
    form.set_text(FormField::Email, "bea@example.com");
    form.set_role(Some(Role::Staff));
    form.set_system(Some(System::Ims));
    form.set_text(FormField::Password, "longenough12");
    form.set_text(FormField::ConfirmPassword, "longenough12");

    assert_eq!(harness.view.submit_form().await, SubmitOutcome::Failed);

    let form = harness.view.form();
    assert_eq!(form.phase(), FormPhase::Open);
    assert_eq!(form.submit_error(), Some("Email is already used"));
    assert_eq!(form.values().email, "bea@example.com");
}

#[tokio::test]
async fn token_expiry_mid_session_aborts_the_submission() {
    let mut harness = signed_in_harness();
    harness.view.load().await.unwrap();

    assert!(harness.view.open_edit(3).await);
    harness.store.remove(AUTH_TOKEN_KEY).unwrap();

    assert_eq!(harness.view.submit_form().await, SubmitOutcome::Failed);
    let form = harness.view.form();
    assert_eq!(form.phase(), FormPhase::Open);
    assert_eq!(form.submit_error(), Some("Authentication error."));
}

#[tokio::test]
async fn filters_are_a_pure_view_over_the_cache() {
    let mut harness = signed_in_harness();
    harness.view.load().await.unwrap();

    harness.view.set_search("example.com".to_string());
    harness.view.set_system_filter(Some(System::Pos));
    let visible = harness.view.visible_rows().await;
    assert_eq!(visible.len(), 2);

    // filtering never touched the cache
    harness.view.set_search(String::new());
    harness.view.set_system_filter(None);
    assert_eq!(harness.view.visible_rows().await.len(), 3);
}

#[tokio::test]
async fn view_action_reads_the_cached_record_without_the_form() {
    let mut harness = signed_in_harness();
    harness.view.load().await.unwrap();

    let detail = harness.view.open_view(3).await.cloned().unwrap();
    assert_eq!(detail.username, "areyes");
    assert!(!harness.view.form().is_open());

    harness.view.close_view();
    assert!(harness.view.viewing().is_none());
}
