//! HTTP transport for the user-directory service
//!
//! Every call carries a bearer token supplied by the caller; the client
//! itself holds no credential state. Create/update submit the multipart
//! form layout the directory service consumes.

use async_trait::async_trait;
use reqwest::multipart::Form;
use reqwest::{Client, header};
use serde_json::Value;
use shared::models::{EmployeeCreate, EmployeeUpdate, RemoteUser};

use crate::error::{DirectoryError, DirectoryResult};

/// Error body returned by the directory service on rejected mutations
#[derive(serde::Deserialize)]
struct ApiErrorBody {
    detail: String,
}

/// Typed operations against the user-directory service
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    /// `GET /users/list-users`
    async fn list_users(&self, token: &str) -> DirectoryResult<Vec<RemoteUser>>;

    /// `POST /users/create`
    async fn create_user(&self, token: &str, payload: &EmployeeCreate) -> DirectoryResult<()>;

    /// `PUT /users/update/{id}`
    async fn update_user(
        &self,
        token: &str,
        id: i64,
        payload: &EmployeeUpdate,
    ) -> DirectoryResult<()>;

    /// `PUT /users/disable/{id}`
    async fn disable_user(&self, token: &str, id: i64) -> DirectoryResult<()>;
}

/// Network transport over reqwest
#[derive(Debug, Clone)]
pub struct HttpDirectoryApi {
    client: Client,
    base_url: String,
}

impl HttpDirectoryApi {
    pub(crate) fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Service base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn bearer(token: &str) -> String {
        format!("Bearer {token}")
    }

    /// Map a rejected create/update response to `Rejected`.
    ///
    /// The service reports business-rule failures as non-2xx with a
    /// `{detail}` body; anything unparsable falls back to the generic
    /// message.
    async fn handle_mutation(
        response: reqwest::Response,
        fallback: &str,
    ) -> DirectoryResult<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let text = response.text().await.unwrap_or_default();
        let detail = match serde_json::from_str::<ApiErrorBody>(&text) {
            Ok(body) => body.detail,
            Err(_) => fallback.to_string(),
        };
        tracing::warn!(status = status.as_u16(), %detail, "Directory mutation rejected");
        Err(DirectoryError::Rejected { detail })
    }
}

/// Coerce the list payload into user records.
///
/// The service may answer with an array or a bare object; a single
/// object is treated as a one-element list, `null` as empty.
fn coerce_user_list(value: Value) -> DirectoryResult<Vec<RemoteUser>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        object @ Value::Object(_) => vec![object],
        other => {
            return Err(DirectoryError::Decode(format!(
                "expected a list of users, got {other}"
            )));
        }
    };

    items
        .into_iter()
        .map(|item| {
            serde_json::from_value::<RemoteUser>(item).map_err(|e| {
                tracing::warn!(error = %e, "Malformed user record in list payload");
                DirectoryError::Decode(e.to_string())
            })
        })
        .collect()
}

fn create_form(payload: &EmployeeCreate) -> Form {
    let mut form = Form::new()
        .text("firstName", payload.first_name.clone())
        .text("middleName", payload.middle_name.clone())
        .text("lastName", payload.last_name.clone())
        .text("suffix", payload.suffix.clone())
        .text("username", payload.username.clone())
        .text("password", payload.password.clone())
        .text("email", payload.email.clone())
        .text("phoneNumber", payload.phone.clone())
        .text("userRole", payload.role.as_str())
        .text("system", payload.system.as_str());
    if let Some(pin) = &payload.pin {
        form = form.text("pin", pin.clone());
    }
    form
}

fn update_form(payload: &EmployeeUpdate) -> Form {
    let mut form = Form::new()
        .text("firstName", payload.first_name.clone())
        .text("middleName", payload.middle_name.clone())
        .text("lastName", payload.last_name.clone())
        .text("suffix", payload.suffix.clone())
        .text("email", payload.email.clone())
        .text("phoneNumber", payload.phone.clone())
        .text("userRole", payload.role.as_str())
        .text("system", payload.system.as_str());
    if let Some(password) = &payload.password {
        form = form.text("password", password.clone());
    }
    if let Some(pin) = &payload.pin {
        form = form.text("pin", pin.clone());
    }
    form
}

#[async_trait]
impl DirectoryApi for HttpDirectoryApi {
    async fn list_users(&self, token: &str) -> DirectoryResult<Vec<RemoteUser>> {
        let response = self
            .client
            .get(self.url("users/list-users"))
            .header(header::AUTHORIZATION, Self::bearer(token))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Fetch {
                status: status.as_u16(),
            });
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| DirectoryError::Decode(e.to_string()))?;
        coerce_user_list(value)
    }

    async fn create_user(&self, token: &str, payload: &EmployeeCreate) -> DirectoryResult<()> {
        let response = self
            .client
            .post(self.url("users/create"))
            .header(header::AUTHORIZATION, Self::bearer(token))
            .multipart(create_form(payload))
            .send()
            .await?;
        Self::handle_mutation(response, "Failed to add employee").await
    }

    async fn update_user(
        &self,
        token: &str,
        id: i64,
        payload: &EmployeeUpdate,
    ) -> DirectoryResult<()> {
        let response = self
            .client
            .put(self.url(&format!("users/update/{id}")))
            .header(header::AUTHORIZATION, Self::bearer(token))
            .multipart(update_form(payload))
            .send()
            .await?;
        Self::handle_mutation(response, "Failed to update employee").await
    }

    async fn disable_user(&self, token: &str, id: i64) -> DirectoryResult<()> {
        let response = self
            .client
            .put(self.url(&format!("users/disable/{id}")))
            .header(header::AUTHORIZATION, Self::bearer(token))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Fetch {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
