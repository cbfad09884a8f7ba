//! Administrative user management endpoints.

use serde_json::json;

use loglens_core::{ClientError, ClientResult};

use crate::client::ApiClient;
use crate::types::{AdminUser, ROLE_OPTIONS, STATUS_OPTIONS};

impl ApiClient {
    /// Fetch all user records (admin only; the backend enforces the
    /// bearer's role).
    ///
    /// # Errors
    ///
    /// Propagates transport and envelope errors.
    pub async fn list_users(&self) -> ClientResult<Vec<AdminUser>> {
        self.fetch_list("/admin/list-user", &[], &["listUser", "data"])
            .await
    }

    /// Change a user's role and account status.
    ///
    /// Role and status are validated against the assignable catalogs
    /// before any request is dispatched.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unknown role or status, and
    /// propagates transport and envelope errors otherwise.
    pub async fn update_user(&self, username: &str, role: &str, status: &str) -> ClientResult<()> {
        if username.is_empty() {
            return Err(validation("username", "must not be empty"));
        }
        if !ROLE_OPTIONS.contains(&role) {
            return Err(validation("role", "not an assignable role"));
        }
        if !STATUS_OPTIONS.contains(&status) {
            return Err(validation("status", "not an assignable status"));
        }

        self.command(
            "/admin/update",
            &json!({
                "username": username,
                "role": role,
                "status": status,
            }),
        )
        .await?;
        Ok(())
    }
}

fn validation(field: &str, message: &str) -> ClientError {
    ClientError::Validation {
        field: field.to_string(),
        message: message.to_string(),
    }
}
