//! REST adapter for the admin login verification procedure.

use async_trait::async_trait;
use serde_json::json;

use crate::domain::AdminCredentials;
use crate::domain::ports::{AdminDirectory, AdminLoginRow, RemoteServiceError};

use super::client::RestDataService;
use super::dto::AdminLoginRowDto;

/// [`AdminDirectory`] backed by the `verify_admin_login` procedure.
pub struct RestAdminDirectory {
    service: RestDataService,
}

impl RestAdminDirectory {
    /// Wrap the shared transport.
    pub fn new(service: RestDataService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl AdminDirectory for RestAdminDirectory {
    async fn verify_admin_login(
        &self,
        credentials: &AdminCredentials,
    ) -> Result<Vec<AdminLoginRow>, RemoteServiceError> {
        let arguments = json!({
            "username_param": credentials.username(),
            "password_param": credentials.password(),
        });
        let value = self.service.rpc("verify_admin_login", &arguments).await?;
        if value.is_null() {
            return Ok(Vec::new());
        }
        let rows: Vec<AdminLoginRowDto> = serde_json::from_value(value).map_err(|error| {
            RemoteServiceError::decode(format!("invalid admin login rows: {error}"))
        })?;
        Ok(rows.into_iter().map(AdminLoginRow::from).collect())
    }
}
