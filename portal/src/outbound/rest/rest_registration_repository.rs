//! REST adapter for the employment registrations table.

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{RegistrationRepository, RemoteServiceError};
use crate::domain::{EmploymentRegistration, MobileNumber, NewRegistration};

use super::client::RestDataService;
use super::dto::RegistrationRowDto;

const REGISTRATIONS_TABLE: &str = "employment_registrations";

/// [`RegistrationRepository`] backed by the registrations table.
pub struct RestRegistrationRepository {
    service: RestDataService,
}

impl RestRegistrationRepository {
    /// Wrap the shared transport.
    pub fn new(service: RestDataService) -> Self {
        Self { service }
    }

    async fn select_rows(
        &self,
        filters: &[(&str, &str)],
    ) -> Result<Vec<EmploymentRegistration>, RemoteServiceError> {
        let rows: Vec<RegistrationRowDto> =
            self.service.select(REGISTRATIONS_TABLE, filters).await?;
        Ok(rows.into_iter().map(EmploymentRegistration::from).collect())
    }
}

#[async_trait]
impl RegistrationRepository for RestRegistrationRepository {
    async fn find_by_client_and_category(
        &self,
        client_id: &str,
        category_id: &str,
    ) -> Result<Vec<EmploymentRegistration>, RemoteServiceError> {
        let client_predicate = format!("eq.{client_id}");
        let category_predicate = format!("eq.{category_id}");
        self.select_rows(&[
            ("client_id", client_predicate.as_str()),
            ("category_id", category_predicate.as_str()),
        ])
        .await
    }

    async fn find_active_by_mobile(
        &self,
        mobile_number: &MobileNumber,
    ) -> Result<Vec<EmploymentRegistration>, RemoteServiceError> {
        let mobile_predicate = format!("eq.{mobile_number}");
        self.select_rows(&[
            ("mobile_number", mobile_predicate.as_str()),
            ("status", "neq.rejected"),
        ])
        .await
    }

    async fn insert(&self, registration: &NewRegistration) -> Result<(), RemoteServiceError> {
        let row = json!({
            "client_id": registration.client_id,
            "category_id": registration.category_id,
            "mobile_number": registration.mobile_number.as_ref(),
            "status": "pending",
        });
        self.service.insert(REGISTRATIONS_TABLE, &row).await
    }
}
