//! Driven port for employment registration reads and the single insert.

use async_trait::async_trait;

use crate::domain::mobile_number::MobileNumber;
use crate::domain::registration::{EmploymentRegistration, NewRegistration};

use super::remote::RemoteServiceError;

/// Port for the registration table of the Remote Data Service.
///
/// The two read operations back the two distinct duplicate checks of the
/// submission sequence and are deliberately kept separate; see the
/// registration workflow.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Registrations for an exact `(client, category)` pair.
    async fn find_by_client_and_category(
        &self,
        client_id: &str,
        category_id: &str,
    ) -> Result<Vec<EmploymentRegistration>, RemoteServiceError>;

    /// Registrations for a mobile number whose status is not `rejected`,
    /// across all categories.
    async fn find_active_by_mobile(
        &self,
        mobile_number: &MobileNumber,
    ) -> Result<Vec<EmploymentRegistration>, RemoteServiceError>;

    /// Insert one new registration with status `pending`.
    async fn insert(&self, registration: &NewRegistration) -> Result<(), RemoteServiceError>;
}

/// Fixture repository with no existing registrations; inserts are accepted
/// and discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureRegistrationRepository;

#[async_trait]
impl RegistrationRepository for FixtureRegistrationRepository {
    async fn find_by_client_and_category(
        &self,
        _client_id: &str,
        _category_id: &str,
    ) -> Result<Vec<EmploymentRegistration>, RemoteServiceError> {
        Ok(Vec::new())
    }

    async fn find_active_by_mobile(
        &self,
        _mobile_number: &MobileNumber,
    ) -> Result<Vec<EmploymentRegistration>, RemoteServiceError> {
        Ok(Vec::new())
    }

    async fn insert(&self, _registration: &NewRegistration) -> Result<(), RemoteServiceError> {
        Ok(())
    }
}
