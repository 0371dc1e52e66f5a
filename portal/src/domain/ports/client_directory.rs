//! Driven port for client-record lookups.

use async_trait::async_trait;

use crate::domain::client::ClientRecord;
use crate::domain::mobile_number::MobileNumber;

use super::remote::RemoteServiceError;

/// Port for reading registered clients from the Remote Data Service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientDirectory: Send + Sync {
    /// Fetch the client registered under an exact mobile number.
    async fn find_by_mobile_number(
        &self,
        mobile_number: &MobileNumber,
    ) -> Result<Option<ClientRecord>, RemoteServiceError>;
}

/// Fixture directory that knows no clients.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureClientDirectory;

#[async_trait]
impl ClientDirectory for FixtureClientDirectory {
    async fn find_by_mobile_number(
        &self,
        _mobile_number: &MobileNumber,
    ) -> Result<Option<ClientRecord>, RemoteServiceError> {
        Ok(None)
    }
}
