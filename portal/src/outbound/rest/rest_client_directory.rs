//! REST adapter for client-record lookups.

use async_trait::async_trait;

use crate::domain::ports::{ClientDirectory, RemoteServiceError};
use crate::domain::{ClientRecord, MobileNumber};

use super::client::RestDataService;
use super::dto::ClientRecordDto;

const CLIENTS_TABLE: &str = "registered_clients";

/// [`ClientDirectory`] backed by the registered clients table.
pub struct RestClientDirectory {
    service: RestDataService,
}

impl RestClientDirectory {
    /// Wrap the shared transport.
    pub fn new(service: RestDataService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ClientDirectory for RestClientDirectory {
    async fn find_by_mobile_number(
        &self,
        mobile_number: &MobileNumber,
    ) -> Result<Option<ClientRecord>, RemoteServiceError> {
        let predicate = format!("eq.{mobile_number}");
        let rows: Vec<ClientRecordDto> = self
            .service
            .select(CLIENTS_TABLE, &[("mobile_number", predicate.as_str())])
            .await?;
        Ok(rows.into_iter().next().map(ClientRecord::from))
    }
}
