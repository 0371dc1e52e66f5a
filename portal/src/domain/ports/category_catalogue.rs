//! Driven port for the employment-category catalogue.

use async_trait::async_trait;

use crate::domain::category::{EmploymentCategory, ProgrammeSummary, SubProjectSummary};

use super::remote::RemoteServiceError;

/// Port for reading the category catalogue from the Remote Data Service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryCatalogue: Send + Sync {
    /// List the categories currently flagged active.
    async fn list_active(&self) -> Result<Vec<EmploymentCategory>, RemoteServiceError>;

    /// List the programmes attached to a category.
    async fn programmes_for(
        &self,
        category_id: &str,
    ) -> Result<Vec<ProgrammeSummary>, RemoteServiceError>;

    /// List the sub-projects attached to a category.
    async fn sub_projects_for(
        &self,
        category_id: &str,
    ) -> Result<Vec<SubProjectSummary>, RemoteServiceError>;
}

/// Fixture catalogue with nothing in it.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureCategoryCatalogue;

#[async_trait]
impl CategoryCatalogue for FixtureCategoryCatalogue {
    async fn list_active(&self) -> Result<Vec<EmploymentCategory>, RemoteServiceError> {
        Ok(Vec::new())
    }

    async fn programmes_for(
        &self,
        _category_id: &str,
    ) -> Result<Vec<ProgrammeSummary>, RemoteServiceError> {
        Ok(Vec::new())
    }

    async fn sub_projects_for(
        &self,
        _category_id: &str,
    ) -> Result<Vec<SubProjectSummary>, RemoteServiceError> {
        Ok(Vec::new())
    }
}
