//! REST adapter for the category catalogue tables.

use async_trait::async_trait;

use crate::domain::ports::{CategoryCatalogue, RemoteServiceError};
use crate::domain::{EmploymentCategory, ProgrammeSummary, SubProjectSummary};

use super::client::RestDataService;
use super::dto::{EmploymentCategoryDto, ProgrammeSummaryDto, SubProjectSummaryDto};

const CATEGORIES_TABLE: &str = "employment_categories";
const PROGRAMMES_TABLE: &str = "programs";
const SUB_PROJECTS_TABLE: &str = "sub_projects";

/// [`CategoryCatalogue`] backed by the catalogue tables.
pub struct RestCategoryCatalogue {
    service: RestDataService,
}

impl RestCategoryCatalogue {
    /// Wrap the shared transport.
    pub fn new(service: RestDataService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl CategoryCatalogue for RestCategoryCatalogue {
    async fn list_active(&self) -> Result<Vec<EmploymentCategory>, RemoteServiceError> {
        let rows: Vec<EmploymentCategoryDto> = self
            .service
            .select(CATEGORIES_TABLE, &[("is_active", "eq.true")])
            .await?;
        Ok(rows.into_iter().map(EmploymentCategory::from).collect())
    }

    async fn programmes_for(
        &self,
        category_id: &str,
    ) -> Result<Vec<ProgrammeSummary>, RemoteServiceError> {
        let predicate = format!("eq.{category_id}");
        let rows: Vec<ProgrammeSummaryDto> = self
            .service
            .select(PROGRAMMES_TABLE, &[("category_id", predicate.as_str())])
            .await?;
        Ok(rows.into_iter().map(ProgrammeSummary::from).collect())
    }

    async fn sub_projects_for(
        &self,
        category_id: &str,
    ) -> Result<Vec<SubProjectSummary>, RemoteServiceError> {
        let predicate = format!("eq.{category_id}");
        let rows: Vec<SubProjectSummaryDto> = self
            .service
            .select(SUB_PROJECTS_TABLE, &[("category_id", predicate.as_str())])
            .await?;
        Ok(rows.into_iter().map(SubProjectSummary::from).collect())
    }
}
