//! Read-only catalogue aggregation for the portal's landing view.

use std::sync::Arc;

use super::category::{EmploymentCategory, ProgrammeSummary, SubProjectSummary};
use super::ports::{CategoryCatalogue, RemoteServiceError};

const LOAD_FAILED: &str = "Failed to load categories";

/// One active category together with its attached programmes and
/// sub-projects, ready for card rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOverview {
    /// The category itself.
    pub category: EmploymentCategory,
    /// Programmes attached to the category.
    pub programmes: Vec<ProgrammeSummary>,
    /// Sub-projects attached to the category.
    pub sub_projects: Vec<SubProjectSummary>,
}

/// Failures surfaced while loading the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogueError {
    /// The catalogue could not be read.
    #[error("{message}")]
    Remote {
        /// Human-facing failure text.
        message: String,
    },
}

/// Driving service assembling category overviews.
pub struct CatalogueService<K> {
    catalogue: Arc<K>,
}

impl<K> CatalogueService<K> {
    /// Create the service over a catalogue port.
    pub fn new(catalogue: Arc<K>) -> Self {
        Self { catalogue }
    }
}

impl<K: CategoryCatalogue> CatalogueService<K> {
    /// Fetch every active category with its programmes and sub-projects.
    pub async fn category_overviews(&self) -> Result<Vec<CategoryOverview>, CatalogueError> {
        let categories = self
            .catalogue
            .list_active()
            .await
            .map_err(map_remote_error)?;
        let mut overviews = Vec::with_capacity(categories.len());
        for category in categories {
            let programmes = self
                .catalogue
                .programmes_for(&category.id)
                .await
                .map_err(map_remote_error)?;
            let sub_projects = self
                .catalogue
                .sub_projects_for(&category.id)
                .await
                .map_err(map_remote_error)?;
            overviews.push(CategoryOverview {
                category,
                programmes,
                sub_projects,
            });
        }
        Ok(overviews)
    }
}

fn map_remote_error(error: RemoteServiceError) -> CatalogueError {
    CatalogueError::Remote {
        message: error.surfaced_message(LOAD_FAILED),
    }
}
