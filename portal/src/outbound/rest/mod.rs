//! Reqwest-backed adapters for the Remote Data Service.

mod client;
mod dto;
mod rest_admin_directory;
mod rest_category_catalogue;
mod rest_client_directory;
mod rest_member_verification;
mod rest_registration_repository;

pub use client::{RestDataService, RestServiceBuildError};
pub use rest_admin_directory::RestAdminDirectory;
pub use rest_category_catalogue::RestCategoryCatalogue;
pub use rest_client_directory::RestClientDirectory;
pub use rest_member_verification::RestMemberVerification;
pub use rest_registration_repository::RestRegistrationRepository;
