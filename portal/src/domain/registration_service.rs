//! Employment registration workflow: verify, select, confirm.
//!
//! The flow state lives in [`RegistrationFlow`], a pure state machine; the
//! service performs the remote lookups, the duplicate checks, and the single
//! insert. Outcomes are tagged with the flow generation they were issued
//! under and discarded when the flow has been reset since (same rule as the
//! member login flow).

use std::sync::Arc;

use tracing::{debug, warn};

use super::category::EmploymentCategory;
use super::client::ClientRecord;
use super::mobile_number::MobileNumber;
use super::ports::{CategoryCatalogue, ClientDirectory, RegistrationRepository};
use super::registration::NewRegistration;

/// States of the registration flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationState {
    /// Waiting for a mobile number to verify.
    Verify,
    /// The client was verified; waiting for a category selection.
    Select {
        /// Number the client was verified under.
        mobile_number: MobileNumber,
        /// The verified client record.
        client: ClientRecord,
        /// Active categories offered for selection.
        categories: Vec<EmploymentCategory>,
    },
    /// The registration was submitted; terminal until reset.
    Confirm,
}

/// Pure state machine for the three-step registration flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationFlow {
    state: RegistrationState,
    generation: u64,
}

impl RegistrationFlow {
    /// Start a fresh flow awaiting verification.
    pub fn new() -> Self {
        Self {
            state: RegistrationState::Verify,
            generation: 0,
        }
    }

    /// Current state.
    pub fn state(&self) -> &RegistrationState {
        &self.state
    }

    /// Generation the next outcome must be issued under to be applied.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The verified client, when the flow holds one.
    pub fn client(&self) -> Option<&ClientRecord> {
        match &self.state {
            RegistrationState::Select { client, .. } => Some(client),
            _ => None,
        }
    }

    /// Categories offered for selection; empty outside the select step.
    pub fn categories(&self) -> &[EmploymentCategory] {
        match &self.state {
            RegistrationState::Select { categories, .. } => categories,
            _ => &[],
        }
    }

    /// Names of the held categories the verified client may apply for.
    ///
    /// Advisory, for rendering; the submit operation re-checks eligibility.
    pub fn eligible_category_names(&self) -> Vec<&str> {
        match &self.state {
            RegistrationState::Select {
                client, categories, ..
            } => categories
                .iter()
                .filter(|category| client.can_apply_for(&category.name))
                .map(|category| category.name.as_str())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Return to [`RegistrationState::Verify`] from any state, dropping the
    /// held client, number, and categories, and invalidating outstanding
    /// outcomes.
    pub fn reset(&mut self) {
        self.state = RegistrationState::Verify;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Record a successful verification, unless the flow moved on since.
    ///
    /// Returns whether the outcome was applied.
    pub fn apply_verified(
        &mut self,
        issued: u64,
        mobile_number: MobileNumber,
        client: ClientRecord,
        categories: Vec<EmploymentCategory>,
    ) -> bool {
        if issued != self.generation {
            return false;
        }
        self.state = RegistrationState::Select {
            mobile_number,
            client,
            categories,
        };
        true
    }

    /// Record a successful submission, unless the flow moved on since.
    ///
    /// Returns whether the outcome was applied.
    pub fn apply_submitted(&mut self, issued: u64) -> bool {
        if issued != self.generation {
            return false;
        }
        if !matches!(self.state, RegistrationState::Select { .. }) {
            return false;
        }
        self.state = RegistrationState::Confirm;
        true
    }
}

impl Default for RegistrationFlow {
    fn default() -> Self {
        Self::new()
    }
}

/// Verification result handed back to the caller for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientVerification {
    /// The verified client record.
    pub client: ClientRecord,
    /// Active categories offered for selection.
    pub categories: Vec<EmploymentCategory>,
}

/// Failures surfaced by the registration flow.
///
/// Every variant displays as the human-facing message the portal shows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    /// Inputs failed validation; no remote call was made.
    #[error("{message}")]
    Validation {
        /// Human-facing failure text.
        message: String,
    },
    /// No client record matched the mobile number.
    #[error("You are not registered. Please contact your agent.")]
    NotRegistered,
    /// The verified client may not apply for the selected category.
    #[error("You are not eligible to apply for this category.")]
    IneligibleCategory {
        /// Name of the category that was refused.
        category: String,
    },
    /// A registration for this exact client and category already exists.
    #[error("You have already registered for this category.")]
    AlreadyRegistered,
    /// A non-rejected registration already exists for this mobile number in
    /// some category.
    #[error(
        "You can only have one active registration at a time. Please contact admin to pause your existing registration before applying for a new program."
    )]
    RegistrationLimitReached,
    /// The submission could not be completed.
    #[error("Failed to submit registration")]
    SubmissionFailed,
}

impl RegistrationError {
    fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Driving service for the registration flow.
pub struct RegistrationService<C, K, R> {
    clients: Arc<C>,
    catalogue: Arc<K>,
    registrations: Arc<R>,
}

impl<C, K, R> RegistrationService<C, K, R> {
    /// Create the service over the client, catalogue, and registration ports.
    pub fn new(clients: Arc<C>, catalogue: Arc<K>, registrations: Arc<R>) -> Self {
        Self {
            clients,
            catalogue,
            registrations,
        }
    }
}

impl<C, K, R> RegistrationService<C, K, R>
where
    C: ClientDirectory,
    K: CategoryCatalogue,
    R: RegistrationRepository,
{
    /// Verify a mobile number against the client directory.
    ///
    /// No record and remote lookup failure both surface as
    /// [`RegistrationError::NotRegistered`]. A category-catalogue failure is
    /// tolerated: the flow still advances with an empty list so the failure
    /// mode matches the observed portal behaviour.
    pub async fn verify_mobile_number(
        &self,
        flow: &mut RegistrationFlow,
        mobile_number: &str,
    ) -> Result<ClientVerification, RegistrationError> {
        let mobile = MobileNumber::new(mobile_number)
            .map_err(|_| RegistrationError::validation("Please enter your mobile number"))?;
        let issued = flow.generation();

        let client = match self.clients.find_by_mobile_number(&mobile).await {
            Ok(Some(client)) => client,
            Ok(None) => return Err(RegistrationError::NotRegistered),
            Err(error) => {
                debug!(error = %error, "client lookup failed");
                return Err(RegistrationError::NotRegistered);
            }
        };

        let categories = match self.catalogue.list_active().await {
            Ok(categories) => categories,
            Err(error) => {
                warn!(error = %error, "active category fetch failed, offering none");
                Vec::new()
            }
        };

        if !flow.apply_verified(issued, mobile, client.clone(), categories.clone()) {
            debug!("discarding verification outcome for a superseded flow");
        }
        Ok(ClientVerification { client, categories })
    }

    /// Submit a registration for the selected category.
    ///
    /// The checks run strictly in order and each one short-circuits:
    /// eligibility, the exact `(client, category)` duplicate, the global
    /// one-active-registration limit, then the insert. A remote failure
    /// during either duplicate check aborts the submission.
    pub async fn submit_registration(
        &self,
        flow: &mut RegistrationFlow,
        category_id: &str,
    ) -> Result<(), RegistrationError> {
        let issued = flow.generation();
        let (mobile, client_id) = {
            let RegistrationState::Select {
                mobile_number,
                client,
                categories,
            } = flow.state()
            else {
                return Err(RegistrationError::validation(
                    "Please verify your mobile number first",
                ));
            };
            let Some(category) = categories.iter().find(|category| category.id == category_id)
            else {
                return Err(RegistrationError::validation("Please select a category"));
            };
            if !client.can_apply_for(&category.name) {
                return Err(RegistrationError::IneligibleCategory {
                    category: category.name.clone(),
                });
            }
            (mobile_number.clone(), client.id.clone())
        };

        let for_pair = self
            .registrations
            .find_by_client_and_category(&client_id, category_id)
            .await
            .map_err(|error| {
                debug!(error = %error, "pair duplicate check failed");
                RegistrationError::SubmissionFailed
            })?;
        if !for_pair.is_empty() {
            return Err(RegistrationError::AlreadyRegistered);
        }

        let active = self
            .registrations
            .find_active_by_mobile(&mobile)
            .await
            .map_err(|error| {
                debug!(error = %error, "active registration check failed");
                RegistrationError::SubmissionFailed
            })?;
        if active.iter().any(|row| !row.status.is_rejected()) {
            return Err(RegistrationError::RegistrationLimitReached);
        }

        let registration = NewRegistration {
            client_id,
            category_id: category_id.to_owned(),
            mobile_number: mobile,
        };
        self.registrations
            .insert(&registration)
            .await
            .map_err(|error| {
                debug!(error = %error, "registration insert failed");
                RegistrationError::SubmissionFailed
            })?;

        if !flow.apply_submitted(issued) {
            debug!("discarding submission outcome for a superseded flow");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{
        MockCategoryCatalogue, MockClientDirectory, MockRegistrationRepository,
        RemoteServiceError,
    };
    use crate::domain::registration::{EmploymentRegistration, RegistrationStatus};
    use rstest::rstest;

    fn client() -> ClientRecord {
        ClientRecord {
            id: "c1".to_owned(),
            name: "Devi".to_owned(),
            address: "12 Hill Road".to_owned(),
            category: "Weaving".to_owned(),
            district: "Wayanad".to_owned(),
            agent_pro: "Agent K".to_owned(),
            mobile_number: "9876543210".to_owned(),
        }
    }

    fn category(id: &str, name: &str) -> EmploymentCategory {
        EmploymentCategory {
            id: id.to_owned(),
            name: name.to_owned(),
            description: None,
            is_active: true,
        }
    }

    fn existing_registration(status: RegistrationStatus) -> EmploymentRegistration {
        EmploymentRegistration {
            id: Some("r1".to_owned()),
            client_id: "c1".to_owned(),
            category_id: "cat-b".to_owned(),
            mobile_number: "9876543210".to_owned(),
            status,
            created_at: None,
        }
    }

    fn service(
        clients: MockClientDirectory,
        catalogue: MockCategoryCatalogue,
        registrations: MockRegistrationRepository,
    ) -> RegistrationService<MockClientDirectory, MockCategoryCatalogue, MockRegistrationRepository>
    {
        RegistrationService::new(
            Arc::new(clients),
            Arc::new(catalogue),
            Arc::new(registrations),
        )
    }

    fn flow_at_select(categories: Vec<EmploymentCategory>) -> RegistrationFlow {
        let mut flow = RegistrationFlow::new();
        let applied = flow.apply_verified(
            flow.generation(),
            MobileNumber::new("9876543210").expect("valid number"),
            client(),
            categories,
        );
        assert!(applied);
        flow
    }

    #[tokio::test]
    async fn unknown_mobile_number_is_not_registered_and_state_stays_verify() {
        let mut clients = MockClientDirectory::new();
        clients
            .expect_find_by_mobile_number()
            .times(1)
            .returning(|_| Ok(None));
        let mut catalogue = MockCategoryCatalogue::new();
        catalogue.expect_list_active().times(0);
        let service = service(clients, catalogue, MockRegistrationRepository::new());
        let mut flow = RegistrationFlow::new();

        let err = service
            .verify_mobile_number(&mut flow, "9999999999")
            .await
            .expect_err("unknown number");
        assert_eq!(err, RegistrationError::NotRegistered);
        assert_eq!(
            err.to_string(),
            "You are not registered. Please contact your agent."
        );
        assert_eq!(flow.state(), &RegistrationState::Verify);
    }

    #[tokio::test]
    async fn lookup_failure_reads_as_not_registered() {
        let mut clients = MockClientDirectory::new();
        clients
            .expect_find_by_mobile_number()
            .times(1)
            .returning(|_| Err(RemoteServiceError::transport("gateway down")));
        let service = service(
            clients,
            MockCategoryCatalogue::new(),
            MockRegistrationRepository::new(),
        );
        let mut flow = RegistrationFlow::new();

        let err = service
            .verify_mobile_number(&mut flow, "9876543210")
            .await
            .expect_err("lookup failure");
        assert_eq!(err, RegistrationError::NotRegistered);
        assert_eq!(flow.state(), &RegistrationState::Verify);
    }

    #[tokio::test]
    async fn verification_advances_to_select_with_active_categories() {
        let mut clients = MockClientDirectory::new();
        clients
            .expect_find_by_mobile_number()
            .times(1)
            .returning(|_| Ok(Some(client())));
        let mut catalogue = MockCategoryCatalogue::new();
        catalogue
            .expect_list_active()
            .times(1)
            .returning(|| Ok(vec![category("cat-a", "Weaving")]));
        let service = service(clients, catalogue, MockRegistrationRepository::new());
        let mut flow = RegistrationFlow::new();

        let verification = service
            .verify_mobile_number(&mut flow, "9876543210")
            .await
            .expect("verified");
        assert_eq!(verification.client, client());
        assert_eq!(verification.categories.len(), 1);
        assert_eq!(flow.client(), Some(&client()));
        assert_eq!(flow.categories().len(), 1);
    }

    #[tokio::test]
    async fn catalogue_failure_still_advances_with_no_categories() {
        let mut clients = MockClientDirectory::new();
        clients
            .expect_find_by_mobile_number()
            .times(1)
            .returning(|_| Ok(Some(client())));
        let mut catalogue = MockCategoryCatalogue::new();
        catalogue
            .expect_list_active()
            .times(1)
            .returning(|| Err(RemoteServiceError::backend("catalogue offline")));
        let service = service(clients, catalogue, MockRegistrationRepository::new());
        let mut flow = RegistrationFlow::new();

        let verification = service
            .verify_mobile_number(&mut flow, "9876543210")
            .await
            .expect("verified");
        assert!(verification.categories.is_empty());
        assert!(matches!(flow.state(), RegistrationState::Select { .. }));
    }

    #[tokio::test]
    async fn blank_mobile_number_is_rejected_before_any_remote_call() {
        let mut clients = MockClientDirectory::new();
        clients.expect_find_by_mobile_number().times(0);
        let service = service(
            clients,
            MockCategoryCatalogue::new(),
            MockRegistrationRepository::new(),
        );
        let mut flow = RegistrationFlow::new();

        let err = service
            .verify_mobile_number(&mut flow, "")
            .await
            .expect_err("validation");
        assert_eq!(err.to_string(), "Please enter your mobile number");
    }

    #[tokio::test]
    async fn successful_submission_confirms_the_flow() {
        let mut registrations = MockRegistrationRepository::new();
        registrations
            .expect_find_by_client_and_category()
            .times(1)
            .returning(|_, _| Ok(Vec::new()));
        registrations
            .expect_find_active_by_mobile()
            .times(1)
            .returning(|_| Ok(Vec::new()));
        registrations
            .expect_insert()
            .times(1)
            .withf(|registration: &NewRegistration| {
                registration.client_id == "c1"
                    && registration.category_id == "cat-a"
                    && registration.mobile_number.as_ref() == "9876543210"
            })
            .returning(|_| Ok(()));
        let service = service(
            MockClientDirectory::new(),
            MockCategoryCatalogue::new(),
            registrations,
        );
        let mut flow = flow_at_select(vec![category("cat-a", "Weaving")]);

        service
            .submit_registration(&mut flow, "cat-a")
            .await
            .expect("submitted");
        assert_eq!(flow.state(), &RegistrationState::Confirm);
    }

    #[tokio::test]
    async fn duplicate_pair_fails_before_any_insert() {
        let mut registrations = MockRegistrationRepository::new();
        registrations
            .expect_find_by_client_and_category()
            .times(1)
            .returning(|_, _| {
                Ok(vec![existing_registration(RegistrationStatus::Pending)])
            });
        registrations.expect_find_active_by_mobile().times(0);
        registrations.expect_insert().times(0);
        let service = service(
            MockClientDirectory::new(),
            MockCategoryCatalogue::new(),
            registrations,
        );
        let mut flow = flow_at_select(vec![category("cat-a", "Weaving")]);

        let err = service
            .submit_registration(&mut flow, "cat-a")
            .await
            .expect_err("duplicate pair");
        assert_eq!(err, RegistrationError::AlreadyRegistered);
        assert!(matches!(flow.state(), RegistrationState::Select { .. }));
    }

    #[tokio::test]
    async fn active_registration_elsewhere_hits_the_global_limit() {
        let mut registrations = MockRegistrationRepository::new();
        registrations
            .expect_find_by_client_and_category()
            .times(1)
            .returning(|_, _| Ok(Vec::new()));
        registrations
            .expect_find_active_by_mobile()
            .times(1)
            .returning(|_| Ok(vec![existing_registration(RegistrationStatus::Pending)]));
        registrations.expect_insert().times(0);
        let service = service(
            MockClientDirectory::new(),
            MockCategoryCatalogue::new(),
            registrations,
        );
        let mut flow = flow_at_select(vec![category("cat-a", "Weaving")]);

        let err = service
            .submit_registration(&mut flow, "cat-a")
            .await
            .expect_err("limit reached");
        assert_eq!(err, RegistrationError::RegistrationLimitReached);
    }

    #[tokio::test]
    async fn rejected_registrations_do_not_count_towards_the_limit() {
        let mut registrations = MockRegistrationRepository::new();
        registrations
            .expect_find_by_client_and_category()
            .times(1)
            .returning(|_, _| Ok(Vec::new()));
        registrations
            .expect_find_active_by_mobile()
            .times(1)
            .returning(|_| Ok(vec![existing_registration(RegistrationStatus::Rejected)]));
        registrations.expect_insert().times(1).returning(|_| Ok(()));
        let service = service(
            MockClientDirectory::new(),
            MockCategoryCatalogue::new(),
            registrations,
        );
        let mut flow = flow_at_select(vec![category("cat-a", "Weaving")]);

        service
            .submit_registration(&mut flow, "cat-a")
            .await
            .expect("submitted");
    }

    #[tokio::test]
    async fn ineligible_category_is_refused_before_any_remote_call() {
        let mut registrations = MockRegistrationRepository::new();
        registrations.expect_find_by_client_and_category().times(0);
        registrations.expect_insert().times(0);
        let service = service(
            MockClientDirectory::new(),
            MockCategoryCatalogue::new(),
            registrations,
        );
        // Client category is "Weaving"; "Pottery" is offered but not open.
        let mut flow = flow_at_select(vec![
            category("cat-a", "Weaving"),
            category("cat-b", "Pottery"),
        ]);

        let err = service
            .submit_registration(&mut flow, "cat-b")
            .await
            .expect_err("ineligible");
        assert_eq!(
            err,
            RegistrationError::IneligibleCategory {
                category: "Pottery".to_owned(),
            }
        );
    }

    #[tokio::test]
    async fn check_query_failure_aborts_the_submission() {
        let mut registrations = MockRegistrationRepository::new();
        registrations
            .expect_find_by_client_and_category()
            .times(1)
            .returning(|_, _| Err(RemoteServiceError::transport("gateway down")));
        registrations.expect_insert().times(0);
        let service = service(
            MockClientDirectory::new(),
            MockCategoryCatalogue::new(),
            registrations,
        );
        let mut flow = flow_at_select(vec![category("cat-a", "Weaving")]);

        let err = service
            .submit_registration(&mut flow, "cat-a")
            .await
            .expect_err("check failed");
        assert_eq!(err, RegistrationError::SubmissionFailed);
    }

    #[tokio::test]
    async fn insert_failure_keeps_the_flow_in_select() {
        let mut registrations = MockRegistrationRepository::new();
        registrations
            .expect_find_by_client_and_category()
            .times(1)
            .returning(|_, _| Ok(Vec::new()));
        registrations
            .expect_find_active_by_mobile()
            .times(1)
            .returning(|_| Ok(Vec::new()));
        registrations
            .expect_insert()
            .times(1)
            .returning(|_| Err(RemoteServiceError::backend("constraint violation")));
        let service = service(
            MockClientDirectory::new(),
            MockCategoryCatalogue::new(),
            registrations,
        );
        let mut flow = flow_at_select(vec![category("cat-a", "Weaving")]);

        let err = service
            .submit_registration(&mut flow, "cat-a")
            .await
            .expect_err("insert failed");
        assert_eq!(err, RegistrationError::SubmissionFailed);
        assert_eq!(err.to_string(), "Failed to submit registration");
        assert!(matches!(flow.state(), RegistrationState::Select { .. }));
    }

    #[tokio::test]
    async fn submitting_without_verification_is_a_validation_failure() {
        let service = service(
            MockClientDirectory::new(),
            MockCategoryCatalogue::new(),
            MockRegistrationRepository::new(),
        );
        let mut flow = RegistrationFlow::new();

        let err = service
            .submit_registration(&mut flow, "cat-a")
            .await
            .expect_err("no verification yet");
        assert!(matches!(err, RegistrationError::Validation { .. }));
    }

    #[rstest]
    #[case::from_select(true)]
    #[case::from_confirm(false)]
    fn reset_clears_everything_from_any_state(#[case] stop_at_select: bool) {
        let mut flow = flow_at_select(vec![category("cat-a", "Weaving")]);
        if !stop_at_select {
            assert!(flow.apply_submitted(flow.generation()));
        }
        flow.reset();
        assert_eq!(flow.state(), &RegistrationState::Verify);
        assert_eq!(flow.client(), None);
        assert!(flow.categories().is_empty());
    }

    #[test]
    fn outcomes_issued_before_a_reset_are_discarded() {
        let mut flow = RegistrationFlow::new();
        let stale = flow.generation();
        flow.reset();

        assert!(!flow.apply_verified(
            stale,
            MobileNumber::new("9876543210").expect("valid number"),
            client(),
            Vec::new(),
        ));
        assert_eq!(flow.state(), &RegistrationState::Verify);
    }

    #[test]
    fn eligible_category_names_follow_the_client_category() {
        let flow = flow_at_select(vec![
            category("cat-a", "Weaving"),
            category("cat-b", "Pottery"),
        ]);
        assert_eq!(flow.eligible_category_names(), vec!["Weaving"]);
    }
}
