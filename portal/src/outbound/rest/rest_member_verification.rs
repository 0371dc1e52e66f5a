//! REST adapter for the member verification procedures.

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::domain::MobileNumber;
use crate::domain::ports::{
    CodeIssueOutcome, MemberLoginOutcome, MemberVerification, RemoteServiceError,
};

use super::client::RestDataService;
use super::dto::{CodeIssueOutcomeDto, MemberLoginOutcomeDto};

/// [`MemberVerification`] backed by the `send_verification_code` and
/// `verify_member_login` procedures.
pub struct RestMemberVerification {
    service: RestDataService,
}

impl RestMemberVerification {
    /// Wrap the shared transport.
    pub fn new(service: RestDataService) -> Self {
        Self { service }
    }
}

// A null procedure response carries no success flag, which the workflows
// already treat as a declined outcome; decode it as the default DTO.
fn decode_outcome<T: Default + serde::de::DeserializeOwned>(
    value: Value,
    context: &str,
) -> Result<T, RemoteServiceError> {
    if value.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(value)
        .map_err(|error| RemoteServiceError::decode(format!("invalid {context}: {error}")))
}

#[async_trait]
impl MemberVerification for RestMemberVerification {
    async fn send_verification_code(
        &self,
        mobile_number: &MobileNumber,
    ) -> Result<CodeIssueOutcome, RemoteServiceError> {
        let arguments = json!({ "mobile_number_param": mobile_number.as_ref() });
        let value = self.service.rpc("send_verification_code", &arguments).await?;
        let dto: CodeIssueOutcomeDto = decode_outcome(value, "code issuance outcome")?;
        Ok(CodeIssueOutcome::from(dto))
    }

    async fn verify_member_login(
        &self,
        mobile_number: &MobileNumber,
        code: &str,
    ) -> Result<MemberLoginOutcome, RemoteServiceError> {
        let arguments = json!({
            "mobile_number_param": mobile_number.as_ref(),
            "verification_code_param": code,
        });
        let value = self.service.rpc("verify_member_login", &arguments).await?;
        let dto: MemberLoginOutcomeDto = decode_outcome(value, "member login outcome")?;
        Ok(MemberLoginOutcome::from(dto))
    }
}
