//! Wire DTOs for the Remote Data Service, decoded tolerantly.
//!
//! Every field defaults when absent, identifiers accept numbers as well as
//! strings, and timestamps that fail to parse decode to `None`. The
//! workflows, not this layer, decide what an incomplete payload means.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::ports::{AdminLoginRow, CodeIssueOutcome, MemberLoginOutcome, MemberLoginRow};
use crate::domain::{
    ClientRecord, EmploymentCategory, EmploymentRegistration, ProgrammeSummary,
    RegistrationStatus, SubProjectSummary,
};

// Identifier-ish fields arrive as strings or numbers depending on the table;
// both decode to their string form.
fn stringish<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(opt_stringish(deserializer)?.unwrap_or_default())
}

fn opt_stringish<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null => None,
        other => Some(other.to_string()),
    }))
}

fn opt_datetime<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|parsed| parsed.with_timezone(&Utc)))
}

#[derive(Debug, Deserialize)]
pub(crate) struct AdminLoginRowDto {
    #[serde(default, deserialize_with = "stringish")]
    id: String,
    #[serde(default)]
    username: String,
    #[serde(default)]
    role: String,
}

impl From<AdminLoginRowDto> for AdminLoginRow {
    fn from(value: AdminLoginRowDto) -> Self {
        Self {
            id: value.id,
            username: value.username,
            role: value.role,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CodeIssueOutcomeDto {
    #[serde(default)]
    success: bool,
    #[serde(
        default,
        alias = "verificationCode",
        deserialize_with = "opt_stringish"
    )]
    verification_code: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl From<CodeIssueOutcomeDto> for CodeIssueOutcome {
    fn from(value: CodeIssueOutcomeDto) -> Self {
        Self {
            success: value.success,
            verification_code: value.verification_code,
            error: value.error,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MemberLoginOutcomeDto {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    member: Option<MemberLoginRowDto>,
    #[serde(default)]
    error: Option<String>,
}

impl From<MemberLoginOutcomeDto> for MemberLoginOutcome {
    fn from(value: MemberLoginOutcomeDto) -> Self {
        Self {
            success: value.success,
            member: value.member.map(MemberLoginRow::from),
            error: value.error,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MemberLoginRowDto {
    #[serde(default, deserialize_with = "stringish")]
    id: String,
    #[serde(default, alias = "mobileNumber")]
    mobile_number: String,
    #[serde(default)]
    name: Option<String>,
}

impl From<MemberLoginRowDto> for MemberLoginRow {
    fn from(value: MemberLoginRowDto) -> Self {
        Self {
            id: value.id,
            mobile_number: value.mobile_number,
            name: value.name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ClientRecordDto {
    #[serde(default, deserialize_with = "stringish")]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    district: String,
    #[serde(default, alias = "agentPro")]
    agent_pro: String,
    #[serde(default, alias = "mobileNumber")]
    mobile_number: String,
}

impl From<ClientRecordDto> for ClientRecord {
    fn from(value: ClientRecordDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            address: value.address,
            category: value.category,
            district: value.district,
            agent_pro: value.agent_pro,
            mobile_number: value.mobile_number,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct EmploymentCategoryDto {
    #[serde(default, deserialize_with = "stringish")]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, alias = "isActive")]
    is_active: bool,
}

impl From<EmploymentCategoryDto> for EmploymentCategory {
    fn from(value: EmploymentCategoryDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            is_active: value.is_active,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProgrammeSummaryDto {
    #[serde(default, deserialize_with = "stringish")]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    conditions: Option<String>,
}

impl From<ProgrammeSummaryDto> for ProgrammeSummary {
    fn from(value: ProgrammeSummaryDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            conditions: value.conditions,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubProjectSummaryDto {
    #[serde(default, deserialize_with = "stringish")]
    id: String,
    #[serde(default)]
    name: String,
}

impl From<SubProjectSummaryDto> for SubProjectSummary {
    fn from(value: SubProjectSummaryDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RegistrationRowDto {
    #[serde(default, deserialize_with = "opt_stringish")]
    id: Option<String>,
    #[serde(default, alias = "clientId", deserialize_with = "stringish")]
    client_id: String,
    #[serde(default, alias = "categoryId", deserialize_with = "stringish")]
    category_id: String,
    #[serde(default, alias = "mobileNumber")]
    mobile_number: String,
    #[serde(default)]
    status: String,
    #[serde(default, alias = "createdAt", deserialize_with = "opt_datetime")]
    created_at: Option<DateTime<Utc>>,
}

impl From<RegistrationRowDto> for EmploymentRegistration {
    fn from(value: RegistrationRowDto) -> Self {
        Self {
            id: value.id,
            client_id: value.client_id,
            category_id: value.category_id,
            mobile_number: value.mobile_number,
            status: RegistrationStatus::from_wire(&value.status),
            created_at: value.created_at,
        }
    }
}
