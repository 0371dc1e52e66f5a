//! Remote-owned catalogue entities: categories, programmes, sub-projects.

/// Employment category a client can register under.
///
/// Owned by the remote service; only active categories are offered during
/// registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmploymentCategory {
    /// Stable identifier of the category row.
    pub id: String,
    /// Category name shown during selection and matched by the eligibility
    /// rule.
    pub name: String,
    /// Optional descriptive text.
    pub description: Option<String>,
    /// Whether the category is currently offered.
    pub is_active: bool,
}

/// Programme attached to a category, shown on catalogue cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgrammeSummary {
    /// Stable identifier of the programme row.
    pub id: String,
    /// Programme name.
    pub name: String,
    /// Optional descriptive text.
    pub description: Option<String>,
    /// Optional eligibility conditions text.
    pub conditions: Option<String>,
}

/// Sub-project attached to a category, shown on catalogue cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubProjectSummary {
    /// Stable identifier of the sub-project row.
    pub id: String,
    /// Sub-project name.
    pub name: String,
}
