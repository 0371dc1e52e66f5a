//! Remote-owned client record and the category eligibility rule.

/// Client record fetched by exact mobile-number lookup.
///
/// Owned by the remote service and read-only to this system; it drives the
/// eligibility checks of the registration workflow. Fields mirror the remote
/// row and may be empty when the row omits them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRecord {
    /// Stable identifier of the client row.
    pub id: String,
    /// Client display name.
    pub name: String,
    /// Postal address.
    pub address: String,
    /// Category text the client was registered under.
    pub category: String,
    /// Administrative district.
    pub district: String,
    /// Name of the agent who registered the client.
    pub agent_pro: String,
    /// Mobile number the record is keyed by.
    pub mobile_number: String,
}

// Category texts that unlock every employment category.
const OPEN_CATEGORY_MARKERS: [&str; 2] = ["job card", "others"];

impl ClientRecord {
    /// Whether this client may apply for the named employment category.
    ///
    /// Clients whose own category text contains "job card" or "others"
    /// (case-insensitive) may apply for any category; everyone else only for
    /// the category exactly matching their own category string.
    ///
    /// Advisory for selection UIs; the registration workflow re-checks it at
    /// submit time.
    pub fn can_apply_for(&self, category_name: &str) -> bool {
        let own = self.category.to_lowercase();
        if OPEN_CATEGORY_MARKERS
            .iter()
            .any(|marker| own.contains(marker))
        {
            return true;
        }
        self.category == category_name
    }
}
