//! Portal configuration loaded via OrthoConfig.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_STORAGE_DIR: &str = ".portal-session";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Configuration values wiring the portal core to its collaborators.
///
/// Values load from CLI arguments, `PORTAL_`-prefixed environment variables,
/// or a configuration file, in the usual OrthoConfig precedence order.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PORTAL")]
pub struct PortalSettings {
    /// Base URL of the hosted data service.
    pub service_url: String,
    /// API key attached to every data service request when present.
    pub service_key: Option<String>,
    /// Directory holding the persisted session identities.
    pub storage_dir: Option<PathBuf>,
    /// Outbound request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
}

impl PortalSettings {
    /// Base URL of the hosted data service.
    pub fn service_url(&self) -> &str {
        self.service_url.as_str()
    }

    /// Configured API key, when present.
    pub fn service_key(&self) -> Option<&str> {
        self.service_key.as_deref()
    }

    /// Session storage directory, falling back to the default.
    pub fn storage_dir(&self) -> PathBuf {
        self.storage_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR))
    }

    /// Outbound request timeout, falling back to the default.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }
}
