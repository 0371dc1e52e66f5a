//! Client-side core of a member and employment portal.
//!
//! Holds the session store and the workflow state machines (admin login,
//! two-step member login, and the verify/select/confirm employment
//! registration flow) behind ports to a hosted Remote Data Service and to
//! durable client-local storage. Presentation is a caller concern; every
//! operation here returns typed results carrying the human-facing message
//! for its failure mode.

pub mod config;
pub mod domain;
pub mod outbound;

pub use config::PortalSettings;
