//! Request gate configuration.

use serde::{Deserialize, Serialize};

/// Paths used by the request-level session gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// Paths starting with this literal prefix require a session cookie.
    #[serde(default = "default_protected_prefix")]
    pub protected_prefix: String,
    /// Where signed-in visitors of the public root are sent.
    #[serde(default = "default_protected_root")]
    pub protected_root: String,
    /// The public landing path; also the redirect target for anonymous visitors.
    #[serde(default = "default_public_root")]
    pub public_root: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            protected_prefix: default_protected_prefix(),
            protected_root: default_protected_root(),
            public_root: default_public_root(),
        }
    }
}

fn default_protected_prefix() -> String {
    "/dashboard".to_string()
}

fn default_protected_root() -> String {
    "/dashboard".to_string()
}

fn default_public_root() -> String {
    "/".to_string()
}
