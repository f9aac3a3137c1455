//! Binary redirect policy applied before any handler runs.
//!
//! Only the presence of a session cookie is considered. Whether the token
//! is still valid is decided later, when the actor is resolved.

use clubhub_core::config::gate::GateConfig;

/// What the session gate wants done with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Continue to the handler.
    Allow,
    /// Anonymous visitor of the protected area: send to the public root.
    RedirectToPublic,
    /// Signed-in visitor of the public root: send to the protected root.
    RedirectToProtected,
}

/// Decides redirects from the request path and cookie presence.
#[derive(Debug, Clone)]
pub struct SessionGate {
    protected_prefix: String,
    protected_root: String,
    public_root: String,
}

impl SessionGate {
    /// Creates a gate from configuration.
    pub fn new(config: &GateConfig) -> Self {
        Self {
            protected_prefix: config.protected_prefix.clone(),
            protected_root: config.protected_root.clone(),
            public_root: config.public_root.clone(),
        }
    }

    /// Decide for `path`. `has_token` is true when the session cookie is present.
    pub fn decide(&self, path: &str, has_token: bool) -> GateDecision {
        if !has_token && path.starts_with(&self.protected_prefix) {
            GateDecision::RedirectToPublic
        } else if has_token && path == self.public_root {
            GateDecision::RedirectToProtected
        } else {
            GateDecision::Allow
        }
    }

    /// The location to redirect to, or `None` for `Allow`.
    pub fn location(&self, decision: GateDecision) -> Option<&str> {
        match decision {
            GateDecision::Allow => None,
            GateDecision::RedirectToPublic => Some(&self.public_root),
            GateDecision::RedirectToProtected => Some(&self.protected_root),
        }
    }
}

impl Default for SessionGate {
    fn default() -> Self {
        Self::new(&GateConfig::default())
    }
}
