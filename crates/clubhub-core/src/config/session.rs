//! Session cookie configuration.

use serde::{Deserialize, Serialize};

/// Name of the cookie carrying the session token.
pub const DEFAULT_COOKIE_NAME: &str = "club-session";

/// Session cookie configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Cookie name.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Session lifetime in days. Also used for the cookie `Max-Age`.
    #[serde(default = "default_ttl_days")]
    pub ttl_days: i64,
    /// Set the `Secure` attribute on the cookie (enable in production).
    #[serde(default)]
    pub secure_cookie: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            ttl_days: default_ttl_days(),
            secure_cookie: false,
        }
    }
}

impl SessionConfig {
    /// Session lifetime in seconds.
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_days * 24 * 60 * 60
    }
}

fn default_cookie_name() -> String {
    DEFAULT_COOKIE_NAME.to_string()
}

fn default_ttl_days() -> i64 {
    7
}
