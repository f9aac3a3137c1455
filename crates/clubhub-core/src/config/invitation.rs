//! Invitation configuration.

use serde::{Deserialize, Serialize};

/// Invitation issuing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvitationConfig {
    /// Days an invitation stays redeemable.
    #[serde(default = "default_ttl_days")]
    pub ttl_days: i64,
    /// Number of random bytes in a generated token.
    #[serde(default = "default_token_bytes")]
    pub token_bytes: usize,
}

impl Default for InvitationConfig {
    fn default() -> Self {
        Self {
            ttl_days: default_ttl_days(),
            token_bytes: default_token_bytes(),
        }
    }
}

fn default_ttl_days() -> i64 {
    7
}

fn default_token_bytes() -> usize {
    32
}
