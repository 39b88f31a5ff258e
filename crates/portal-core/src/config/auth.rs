//! Authentication configuration.
//!
//! Account creation, password handling, and session issuance live in the
//! external auth service; the portal only validates bearer tokens.

use serde::{Deserialize, Serialize};

/// Token validation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT validation (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Acceptable clock skew when validating token expiry, in seconds.
    #[serde(default = "default_leeway")]
    pub jwt_leeway_seconds: u64,
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_leeway() -> u64 {
    30
}
