//! Response envelopes with fields beyond `{success, message?, data?}`

use serde::Deserialize;

use super::user::User;

/// Login response: the envelope plus a top-level bearer token
#[derive(Debug, Clone, Deserialize)]
pub struct LoginEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<User>,
    #[serde(default)]
    pub access_token: Option<String>,
}

/// Health endpoint payload
#[derive(Debug, Clone, Deserialize)]
pub struct HealthEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub service: Option<String>,
}
