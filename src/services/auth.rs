//! Authentication service
//!
//! Login and registration bypass the session wrapper: no token is sent and a
//! 401 is an ordinary rejection (wrong password), not a logout.

use serde::de::IgnoredAny;
use validator::Validate;

use crate::{
    api::{ApiClient, ApiOutcome, RequestOptions},
    error::AppError,
    models::{
        envelope::LoginEnvelope,
        user::{LoginRequest, RegisterRequest},
    },
    session::Session,
};

#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Exchange credentials for a session; the session is not stored here
    pub async fn login(&self, request: &LoginRequest) -> ApiOutcome<Session> {
        if let Err(e) = request.validate() {
            return ApiOutcome::Failed(e.into());
        }
        let options = match RequestOptions::post_json(request) {
            Ok(options) => options,
            Err(e) => return ApiOutcome::Failed(e),
        };

        let response = match self.client.fetch_public(self.client.endpoints().login(), options).await {
            Ok(response) => response,
            Err(e) => return ApiOutcome::Failed(e),
        };
        let ok = response.is_ok();
        let envelope: LoginEnvelope = match serde_json::from_value(response.data) {
            Ok(envelope) => envelope,
            Err(e) => return ApiOutcome::Failed(AppError::InvalidJson(e)),
        };

        match (ok && envelope.success, envelope.data, envelope.access_token) {
            (true, Some(user), Some(token)) => {
                tracing::info!(user_id = user.id, role = %user.role, "Login succeeded");
                ApiOutcome::Success(Session { user, token })
            }
            (true, _, _) => ApiOutcome::Rejected(Some(
                "Server response is missing user or token".to_string(),
            )),
            (false, _, _) => {
                tracing::warn!("Login rejected");
                ApiOutcome::Rejected(envelope.message)
            }
        }
    }

    pub async fn register(&self, request: &RegisterRequest) -> ApiOutcome<IgnoredAny> {
        if let Err(e) = request.validate() {
            return ApiOutcome::Failed(e.into());
        }
        let options = match RequestOptions::post_json(request) {
            Ok(options) => options,
            Err(e) => return ApiOutcome::Failed(e),
        };
        match self.client.fetch_public(self.client.endpoints().register(), options).await {
            Ok(response) => response.into_outcome(),
            Err(e) => ApiOutcome::Failed(e),
        }
    }
}
