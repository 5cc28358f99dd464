//! HTTP layer: endpoint map, request wrapper and response interpretation

pub mod client;
pub mod endpoints;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{AppError, AppResult};

pub use client::{merge_headers, ApiClient, RequestOptions};
pub use endpoints::Endpoints;

/// Status and parsed JSON body of a completed request
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub data: Value,
}

impl ApiResponse {
    /// HTTP 2xx
    pub fn is_ok(&self) -> bool {
        self.status.is_success()
    }

    /// Application-level `success` flag
    pub fn success(&self) -> bool {
        self.data.get("success").and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn message(&self) -> Option<String> {
        self.data
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    /// Interpret the body: success needs both a 2xx status and `success: true`
    pub fn into_outcome<T: DeserializeOwned>(mut self) -> ApiOutcome<T> {
        if !(self.is_ok() && self.success()) {
            return ApiOutcome::Rejected(self.message());
        }
        let payload = self
            .data
            .get_mut("data")
            .map(Value::take)
            .unwrap_or(Value::Null);
        match serde_json::from_value(payload) {
            Ok(payload) => ApiOutcome::Success(payload),
            Err(e) => {
                tracing::error!("Unexpected response payload: {}", e);
                ApiOutcome::Failed(AppError::InvalidJson(e))
            }
        }
    }
}

/// Result of one API call, as seen by a page controller
#[derive(Debug)]
pub enum ApiOutcome<T> {
    /// 2xx with `success: true`
    Success(T),
    /// The server refused the operation, with its message if any
    Rejected(Option<String>),
    /// HTTP 401; the session is already cleared and the user redirected
    Unauthorized,
    /// Transport or protocol failure
    Failed(AppError),
}

impl<T: DeserializeOwned> ApiOutcome<T> {
    /// Interpret the result of [`ApiClient::request`]
    pub fn from_request(result: AppResult<Option<ApiResponse>>) -> Self {
        match result {
            Ok(Some(response)) => response.into_outcome(),
            Ok(None) => ApiOutcome::Unauthorized,
            Err(e) => ApiOutcome::Failed(e),
        }
    }
}

impl<T> ApiOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ApiOutcome::Success(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiOutcome<U> {
        match self {
            ApiOutcome::Success(v) => ApiOutcome::Success(f(v)),
            ApiOutcome::Rejected(m) => ApiOutcome::Rejected(m),
            ApiOutcome::Unauthorized => ApiOutcome::Unauthorized,
            ApiOutcome::Failed(e) => ApiOutcome::Failed(e),
        }
    }

    pub fn into_result(self) -> AppResult<T> {
        match self {
            ApiOutcome::Success(v) => Ok(v),
            ApiOutcome::Rejected(m) => Err(AppError::Application(
                m.unwrap_or_else(|| "Unknown error".to_string()),
            )),
            ApiOutcome::Unauthorized => Err(AppError::Authentication(
                "please login again".to_string(),
            )),
            ApiOutcome::Failed(e) => Err(e),
        }
    }
}
