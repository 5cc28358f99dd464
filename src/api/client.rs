//! Request wrapper shared by every page
//!
//! Attaches the bearer token, parses JSON and turns a 401 into a logout:
//! the session is cleared, the user is told and sent to the login view, and
//! the caller gets `None`.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use super::{ApiOutcome, ApiResponse, Endpoints};
use crate::config::ApiConfig;
use crate::error::{AppError, AppResult};
use crate::session::SessionProvider;
use crate::ui::{Dialogs, Navigator, View};

/// Method, extra headers and body of one request
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn delete() -> Self {
        Self {
            method: Method::DELETE,
            ..Self::default()
        }
    }

    /// PUT without a body
    pub fn put() -> Self {
        Self {
            method: Method::PUT,
            ..Self::default()
        }
    }

    pub fn post_json<B: Serialize>(body: &B) -> AppResult<Self> {
        Self::json(Method::POST, body)
    }

    pub fn put_json<B: Serialize>(body: &B) -> AppResult<Self> {
        Self::json(Method::PUT, body)
    }

    fn json<B: Serialize>(method: Method, body: &B) -> AppResult<Self> {
        let body = serde_json::to_string(body)
            .map_err(|e| AppError::Internal(format!("Failed to encode request body: {}", e)))?;
        Ok(Self {
            method,
            headers: HeaderMap::new(),
            body: Some(body),
        })
    }

    /// Add a caller header; it overrides the wrapper defaults
    pub fn header(mut self, name: &str, value: &str) -> AppResult<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| AppError::Validation(format!("Invalid header name {}: {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| AppError::Validation(format!("Invalid header value: {}", e)))?;
        self.headers.append(name, value);
        Ok(self)
    }
}

/// Default headers plus the caller's; caller headers win on conflict
pub fn merge_headers(token: Option<&str>, caller: &HeaderMap) -> AppResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(token) = token {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| AppError::Internal(format!("Stored token is not a valid header: {}", e)))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }
    for name in caller.keys() {
        headers.remove(name);
    }
    for (name, value) in caller {
        headers.append(name.clone(), value.clone());
    }
    Ok(headers)
}

/// Client for the BookNest REST API
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    endpoints: Endpoints,
    session: SessionProvider,
    dialogs: Arc<dyn Dialogs>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        config: &ApiConfig,
        session: SessionProvider,
        dialogs: Arc<dyn Dialogs>,
        navigator: Arc<dyn Navigator>,
    ) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("booknest-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoints: Endpoints::new(&config.base_url)?,
            session,
            dialogs,
            navigator,
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn session(&self) -> &SessionProvider {
        &self.session
    }

    /// Send a request with the stored token and handle an expired session.
    ///
    /// Returns `Ok(None)` after a 401. Transport failures and non-JSON
    /// bodies are errors; nothing is retried.
    pub async fn request(&self, url: Url, options: RequestOptions) -> AppResult<Option<ApiResponse>> {
        let token = self.session.token();
        let (status, parsed) = self.send(url, options, token.as_deref()).await?;

        if status == StatusCode::UNAUTHORIZED {
            warn!("Authentication failed, clearing stored session");
            if let Err(e) = self.session.clear_session() {
                error!("Failed to clear session: {}", e);
            }
            let server_message = parsed
                .as_ref()
                .ok()
                .and_then(|data| data.get("message"))
                .and_then(Value::as_str);
            let notice = match server_message {
                Some(message) => format!("Authentication failed: {}", message),
                None => "Authentication failed, please login again".to_string(),
            };
            self.dialogs.error(&notice).await;
            self.navigator.navigate(View::Account);
            return Ok(None);
        }

        let data = parsed.map_err(AppError::InvalidJson)?;
        Ok(Some(ApiResponse { status, data }))
    }

    /// [`request`](Self::request), interpreted as an [`ApiOutcome`]
    pub async fn call<T: DeserializeOwned>(&self, url: Url, options: RequestOptions) -> ApiOutcome<T> {
        ApiOutcome::from_request(self.request(url, options).await)
    }

    /// [`call`](Self::call) for list endpoints; a null or missing `data` is an empty list
    pub async fn call_list<T: DeserializeOwned>(&self, url: Url, options: RequestOptions) -> ApiOutcome<Vec<T>> {
        self.call::<Option<Vec<T>>>(url, options)
            .await
            .map(Option::unwrap_or_default)
    }

    /// Send without the stored token and without the 401 logout
    pub async fn fetch_public(&self, url: Url, options: RequestOptions) -> AppResult<ApiResponse> {
        let (status, parsed) = self.send(url, options, None).await?;
        let data = parsed.map_err(AppError::InvalidJson)?;
        Ok(ApiResponse { status, data })
    }

    async fn send(
        &self,
        url: Url,
        options: RequestOptions,
        token: Option<&str>,
    ) -> AppResult<(StatusCode, Result<Value, serde_json::Error>)> {
        let headers = merge_headers(token, &options.headers)?;
        debug!(
            method = %options.method,
            url = %url,
            token_present = token.is_some(),
            has_body = options.body.is_some(),
            "API request"
        );

        let mut request = self.http.request(options.method, url).headers(headers);
        if let Some(body) = options.body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|e| {
            error!("API request failed: {}", e);
            AppError::Network(e)
        })?;
        let status = response.status();
        let text = response.text().await?;
        debug!(status = %status, "API response");

        let parsed = serde_json::from_str::<Value>(&text);
        if let Err(e) = &parsed {
            let preview: String = text.chars().take(200).collect();
            error!(status = %status, body = %preview, "Failed to parse JSON response: {}", e);
        }
        Ok((status, parsed))
    }
}
