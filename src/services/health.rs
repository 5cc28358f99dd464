//! API health check

use crate::{
    api::{ApiClient, RequestOptions},
    models::envelope::HealthEnvelope,
};

/// Reachability of the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Healthy, with the service name if reported
    Healthy(Option<String>),
    Unhealthy,
    Unreachable(String),
}

#[derive(Clone)]
pub struct HealthService {
    client: ApiClient,
}

impl HealthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn check(&self) -> HealthStatus {
        let url = self.client.endpoints().health();
        let response = match self.client.fetch_public(url, RequestOptions::get()).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("API connection failed: {}", e);
                return HealthStatus::Unreachable(e.to_string());
            }
        };

        let ok = response.is_ok();
        match serde_json::from_value::<HealthEnvelope>(response.data) {
            Ok(health) if ok && health.success => {
                tracing::info!(service = health.service.as_deref().unwrap_or("unknown"), "API health check passed");
                HealthStatus::Healthy(health.service)
            }
            _ => {
                tracing::warn!("API health check failed");
                HealthStatus::Unhealthy
            }
        }
    }
}
