pub mod amap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::{RouteError, RoutePoint, RouteResult, Strategy};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendStatus {
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackendResponse {
    pub status: BackendStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<RouteResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RouteError>,
}

impl BackendResponse {
    pub fn success(data: RouteResult) -> Self {
        Self {
            status: BackendStatus::Success,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: RouteError) -> Self {
        Self {
            status: BackendStatus::Error,
            data: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("routing service responded with HTTP {0}")]
    HttpStatus(u16),
    #[error("malformed routing response: {0}")]
    DecodeError(#[from] serde_json::Error),
    #[error("{0}")]
    Other(String),
}

/// One call per travel mode. Only driving takes waypoints and a strategy.
#[async_trait]
pub trait RoutingBackend: Send + Sync {
    async fn driving(
        &self,
        origin: &RoutePoint,
        destination: &RoutePoint,
        waypoints: &[RoutePoint],
        strategy: Option<Strategy>,
    ) -> Result<BackendResponse, BackendError>;

    async fn walking(
        &self,
        origin: &RoutePoint,
        destination: &RoutePoint,
    ) -> Result<BackendResponse, BackendError>;

    async fn transit(
        &self,
        origin: &RoutePoint,
        destination: &RoutePoint,
    ) -> Result<BackendResponse, BackendError>;

    async fn riding(
        &self,
        origin: &RoutePoint,
        destination: &RoutePoint,
    ) -> Result<BackendResponse, BackendError>;

    async fn electric(
        &self,
        origin: &RoutePoint,
        destination: &RoutePoint,
    ) -> Result<BackendResponse, BackendError>;
}
