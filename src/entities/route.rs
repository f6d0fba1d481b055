use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entities::{RoutePoint, RoutePosition};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    Driving,
    Walking,
    Transit,
    Riding,
    Electric,
}

impl TravelMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::Walking => "walking",
            Self::Transit => "transit",
            Self::Riding => "riding",
            Self::Electric => "electric",
        }
    }

    /// Human readable label used in user notifications.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Driving => "Driving",
            Self::Walking => "Walking",
            Self::Transit => "Transit",
            Self::Riding => "Cycling",
            Self::Electric => "E-bike",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Strategy {
    Fastest,
    Shortest,
    AvoidHighway,
    AvoidCongestion,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteRequestParams {
    pub mode: TravelMode,
    pub origin: RoutePoint,
    pub destination: RoutePoint,
    // honored by driving only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waypoints: Option<Vec<RoutePoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Strategy>,
}

impl RouteRequestParams {
    pub fn new(mode: TravelMode, origin: RoutePoint, destination: RoutePoint) -> Self {
        Self {
            mode,
            origin,
            destination,
            waypoints: None,
            strategy: None,
        }
    }
}

/// Plan 0 is the result itself; plan `i > 0` is `alternatives[i - 1]`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub polyline: Vec<RoutePosition>,
    /// meters
    pub distance: f64,
    /// seconds
    pub duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolls: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<RouteStep>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<RouteResult>,
}

impl RouteResult {
    pub fn plan_count(&self) -> usize {
        1 + self.alternatives.len()
    }

    pub fn plan(&self, index: usize) -> Option<&RouteResult> {
        match index {
            0 => Some(self),
            i => self.alternatives.get(i - 1),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    pub instruction: String,
    pub distance: f64,
    pub duration: f64,
    pub polyline: Vec<RoutePosition>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl RouteError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            details: None,
        }
    }
}
