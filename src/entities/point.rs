use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub lng: f64,
    pub lat: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RoutePoint {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self {
            lng,
            lat,
            name: None,
        }
    }

    pub fn named(lng: f64, lat: f64, name: impl Into<String>) -> Self {
        Self {
            lng,
            lat,
            name: Some(name.into()),
        }
    }

    pub fn same_position(&self, other: &RoutePoint) -> bool {
        self.lng == other.lng && self.lat == other.lat
    }

    /// Formats the point the way direction services expect it: "lng,lat".
    pub fn to_query(&self) -> String {
        format!("{},{}", self.lng, self.lat)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoutePosition {
    pub lng: f64,
    pub lat: f64,
}

impl RoutePosition {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}
