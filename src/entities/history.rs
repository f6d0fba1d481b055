use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{RoutePoint, TravelMode};

/// Derives a stable identifier from normalized text: whitespace is stripped entirely,
/// so the same query typed twice always maps to the same id.
pub fn stable_id(key: &str) -> Uuid {
    let normalized: String = key.chars().filter(|c| !c.is_whitespace()).collect();
    Uuid::new_v5(&Uuid::NAMESPACE_OID, normalized.as_bytes())
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteHistoryItem {
    pub id: Uuid,
    pub origin_text: String,
    pub dest_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_location: Option<RoutePoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_location: Option<RoutePoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<TravelMode>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

impl RouteHistoryItem {
    pub fn stable_id(origin_text: &str, dest_text: &str) -> Uuid {
        stable_id(&format!("{}=>{}", origin_text.trim(), dest_text.trim()))
    }

    pub fn locations(&self) -> Option<(&RoutePoint, &RoutePoint)> {
        match (&self.origin_location, &self.dest_location) {
            (Some(origin), Some(dest)) => Some((origin, dest)),
            _ => None,
        }
    }
}

/// What a caller submits to the route history; id and timestamp are assigned on insert.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteQuery {
    pub origin_text: String,
    pub dest_text: String,
    #[serde(default)]
    pub origin_location: Option<RoutePoint>,
    #[serde(default)]
    pub dest_location: Option<RoutePoint>,
    #[serde(default)]
    pub mode: Option<TravelMode>,
}

impl From<RouteQuery> for RouteHistoryItem {
    fn from(query: RouteQuery) -> Self {
        Self {
            id: RouteHistoryItem::stable_id(&query.origin_text, &query.dest_text),
            origin_text: query.origin_text,
            dest_text: query.dest_text,
            origin_location: query.origin_location,
            dest_location: query.dest_location,
            mode: query.mode,
            updated_at: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceHistoryItem {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<RoutePoint>,
    /// Provider specific extras (poi type, district, ...) kept opaque.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

impl PlaceHistoryItem {
    pub fn stable_id(name: &str, address: Option<&str>) -> Uuid {
        stable_id(&format!(
            "{}@{}",
            name.trim(),
            address.map(str::trim).unwrap_or_default()
        ))
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceQuery {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub location: Option<RoutePoint>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl From<PlaceQuery> for PlaceHistoryItem {
    fn from(query: PlaceQuery) -> Self {
        Self {
            id: PlaceHistoryItem::stable_id(&query.name, query.address.as_deref()),
            name: query.name,
            address: query.address,
            location: query.location,
            metadata: query.metadata,
            updated_at: Utc::now(),
        }
    }
}
