use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{
    HistoryEntry, PLACE_HISTORY_CAPACITY, PLACE_HISTORY_KEY, ROUTE_HISTORY_CAPACITY,
    ROUTE_HISTORY_KEY,
};
use crate::entities::{PlaceHistoryItem, RouteHistoryItem};

impl HistoryEntry for RouteHistoryItem {
    const STORAGE_KEY: &'static str = ROUTE_HISTORY_KEY;
    const CAPACITY: usize = ROUTE_HISTORY_CAPACITY;

    fn id(&self) -> Uuid {
        self.id
    }

    fn is_blank(&self) -> bool {
        self.origin_text.trim().is_empty() || self.dest_text.trim().is_empty()
    }

    fn same_query(&self, other: &Self) -> bool {
        // both endpoints resolved on both sides: coordinates decide, otherwise text does
        match (self.locations(), other.locations()) {
            (Some((origin, dest)), Some((other_origin, other_dest))) => {
                origin.same_position(other_origin) && dest.same_position(other_dest)
            }
            _ => {
                self.origin_text.trim() == other.origin_text.trim()
                    && self.dest_text.trim() == other.dest_text.trim()
            }
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.origin_text = self.origin_text.trim().to_string();
        self.dest_text = self.dest_text.trim().to_string();
        self.id = RouteHistoryItem::stable_id(&self.origin_text, &self.dest_text);
        self.updated_at = now;
    }
}

impl HistoryEntry for PlaceHistoryItem {
    const STORAGE_KEY: &'static str = PLACE_HISTORY_KEY;
    const CAPACITY: usize = PLACE_HISTORY_CAPACITY;

    fn id(&self) -> Uuid {
        self.id
    }

    fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
    }

    fn same_query(&self, other: &Self) -> bool {
        match (&self.location, &other.location) {
            (Some(location), Some(other_location)) => location.same_position(other_location),
            _ => {
                self.name.trim() == other.name.trim()
                    && self.address.as_deref().map(str::trim)
                        == other.address.as_deref().map(str::trim)
            }
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.name = self.name.trim().to_string();
        self.address = self
            .address
            .take()
            .map(|address| address.trim().to_string())
            .filter(|address| !address.is_empty());
        self.id = PlaceHistoryItem::stable_id(&self.name, self.address.as_deref());
        self.updated_at = now;
    }
}
