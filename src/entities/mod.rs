mod history;
mod point;
mod route;

pub use history::{stable_id, PlaceHistoryItem, PlaceQuery, RouteHistoryItem, RouteQuery};
pub use point::{RoutePoint, RoutePosition};
pub use route::{RouteError, RouteRequestParams, RouteResult, RouteStep, Strategy, TravelMode};
