use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{
    PlaceHistoryItem, PlaceQuery, RouteHistoryItem, RouteQuery, RouteRequestParams,
};
use crate::error::Error;
use crate::planner::{SelectionUpdate, SessionState};

#[async_trait]
pub trait PlannerAPI {
    async fn plan_route(&self, params: RouteRequestParams) -> Result<SessionState, Error>;
    async fn find_session(&self) -> Result<SessionState, Error>;
    async fn update_selection(&self, update: SelectionUpdate) -> Result<SessionState, Error>;
}

#[async_trait]
pub trait HistoryAPI {
    async fn list_route_history(&self) -> Result<Vec<RouteHistoryItem>, Error>;
    async fn add_route_history(&self, query: RouteQuery) -> Result<Vec<RouteHistoryItem>, Error>;
    async fn remember_session_route(&self) -> Result<Vec<RouteHistoryItem>, Error>;
    async fn remove_route_history(&self, id: Uuid) -> Result<Vec<RouteHistoryItem>, Error>;
    async fn clear_route_history(&self) -> Result<(), Error>;

    async fn list_place_history(&self) -> Result<Vec<PlaceHistoryItem>, Error>;
    async fn add_place_history(&self, query: PlaceQuery) -> Result<Vec<PlaceHistoryItem>, Error>;
    async fn remove_place_history(&self, id: Uuid) -> Result<Vec<PlaceHistoryItem>, Error>;
    async fn clear_place_history(&self) -> Result<(), Error>;
}

pub trait API: PlannerAPI + HistoryAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
