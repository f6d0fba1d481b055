mod history_api;
mod planner_api;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    api::API,
    config::Config,
    entities::{PlaceHistoryItem, RouteHistoryItem},
    external::{amap::AmapClient, RoutingBackend},
    history::{FileStore, HistoryStore, KeyValueStore},
    planner::{Notifier, RoutePlanner, TracingNotifier},
};

pub struct Engine {
    planner: RoutePlanner,
    route_history: Mutex<HistoryStore<RouteHistoryItem>>,
    place_history: Mutex<HistoryStore<PlaceHistoryItem>>,
}

impl Engine {
    pub fn new(
        backend: Arc<dyn RoutingBackend>,
        notifier: Arc<dyn Notifier>,
        storage: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            planner: RoutePlanner::new(backend, notifier),
            route_history: Mutex::new(HistoryStore::new(storage.clone())),
            place_history: Mutex::new(HistoryStore::new(storage)),
        }
    }

    #[tracing::instrument(name = "Engine::from_config", skip_all)]
    pub fn from_config(config: &Config) -> Self {
        tracing::info!(dir = %config.history_dir.display(), "using history directory");

        Self::new(
            Arc::new(AmapClient::from_config(config)),
            Arc::new(TracingNotifier),
            Arc::new(FileStore::new(&config.history_dir)),
        )
    }
}

impl API for Engine {}
