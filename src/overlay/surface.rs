use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;

use super::style::{Padding, PathStyle};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("map engine error: {0}")]
    Engine(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct NativeLngLat {
    pub lng: f64,
    pub lat: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct OverlayHandle(pub u64);

pub trait MapEngine: Send + Sync {
    fn is_ready(&self) -> bool;

    fn lng_lat(&self, lng: f64, lat: f64) -> Result<NativeLngLat, EngineError>;

    fn create_path(
        &self,
        path: Vec<NativeLngLat>,
        style: &PathStyle,
    ) -> Result<OverlayHandle, EngineError>;

    fn add(&self, overlay: &OverlayHandle) -> Result<(), EngineError>;

    /// Must tolerate overlays that are already gone.
    fn remove(&self, overlay: &OverlayHandle);

    fn set_fit_view(&self, overlays: &[OverlayHandle], padding: Padding)
        -> Result<(), EngineError>;
}

/// Shared slot the map engine is mounted into. Readiness is asked of the engine
/// whenever it is looked up.
pub struct MapSurface {
    engine: watch::Sender<Option<Arc<dyn MapEngine>>>,
}

impl Default for MapSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MapSurface {
    pub fn new() -> Self {
        let (engine, _) = watch::channel(None);
        Self { engine }
    }

    pub fn install(&self, engine: Arc<dyn MapEngine>) {
        tracing::debug!(ready = engine.is_ready(), "map engine mounted");
        self.engine.send_replace(Some(engine));
    }

    pub fn uninstall(&self) -> Option<Arc<dyn MapEngine>> {
        tracing::debug!("map engine unmounted");
        self.engine.send_replace(None)
    }

    pub fn engine(&self) -> Option<Arc<dyn MapEngine>> {
        self.engine.borrow().clone()
    }

    pub fn current(&self) -> Option<Arc<dyn MapEngine>> {
        self.engine().filter(|engine| engine.is_ready())
    }

    pub fn is_ready(&self) -> bool {
        self.current().is_some()
    }

    /// Resolves once a mounted engine is ready. Only mounting wakes it, so an engine
    /// that turns ready later is noticed by polling `is_ready`.
    pub async fn ready(&self) {
        let mut rx = self.engine.subscribe();

        loop {
            let ready = rx
                .borrow_and_update()
                .as_ref()
                .map_or(false, |engine| engine.is_ready());
            if ready || rx.changed().await.is_err() {
                return;
            }
        }
    }
}
