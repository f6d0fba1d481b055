#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use wayfarer::entities::{RoutePoint, RoutePosition, RouteResult, Strategy};
use wayfarer::external::{BackendError, BackendResponse, RoutingBackend};
use wayfarer::overlay::{EngineError, MapEngine, NativeLngLat, OverlayHandle, Padding, PathStyle};
use wayfarer::planner::Notifier;

pub type Outcome = Result<BackendResponse, BackendError>;

/// Answers every mode from one queue of canned outcomes.
#[derive(Default)]
pub struct ScriptedBackend {
    outcomes: Mutex<VecDeque<Outcome>>,
}

impl ScriptedBackend {
    pub fn with(outcomes: Vec<Outcome>) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes.into()),
        })
    }

    fn next(&self) -> Outcome {
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::Other("no scripted outcome".into())))
    }
}

#[async_trait]
impl RoutingBackend for ScriptedBackend {
    async fn driving(
        &self,
        _: &RoutePoint,
        _: &RoutePoint,
        _: &[RoutePoint],
        _: Option<Strategy>,
    ) -> Outcome {
        self.next()
    }

    async fn walking(&self, _: &RoutePoint, _: &RoutePoint) -> Outcome {
        self.next()
    }

    async fn transit(&self, _: &RoutePoint, _: &RoutePoint) -> Outcome {
        self.next()
    }

    async fn riding(&self, _: &RoutePoint, _: &RoutePoint) -> Outcome {
        self.next()
    }

    async fn electric(&self, _: &RoutePoint, _: &RoutePoint) -> Outcome {
        self.next()
    }
}

#[derive(Default)]
pub struct Toasts {
    pub successes: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<String>>,
}

impl Notifier for Toasts {
    fn success(&self, message: &str) {
        self.successes.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Path { id: u64, color: &'static str },
    Add(u64),
    Remove(u64),
    FitView(Vec<u64>, Padding),
}

/// A map engine that is always ready and records what it was asked to do.
#[derive(Default)]
pub struct FakeMap {
    next_id: AtomicU64,
    calls: Mutex<Vec<Call>>,
}

impl FakeMap {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl MapEngine for FakeMap {
    fn is_ready(&self) -> bool {
        true
    }

    fn lng_lat(&self, lng: f64, lat: f64) -> Result<NativeLngLat, EngineError> {
        Ok(NativeLngLat { lng, lat })
    }

    fn create_path(
        &self,
        _path: Vec<NativeLngLat>,
        style: &PathStyle,
    ) -> Result<OverlayHandle, EngineError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.calls.lock().unwrap().push(Call::Path {
            id,
            color: style.stroke_color,
        });
        Ok(OverlayHandle(id))
    }

    fn add(&self, overlay: &OverlayHandle) -> Result<(), EngineError> {
        self.calls.lock().unwrap().push(Call::Add(overlay.0));
        Ok(())
    }

    fn remove(&self, overlay: &OverlayHandle) {
        self.calls.lock().unwrap().push(Call::Remove(overlay.0));
    }

    fn set_fit_view(&self, overlays: &[OverlayHandle], padding: Padding) -> Result<(), EngineError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::FitView(overlays.iter().map(|o| o.0).collect(), padding));
        Ok(())
    }
}

pub fn driving_result() -> RouteResult {
    RouteResult {
        polyline: vec![
            RoutePosition::new(116.397, 39.908),
            RoutePosition::new(116.405, 39.915),
            RoutePosition::new(116.412, 39.921),
        ],
        distance: 2400.0,
        duration: 540.0,
        ..Default::default()
    }
}
