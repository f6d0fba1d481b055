mod notify;
mod state;

pub use notify::{Notifier, TracingNotifier};
pub use state::{SelectionUpdate, SessionState, SessionStatus, StrategyTab};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

use crate::{
    entities::{RouteError, RouteRequestParams, RouteResult, TravelMode},
    external::{BackendError, BackendResponse, BackendStatus, RoutingBackend},
};

const FALLBACK_FAILURE: &str = "route planning failed";

pub struct RoutePlanner {
    backend: Arc<dyn RoutingBackend>,
    notifier: Arc<dyn Notifier>,
    state: watch::Sender<SessionState>,
    issued: AtomicU64,
}

impl RoutePlanner {
    pub fn new(backend: Arc<dyn RoutingBackend>, notifier: Arc<dyn Notifier>) -> Self {
        let (state, _) = watch::channel(SessionState::default());

        Self {
            backend,
            notifier,
            state,
            issued: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn update_selection(&self, update: SelectionUpdate) -> SessionState {
        self.state.send_modify(|state| update.apply(state));
        self.snapshot()
    }

    /// Only the latest issued call writes the session state; an older call still
    /// returns its result to its caller.
    #[tracing::instrument(skip(self, params), fields(mode = params.mode.name()))]
    pub async fn plan(&self, params: RouteRequestParams) -> Option<RouteResult> {
        let mode = params.mode;
        let mut seq = 0;

        // numbered under the channel lock so the recorded params belong to the latest call
        self.state.send_modify(|state| {
            seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
            state.params = Some(params.clone());
            state.status = SessionStatus::Loading;
            state.selected_plan = 0;
            state.expanded_step = None;
        });

        match self.dispatch(&params).await {
            Ok(BackendResponse {
                status: BackendStatus::Success,
                data: Some(result),
                ..
            }) => {
                let status = SessionStatus::Success {
                    result: result.clone(),
                };
                if self.settle(seq, status) {
                    self.notifier
                        .success(&format!("{} route planned", mode.label()));
                }
                Some(result)
            }
            Ok(BackendResponse {
                status: BackendStatus::Success,
                data: None,
                ..
            }) => {
                self.fail(seq, "routing service returned no route");
                None
            }
            Ok(response) => {
                let error = response
                    .error
                    .unwrap_or_else(|| RouteError::new(FALLBACK_FAILURE));
                tracing::warn!(
                    code = ?error.code,
                    status = ?response.status,
                    "routing backend rejected request: {}",
                    error.message
                );

                self.settle(
                    seq,
                    SessionStatus::Error {
                        result: response.data.clone(),
                        error,
                    },
                );
                response.data
            }
            Err(err) => {
                tracing::error!("route planning failed: {}", err);
                self.fail(seq, &err.to_string());
                None
            }
        }
    }

    async fn dispatch(&self, params: &RouteRequestParams) -> Result<BackendResponse, BackendError> {
        let origin = &params.origin;
        let destination = &params.destination;

        match params.mode {
            TravelMode::Driving => {
                let waypoints = params.waypoints.as_deref().unwrap_or_default();
                self.backend
                    .driving(origin, destination, waypoints, params.strategy)
                    .await
            }
            TravelMode::Walking => self.backend.walking(origin, destination).await,
            TravelMode::Transit => self.backend.transit(origin, destination).await,
            TravelMode::Riding => self.backend.riding(origin, destination).await,
            TravelMode::Electric => self.backend.electric(origin, destination).await,
        }
    }

    fn fail(&self, seq: u64, message: &str) {
        let message = if message.trim().is_empty() {
            FALLBACK_FAILURE
        } else {
            message
        };

        let status = SessionStatus::Error {
            result: None,
            error: RouteError::new(message),
        };
        if self.settle(seq, status) {
            self.notifier
                .error(&format!("Route planning failed: {}", message));
        }
    }

    fn settle(&self, seq: u64, status: SessionStatus) -> bool {
        let applied = self.state.send_if_modified(|state| {
            if self.issued.load(Ordering::SeqCst) != seq {
                return false;
            }
            state.status = status;
            true
        });

        if !applied {
            tracing::debug!(seq, "discarding stale route response");
        }

        applied
    }
}
