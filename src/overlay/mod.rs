mod style;
mod surface;

pub use style::{
    mode_color, Padding, PathStyle, FIT_VIEW_PADDING, LINE_CAP, LINE_JOIN, STROKE_OPACITY,
    STROKE_STYLE, STROKE_WEIGHT,
};
pub use surface::{EngineError, MapEngine, MapSurface, NativeLngLat, OverlayHandle};

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use crate::{
    entities::{RoutePosition, TravelMode},
    planner::{SessionState, SessionStatus},
};

pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(500);

#[derive(Clone, Debug, PartialEq)]
pub struct RouteOverlay {
    pub polyline: Vec<RoutePosition>,
    pub mode: TravelMode,
    pub visible: bool,
}

impl RouteOverlay {
    pub fn new(polyline: Vec<RoutePosition>, mode: TravelMode, visible: bool) -> Self {
        Self {
            polyline,
            mode,
            visible,
        }
    }

    pub fn hidden() -> Self {
        Self::new(Vec::new(), TravelMode::Driving, false)
    }

    /// The selected plan of a successful session; hidden otherwise.
    pub fn from_session(state: &SessionState) -> Self {
        let visible = matches!(state.status, SessionStatus::Success { .. });
        let polyline = state
            .selected_result()
            .map(|result| result.polyline.clone())
            .unwrap_or_default();

        Self::new(polyline, state.mode().unwrap_or(TravelMode::Driving), visible)
    }

    fn wants_draw(&self) -> bool {
        self.visible && !self.polyline.is_empty()
    }
}

#[derive(Clone)]
pub struct OverlayRenderer {
    inner: Arc<Inner>,
}

struct Inner {
    surface: Arc<MapSurface>,
    retry_delay: Duration,
    state: Mutex<RenderState>,
}

#[derive(Default)]
struct RenderState {
    overlay: Option<OverlayHandle>,
    retry: Option<JoinHandle<()>>,
    generation: u64,
}

impl OverlayRenderer {
    pub fn new(surface: Arc<MapSurface>, retry_delay: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                surface,
                retry_delay,
                state: Mutex::new(RenderState::default()),
            }),
        }
    }

    pub async fn overlay(&self) -> Option<OverlayHandle> {
        self.inner.state.lock().await.overlay
    }

    #[tracing::instrument(skip_all, fields(mode = overlay.mode.name(), points = overlay.polyline.len(), visible = overlay.visible))]
    pub async fn update(&self, overlay: RouteOverlay) {
        let mut state = self.inner.state.lock().await;

        state.cancel_retry();
        state.generation += 1;
        self.inner.clear(&mut state);

        if !overlay.wants_draw() {
            return;
        }

        match self.inner.surface.current() {
            Some(engine) => self.inner.draw(&mut state, engine.as_ref(), &overlay),
            None => {
                tracing::debug!(delay = ?self.inner.retry_delay, "map engine not ready, deferring draw");
                let retry = Inner::schedule_retry(&self.inner, state.generation, overlay);
                state.retry = Some(retry);
            }
        }
    }

    pub async fn teardown(&self) {
        let mut state = self.inner.state.lock().await;

        state.cancel_retry();
        state.generation += 1;
        self.inner.clear(&mut state);
    }

    pub fn follow(&self, mut session: watch::Receiver<SessionState>) -> JoinHandle<()> {
        let renderer = self.clone();

        tokio::spawn(async move {
            let mut shown: Option<RouteOverlay> = None;

            loop {
                let overlay = RouteOverlay::from_session(&session.borrow_and_update());
                if shown.as_ref() != Some(&overlay) {
                    renderer.update(overlay.clone()).await;
                    shown = Some(overlay);
                }

                if session.changed().await.is_err() {
                    break;
                }
            }
        })
    }
}

impl RenderState {
    fn cancel_retry(&mut self) {
        if let Some(retry) = self.retry.take() {
            retry.abort();
        }
    }
}

impl Inner {
    /// Tries again every retry delay until a ready engine is found. Mounting a ready
    /// engine wakes the task early.
    fn schedule_retry(this: &Arc<Self>, generation: u64, overlay: RouteOverlay) -> JoinHandle<()> {
        let weak: Weak<Inner> = Arc::downgrade(this);
        let surface = this.surface.clone();
        let delay = this.retry_delay;

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    _ = surface.ready() => {}
                }

                if surface.is_ready() || weak.strong_count() == 0 {
                    break;
                }
                tracing::trace!(delay = ?delay, "map engine still not ready");
            }

            let inner = match weak.upgrade() {
                Some(inner) => inner,
                None => return,
            };

            let mut state = inner.state.lock().await;
            if state.generation != generation {
                return;
            }
            state.retry = None;

            match inner.surface.current() {
                Some(engine) => inner.draw(&mut state, engine.as_ref(), &overlay),
                None => tracing::debug!("map engine went away before deferred draw"),
            }
        })
    }

    fn draw(&self, state: &mut RenderState, engine: &dyn MapEngine, overlay: &RouteOverlay) {
        match render_path(engine, &overlay.polyline, overlay.mode) {
            Ok(handle) => {
                tracing::debug!(overlay = handle.0, "route overlay drawn");
                state.overlay = Some(handle);
            }
            Err(err) => tracing::debug!("failed to draw route overlay: {}", err),
        }
    }

    fn clear(&self, state: &mut RenderState) {
        if let Some(handle) = state.overlay.take() {
            if let Some(engine) = self.surface.engine() {
                engine.remove(&handle);
            }
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        let state = self.state.get_mut();
        state.cancel_retry();

        if let Some(handle) = state.overlay.take() {
            if let Some(engine) = self.surface.engine() {
                engine.remove(&handle);
            }
        }
    }
}

fn render_path(
    engine: &dyn MapEngine,
    polyline: &[RoutePosition],
    mode: TravelMode,
) -> Result<OverlayHandle, EngineError> {
    let path = polyline
        .iter()
        .map(|position| engine.lng_lat(position.lng, position.lat))
        .collect::<Result<Vec<_>, _>>()?;

    let overlay = engine.create_path(path, &PathStyle::for_mode(mode))?;
    engine.add(&overlay)?;

    if let Err(err) = engine.set_fit_view(std::slice::from_ref(&overlay), FIT_VIEW_PADDING) {
        engine.remove(&overlay);
        return Err(err);
    }

    Ok(overlay)
}
