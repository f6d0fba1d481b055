use super::Engine;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::HistoryAPI,
    entities::{PlaceHistoryItem, PlaceQuery, RouteHistoryItem, RoutePoint, RouteQuery},
    error::{invalid_state_error, not_found_error, Error},
    planner::SessionStatus,
};

#[async_trait]
impl HistoryAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn list_route_history(&self) -> Result<Vec<RouteHistoryItem>, Error> {
        Ok(self.route_history.lock().await.items().to_vec())
    }

    #[tracing::instrument(skip(self))]
    async fn add_route_history(&self, query: RouteQuery) -> Result<Vec<RouteHistoryItem>, Error> {
        let mut history = self.route_history.lock().await;
        history.add(query.into());

        Ok(history.items().to_vec())
    }

    /// Stores the request of the current session, once it has planned successfully.
    #[tracing::instrument(skip(self))]
    async fn remember_session_route(&self) -> Result<Vec<RouteHistoryItem>, Error> {
        let session = self.planner.snapshot();

        let params = match (&session.status, session.params) {
            (SessionStatus::Success { .. }, Some(params)) => params,
            _ => {
                tracing::info!(status = session.status.name(), "no planned route to remember");
                return Err(invalid_state_error());
            }
        };

        let query = RouteQuery {
            origin_text: display_text(&params.origin),
            dest_text: display_text(&params.destination),
            origin_location: Some(params.origin),
            dest_location: Some(params.destination),
            mode: Some(params.mode),
        };

        self.add_route_history(query).await
    }

    #[tracing::instrument(skip(self))]
    async fn remove_route_history(&self, id: Uuid) -> Result<Vec<RouteHistoryItem>, Error> {
        let mut history = self.route_history.lock().await;
        if !history.remove(id) {
            return Err(not_found_error());
        }

        Ok(history.items().to_vec())
    }

    #[tracing::instrument(skip(self))]
    async fn clear_route_history(&self) -> Result<(), Error> {
        self.route_history.lock().await.clear();
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn list_place_history(&self) -> Result<Vec<PlaceHistoryItem>, Error> {
        Ok(self.place_history.lock().await.items().to_vec())
    }

    #[tracing::instrument(skip(self))]
    async fn add_place_history(&self, query: PlaceQuery) -> Result<Vec<PlaceHistoryItem>, Error> {
        let mut history = self.place_history.lock().await;
        history.add(query.into());

        Ok(history.items().to_vec())
    }

    #[tracing::instrument(skip(self))]
    async fn remove_place_history(&self, id: Uuid) -> Result<Vec<PlaceHistoryItem>, Error> {
        let mut history = self.place_history.lock().await;
        if !history.remove(id) {
            return Err(not_found_error());
        }

        Ok(history.items().to_vec())
    }

    #[tracing::instrument(skip(self))]
    async fn clear_place_history(&self) -> Result<(), Error> {
        self.place_history.lock().await.clear();
        Ok(())
    }
}

// unnamed points fall back to their coordinates
fn display_text(point: &RoutePoint) -> String {
    match point.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => point.to_query(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::api::PlannerAPI;
    use crate::entities::{RouteRequestParams, RouteResult, Strategy, TravelMode};
    use crate::external::{BackendError, BackendResponse, RoutingBackend};
    use crate::history::MemoryStore;
    use crate::planner::TracingNotifier;

    struct FixedBackend;

    #[async_trait]
    impl RoutingBackend for FixedBackend {
        async fn driving(
            &self,
            _: &RoutePoint,
            _: &RoutePoint,
            _: &[RoutePoint],
            _: Option<Strategy>,
        ) -> Result<BackendResponse, BackendError> {
            Ok(BackendResponse::success(RouteResult::default()))
        }

        async fn walking(&self, _: &RoutePoint, _: &RoutePoint) -> Result<BackendResponse, BackendError> {
            Err(BackendError::Other("walking unavailable".into()))
        }

        async fn transit(&self, _: &RoutePoint, _: &RoutePoint) -> Result<BackendResponse, BackendError> {
            Err(BackendError::HttpStatus(503))
        }

        async fn riding(&self, _: &RoutePoint, _: &RoutePoint) -> Result<BackendResponse, BackendError> {
            Err(BackendError::HttpStatus(503))
        }

        async fn electric(&self, _: &RoutePoint, _: &RoutePoint) -> Result<BackendResponse, BackendError> {
            Err(BackendError::HttpStatus(503))
        }
    }

    fn engine() -> Engine {
        Engine::new(
            Arc::new(FixedBackend),
            Arc::new(TracingNotifier),
            Arc::new(MemoryStore::new()),
        )
    }

    fn request(mode: TravelMode) -> RouteRequestParams {
        RouteRequestParams::new(
            mode,
            RoutePoint::named(116.3, 39.9, "Home"),
            RoutePoint::new(116.4, 39.95),
        )
    }

    #[tokio::test]
    async fn remembers_successful_session() {
        let engine = engine();
        engine.plan_route(request(TravelMode::Driving)).await.unwrap();

        let history = engine.remember_session_route().await.unwrap();

        assert_eq!(history.len(), 1);
        assert_eq!(history[0].origin_text, "Home");
        assert_eq!(history[0].dest_text, "116.4,39.95");
        assert_eq!(history[0].mode, Some(TravelMode::Driving));
    }

    #[tokio::test]
    async fn refuses_to_remember_failed_session() {
        let engine = engine();
        engine.plan_route(request(TravelMode::Walking)).await.unwrap();

        let err = engine.remember_session_route().await.unwrap_err();

        assert_eq!(err.code, 100);
        assert!(engine.list_route_history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_route_query_is_ignored() {
        let engine = engine();

        let history = engine
            .add_route_history(RouteQuery {
                origin_text: " ".into(),
                dest_text: "Office".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn place_history_round_trip() {
        let engine = engine();

        let history = engine
            .add_place_history(PlaceQuery {
                name: "Cafe".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        let id = history[0].id;

        assert!(engine.remove_place_history(id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn removing_unknown_entry_is_not_found() {
        let engine = engine();
        engine
            .add_route_history(RouteQuery {
                origin_text: "Home".into(),
                dest_text: "Office".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        let err = engine.remove_route_history(Uuid::nil()).await.unwrap_err();
        assert_eq!(err.code, 102);
        assert_eq!(engine.list_route_history().await.unwrap().len(), 1);

        let err = engine.remove_place_history(Uuid::nil()).await.unwrap_err();
        assert_eq!(err.code, 102);
    }
}
