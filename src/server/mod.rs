mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{delete, get, patch, post},
    Router,
};

use crate::api::{DynAPI, API};
use crate::error::{unexpected_error, Error};
use crate::server::handlers::{history, routes};

pub fn router(api: DynAPI) -> Router {
    Router::new()
        .route("/routes/plan", post(routes::plan))
        .route("/routes/session", get(routes::find_session))
        .route("/routes/session/selection", patch(routes::update_selection))
        .route(
            "/routes/session/remember",
            post(history::remember_session_route),
        )
        .route(
            "/history/routes",
            get(history::list_routes)
                .post(history::add_route)
                .delete(history::clear_routes),
        )
        .route("/history/routes/:id", delete(history::remove_route))
        .route(
            "/history/places",
            get(history::list_places)
                .post(history::add_place)
                .delete(history::clear_places),
        )
        .route("/history/places/:id", delete(history::remove_place))
        .layer(Extension(api))
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, addr: SocketAddr) -> Result<(), Error> {
    let api = Arc::new(api) as DynAPI;
    let app = router(api);

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(|err| {
            tracing::error!("server error: {}", err);
            unexpected_error()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use axum::extract::{Json, Path};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use uuid::Uuid;

    use crate::engine::Engine;
    use crate::entities::{RoutePoint, RouteQuery, RouteRequestParams, Strategy, TravelMode};
    use crate::external::{BackendError, BackendResponse, RoutingBackend};
    use crate::history::MemoryStore;
    use crate::planner::TracingNotifier;

    struct OfflineBackend;

    #[async_trait]
    impl RoutingBackend for OfflineBackend {
        async fn driving(
            &self,
            _: &RoutePoint,
            _: &RoutePoint,
            _: &[RoutePoint],
            _: Option<Strategy>,
        ) -> Result<BackendResponse, BackendError> {
            Err(BackendError::HttpStatus(502))
        }

        async fn walking(&self, _: &RoutePoint, _: &RoutePoint) -> Result<BackendResponse, BackendError> {
            Err(BackendError::HttpStatus(502))
        }

        async fn transit(&self, _: &RoutePoint, _: &RoutePoint) -> Result<BackendResponse, BackendError> {
            Err(BackendError::HttpStatus(502))
        }

        async fn riding(&self, _: &RoutePoint, _: &RoutePoint) -> Result<BackendResponse, BackendError> {
            Err(BackendError::HttpStatus(502))
        }

        async fn electric(&self, _: &RoutePoint, _: &RoutePoint) -> Result<BackendResponse, BackendError> {
            Err(BackendError::HttpStatus(502))
        }
    }

    fn api() -> DynAPI {
        Arc::new(Engine::new(
            Arc::new(OfflineBackend),
            Arc::new(TracingNotifier),
            Arc::new(MemoryStore::new()),
        ))
    }

    #[test]
    fn routes_do_not_conflict() {
        let _ = router(api());
    }

    #[tokio::test]
    async fn history_handlers_share_engine_state() {
        let api = api();

        history::add_route(
            Extension(api.clone()),
            Json(RouteQuery {
                origin_text: "Home".into(),
                dest_text: "Office".into(),
                ..Default::default()
            }),
        )
        .await
        .unwrap();

        let Json(items) = history::list_routes(Extension(api.clone())).await.unwrap();
        assert_eq!(items.len(), 1);

        let status = history::clear_routes(Extension(api.clone())).await.unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        let Json(items) = history::list_routes(Extension(api.clone())).await.unwrap();
        assert!(items.is_empty());

        let err = history::remove_route(Extension(api), Path(Uuid::nil()))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn failed_plan_is_reported_in_session() {
        let api = api();
        let params = RouteRequestParams::new(
            TravelMode::Walking,
            RoutePoint::new(116.3, 39.9),
            RoutePoint::new(116.4, 39.95),
        );

        let Json(session) = routes::plan(Extension(api.clone()), Json(params)).await.unwrap();
        assert_eq!(session.status.name(), "error");
        assert!(session.status.error().unwrap().message.contains("502"));

        let err = history::remember_session_route(Extension(api)).await.unwrap_err();
        assert_eq!(err.code, 100);
    }
}
