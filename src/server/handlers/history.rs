use axum::extract::{Extension, Json, Path};
use axum::http::StatusCode;
use uuid::Uuid;

use crate::{
    api::{DynAPI, HistoryAPI},
    entities::{PlaceHistoryItem, PlaceQuery, RouteHistoryItem, RouteQuery},
    error::Error,
};

pub async fn list_routes(
    Extension(api): Extension<DynAPI>,
) -> Result<Json<Vec<RouteHistoryItem>>, Error> {
    let history = api.list_route_history().await?;

    Ok(history.into())
}

pub async fn add_route(
    Extension(api): Extension<DynAPI>,
    Json(query): Json<RouteQuery>,
) -> Result<Json<Vec<RouteHistoryItem>>, Error> {
    let history = api.add_route_history(query).await?;

    Ok(history.into())
}

pub async fn remember_session_route(
    Extension(api): Extension<DynAPI>,
) -> Result<Json<Vec<RouteHistoryItem>>, Error> {
    let history = api.remember_session_route().await?;

    Ok(history.into())
}

pub async fn remove_route(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<RouteHistoryItem>>, Error> {
    let history = api.remove_route_history(id).await?;

    Ok(history.into())
}

pub async fn clear_routes(Extension(api): Extension<DynAPI>) -> Result<StatusCode, Error> {
    api.clear_route_history().await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_places(
    Extension(api): Extension<DynAPI>,
) -> Result<Json<Vec<PlaceHistoryItem>>, Error> {
    let history = api.list_place_history().await?;

    Ok(history.into())
}

pub async fn add_place(
    Extension(api): Extension<DynAPI>,
    Json(query): Json<PlaceQuery>,
) -> Result<Json<Vec<PlaceHistoryItem>>, Error> {
    let history = api.add_place_history(query).await?;

    Ok(history.into())
}

pub async fn remove_place(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<PlaceHistoryItem>>, Error> {
    let history = api.remove_place_history(id).await?;

    Ok(history.into())
}

pub async fn clear_places(Extension(api): Extension<DynAPI>) -> Result<StatusCode, Error> {
    api.clear_place_history().await?;

    Ok(StatusCode::NO_CONTENT)
}
