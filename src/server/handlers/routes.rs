use axum::extract::{Extension, Json};

use crate::{
    api::{DynAPI, PlannerAPI},
    entities::RouteRequestParams,
    error::Error,
    planner::{SelectionUpdate, SessionState},
};

pub async fn plan(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<RouteRequestParams>,
) -> Result<Json<SessionState>, Error> {
    let session = api.plan_route(params).await?;

    Ok(session.into())
}

pub async fn find_session(
    Extension(api): Extension<DynAPI>,
) -> Result<Json<SessionState>, Error> {
    let session = api.find_session().await?;

    Ok(session.into())
}

pub async fn update_selection(
    Extension(api): Extension<DynAPI>,
    Json(update): Json<SelectionUpdate>,
) -> Result<Json<SessionState>, Error> {
    let session = api.update_selection(update).await?;

    Ok(session.into())
}
