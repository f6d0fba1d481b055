use super::Engine;

use async_trait::async_trait;

use crate::{
    api::PlannerAPI,
    entities::RouteRequestParams,
    error::{invalid_input_error, Error},
    planner::{SelectionUpdate, SessionState},
};

#[async_trait]
impl PlannerAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn plan_route(&self, params: RouteRequestParams) -> Result<SessionState, Error> {
        let points = std::iter::once(&params.origin)
            .chain(std::iter::once(&params.destination))
            .chain(params.waypoints.iter().flatten());

        for point in points {
            if !point.lng.is_finite() || !point.lat.is_finite() {
                return Err(invalid_input_error());
            }
        }

        self.planner.plan(params).await;

        Ok(self.planner.snapshot())
    }

    #[tracing::instrument(skip(self))]
    async fn find_session(&self) -> Result<SessionState, Error> {
        Ok(self.planner.snapshot())
    }

    #[tracing::instrument(skip(self))]
    async fn update_selection(&self, update: SelectionUpdate) -> Result<SessionState, Error> {
        Ok(self.planner.update_selection(update))
    }
}
