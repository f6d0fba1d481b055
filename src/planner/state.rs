use serde::{Deserialize, Serialize};

use crate::entities::{RouteError, RouteRequestParams, RouteResult, TravelMode};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum SessionStatus {
    Idle,
    Loading,
    Success {
        result: RouteResult,
    },
    Error {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        result: Option<RouteResult>,
        error: RouteError,
    },
}

impl SessionStatus {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success { .. } => "success",
            Self::Error { .. } => "error",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn result(&self) -> Option<&RouteResult> {
        match self {
            Self::Success { result } => Some(result),
            Self::Error { result, .. } => result.as_ref(),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&RouteError> {
        match self {
            Self::Error { error, .. } => Some(error),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StrategyTab {
    #[default]
    Recommend,
    AvoidCongestion,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub params: Option<RouteRequestParams>,
    pub status: SessionStatus,
    pub strategy_tab: StrategyTab,
    /// Index into the plans of the held result; not validated on write.
    pub selected_plan: usize,
    pub expanded_step: Option<usize>,
}

impl Default for SessionStatus {
    fn default() -> Self {
        Self::Idle
    }
}

impl SessionState {
    pub fn mode(&self) -> Option<TravelMode> {
        self.params.as_ref().map(|p| p.mode)
    }

    pub fn selected_result(&self) -> Option<&RouteResult> {
        self.status.result()?.plan(self.selected_plan)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionUpdate {
    #[serde(default)]
    pub strategy_tab: Option<StrategyTab>,
    #[serde(default)]
    pub selected_plan: Option<usize>,
    /// `null` collapses the expanded step, an absent field keeps it.
    #[serde(default, deserialize_with = "present")]
    pub expanded_step: Option<Option<usize>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl SelectionUpdate {
    pub fn apply(self, state: &mut SessionState) {
        if let Some(tab) = self.strategy_tab {
            state.strategy_tab = tab;
        }
        if let Some(plan) = self.selected_plan {
            state.selected_plan = plan;
        }
        if let Some(step) = self.expanded_step {
            state.expanded_step = step;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_with_name_tag() {
        let status = SessionStatus::Error {
            result: None,
            error: RouteError::new("boom"),
        };

        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["name"], "error");
        assert_eq!(json["error"]["message"], "boom");
        assert_eq!(status.name(), "error");
    }

    #[test]
    fn absent_expanded_step_is_kept() {
        let mut state = SessionState {
            expanded_step: Some(4),
            ..Default::default()
        };

        let update: SelectionUpdate = serde_json::from_str(r#"{"selectedPlan":1}"#).unwrap();
        update.apply(&mut state);

        assert_eq!(state.selected_plan, 1);
        assert_eq!(state.expanded_step, Some(4));
    }

    #[test]
    fn selected_result_ignores_invalid_index() {
        let state = SessionState {
            status: SessionStatus::Success {
                result: RouteResult::default(),
            },
            selected_plan: 3,
            ..Default::default()
        };

        assert!(state.selected_result().is_none());
    }

    #[test]
    fn selection_update_only_touches_given_fields() {
        let mut state = SessionState {
            selected_plan: 2,
            expanded_step: Some(1),
            ..Default::default()
        };

        let update: SelectionUpdate =
            serde_json::from_str(r#"{"strategyTab":"avoidCongestion","expandedStep":null}"#)
                .unwrap();
        update.apply(&mut state);

        assert_eq!(state.strategy_tab, StrategyTab::AvoidCongestion);
        assert_eq!(state.selected_plan, 2);
        assert_eq!(state.expanded_step, None);
    }

    #[test]
    fn session_state_uses_camel_case_fields() {
        let state = SessionState {
            selected_plan: 1,
            expanded_step: Some(2),
            ..Default::default()
        };

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["selectedPlan"], 1);
        assert_eq!(json["expandedStep"], 2);
        assert_eq!(json["strategyTab"], "recommend");
        assert_eq!(json["status"]["name"], "idle");
    }
}
