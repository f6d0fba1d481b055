use serde::Serialize;

use crate::entities::TravelMode;

pub const STROKE_OPACITY: f32 = 0.9;
pub const STROKE_WEIGHT: u32 = 6;
pub const STROKE_STYLE: &str = "solid";
pub const LINE_JOIN: &str = "round";
pub const LINE_CAP: &str = "round";
pub const FIT_VIEW_PADDING: Padding = Padding::uniform(60);

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStyle {
    pub stroke_color: &'static str,
    pub stroke_opacity: f32,
    pub stroke_weight: u32,
    pub stroke_style: &'static str,
    pub line_join: &'static str,
    pub line_cap: &'static str,
}

impl PathStyle {
    pub fn for_mode(mode: TravelMode) -> Self {
        Self {
            stroke_color: mode_color(mode),
            stroke_opacity: STROKE_OPACITY,
            stroke_weight: STROKE_WEIGHT,
            stroke_style: STROKE_STYLE,
            line_join: LINE_JOIN,
            line_cap: LINE_CAP,
        }
    }
}

pub fn mode_color(mode: TravelMode) -> &'static str {
    match mode {
        TravelMode::Driving => "#1677ff",
        TravelMode::Walking => "#52c41a",
        TravelMode::Transit => "#722ed1",
        TravelMode::Riding => "#fa8c16",
        TravelMode::Electric => "#13c2c2",
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Padding {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Padding {
    pub const fn uniform(value: u32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}
