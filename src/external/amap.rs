use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};

use super::{BackendError, BackendResponse, RoutingBackend};
use crate::{
    config::Config,
    entities::{RouteError, RoutePoint, RoutePosition, RouteResult, RouteStep, Strategy},
};

const SHOW_FIELDS: &str = "cost,polyline";

/// Client for the AMap v5 web direction service.
#[derive(Clone, Debug)]
pub struct AmapClient {
    client: reqwest::Client,
    api_base: String,
    key: String,
    transit_city: String,
}

#[derive(Debug, Deserialize)]
struct Response {
    status: String,
    info: Option<String>,
    infocode: Option<String>,
    route: Option<Route>,
}

#[derive(Debug, Default, Deserialize)]
struct Route {
    #[serde(default)]
    paths: Vec<Path>,
    #[serde(default)]
    transits: Vec<Transit>,
}

#[derive(Debug, Deserialize)]
struct Path {
    #[serde(default, deserialize_with = "lenient_number")]
    distance: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    duration: Option<f64>,
    cost: Option<Cost>,
    #[serde(default)]
    steps: Vec<Step>,
}

#[derive(Debug, Default, Deserialize)]
struct Cost {
    #[serde(default, deserialize_with = "lenient_number")]
    duration: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    tolls: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Step {
    instruction: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    step_distance: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    distance: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    duration: Option<f64>,
    cost: Option<Cost>,
    #[serde(default, deserialize_with = "lenient_polyline")]
    polyline: Vec<RoutePosition>,
}

#[derive(Debug, Deserialize)]
struct Transit {
    #[serde(default, deserialize_with = "lenient_number")]
    distance: Option<f64>,
    cost: Option<Cost>,
    #[serde(default)]
    segments: Vec<Segment>,
}

#[derive(Debug, Deserialize)]
struct Segment {
    walking: Option<Walking>,
    bus: Option<Bus>,
}

#[derive(Debug, Deserialize)]
struct Walking {
    #[serde(default)]
    steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
struct Bus {
    #[serde(default)]
    buslines: Vec<BusLine>,
}

#[derive(Debug, Deserialize)]
struct BusLine {
    #[serde(default)]
    name: String,
    #[serde(default, deserialize_with = "lenient_number")]
    distance: Option<f64>,
    cost: Option<Cost>,
    departure_stop: Option<Stop>,
    arrival_stop: Option<Stop>,
    #[serde(default, deserialize_with = "lenient_polyline")]
    polyline: Vec<RoutePosition>,
}

#[derive(Debug, Deserialize)]
struct Stop {
    #[serde(default)]
    name: String,
}

impl AmapClient {
    pub fn new(api_base: String, key: String, transit_city: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base,
            key,
            transit_city,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.amap_api_base.clone(),
            config.amap_api_key.clone(),
            config.transit_city.clone(),
        )
    }

    #[tracing::instrument(skip(self, query))]
    async fn direction(
        &self,
        path: &str,
        query: Vec<(&'static str, String)>,
    ) -> Result<Response, BackendError> {
        let url = format!("https://{}/v5/direction/{}", self.api_base, path);

        let res = self
            .client
            .get(url)
            .query(&[("key", &self.key)])
            .query(&[("show_fields", SHOW_FIELDS)])
            .query(&query)
            .send()
            .await?;

        let status_code = res.status().as_u16();
        if status_code != 200 {
            return Err(BackendError::HttpStatus(status_code));
        }

        let body = res.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn paths(
        &self,
        path: &str,
        query: Vec<(&'static str, String)>,
        with_tolls: bool,
    ) -> Result<BackendResponse, BackendError> {
        let data = self.direction(path, query).await?;
        Ok(into_backend_response(data, |route| {
            normalize_paths(route.paths, with_tolls)
        }))
    }
}

#[async_trait]
impl RoutingBackend for AmapClient {
    async fn driving(
        &self,
        origin: &RoutePoint,
        destination: &RoutePoint,
        waypoints: &[RoutePoint],
        strategy: Option<Strategy>,
    ) -> Result<BackendResponse, BackendError> {
        let mut query = endpoints(origin, destination);
        query.push(("strategy", strategy_code(strategy).to_string()));
        if !waypoints.is_empty() {
            let joined = waypoints
                .iter()
                .map(RoutePoint::to_query)
                .collect::<Vec<_>>()
                .join(";");
            query.push(("waypoints", joined));
        }

        self.paths("driving", query, true).await
    }

    async fn walking(
        &self,
        origin: &RoutePoint,
        destination: &RoutePoint,
    ) -> Result<BackendResponse, BackendError> {
        self.paths("walking", endpoints(origin, destination), false)
            .await
    }

    async fn transit(
        &self,
        origin: &RoutePoint,
        destination: &RoutePoint,
    ) -> Result<BackendResponse, BackendError> {
        let mut query = endpoints(origin, destination);
        query.push(("city1", self.transit_city.clone()));
        query.push(("city2", self.transit_city.clone()));

        let data = self.direction("transit/integrated", query).await?;
        Ok(into_backend_response(data, |route| {
            normalize_transits(route.transits)
        }))
    }

    async fn riding(
        &self,
        origin: &RoutePoint,
        destination: &RoutePoint,
    ) -> Result<BackendResponse, BackendError> {
        self.paths("bicycling", endpoints(origin, destination), false)
            .await
    }

    async fn electric(
        &self,
        origin: &RoutePoint,
        destination: &RoutePoint,
    ) -> Result<BackendResponse, BackendError> {
        self.paths("electrobike", endpoints(origin, destination), false)
            .await
    }
}

fn endpoints(origin: &RoutePoint, destination: &RoutePoint) -> Vec<(&'static str, String)> {
    vec![
        ("origin", origin.to_query()),
        ("destination", destination.to_query()),
    ]
}

pub fn strategy_code(strategy: Option<Strategy>) -> u8 {
    match strategy {
        None => 32,
        Some(Strategy::Fastest) => 38,
        Some(Strategy::Shortest) => 2,
        Some(Strategy::AvoidHighway) => 35,
        Some(Strategy::AvoidCongestion) => 33,
    }
}

fn into_backend_response<F>(data: Response, normalize: F) -> BackendResponse
where
    F: FnOnce(Route) -> Option<RouteResult>,
{
    if data.status != "1" {
        return BackendResponse::failure(RouteError {
            code: data.infocode,
            message: data.info.unwrap_or_else(|| "routing service error".into()),
            details: None,
        });
    }

    match normalize(data.route.unwrap_or_default()) {
        Some(result) => BackendResponse::success(result),
        None => BackendResponse::failure(RouteError {
            code: data.infocode,
            message: "no route found".into(),
            details: Some(json!({ "info": data.info })),
        }),
    }
}

fn normalize_paths(paths: Vec<Path>, with_tolls: bool) -> Option<RouteResult> {
    let plans = paths
        .into_iter()
        .map(|path| {
            let cost = path.cost.unwrap_or_default();
            let steps: Vec<RouteStep> = path.steps.into_iter().map(normalize_step).collect();

            RouteResult {
                polyline: join_polylines(steps.iter().map(|s| s.polyline.as_slice())),
                distance: path.distance.unwrap_or(0.0),
                duration: cost.duration.or(path.duration).unwrap_or(0.0),
                tolls: if with_tolls { cost.tolls.or(Some(0.0)) } else { None },
                steps: Some(steps),
                alternatives: Vec::new(),
            }
        })
        .collect();

    primary_with_alternatives(plans)
}

fn normalize_transits(transits: Vec<Transit>) -> Option<RouteResult> {
    let plans = transits
        .into_iter()
        .map(|transit| {
            let mut steps = Vec::new();

            for segment in transit.segments {
                if let Some(walking) = segment.walking {
                    steps.extend(walking.steps.into_iter().map(normalize_step));
                }
                if let Some(bus) = segment.bus {
                    steps.extend(bus.buslines.into_iter().take(1).map(normalize_busline));
                }
            }

            RouteResult {
                polyline: join_polylines(steps.iter().map(|s| s.polyline.as_slice())),
                distance: transit.distance.unwrap_or(0.0),
                duration: transit.cost.and_then(|c| c.duration).unwrap_or(0.0),
                tolls: None,
                steps: Some(steps),
                alternatives: Vec::new(),
            }
        })
        .collect();

    primary_with_alternatives(plans)
}

fn normalize_step(step: Step) -> RouteStep {
    RouteStep {
        instruction: step.instruction.unwrap_or_default(),
        distance: step.step_distance.or(step.distance).unwrap_or(0.0),
        duration: step
            .cost
            .and_then(|c| c.duration)
            .or(step.duration)
            .unwrap_or(0.0),
        polyline: step.polyline,
    }
}

fn normalize_busline(line: BusLine) -> RouteStep {
    let from = line.departure_stop.map(|s| s.name).unwrap_or_default();
    let to = line.arrival_stop.map(|s| s.name).unwrap_or_default();

    RouteStep {
        instruction: format!("Take {} from {} to {}", line.name, from, to),
        distance: line.distance.unwrap_or(0.0),
        duration: line.cost.and_then(|c| c.duration).unwrap_or(0.0),
        polyline: line.polyline,
    }
}

fn primary_with_alternatives(mut plans: Vec<RouteResult>) -> Option<RouteResult> {
    if plans.is_empty() {
        return None;
    }

    let mut primary = plans.remove(0);
    primary.alternatives = plans;
    Some(primary)
}

/// Parses an encoded polyline of the form "lng,lat;lng,lat;...", skipping malformed pairs.
pub fn parse_polyline(encoded: &str) -> Vec<RoutePosition> {
    encoded
        .split(';')
        .filter_map(|pair| {
            let (lng, lat) = pair.split_once(',')?;
            Some(RoutePosition::new(
                lng.trim().parse().ok()?,
                lat.trim().parse().ok()?,
            ))
        })
        .collect()
}

/// Concatenates step polylines, dropping the shared vertex where one step ends and the
/// next begins.
pub fn join_polylines<'a, I>(segments: I) -> Vec<RoutePosition>
where
    I: IntoIterator<Item = &'a [RoutePosition]>,
{
    let mut joined: Vec<RoutePosition> = Vec::new();

    for segment in segments {
        for position in segment {
            if joined.last() != Some(position) {
                joined.push(*position);
            }
        }
    }

    joined
}

// AMap encodes numbers as strings and empty values as `[]`
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_polyline<'de, D>(deserializer: D) -> Result<Vec<RoutePosition>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => parse_polyline(&s),
        Value::Object(map) => map
            .get("polyline")
            .and_then(Value::as_str)
            .map(parse_polyline)
            .unwrap_or_default(),
        _ => Vec::new(),
    })
}
