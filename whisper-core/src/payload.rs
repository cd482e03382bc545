use serde::Deserialize;
use serde_json::Value;

use crate::{WeatherError, model::Degrees};

/// Raw provider output for one fetch.
///
/// The validity flag is decided by the fetcher and gates every other field:
/// an invalid payload carries no body at all.
#[derive(Debug, Clone, PartialEq)]
pub struct RawWeatherPayload {
    body: Option<Value>,
}

impl RawWeatherPayload {
    pub fn valid(body: Value) -> Self {
        Self { body: Some(body) }
    }

    pub fn invalid() -> Self {
        Self { body: None }
    }

    pub fn is_valid(&self) -> bool {
        self.body.is_some()
    }

    /// Decode the timeline tree, consuming the payload.
    pub(crate) fn into_timeline(self) -> Result<Timeline, WeatherError> {
        let body = self.body.ok_or(WeatherError::InvalidLocation)?;
        serde_json::from_value(body).map_err(|e| WeatherError::malformed(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Timeline {
    pub resolved_address: String,
    pub timezone: String,
    pub current_conditions: CurrentRecord,
    pub days: Vec<DayRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentRecord {
    pub temp: f64,
    pub conditions: String,
    pub windspeed: f64,
    pub winddir: Degrees,
    pub uvindex: f64,
    pub moonphase: f64,
    pub sunrise: String,
    pub sunset: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DayRecord {
    pub datetime: String,
    pub tempmax: f64,
    pub tempmin: f64,
    pub conditions: String,
    pub hours: Vec<HourRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HourRecord {
    pub temp: f64,
    pub conditions: String,
    pub windspeed: f64,
    pub winddir: Degrees,
    pub precipprob: f64,
    pub humidity: f64,
}
