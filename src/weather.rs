//! Current weather at the observation station nearest to a point.
//!
//! The feed is the open-data automatic station observation dataset
//! (`O-A0001-001`). Each station lists several coordinate datums; the second
//! entry is WGS84, which is the one used for distances.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PlannerError, Result};
use crate::haversine::haversine_km;

pub const DEFAULT_WEATHER_BASE_URL: &str = "https://opendata.cwa.gov.tw";
const OBSERVATION_DATASET: &str = "O-A0001-001";
const UNKNOWN: &str = "unknown";

#[derive(Debug, Deserialize)]
pub struct ObservationPayload {
    pub records: ObservationRecords,
}

#[derive(Debug, Deserialize)]
pub struct ObservationRecords {
    #[serde(rename = "Station", default)]
    pub stations: Vec<Station>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Station {
    #[serde(rename = "StationName", default)]
    pub name: Option<String>,
    #[serde(rename = "GeoInfo")]
    pub geo: GeoInfo,
    #[serde(rename = "WeatherElement", default)]
    pub weather: WeatherElement,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeoInfo {
    #[serde(rename = "Coordinates", default)]
    pub coordinates: Vec<StationCoordinate>,
    #[serde(rename = "CountyName", default)]
    pub county: Option<String>,
    #[serde(rename = "TownName", default)]
    pub town: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationCoordinate {
    #[serde(rename = "StationLatitude")]
    pub latitude: f64,
    #[serde(rename = "StationLongitude")]
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherElement {
    #[serde(rename = "Weather", default)]
    pub weather: Option<String>,
    #[serde(rename = "Now", default)]
    pub now: Option<NowElement>,
    #[serde(rename = "AirTemperature", default)]
    pub air_temperature: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NowElement {
    #[serde(rename = "Precipitation", default)]
    pub precipitation: Option<f64>,
}

impl Station {
    /// WGS84 position (lat, lng), if the station reports one.
    pub fn location(&self) -> Option<(f64, f64)> {
        self.geo
            .coordinates
            .get(1)
            .map(|coord| (coord.latitude, coord.longitude))
    }
}

/// Summary handed back to the chat user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub county: String,
    pub town: String,
    pub weather: String,
    pub precipitation: Option<f64>,
    pub air_temperature: Option<f64>,
}

impl From<&Station> for WeatherReport {
    fn from(station: &Station) -> Self {
        let text = |value: &Option<String>| {
            value
                .as_deref()
                .filter(|s| !s.is_empty())
                .unwrap_or(UNKNOWN)
                .to_string()
        };
        Self {
            county: text(&station.geo.county),
            town: text(&station.geo.town),
            weather: text(&station.weather.weather),
            precipitation: station.weather.now.as_ref().and_then(|now| now.precipitation),
            air_temperature: station.weather.air_temperature,
        }
    }
}

/// Station closest to (lat, lng). The first of equally close stations wins;
/// stations without a WGS84 position are skipped.
pub fn nearest_station(stations: &[Station], lat: f64, lng: f64) -> Option<&Station> {
    let mut best: Option<(&Station, f64)> = None;
    for station in stations {
        let Some(location) = station.location() else {
            continue;
        };
        let distance = haversine_km((lat, lng), location);
        if best.is_none_or(|(_, min)| distance < min) {
            best = Some((station, distance));
        }
    }
    best.map(|(station, _)| station)
}

#[derive(Debug, Clone)]
pub struct WeatherConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
            api_key: String::new(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    config: WeatherConfig,
    client: reqwest::blocking::Client,
}

impl WeatherClient {
    pub fn new(config: WeatherConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| PlannerError::Config {
                key: "weather".to_string(),
                message: err.to_string(),
            })?;
        Ok(Self { config, client })
    }

    pub fn fetch_stations(&self) -> Result<Vec<Station>> {
        let url = format!(
            "{}/api/v1/rest/datastore/{}",
            self.config.base_url.trim_end_matches('/'),
            OBSERVATION_DATASET
        );
        let payload = self
            .client
            .get(url)
            .query(&[("Authorization", self.config.api_key.as_str())])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<ObservationPayload>())
            .map_err(|err| PlannerError::Weather {
                message: err.without_url().to_string(),
            })?;
        debug!(stations = payload.records.stations.len(), "fetched weather observations");
        Ok(payload.records.stations)
    }

    /// Weather at the station nearest to (lat, lng).
    pub fn report_for(&self, lat: f64, lng: f64) -> Result<WeatherReport> {
        let stations = self.fetch_stations()?;
        nearest_station(&stations, lat, lng)
            .map(WeatherReport::from)
            .ok_or_else(|| PlannerError::Weather {
                message: "no weather station found".to_string(),
            })
    }
}
