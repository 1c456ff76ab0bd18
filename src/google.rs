//! Google Distance Matrix adapter.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{PlannerError, Result};
use crate::matrix::DistanceMatrix;
use crate::traits::DistanceMatrixProvider;

pub const DEFAULT_GOOGLE_BASE_URL: &str = "https://maps.googleapis.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::Walking => "walking",
            Self::Bicycling => "bicycling",
            Self::Transit => "transit",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "driving" => Some(Self::Driving),
            "walking" => Some(Self::Walking),
            "bicycling" => Some(Self::Bicycling),
            "transit" => Some(Self::Transit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GoogleMapsConfig {
    pub base_url: String,
    pub api_key: String,
    pub mode: TravelMode,
    pub timeout_secs: u64,
}

impl Default for GoogleMapsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GOOGLE_BASE_URL.to_string(),
            api_key: String::new(),
            mode: TravelMode::Driving,
            timeout_secs: 10,
        }
    }
}

impl GoogleMapsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct GoogleDistanceClient {
    config: GoogleMapsConfig,
    client: reqwest::blocking::Client,
}

impl GoogleDistanceClient {
    pub fn new(config: GoogleMapsConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| PlannerError::Config {
                key: "google".to_string(),
                message: err.to_string(),
            })?;

        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/maps/api/distancematrix/json",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

/// Encode locations as the `lat,lng|lat,lng` list the API expects.
pub(crate) fn encode_locations(locations: &[(f64, f64)]) -> String {
    locations
        .iter()
        .map(|(lat, lng)| format!("{:.6},{:.6}", lat, lng))
        .collect::<Vec<_>>()
        .join("|")
}

impl DistanceMatrixProvider for GoogleDistanceClient {
    fn matrix_for(&self, locations: &[(f64, f64)]) -> Result<DistanceMatrix> {
        if locations.is_empty() {
            return Ok(DistanceMatrix::from_fn(0, |_, _| 0));
        }

        let points = encode_locations(locations);
        debug!(
            places = locations.len(),
            mode = self.config.mode.as_str(),
            "requesting google distance matrix"
        );

        let response = self
            .client
            .get(self.endpoint())
            .query(&[
                ("origins", points.as_str()),
                ("destinations", points.as_str()),
                ("mode", self.config.mode.as_str()),
                ("key", self.config.api_key.as_str()),
            ])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<GoogleMatrixResponse>())
            .map_err(PlannerError::from_reqwest)?;

        convert_response(response, locations.len()).inspect_err(|err| {
            warn!(error = %err, "google distance matrix rejected");
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GoogleMatrixResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub rows: Vec<GoogleRow>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GoogleRow {
    pub elements: Vec<GoogleElement>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GoogleElement {
    pub status: String,
    #[serde(default)]
    pub distance: Option<GoogleValue>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GoogleValue {
    pub value: u32,
}

/// Turn a parsed payload into a matrix of meters, validating its shape.
pub(crate) fn convert_response(
    response: GoogleMatrixResponse,
    expected: usize,
) -> Result<DistanceMatrix> {
    if response.status != "OK" {
        return Err(PlannerError::provider(
            response.status,
            response.error_message.unwrap_or_default(),
        ));
    }
    if response.rows.len() != expected {
        return Err(PlannerError::provider(
            "MALFORMED_RESPONSE",
            format!("expected {expected} rows, got {}", response.rows.len()),
        ));
    }

    let mut rows = Vec::with_capacity(expected);
    for (i, row) in response.rows.into_iter().enumerate() {
        if row.elements.len() != expected {
            return Err(PlannerError::provider(
                "MALFORMED_RESPONSE",
                format!("row {i} has {} elements, expected {expected}", row.elements.len()),
            ));
        }
        let mut cells = Vec::with_capacity(expected);
        for (j, element) in row.elements.into_iter().enumerate() {
            if element.status != "OK" {
                return Err(PlannerError::provider(
                    element.status,
                    format!("no distance from place {i} to place {j}"),
                ));
            }
            let distance = element.distance.ok_or_else(|| {
                PlannerError::provider(
                    "MALFORMED_RESPONSE",
                    format!("element ({i}, {j}) has no distance"),
                )
            })?;
            cells.push(distance.value);
        }
        rows.push(cells);
    }

    DistanceMatrix::from_rows(rows)
}
