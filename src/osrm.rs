//! OSRM HTTP adapter for distance matrices.

use serde::Deserialize;
use tracing::debug;

use crate::error::{PlannerError, Result};
use crate::matrix::DistanceMatrix;
use crate::traits::DistanceMatrixProvider;

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "car".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| PlannerError::Config {
                key: "osrm".to_string(),
                message: err.to_string(),
            })?;

        Ok(Self { config, client })
    }

    /// Table URL; OSRM wants `lng,lat` pairs separated by semicolons.
    fn table_url(&self, locations: &[(f64, f64)]) -> String {
        let coords = locations
            .iter()
            .map(|(lat, lng)| format!("{:.6},{:.6}", lng, lat))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/table/v1/{}/{}?annotations=distance",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            coords
        )
    }
}

impl DistanceMatrixProvider for OsrmClient {
    fn matrix_for(&self, locations: &[(f64, f64)]) -> Result<DistanceMatrix> {
        if locations.is_empty() {
            return Ok(DistanceMatrix::from_fn(0, |_, _| 0));
        }

        debug!(places = locations.len(), profile = %self.config.profile, "requesting osrm table");

        let body = self
            .client
            .get(self.table_url(locations))
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OsrmTableResponse>())
            .map_err(PlannerError::from_reqwest)?;

        convert_response(body, locations.len())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct OsrmTableResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    distances: Option<Vec<Vec<Option<f64>>>>,
}

/// Round OSRM's float meters into a matrix. A `null` cell means no route.
pub(crate) fn convert_response(body: OsrmTableResponse, expected: usize) -> Result<DistanceMatrix> {
    if body.code != "Ok" {
        return Err(PlannerError::provider(
            body.code,
            body.message.unwrap_or_default(),
        ));
    }

    let distances = body.distances.ok_or_else(|| {
        PlannerError::provider("MALFORMED_RESPONSE", "response missing distances array")
    })?;
    if distances.len() != expected {
        return Err(PlannerError::provider(
            "MALFORMED_RESPONSE",
            format!("expected {expected} rows, got {}", distances.len()),
        ));
    }

    let rows = distances
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            row.into_iter()
                .enumerate()
                .map(|(j, cell)| match cell {
                    Some(value) if value.is_finite() && value >= 0.0 => Ok(value.round() as u32),
                    _ => Err(PlannerError::provider(
                        "NoRoute",
                        format!("no distance from place {i} to place {j}"),
                    )),
                })
                .collect::<Result<Vec<u32>>>()
        })
        .collect::<Result<Vec<_>>>()?;

    DistanceMatrix::from_rows(rows).map_err(|_| {
        PlannerError::provider("MALFORMED_RESPONSE", "distance table is not square")
    })
}
