//! Environment-driven configuration for building a planner.

use std::env;

use crate::error::{PlannerError, Result};
use crate::google::{GoogleDistanceClient, GoogleMapsConfig, TravelMode, DEFAULT_GOOGLE_BASE_URL};
use crate::haversine::HaversineMatrix;
use crate::osrm::{OsrmClient, OsrmConfig};
use crate::planner::RoutePlanner;
use crate::solver::SolveOptions;
use crate::traits::DynMatrixProvider;

#[derive(Debug, Clone, PartialEq)]
pub enum DistanceBackend {
    Google { api_key: String, base_url: String, mode: TravelMode },
    Osrm { base_url: String, profile: String },
    Haversine,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    pub backend: DistanceBackend,
    pub timeout_secs: u64,
    pub max_places: Option<usize>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            backend: DistanceBackend::Haversine,
            timeout_secs: 10,
            max_places: None,
        }
    }
}

impl PlannerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value.
    ///
    /// Recognized keys: `DISTANCE_BACKEND` (`google`, `osrm` or `haversine`;
    /// default `google`), `GOOGLE_MAPS_API_KEY`, `GOOGLE_MAPS_BASE_URL`,
    /// `TRAVEL_MODE`, `OSRM_BASE_URL`, `OSRM_PROFILE`,
    /// `DISTANCE_TIMEOUT_SECS` and `PLANNER_MAX_PLACES`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_name = lookup("DISTANCE_BACKEND").unwrap_or_else(|| "google".to_string());
        let backend = match backend_name.trim().to_ascii_lowercase().as_str() {
            "google" => {
                let api_key = lookup("GOOGLE_MAPS_API_KEY")
                    .filter(|key| !key.trim().is_empty())
                    .ok_or_else(|| config_error("GOOGLE_MAPS_API_KEY", "required for the google backend"))?;
                let mode = match lookup("TRAVEL_MODE") {
                    Some(raw) => TravelMode::parse(&raw)
                        .ok_or_else(|| config_error("TRAVEL_MODE", format!("unknown mode {raw:?}")))?,
                    None => TravelMode::default(),
                };
                DistanceBackend::Google {
                    api_key,
                    base_url: lookup("GOOGLE_MAPS_BASE_URL")
                        .unwrap_or_else(|| DEFAULT_GOOGLE_BASE_URL.to_string()),
                    mode,
                }
            }
            "osrm" => {
                let defaults = OsrmConfig::default();
                DistanceBackend::Osrm {
                    base_url: lookup("OSRM_BASE_URL").unwrap_or(defaults.base_url),
                    profile: lookup("OSRM_PROFILE").unwrap_or(defaults.profile),
                }
            }
            "haversine" => DistanceBackend::Haversine,
            other => {
                return Err(config_error(
                    "DISTANCE_BACKEND",
                    format!("unknown backend {other:?}"),
                ));
            }
        };

        let timeout_secs = parse_number(&lookup, "DISTANCE_TIMEOUT_SECS")?.unwrap_or(10);
        let max_places = parse_number(&lookup, "PLANNER_MAX_PLACES")?;

        Ok(Self {
            backend,
            timeout_secs,
            max_places: max_places.map(|limit| limit as usize),
        })
    }

    pub fn solve_options(&self) -> SolveOptions {
        SolveOptions {
            max_places: self.max_places,
        }
    }

    /// Construct the configured distance provider.
    pub fn build_provider(&self) -> Result<DynMatrixProvider> {
        let provider: DynMatrixProvider = match &self.backend {
            DistanceBackend::Google {
                api_key,
                base_url,
                mode,
            } => Box::new(GoogleDistanceClient::new(GoogleMapsConfig {
                base_url: base_url.clone(),
                api_key: api_key.clone(),
                mode: *mode,
                timeout_secs: self.timeout_secs,
            })?),
            DistanceBackend::Osrm { base_url, profile } => Box::new(OsrmClient::new(OsrmConfig {
                base_url: base_url.clone(),
                profile: profile.clone(),
                timeout_secs: self.timeout_secs,
            })?),
            DistanceBackend::Haversine => Box::new(HaversineMatrix),
        };
        Ok(provider)
    }

    /// Planner wired with the configured provider and options.
    pub fn build_planner(&self) -> Result<RoutePlanner<DynMatrixProvider>> {
        Ok(RoutePlanner::new(self.build_provider()?, self.solve_options()))
    }
}

fn config_error(key: &str, message: impl Into<String>) -> PlannerError {
    PlannerError::Config {
        key: key.to_string(),
        message: message.into(),
    }
}

fn parse_number<F>(lookup: &F, key: &str) -> Result<Option<u64>>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map_err(|err| config_error(key, format!("{raw:?}: {err}")))
        })
        .transpose()
}
