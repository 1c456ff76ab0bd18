//! Haversine distance matrix provider (fallback when no mapping service is reachable).
//!
//! Uses great-circle distance between coordinates.
//! Less accurate than road routing (ignores streets) but always available.

use crate::error::Result;
use crate::matrix::DistanceMatrix;
use crate::traits::DistanceMatrixProvider;

/// Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two (lat, lng) points in kilometers.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lng1) = from;
    let (lat2, lng2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Haversine-based distance matrix provider.
///
/// Cells are straight-line meters, rounded. Symmetric by construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct HaversineMatrix;

impl HaversineMatrix {
    pub fn new() -> Self {
        Self
    }

    fn meters(from: (f64, f64), to: (f64, f64)) -> u32 {
        (haversine_km(from, to) * 1000.0).round() as u32
    }
}

impl DistanceMatrixProvider for HaversineMatrix {
    fn matrix_for(&self, locations: &[(f64, f64)]) -> Result<DistanceMatrix> {
        Ok(DistanceMatrix::from_fn(locations.len(), |i, j| {
            if i == j {
                0
            } else {
                Self::meters(locations[i], locations[j])
            }
        }))
    }
}
