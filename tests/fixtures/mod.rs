//! Test fixtures for trip-route-planner.
//!
//! Provides realistic test data including:
//! - Real Taipei landmarks (coordinates from OpenStreetMap)
//! - Helpers for building places and hand-written distance matrices

pub mod taipei_locations;

pub use taipei_locations::*;

use std::sync::atomic::{AtomicUsize, Ordering};

use trip_route_planner::{DistanceMatrix, DistanceMatrixProvider, Place, PlannerError};

/// Places named `A`, `B`, ... along the equator, one degree apart.
pub fn lettered_places(n: usize) -> Vec<Place> {
    (0..n)
        .map(|i| {
            let name = char::from(b'A' + i as u8).to_string();
            Place::new(name, 0.0, i as f64).with_id(format!("p{i}"))
        })
        .collect()
}

/// Matrix with `value` off the diagonal and zero on it.
pub fn uniform_matrix(n: usize, value: u32) -> DistanceMatrix {
    DistanceMatrix::from_fn(n, |i, j| if i == j { 0 } else { value })
}

pub fn names(places: &[Place]) -> Vec<&str> {
    places.iter().map(|place| place.name.as_str()).collect()
}

/// Distance provider double that records how often it was asked.
pub struct StubProvider {
    response: Result<DistanceMatrix, PlannerError>,
    calls: AtomicUsize,
}

impl StubProvider {
    pub fn with_matrix(matrix: DistanceMatrix) -> Self {
        Self {
            response: Ok(matrix),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_error(error: PlannerError) -> Self {
        Self {
            response: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DistanceMatrixProvider for StubProvider {
    fn matrix_for(&self, _locations: &[(f64, f64)]) -> trip_route_planner::Result<DistanceMatrix> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}
