//! Real Taipei landmarks for realistic test fixtures.
//!
//! Coordinates sourced from OpenStreetMap.
//! These are real, routable locations that work with OSRM Taiwan data.

use trip_route_planner::Place;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }

    pub fn to_place(&self) -> Place {
        Place::new(self.name, self.lat, self.lng)
    }
}

// ============================================================================
// Central Taipei
// ============================================================================

pub const CENTRAL: &[Location] = &[
    Location::new("Taipei Main Station", 25.0478, 121.5170),
    Location::new("Chiang Kai-shek Memorial Hall", 25.0346, 121.5218),
    Location::new("Presidential Office Building", 25.0401, 121.5119),
    Location::new("Longshan Temple", 25.0372, 121.4999),
    Location::new("Ximending", 25.0421, 121.5081),
];

// ============================================================================
// East Side
// ============================================================================

pub const EAST: &[Location] = &[
    Location::new("Taipei 101", 25.0340, 121.5645),
    Location::new("Sun Yat-sen Memorial Hall", 25.0400, 121.5602),
    Location::new("Elephant Mountain Trailhead", 25.0273, 121.5707),
    Location::new("Raohe Night Market", 25.0510, 121.5776),
];

// ============================================================================
// North
// ============================================================================

pub const NORTH: &[Location] = &[
    Location::new("National Palace Museum", 25.1024, 121.5485),
    Location::new("Shilin Night Market", 25.0881, 121.5240),
    Location::new("Beitou Hot Spring Museum", 25.1366, 121.5068),
];

/// Returns all locations as a single list.
pub fn all_locations() -> Vec<Location> {
    let mut all = Vec::with_capacity(CENTRAL.len() + EAST.len() + NORTH.len());
    all.extend_from_slice(CENTRAL);
    all.extend_from_slice(EAST);
    all.extend_from_slice(NORTH);
    all
}

/// A day out of the first `count` locations, as places.
pub fn sample_day(count: usize) -> Vec<Place> {
    all_locations()
        .iter()
        .take(count)
        .map(Location::to_place)
        .collect()
}
