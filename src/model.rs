//! Itinerary records exchanged with the persistence layer.
//!
//! Documents are deserialized into these types before they reach the
//! optimizer, so a place without coordinates is rejected at the boundary.

use serde::{Deserialize, Serialize};

/// A point of interest on a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Identifier from the place source; ad-hoc points have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visited: Option<bool>,
}

impl Place {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            latitude,
            longitude,
            visited: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Location coordinates (lat, lng).
    pub fn location(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    pub fn is_visited(&self) -> bool {
        self.visited.unwrap_or(false)
    }
}

/// One day of an itinerary, in visiting order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Day {
    #[serde(default)]
    pub places: Vec<Place>,
}

impl Day {
    pub fn new(places: Vec<Place>) -> Self {
        Self { places }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub itinerary_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub days: Vec<Day>,
}

impl Itinerary {
    pub fn new(itinerary_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            itinerary_id: itinerary_id.into(),
            name: name.into(),
            days: Vec::new(),
        }
    }

    pub fn with_day(mut self, day: Day) -> Self {
        self.days.push(day);
        self
    }

    pub fn day(&self, index: usize) -> Option<&Day> {
        self.days.get(index)
    }

    pub fn day_mut(&mut self, index: usize) -> Option<&mut Day> {
        self.days.get_mut(index)
    }
}
