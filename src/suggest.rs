//! Suggested attractions and the filters applied before routing them.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::Place;
use crate::traits::SuggestionSource;

/// Ratings below this are dropped by default.
pub const DEFAULT_MIN_RATING: f32 = 4.0;

/// Default cap on how many candidates a source is asked for.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 30;

/// Default number of filtered candidates that make it into a routed day.
/// The route search is exhaustive, so this stays well below the fetch cap.
pub const DEFAULT_ROUTE_PLACES: usize = 8;

/// A place proposed by a suggestion source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(flatten)]
    pub place: Place,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
}

impl Candidate {
    pub fn new(place: Place, rating: Option<f32>) -> Self {
        Self { place, rating }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionQuery {
    pub city: String,
    pub place_type: String,
    /// How many candidates the source is asked for.
    pub max_places: usize,
    /// Candidates rated below this are dropped before routing.
    pub min_rating: f32,
    /// How many of the surviving candidates are routed.
    pub route_places: usize,
}

impl SuggestionQuery {
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            place_type: "tourist_attraction".to_string(),
            max_places: DEFAULT_MAX_SUGGESTIONS,
            min_rating: DEFAULT_MIN_RATING,
            route_places: DEFAULT_ROUTE_PLACES,
        }
    }

    pub fn with_max_places(mut self, max_places: usize) -> Self {
        self.max_places = max_places;
        self
    }

    pub fn with_min_rating(mut self, min_rating: f32) -> Self {
        self.min_rating = min_rating;
        self
    }

    pub fn with_route_places(mut self, route_places: usize) -> Self {
        self.route_places = route_places;
        self
    }
}

/// Keep candidates rated at least `min_rating`; unrated counts as zero.
pub fn filter_high_rated(candidates: Vec<Candidate>, min_rating: f32) -> Vec<Candidate> {
    candidates
        .into_iter()
        .filter(|candidate| candidate.rating.unwrap_or(0.0) >= min_rating)
        .collect()
}

/// First `limit` candidates in source order.
pub fn select_top(mut candidates: Vec<Candidate>, limit: usize) -> Vec<Candidate> {
    candidates.truncate(limit);
    candidates
}

/// Fixed candidate list, for tests and for sources resolved ahead of time.
#[derive(Debug, Clone, Default)]
pub struct StaticSuggestions {
    candidates: Vec<Candidate>,
}

impl StaticSuggestions {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }
}

impl SuggestionSource for StaticSuggestions {
    fn suggest(&self, query: &SuggestionQuery) -> Result<Vec<Candidate>> {
        Ok(select_top(self.candidates.clone(), query.max_places))
    }
}
