//! Request-scoped orchestration around the optimizer.
//!
//! `RoutePlanner` is the handle a service constructs once (from
//! [`crate::config::PlannerConfig`] or by hand) and passes into its request
//! handlers. It owns the distance provider and solve options; no state is
//! kept between calls.

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::{PlannerError, Result};
use crate::model::{Itinerary, Place};
use crate::solver::{find_best_route, OptimizedRoute, SolveOptions};
use crate::suggest::{filter_high_rated, select_top, SuggestionQuery};
use crate::traits::{DistanceMatrixProvider, SuggestionSource};

/// What happened to one day of an itinerary-wide optimization.
#[derive(Debug, Clone, PartialEq)]
pub enum DayOutcome {
    /// Reordered and written back.
    Optimized { day: usize, total_distance: u64 },
    /// Fewer than two places; left as is.
    Skipped { day: usize, places: usize },
    /// Left as is because optimization failed.
    Failed { day: usize, error: PlannerError },
}

#[derive(Debug, Clone)]
pub struct RoutePlanner<M> {
    provider: M,
    options: SolveOptions,
}

impl<M> RoutePlanner<M>
where
    M: DistanceMatrixProvider,
{
    pub fn new(provider: M, options: SolveOptions) -> Self {
        Self { provider, options }
    }

    pub fn provider(&self) -> &M {
        &self.provider
    }

    pub fn options(&self) -> &SolveOptions {
        &self.options
    }

    /// Best visiting order for `places`.
    ///
    /// Fewer than two places are rejected before the provider is called. A
    /// matrix that does not cover every place is rejected by the solver.
    pub fn optimize_places(&self, places: &[Place]) -> Result<OptimizedRoute> {
        if places.len() < 2 {
            return Err(PlannerError::InsufficientPlaces {
                found: places.len(),
            });
        }

        let locations: Vec<(f64, f64)> = places.iter().map(Place::location).collect();
        let matrix = self.provider.matrix_for(&locations)?;

        let route = find_best_route(&matrix, places, &self.options)?;
        debug!(
            places = places.len(),
            total_distance = route.total_distance,
            "optimized place list"
        );
        Ok(route)
    }

    /// Reorder one day of `itinerary` in place. On error the day is unchanged.
    pub fn optimize_day(&self, itinerary: &mut Itinerary, day_index: usize) -> Result<OptimizedRoute> {
        let days = itinerary.days.len();
        let day = itinerary
            .day_mut(day_index)
            .ok_or(PlannerError::DayNotFound {
                index: day_index,
                days,
            })?;

        let route = self.optimize_places(&day.places)?;
        day.places.clone_from(&route.places);
        info!(
            itinerary = %itinerary.itinerary_id,
            day = day_index,
            total_distance = route.total_distance,
            "day reordered"
        );
        Ok(route)
    }

    /// Plan a day from a suggestion source's candidates.
    ///
    /// Candidates below the query's `min_rating` are dropped. The first
    /// `route_places` survivors, in source order, are routed like any other
    /// list; `max_places` only bounds what the source returns.
    pub fn optimize_suggestions<S>(&self, source: &S, query: &SuggestionQuery) -> Result<OptimizedRoute>
    where
        S: SuggestionSource + ?Sized,
    {
        let candidates = filter_high_rated(source.suggest(query)?, query.min_rating);
        let kept = candidates.len();
        let places: Vec<Place> = select_top(candidates, query.route_places)
            .into_iter()
            .map(|candidate| candidate.place)
            .collect();
        debug!(
            city = %query.city,
            candidates = kept,
            places = places.len(),
            "routing suggested places"
        );
        self.optimize_places(&places)
    }
}

impl<M> RoutePlanner<M>
where
    M: DistanceMatrixProvider + Sync,
{
    /// Reorder every day with at least two places, days running in parallel.
    ///
    /// Failures are reported per day and leave that day untouched.
    pub fn optimize_itinerary(&self, itinerary: &mut Itinerary) -> Vec<DayOutcome> {
        let outcomes: Vec<(DayOutcome, Option<Vec<Place>>)> = itinerary
            .days
            .par_iter()
            .enumerate()
            .map(|(day, entry)| {
                if entry.places.len() < 2 {
                    return (
                        DayOutcome::Skipped {
                            day,
                            places: entry.places.len(),
                        },
                        None,
                    );
                }
                match self.optimize_places(&entry.places) {
                    Ok(route) => (
                        DayOutcome::Optimized {
                            day,
                            total_distance: route.total_distance,
                        },
                        Some(route.places),
                    ),
                    Err(error) => {
                        warn!(itinerary = %itinerary.itinerary_id, day, error = %error, "day not optimized");
                        (DayOutcome::Failed { day, error }, None)
                    }
                }
            })
            .collect();

        outcomes
            .into_iter()
            .map(|(outcome, places)| {
                if let (DayOutcome::Optimized { day, .. }, Some(places)) = (&outcome, places) {
                    itinerary.days[*day].places = places;
                }
                outcome
            })
            .collect()
    }
}
