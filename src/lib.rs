//! trip-route-planner core
//!
//! Orders the stops of an itinerary day to minimize travel distance, backed
//! by a pluggable distance-matrix provider.

pub mod checkin;
pub mod config;
pub mod error;
pub mod google;
pub mod haversine;
pub mod matrix;
pub mod model;
pub mod osrm;
pub mod planner;
pub mod solver;
pub mod suggest;
pub mod traits;
pub mod weather;

pub use error::{PlannerError, Result};
pub use matrix::DistanceMatrix;
pub use model::{Day, Itinerary, Place};
pub use planner::{DayOutcome, RoutePlanner};
pub use solver::{find_best_route, OptimizedRoute, SolveOptions};
pub use traits::{DistanceMatrixProvider, SuggestionSource};
