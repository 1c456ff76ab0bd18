//! Seams between the planner core and its collaborators.
//!
//! These are intentionally minimal. Concrete services (mapping APIs,
//! recommendation models) implement them and are injected into the planner.

use crate::error::Result;
use crate::matrix::DistanceMatrix;
use crate::suggest::{Candidate, SuggestionQuery};

/// Provides a distance matrix for a set of locations.
///
/// The matrix is indexed by the provided location order. Every location is
/// used both as an origin and as a destination, so one call yields the whole
/// table.
pub trait DistanceMatrixProvider {
    fn matrix_for(&self, locations: &[(f64, f64)]) -> Result<DistanceMatrix>;
}

impl<T> DistanceMatrixProvider for &T
where
    T: DistanceMatrixProvider + ?Sized,
{
    fn matrix_for(&self, locations: &[(f64, f64)]) -> Result<DistanceMatrix> {
        (**self).matrix_for(locations)
    }
}

impl<T> DistanceMatrixProvider for Box<T>
where
    T: DistanceMatrixProvider + ?Sized,
{
    fn matrix_for(&self, locations: &[(f64, f64)]) -> Result<DistanceMatrix> {
        (**self).matrix_for(locations)
    }
}

/// Provider chosen at runtime from configuration.
pub type DynMatrixProvider = Box<dyn DistanceMatrixProvider + Send + Sync>;

/// External source of candidate places, e.g. a recommendation model.
///
/// The planner treats the returned list like any other place list.
pub trait SuggestionSource {
    fn suggest(&self, query: &SuggestionQuery) -> Result<Vec<Candidate>>;
}
