//! Exhaustive route optimizer for a single day.
//!
//! The search is deliberately exact: every ordering of the day's places is
//! evaluated and the cheapest open path is kept. This is O(n!) and only
//! viable because a day holds a handful of hand-picked stops. Swapping in a
//! heuristic (nearest neighbour, 2-opt) is reasonable once days grow past a
//! safe factorial bound, but it is not done here.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::{PlannerError, Result};
use crate::matrix::DistanceMatrix;
use crate::model::Place;

/// Above this many places a warning is logged when no limit is configured.
pub const FACTORIAL_WARN_THRESHOLD: usize = 10;

#[derive(Debug, Clone, Default)]
pub struct SolveOptions {
    /// Refuse inputs larger than this instead of enumerating n! orderings.
    /// `None` keeps the unbounded behaviour.
    pub max_places: Option<usize>,
}

impl SolveOptions {
    pub fn with_max_places(limit: usize) -> Self {
        Self {
            max_places: Some(limit),
        }
    }
}

/// Best ordering found for a day.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizedRoute {
    /// Input places in visiting order.
    pub places: Vec<Place>,
    /// `order[k]` is the input index visited k-th.
    pub order: Vec<usize>,
    /// Path cost of `order`, in matrix units.
    pub total_distance: u64,
}

/// Path cost memo for one distance matrix, keyed by the exact index ordering.
///
/// The cache borrows the matrix its costs come from, so a cache can never
/// answer for a different matrix (a refreshed table, another day with the
/// same number of stops). Exhaustive enumeration never produces the same
/// ordering twice, so during a single `find_best_route` this never hits.
#[derive(Debug)]
pub struct RouteCostCache<'m> {
    matrix: &'m DistanceMatrix,
    costs: HashMap<Vec<usize>, u64>,
    hits: usize,
    misses: usize,
}

impl<'m> RouteCostCache<'m> {
    pub fn new(matrix: &'m DistanceMatrix) -> Self {
        Self {
            matrix,
            costs: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Matrix every cached cost was computed from.
    pub fn matrix(&self) -> &'m DistanceMatrix {
        self.matrix
    }

    /// Cost of `order`, computing and storing it on first sight.
    pub fn cost_of(&mut self, order: &[usize]) -> u64 {
        if let Some(&cost) = self.costs.get(order) {
            self.hits += 1;
            return cost;
        }
        self.misses += 1;
        let cost = self.matrix.path_cost(order);
        self.costs.insert(order.to_vec(), cost);
        cost
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }
}

/// Reorder `places` to minimize total travel along the path.
///
/// Ties keep the first ordering met in lexicographic enumeration starting
/// from the input order, so identical inputs always give identical output.
pub fn find_best_route(
    distances: &DistanceMatrix,
    places: &[Place],
    options: &SolveOptions,
) -> Result<OptimizedRoute> {
    let mut cache = RouteCostCache::new(distances);
    find_best_route_with_cache(&mut cache, places, options)
}

/// Same as [`find_best_route`], memoizing into a caller-owned cache and
/// searching over the cache's matrix.
pub fn find_best_route_with_cache(
    cache: &mut RouteCostCache<'_>,
    places: &[Place],
    options: &SolveOptions,
) -> Result<OptimizedRoute> {
    let n = places.len();
    if n < 2 {
        return Err(PlannerError::InsufficientPlaces { found: n });
    }
    cache.matrix().ensure_covers(n)?;

    match options.max_places {
        Some(limit) if n > limit => {
            return Err(PlannerError::PermutationSpaceExplosion { places: n, limit });
        }
        None if n > FACTORIAL_WARN_THRESHOLD => {
            warn!(places = n, "exhaustive route search over {n}! orderings");
        }
        _ => {}
    }

    let mut order: Vec<usize> = (0..n).collect();
    let mut best_order = order.clone();
    let mut best_cost = u64::MAX;
    let mut evaluated: u64 = 0;

    loop {
        let cost = cache.cost_of(&order);
        evaluated += 1;
        if cost < best_cost {
            best_cost = cost;
            best_order.clone_from(&order);
        }
        if !next_permutation(&mut order) {
            break;
        }
    }

    debug!(
        places = n,
        evaluated,
        best_cost,
        cache_hits = cache.hits(),
        "route search finished"
    );

    let sorted = best_order.iter().map(|&i| places[i].clone()).collect();
    Ok(OptimizedRoute {
        places: sorted,
        order: best_order,
        total_distance: best_cost,
    })
}

/// Advance `items` to the next lexicographic permutation.
///
/// Returns false once the last (descending) permutation has been reached.
pub fn next_permutation(items: &mut [usize]) -> bool {
    if items.len() < 2 {
        return false;
    }

    // Find the rightmost ascent.
    let mut pivot = items.len() - 1;
    while pivot > 0 && items[pivot - 1] >= items[pivot] {
        pivot -= 1;
    }
    if pivot == 0 {
        return false;
    }

    let mut successor = items.len() - 1;
    while items[successor] <= items[pivot - 1] {
        successor -= 1;
    }
    items.swap(pivot - 1, successor);
    items[pivot..].reverse();
    true
}
