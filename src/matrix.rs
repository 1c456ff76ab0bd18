//! Pairwise travel-distance table.

use crate::error::{PlannerError, Result};

/// Square matrix of travel costs, indexed by the order of the input places.
///
/// `cost(i, j)` is the cost of travelling from place `i` to place `j`. The
/// table is not assumed to be symmetric: one-way streets make the reverse leg
/// differ. Cost units are whatever the provider reports (meters for the
/// bundled providers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    rows: Vec<Vec<u32>>,
}

impl DistanceMatrix {
    /// Build a matrix from rows, rejecting non-square input.
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self> {
        let n = rows.len();
        if let Some(bad) = rows.iter().find(|row| row.len() != n) {
            return Err(PlannerError::DimensionMismatch {
                places: n,
                rows: bad.len(),
            });
        }
        Ok(Self { rows })
    }

    /// Build an `n x n` matrix from a cost function.
    pub fn from_fn(n: usize, mut cost: impl FnMut(usize, usize) -> u32) -> Self {
        let rows = (0..n)
            .map(|i| (0..n).map(|j| cost(i, j)).collect())
            .collect();
        Self { rows }
    }

    /// Number of places the matrix covers.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cost(&self, from: usize, to: usize) -> u32 {
        self.rows[from][to]
    }

    pub fn rows(&self) -> &[Vec<u32>] {
        &self.rows
    }

    /// Sum of consecutive legs along `order`. There is no return leg.
    pub fn path_cost(&self, order: &[usize]) -> u64 {
        order
            .windows(2)
            .map(|leg| u64::from(self.cost(leg[0], leg[1])))
            .sum()
    }

    /// Fail with `DimensionMismatch` unless the matrix covers `places` entries.
    pub fn ensure_covers(&self, places: usize) -> Result<()> {
        if self.len() == places {
            Ok(())
        } else {
            Err(PlannerError::DimensionMismatch {
                places,
                rows: self.len(),
            })
        }
    }
}
