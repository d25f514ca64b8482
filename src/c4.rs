//! The C4 condition.
//!
//! Two edges `ab` and `cd` of the same 1-factor span a 4-vertex set with two more
//! pairs of independent edges: `{ac, bd}` and `{ad, bc}`. The condition requires
//! that either both pairs are monochromatic or neither is. Factor `NUM_FACTORS - 1`
//! is determined by the others and is not checked.

use crate::matrix::{AdjacencyMatrix, EdgeMatrix, EDGES_PER_FACTOR, NUM_FACTORS};

/// First violation found by [`find_c4_violation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct C4Violation {
    /// The factor both edges belong to.
    pub factor: usize,
    /// Endpoints `(a, b)` of the first edge.
    pub first: (usize, usize),
    /// Endpoints `(c, d)` of the second edge.
    pub second: (usize, usize),
}

/// Returns whether the edges `(a, b)` and `(c, d)` of one factor break the condition:
/// exactly one of `{ac, bd}`, `{ad, bc}` is monochromatic.
#[inline(always)]
pub fn is_c4_violation(
    adj: &AdjacencyMatrix,
    (a, b): (usize, usize),
    (c, d): (usize, usize),
) -> bool {
    (adj.get(a, c) == adj.get(b, d)) != (adj.get(a, d) == adj.get(b, c))
}

/// Returns the first C4 violation, scanning factors `0..NUM_FACTORS-1` in order.
///
/// The predicate is symmetric in the two edges and never holds for an edge paired
/// with itself, so each unordered pair `e1 < e2` is visited once.
pub fn find_c4_violation(adj: &AdjacencyMatrix, edges: &EdgeMatrix) -> Option<C4Violation> {
    for f in 0..NUM_FACTORS - 1 {
        let factor = edges.factor(f);
        for e1 in 0..EDGES_PER_FACTOR {
            let [a, b] = factor[e1];
            let first = (a as usize, b as usize);
            for e2 in (e1 + 1)..EDGES_PER_FACTOR {
                let [c, d] = factor[e2];
                let second = (c as usize, d as usize);
                if is_c4_violation(adj, first, second) {
                    return Some(C4Violation {
                        factor: f,
                        first,
                        second,
                    });
                }
            }
        }
    }
    None
}

/// Returns `true` iff the factorization satisfies the C4 condition.
///
/// `edges` must be the edge matrix of `adj` (as produced together with it by
/// [`crate::encoding::decode_incidence`]).
#[inline]
pub fn passes_c4_with_edges(adj: &AdjacencyMatrix, edges: &EdgeMatrix) -> bool {
    find_c4_violation(adj, edges).is_none()
}

/// Returns `true` iff the factorization satisfies the C4 condition.
pub fn passes_c4(adj: &AdjacencyMatrix) -> bool {
    passes_c4_with_edges(adj, &adj.edge_matrix())
}

// ============================================================================
// Tests
// ============================================================================
