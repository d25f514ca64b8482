//! The 2K4-e condition.
//!
//! For every 4-subset `C` of the vertices and every ordered 4-tuple `P` of distinct
//! vertices outside `C`, position `k` of `C` is matched with position `k` of `P` and the
//! six edges of the two \(K_4\)s are compared color by color. Exactly five agreements
//! mean two disjoint, color-matched copies of \(K_4 - e\): the factorization fails.
//! Six agreements (identically colored \(K_4\)s) are allowed.
//!
//! `C` ranges over combinations and `P` over permutations, so every alignment between
//! the two vertex sets is tried exactly once.

use log::trace;

use crate::matrix::{AdjacencyMatrix, N};

/// The six edges of \(K_4\) on positions `0..4`.
pub const K4_EDGES: [(usize, usize); 6] = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];

/// Number of agreeing edges that makes an alignment a violation.
pub const VIOLATION_COUNT: usize = 5;

/// Emit a trace record every this many subsets.
const TRACE_EVERY: usize = 100;

/// A pair of disjoint quadruples whose aligned \(K_4\)s agree on exactly five edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct K4eViolation {
    /// The unordered 4-subset, increasing.
    pub subset: [usize; 4],
    /// The ordered 4-tuple aligned with it.
    pub tuple: [usize; 4],
}

/// Counts the edges of \(K_4\) on which `c` and `p` (aligned position by position) agree.
#[inline(always)]
pub fn matching_edge_count(adj: &AdjacencyMatrix, c: [usize; 4], p: [usize; 4]) -> usize {
    K4_EDGES
        .iter()
        .filter(|&&(x, y)| adj.get(c[x], c[y]) == adj.get(p[x], p[y]))
        .count()
}

/// Returns the first violating `(C, P)` in enumeration order, if any.
pub fn find_2k4e_violation(adj: &AdjacencyMatrix) -> Option<K4eViolation> {
    let mut subset_index = 0usize;
    for a in 0..N {
        for b in (a + 1)..N {
            for c in (b + 1)..N {
                for d in (c + 1)..N {
                    let subset = [a, b, c, d];
                    if subset_index % TRACE_EVERY == 0 {
                        trace!("testing subset {subset_index} {subset:?}");
                    }
                    subset_index += 1;

                    if let Some(tuple) = find_aligned_tuple(adj, subset) {
                        return Some(K4eViolation { subset, tuple });
                    }
                }
            }
        }
    }
    None
}

/// Returns `true` iff the factorization satisfies the 2K4-e condition.
#[inline]
pub fn passes_2k4e(adj: &AdjacencyMatrix) -> bool {
    find_2k4e_violation(adj).is_none()
}

/// Searches the ordered 4-tuples outside `subset` for one agreeing with it on exactly
/// five edges.
fn find_aligned_tuple(adj: &AdjacencyMatrix, subset: [usize; 4]) -> Option<[usize; 4]> {
    let mut rest = [0usize; N - 4];
    let mut len = 0;
    for v in (0..N).filter(|v| !subset.contains(v)) {
        rest[len] = v;
        len += 1;
    }

    let colors = K4_EDGES.map(|(x, y)| adj.get(subset[x], subset[y]));

    for (i0, &p0) in rest.iter().enumerate() {
        for (i1, &p1) in rest.iter().enumerate() {
            if i1 == i0 {
                continue;
            }
            for (i2, &p2) in rest.iter().enumerate() {
                if i2 == i0 || i2 == i1 {
                    continue;
                }
                for (i3, &p3) in rest.iter().enumerate() {
                    if i3 == i0 || i3 == i1 || i3 == i2 {
                        continue;
                    }
                    let p = [p0, p1, p2, p3];
                    let mut count = 0;
                    for (k, &(x, y)) in K4_EDGES.iter().enumerate() {
                        if colors[k] == adj.get(p[x], p[y]) {
                            count += 1;
                        }
                    }
                    if count == VIOLATION_COUNT {
                        return Some(p);
                    }
                }
            }
        }
    }
    None
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::decode_compact;
    use crate::fixtures::{self, round_robin};
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    /// Two disjoint quadruples colored alike except for one edge.
    fn two_k4e_counterexample() -> AdjacencyMatrix {
        let mut adj = AdjacencyMatrix::uniform(2);
        for &(x, y) in &K4_EDGES {
            adj.set(x, y, (x + y) as u8);
            adj.set(4 + x, 4 + y, (x + y) as u8);
        }
        adj.set(6, 7, 9);
        adj
    }

    #[test]
    fn counterexample_is_rejected() {
        let adj = two_k4e_counterexample();
        assert_eq!(matching_edge_count(&adj, [0, 1, 2, 3], [4, 5, 6, 7]), 5);
        assert!(!passes_2k4e(&adj));
    }

    #[test]
    fn six_agreements_are_not_a_violation() {
        // Every alignment of every pair of quadruples agrees on all six edges.
        let adj = AdjacencyMatrix::uniform(7);
        assert_eq!(matching_edge_count(&adj, [0, 1, 2, 3], [4, 5, 6, 7]), 6);
        assert!(passes_2k4e(&adj));
    }

    #[test]
    fn matching_edge_count_boundaries() {
        let mut adj = AdjacencyMatrix::uniform(0);
        let c = [0, 1, 2, 3];
        let p = [4, 5, 6, 7];
        assert_eq!(matching_edge_count(&adj, c, p), 6);

        // Each recolored edge of P removes exactly one agreement.
        let expected = [5, 4, 3, 2, 1, 0];
        for (k, &(x, y)) in K4_EDGES.iter().enumerate() {
            adj.set(p[x], p[y], 1);
            assert_eq!(matching_edge_count(&adj, c, p), expected[k]);
        }
    }

    #[test]
    fn four_agreements_are_not_a_violation() {
        // GK12 reaches four agreements but never five or six.
        let adj = round_robin();
        assert_eq!(matching_edge_count(&adj, [0, 1, 2, 3], [4, 5, 9, 10]), 4);
        assert!(passes_2k4e(&adj));
    }

    #[test]
    fn violation_witness_is_disjoint_and_counts_five() {
        let adj = decode_compact(fixtures::FIRST_COMPACT).unwrap();
        let violation = find_2k4e_violation(&adj).unwrap();
        assert_eq!(violation.subset, [0, 1, 2, 4]);
        assert_eq!(violation.tuple, [7, 6, 5, 11]);
        for v in violation.tuple {
            assert!(!violation.subset.contains(&v));
        }
        assert_eq!(
            matching_edge_count(&adj, violation.subset, violation.tuple),
            VIOLATION_COUNT
        );
    }

    #[test]
    fn first_factorization_fails() {
        let adj = decode_compact(fixtures::FIRST_COMPACT).unwrap();
        assert!(!passes_2k4e(&adj));
    }

    #[test]
    fn round_robin_passes() {
        let adj = round_robin();
        assert!(passes_2k4e(&adj));
        assert_eq!(passes_2k4e(&adj), passes_2k4e(&adj));
    }

    #[test]
    fn result_is_invariant_under_vertex_relabeling() {
        let mut rng = XorShiftRng::seed_from_u64(0x2A4E);
        let first = decode_compact(fixtures::FIRST_COMPACT).unwrap();
        let counter = two_k4e_counterexample();
        for _ in 0..5 {
            let mut perm: [usize; N] = std::array::from_fn(|v| v);
            perm.shuffle(&mut rng);
            assert!(!passes_2k4e(&first.relabel_vertices(&perm)));
            assert!(!passes_2k4e(&counter.relabel_vertices(&perm)));
        }
        let mut perm: [usize; N] = std::array::from_fn(|v| v);
        perm.shuffle(&mut rng);
        assert!(passes_2k4e(&round_robin().relabel_vertices(&perm)));
    }
}
