//! Dense matrix representations of a 1-factorization of \(K_{12}\).
//!
//! Three views of the same object are used throughout the crate:
//! - [`AdjacencyMatrix`]: `colors[i][j]` is the factor containing edge \(\{i,j\}\).
//! - [`IncidenceMatrix`]: `rows[i][f]` is the index of the edge of factor `f` touching `i`.
//! - [`EdgeMatrix`]: `edges[f][e]` is the `e`-th edge `[i, j]` (with `i < j`) of factor `f`.
//!
//! All sizes are fixed at compile time, so every candidate lives in plain stack arrays.

use std::fmt;

// ============================================================================
// Sizes
// ============================================================================

/// Number of vertices.
pub const N: usize = 12;

/// Number of 1-factors in a 1-factorization of \(K_N\).
pub const NUM_FACTORS: usize = N - 1;

/// Number of edges in each 1-factor.
pub const EDGES_PER_FACTOR: usize = N / 2;

/// Number of unordered vertex pairs, `N * (N-1) / 2`.
pub const NUM_PAIRS: usize = N * (N - 1) / 2;

/// Iterates over the unordered pairs `(i, j)`, `i < j`, in colex order
/// (increasing `j`, then increasing `i`).
pub fn colex_pairs() -> impl Iterator<Item = (usize, usize)> {
    (0..N).flat_map(|j| (0..j).map(move |i| (i, j)))
}

// ============================================================================
// AdjacencyMatrix
// ============================================================================

/// Edge coloring of \(K_N\) by factor id.
///
/// The matrix is symmetric and its diagonal is held at `0`. Well-formed input
/// makes every factor a perfect matching; that is only checked on request via
/// [`AdjacencyMatrix::check_one_factorization`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AdjacencyMatrix {
    colors: [[u8; N]; N],
}

impl Default for AdjacencyMatrix {
    fn default() -> Self {
        Self::uniform(0)
    }
}

impl AdjacencyMatrix {
    /// Creates a matrix in which every edge has color `factor`.
    ///
    /// This is not a 1-factorization; it is handy as a blank canvas for tests
    /// and hand-built counterexamples. Rendering needs `factor < 36`.
    pub fn uniform(factor: u8) -> Self {
        let mut colors = [[factor; N]; N];
        for (i, row) in colors.iter_mut().enumerate() {
            row[i] = 0;
        }
        Self { colors }
    }

    /// Creates a matrix from raw rows.
    ///
    /// # Panics
    /// Panics in debug builds if `colors` is not symmetric.
    pub fn from_colors(colors: [[u8; N]; N]) -> Self {
        for i in 0..N {
            for j in (i + 1)..N {
                debug_assert_eq!(
                    colors[i][j], colors[j][i],
                    "adjacency is not symmetric at ({i},{j})"
                );
            }
        }
        Self { colors }
    }

    /// Returns the factor id of edge \(\{i,j\}\).
    #[inline(always)]
    pub fn get(&self, i: usize, j: usize) -> u8 {
        self.colors[i][j]
    }

    /// Colors edge \(\{i,j\}\) with `factor`, keeping the matrix symmetric.
    ///
    /// Rendering (compact strings, edge lists, `Display`) needs `factor < 36`.
    #[inline(always)]
    pub fn set(&mut self, i: usize, j: usize, factor: u8) {
        debug_assert!(i != j, "self-loop at vertex {i}");
        self.colors[i][j] = factor;
        self.colors[j][i] = factor;
    }

    /// Returns the raw rows.
    #[inline(always)]
    pub fn colors(&self) -> &[[u8; N]; N] {
        &self.colors
    }

    /// Derives the edge matrix: the edges of each factor in increasing `(i, j)` order.
    ///
    /// Only meaningful for a valid 1-factorization; factors with more than
    /// `EDGES_PER_FACTOR` edges are truncated and factors with fewer keep `[0, 0]`
    /// placeholders.
    pub fn edge_matrix(&self) -> EdgeMatrix {
        let mut edges = EdgeMatrix::default();
        let mut filled = [0usize; NUM_FACTORS];
        for i in 0..N {
            for j in (i + 1)..N {
                let f = self.colors[i][j] as usize;
                if f < NUM_FACTORS && filled[f] < EDGES_PER_FACTOR {
                    edges.edges[f][filled[f]] = [i as u8, j as u8];
                    filled[f] += 1;
                }
            }
        }
        edges
    }

    /// Returns the edges colored `factor`, sorted by `(i, j)` with `i < j`.
    pub fn factor_edges(&self, factor: u8) -> Vec<(usize, usize)> {
        let mut out = Vec::with_capacity(EDGES_PER_FACTOR);
        for i in 0..N {
            for j in (i + 1)..N {
                if self.colors[i][j] == factor {
                    out.push((i, j));
                }
            }
        }
        out
    }

    /// Returns a copy with vertices renamed by `perm` (vertex `v` becomes `perm[v]`).
    ///
    /// # Panics
    /// Panics in debug builds if `perm` is not a permutation of `0..N`.
    pub fn relabel_vertices(&self, perm: &[usize; N]) -> Self {
        debug_assert!(is_permutation(perm), "not a permutation: {perm:?}");
        let mut out = Self::default();
        for i in 0..N {
            for j in (i + 1)..N {
                out.set(perm[i], perm[j], self.colors[i][j]);
            }
        }
        out
    }

    /// Checks that every factor is a perfect matching and the matrix is symmetric.
    ///
    /// # Errors
    /// Returns the first structural defect found.
    pub fn check_one_factorization(&self) -> Result<(), StructureError> {
        for i in 0..N {
            for j in (i + 1)..N {
                if self.colors[i][j] != self.colors[j][i] {
                    return Err(StructureError::NotSymmetric { i, j });
                }
                let f = self.colors[i][j];
                if f as usize >= NUM_FACTORS {
                    return Err(StructureError::FactorOutOfRange { i, j, factor: f });
                }
            }
        }

        // Each vertex must touch every factor exactly once.
        for v in 0..N {
            let mut seen = [false; NUM_FACTORS];
            for u in (0..N).filter(|&u| u != v) {
                let f = self.colors[v][u] as usize;
                if seen[f] {
                    return Err(StructureError::NotAMatching {
                        factor: f as u8,
                        vertex: v,
                    });
                }
                seen[f] = true;
            }
        }
        Ok(())
    }
}

impl fmt::Display for AdjacencyMatrix {
    /// Prints the matrix as `N` rows of symbols, with `.` on the diagonal.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..N {
            for j in 0..N {
                if i == j {
                    write!(f, ".")?;
                } else {
                    write!(f, "{}", crate::encoding::symbol(self.colors[i][j]))?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn is_permutation(perm: &[usize; N]) -> bool {
    let mut seen = [false; N];
    for &p in perm {
        if p >= N || seen[p] {
            return false;
        }
        seen[p] = true;
    }
    true
}

/// Structural defects reported by [`AdjacencyMatrix::check_one_factorization`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StructureError {
    /// `A[i][j] != A[j][i]`.
    #[error("matrix is not symmetric at ({i},{j})")]
    NotSymmetric {
        /// Row index.
        i: usize,
        /// Column index.
        j: usize,
    },
    /// An edge carries a factor id outside `0..NUM_FACTORS`.
    #[error("edge ({i},{j}) has factor {factor}, expected at most {}", NUM_FACTORS - 1)]
    FactorOutOfRange {
        /// Row index.
        i: usize,
        /// Column index.
        j: usize,
        /// The offending factor id.
        factor: u8,
    },
    /// A vertex touches the same factor twice, so that factor is not a perfect matching.
    #[error("factor {factor} is not a perfect matching: vertex {vertex} is covered twice")]
    NotAMatching {
        /// The factor id.
        factor: u8,
        /// The vertex covered more than once.
        vertex: usize,
    },
}

// ============================================================================
// IncidenceMatrix / EdgeMatrix
// ============================================================================

/// Vertex-by-factor incidence matrix, as read from the block input format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IncidenceMatrix {
    /// `rows[i][f]` is the index of the edge of factor `f` that vertex `i` lies on.
    pub rows: [[u8; NUM_FACTORS]; N],
}

/// Endpoints of every edge of every factor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EdgeMatrix {
    /// `edges[f][e]` holds the endpoints `[i, j]`, `i < j`, of edge `e` of factor `f`.
    pub edges: [[[u8; 2]; EDGES_PER_FACTOR]; NUM_FACTORS],
}

impl EdgeMatrix {
    /// Returns the edges of factor `f`.
    #[inline(always)]
    pub fn factor(&self, f: usize) -> &[[u8; 2]; EDGES_PER_FACTOR] {
        &self.edges[f]
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::round_robin;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    #[test]
    fn colex_pairs_visit_every_pair_once() {
        let pairs: Vec<_> = colex_pairs().collect();
        assert_eq!(pairs.len(), NUM_PAIRS);
        assert_eq!(&pairs[..4], &[(0, 1), (0, 2), (1, 2), (0, 3)]);
        assert_eq!(pairs.last(), Some(&(10, 11)));
    }

    #[test]
    fn round_robin_is_a_one_factorization() {
        let adj = round_robin();
        assert_eq!(adj.check_one_factorization(), Ok(()));
        for f in 0..NUM_FACTORS as u8 {
            assert_eq!(adj.factor_edges(f).len(), EDGES_PER_FACTOR);
        }
    }

    #[test]
    fn uniform_matrix_is_not_a_matching() {
        let adj = AdjacencyMatrix::uniform(3);
        assert_eq!(
            adj.check_one_factorization(),
            Err(StructureError::NotAMatching { factor: 3, vertex: 0 })
        );
    }

    #[test]
    fn out_of_range_factor_is_reported() {
        let mut adj = round_robin();
        adj.set(2, 5, 11);
        assert_eq!(
            adj.check_one_factorization(),
            Err(StructureError::FactorOutOfRange { i: 2, j: 5, factor: 11 })
        );
    }

    #[test]
    fn edge_matrix_lists_sorted_edges() {
        let adj = round_robin();
        let edges = adj.edge_matrix();
        assert_eq!(
            edges.factor(0),
            &[[0, 11], [1, 10], [2, 9], [3, 8], [4, 7], [5, 6]]
        );
        for f in 0..NUM_FACTORS {
            for &[i, j] in edges.factor(f) {
                assert!(i < j);
                assert_eq!(adj.get(i as usize, j as usize) as usize, f);
            }
        }
    }

    #[test]
    fn relabeling_preserves_structure() {
        let mut rng = XorShiftRng::seed_from_u64(0x1FAC);
        let adj = round_robin();
        for _ in 0..20 {
            let mut perm: [usize; N] = std::array::from_fn(|v| v);
            perm.shuffle(&mut rng);
            let relabeled = adj.relabel_vertices(&perm);
            assert_eq!(relabeled.check_one_factorization(), Ok(()));
            for i in 0..N {
                for j in (i + 1)..N {
                    assert_eq!(relabeled.get(perm[i], perm[j]), adj.get(i, j));
                }
            }
        }
    }

    #[test]
    fn display_marks_diagonal() {
        let text = round_robin().to_string();
        let first = text.lines().next().unwrap();
        assert_eq!(first.len(), N);
        assert!(first.starts_with('.'));
    }

    #[test]
    fn display_renders_the_last_alphabet_symbol() {
        let text = AdjacencyMatrix::uniform(35).to_string();
        assert_eq!(text.lines().nth(1), Some("Z.ZZZZZZZZZZ"));
    }
}
