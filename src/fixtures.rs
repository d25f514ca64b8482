//! Known 1-factorizations of \(K_{12}\) with known test outcomes.
//!
//! - The first factorization of the Kaski–Östergård enumeration: passes C4, fails 2K4-e.
//! - The round-robin factorization \(GK_{12}\): passes both conditions.
//! - The first factorization with an alternating 4-cycle of factors 0 and 1 switched
//!   on vertices 0,1,2,3: still a 1-factorization, fails C4.

use crate::encoding::parse_incidence_block;
use crate::error::DecodeError;
use crate::matrix::{AdjacencyMatrix, IncidenceMatrix, N};

/// Incidence block of the first Kaski–Östergård factorization.
pub const FIRST_INCIDENCE_TEXT: &str = include_str!("../data/first_factorization.txt");

/// Incidence block of \(GK_{12}\).
pub const ROUND_ROBIN_INCIDENCE_TEXT: &str = include_str!("../data/round_robin.txt");

/// Incidence block of the switched variant of the first factorization.
pub const SWITCHED_INCIDENCE_TEXT: &str = include_str!("../data/switched.txt");

/// Compact string of the first Kaski–Östergård factorization.
pub const FIRST_COMPACT: &str =
    "012210345643650789A1287A92109A347856A9438765056789A34126587A943210";

/// Compact string of \(GK_{12}\).
pub const ROUND_ROBIN_COMPACT: &str =
    "61772828398394A394A5094A50614A506172A5061728350617283940123456789A";

/// Compact string of the switched variant of the first factorization.
pub const SWITCHED_COMPACT: &str =
    "210012345643650789A1287A92109A347856A9438765056789A34126587A943210";

/// Builds \(GK_{12}\): factor `r` holds `{r, 11}` and `{r+k, r-k}` (mod 11), `k = 1..5`.
pub fn round_robin() -> AdjacencyMatrix {
    let m = N - 1;
    let mut adj = AdjacencyMatrix::default();
    for r in 0..m {
        adj.set(r, m, r as u8);
        for k in 1..N / 2 {
            adj.set((r + k) % m, (r + m - k) % m, r as u8);
        }
    }
    adj
}

/// Incidence matrix of the first Kaski–Östergård factorization.
///
/// # Errors
/// Returns an error if the bundled block is malformed.
pub fn first_incidence() -> Result<IncidenceMatrix, DecodeError> {
    parse_incidence_block(FIRST_INCIDENCE_TEXT)
}

/// Incidence matrix of \(GK_{12}\).
///
/// # Errors
/// Returns an error if the bundled block is malformed.
pub fn round_robin_incidence() -> Result<IncidenceMatrix, DecodeError> {
    parse_incidence_block(ROUND_ROBIN_INCIDENCE_TEXT)
}

/// Incidence matrix of the switched variant of the first factorization.
///
/// # Errors
/// Returns an error if the bundled block is malformed.
pub fn switched_incidence() -> Result<IncidenceMatrix, DecodeError> {
    parse_incidence_block(SWITCHED_INCIDENCE_TEXT)
}
