//! Conversions between the text encodings and [`AdjacencyMatrix`].
//!
//! - Incidence rows: 11 symbols per vertex, one per factor (edge index within the factor).
//! - Compact strings: 66 symbols, one factor id per vertex pair in colex order.
//! - Edge lists: one `<symbol>: [(i,j),...]` line per factor (output only).
//!
//! Symbols are drawn from `0-9` followed by `A-Z`.

use crate::error::DecodeError;
use crate::matrix::{
    colex_pairs, AdjacencyMatrix, EdgeMatrix, IncidenceMatrix, EDGES_PER_FACTOR, N, NUM_FACTORS,
    NUM_PAIRS,
};

/// The 36 output symbols, indexed by value.
pub const ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Returns the symbol for `value`.
///
/// Callers pass a value from [`ALPHABET`]'s range. Every matrix built by the
/// decoders satisfies this; hand-built matrices must color edges below 36.
///
/// # Panics
/// Panics if `value >= 36`.
#[inline]
pub fn symbol(value: u8) -> char {
    ALPHABET[value as usize] as char
}

/// Returns the value of symbol `ch`, or `None` if it is not in [`ALPHABET`].
#[inline]
pub fn symbol_value(ch: char) -> Option<u8> {
    match ch {
        '0'..='9' => Some(ch as u8 - b'0'),
        'A'..='Z' => Some(ch as u8 - b'A' + 10),
        _ => None,
    }
}

// ============================================================================
// Incidence input
// ============================================================================

/// Parses one row of an incidence block (exactly 11 symbols).
///
/// # Errors
/// Returns an error on a length mismatch or a character outside the alphabet.
pub fn parse_incidence_row(line: &str) -> Result<[u8; NUM_FACTORS], DecodeError> {
    let len = line.chars().count();
    if len != NUM_FACTORS {
        return Err(DecodeError::BadLength {
            len,
            expected: NUM_FACTORS,
        });
    }
    let mut row = [0u8; NUM_FACTORS];
    for (col, ch) in line.chars().enumerate() {
        row[col] = symbol_value(ch).ok_or(DecodeError::InvalidSymbol { col, ch })?;
    }
    Ok(row)
}

/// Parses a whole incidence block: 12 non-blank rows, surrounding blank lines ignored.
///
/// # Errors
/// Returns an error if the block does not have exactly 12 rows or a row is malformed.
pub fn parse_incidence_block(text: &str) -> Result<IncidenceMatrix, DecodeError> {
    let rows: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if rows.len() != N {
        return Err(DecodeError::BadLength {
            len: rows.len(),
            expected: N,
        });
    }
    let mut incidence = IncidenceMatrix::default();
    for (i, line) in rows.iter().enumerate() {
        incidence.rows[i] = parse_incidence_row(line)?;
    }
    Ok(incidence)
}

/// Rebuilds the adjacency and edge matrices from an incidence matrix.
///
/// For each factor `f` and edge index `e`, the two vertices `i < j` whose entry in
/// column `f` equals `e` become the `e`-th edge of `f`.
///
/// # Errors
/// Returns an error if an entry is not a valid edge index, or if some edge index
/// in some column is carried by a number of rows other than two.
pub fn decode_incidence(
    incidence: &IncidenceMatrix,
) -> Result<(AdjacencyMatrix, EdgeMatrix), DecodeError> {
    let mut adj = AdjacencyMatrix::default();
    let mut edges = EdgeMatrix::default();

    for f in 0..NUM_FACTORS {
        // Inverse index of column f: endpoints seen so far for each edge index.
        let mut endpoints = [[0u8; 2]; EDGES_PER_FACTOR];
        let mut counts = [0usize; EDGES_PER_FACTOR];
        for (i, row) in incidence.rows.iter().enumerate() {
            let e = row[f];
            if e as usize >= EDGES_PER_FACTOR {
                return Err(DecodeError::EdgeIndexOutOfRange {
                    vertex: i,
                    factor: f,
                    edge: e,
                });
            }
            let e = e as usize;
            if counts[e] < 2 {
                endpoints[e][counts[e]] = i as u8;
            }
            counts[e] += 1;
        }

        for e in 0..EDGES_PER_FACTOR {
            if counts[e] != 2 {
                return Err(DecodeError::UnpairedEdge {
                    factor: f,
                    edge: e,
                    endpoints: counts[e],
                });
            }
            let [i, j] = endpoints[e];
            edges.edges[f][e] = [i, j];
            adj.set(i as usize, j as usize, f as u8);
        }
    }

    Ok((adj, edges))
}

// ============================================================================
// Compact strings
// ============================================================================

/// Decodes a 66-symbol compact string.
///
/// Any alphabet symbol is stored as-is; whether the result is a 1-factorization
/// is left to [`AdjacencyMatrix::check_one_factorization`].
///
/// # Errors
/// Returns an error if the length is not 66 or a character is outside the alphabet.
pub fn decode_compact(line: &str) -> Result<AdjacencyMatrix, DecodeError> {
    let len = line.chars().count();
    if len != NUM_PAIRS {
        return Err(DecodeError::BadLength {
            len,
            expected: NUM_PAIRS,
        });
    }

    let mut adj = AdjacencyMatrix::default();
    for (col, (ch, (i, j))) in line.chars().zip(colex_pairs()).enumerate() {
        let factor = symbol_value(ch).ok_or(DecodeError::InvalidSymbol { col, ch })?;
        adj.set(i, j, factor);
    }
    Ok(adj)
}

/// Encodes the upper triangle of `adj` in colex order.
pub fn encode_compact(adj: &AdjacencyMatrix) -> String {
    colex_pairs().map(|(i, j)| symbol(adj.get(i, j))).collect()
}

// ============================================================================
// Edge lists
// ============================================================================

/// Renders one line per factor, `<symbol>: [(i,j),...]`, then a blank line.
pub fn encode_edge_lists(adj: &AdjacencyMatrix) -> String {
    let mut out = String::with_capacity(NUM_FACTORS * (4 + 8 * EDGES_PER_FACTOR) + 1);
    for f in 0..NUM_FACTORS as u8 {
        out.push(symbol(f));
        out.push_str(": [");
        let mut first = true;
        for i in 0..N {
            for j in (i + 1)..N {
                if adj.get(i, j) == f {
                    if !first {
                        out.push(',');
                    }
                    first = false;
                    out.push('(');
                    out.push_str(&i.to_string());
                    out.push(',');
                    out.push_str(&j.to_string());
                    out.push(')');
                }
            }
        }
        out.push_str("]\n");
    }
    out.push('\n');
    out
}

// ============================================================================
// Tests
// ============================================================================
