//! Fast deterministic validation of the bundled factorizations.

use crate::c4::passes_c4_with_edges;
use crate::encoding::{decode_compact, decode_incidence, encode_compact, parse_incidence_block};
use crate::fixtures::{
    self, FIRST_COMPACT, FIRST_INCIDENCE_TEXT, ROUND_ROBIN_COMPACT, ROUND_ROBIN_INCIDENCE_TEXT,
    SWITCHED_COMPACT, SWITCHED_INCIDENCE_TEXT,
};
use crate::k4e::passes_2k4e;

// ============================================================================
// Public API
// ============================================================================

/// Expected outcome of both tests for one bundled factorization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Expected {
    /// Whether it passes the C4 condition.
    pub c4: bool,
    /// Whether it passes the 2K4-e condition.
    pub k4e: bool,
}

/// Validates the bundled factorizations:
/// - the first Kaski–Östergård factorization passes C4 and fails 2K4-e;
/// - \(GK_{12}\) passes both;
/// - the switched variant of the first factorization fails C4.
///
/// Each one must decode to a 1-factorization whose compact string matches the bundled one.
///
/// # Errors
/// Returns an error message if any bundled factorization fails validation.
pub fn validate_known_factorizations() -> Result<(), String> {
    validate_case(
        "first_factorization.txt",
        FIRST_INCIDENCE_TEXT,
        FIRST_COMPACT,
        Expected { c4: true, k4e: false },
    )?;
    validate_case(
        "round_robin.txt",
        ROUND_ROBIN_INCIDENCE_TEXT,
        ROUND_ROBIN_COMPACT,
        Expected { c4: true, k4e: true },
    )?;
    validate_case(
        "switched.txt",
        SWITCHED_INCIDENCE_TEXT,
        SWITCHED_COMPACT,
        Expected { c4: false, k4e: false },
    )?;

    if decode_compact(ROUND_ROBIN_COMPACT).map_err(|e| format!("round_robin: {e}"))?
        != fixtures::round_robin()
    {
        return Err("round_robin: bundled string differs from the constructed GK12".to_string());
    }
    Ok(())
}

/// Validates one incidence block against its compact string and expected outcomes.
///
/// The 2K4-e test is only run when C4 passes, as in the two-stage filter.
///
/// # Errors
/// Returns an error message if decoding fails, the structure is not a
/// 1-factorization, or a test disagrees with `expected`.
pub fn validate_case(
    name: &str,
    incidence_text: &str,
    compact: &str,
    expected: Expected,
) -> Result<(), String> {
    let incidence = parse_incidence_block(incidence_text).map_err(|e| format!("{name}: {e}"))?;
    let (adj, edges) = decode_incidence(&incidence).map_err(|e| format!("{name}: {e}"))?;
    adj.check_one_factorization()
        .map_err(|e| format!("{name}: {e}"))?;

    let encoded = encode_compact(&adj);
    if encoded != compact {
        return Err(format!(
            "{name}: compact string mismatch: got {encoded}, expected {compact}"
        ));
    }

    let c4 = passes_c4_with_edges(&adj, &edges);
    if c4 != expected.c4 {
        return Err(format!(
            "{name}: expected C4 {}, but it {}",
            verdict(expected.c4),
            verdict(c4)
        ));
    }

    if c4 {
        let k4e = passes_2k4e(&adj);
        if k4e != expected.k4e {
            return Err(format!(
                "{name}: expected 2K4-e {}, but it {}",
                verdict(expected.k4e),
                verdict(k4e)
            ));
        }
    }
    Ok(())
}

// ============================================================================
// Internal
// ============================================================================

fn verdict(pass: bool) -> &'static str {
    if pass {
        "passes"
    } else {
        "fails"
    }
}

// ============================================================================
// Tests
// ============================================================================
