//! Property-based tests for the encodings and the two conditions.

use onefactor::c4::passes_c4;
use onefactor::encoding::{decode_compact, encode_compact, ALPHABET};
use onefactor::fixtures::{self, FIRST_COMPACT};
use onefactor::k4e::passes_2k4e;
use onefactor::matrix::{N, NUM_PAIRS};
use proptest::prelude::*;

/// Any 66-symbol string over the alphabet.
fn compact_string() -> impl Strategy<Value = String> {
    prop::collection::vec(0..ALPHABET.len(), NUM_PAIRS)
        .prop_map(|values| values.into_iter().map(|v| ALPHABET[v] as char).collect())
}

/// A permutation of the vertices.
fn vertex_permutation() -> impl Strategy<Value = [usize; N]> {
    Just((0..N).collect::<Vec<_>>())
        .prop_shuffle()
        .prop_map(|v| std::array::from_fn(|i| v[i]))
}

proptest! {
    /// Property: decoding then encoding a compact string gives it back.
    #[test]
    fn prop_compact_round_trip(s in compact_string()) {
        let adj = decode_compact(&s).unwrap();
        prop_assert_eq!(encode_compact(&adj), s);
    }

    /// Property: the decoded matrix is symmetric.
    #[test]
    fn prop_compact_decodes_symmetric(s in compact_string()) {
        let adj = decode_compact(&s).unwrap();
        for i in 0..N {
            for j in 0..N {
                prop_assert_eq!(adj.get(i, j), adj.get(j, i));
            }
        }
    }

    /// Property: any length other than 66 is rejected.
    #[test]
    fn prop_wrong_length_is_rejected(len in 0usize..140) {
        prop_assume!(len != NUM_PAIRS);
        let s: String = std::iter::repeat('0').take(len).collect();
        prop_assert!(decode_compact(&s).is_err());
    }

    /// Property: the C4 test is a pure function of the matrix.
    #[test]
    fn prop_c4_is_idempotent(s in compact_string()) {
        let adj = decode_compact(&s).unwrap();
        prop_assert_eq!(passes_c4(&adj), passes_c4(&adj));
    }

    /// Property: renaming vertices does not change the C4 verdict.
    #[test]
    fn prop_c4_ignores_vertex_names(perm in vertex_permutation()) {
        let switched = decode_compact(fixtures::SWITCHED_COMPACT).unwrap();
        let first = decode_compact(FIRST_COMPACT).unwrap();
        prop_assert!(!passes_c4(&switched.relabel_vertices(&perm)));
        prop_assert!(passes_c4(&first.relabel_vertices(&perm)));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    /// Property: renaming vertices does not change the 2K4-e verdict.
    #[test]
    fn prop_2k4e_ignores_vertex_names(perm in vertex_permutation()) {
        let first = decode_compact(FIRST_COMPACT).unwrap();
        prop_assert!(!passes_2k4e(&first.relabel_vertices(&perm)));
        prop_assert!(passes_2k4e(&fixtures::round_robin().relabel_vertices(&perm)));
    }
}
