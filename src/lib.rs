//! # onefactor
//!
//! Filters 1-factorizations of \(K_{12}\) by two necessary conditions used to prune
//! searches for edge colorings in Ramsey-type problems.
//!
//! This crate provides:
//! - Dense fixed-size adjacency / incidence / edge matrices for a 1-factorization.
//! - Decoders for the incidence-block and compact-string encodings, and renderers for
//!   compact strings and edge lists.
//! - The **C4 condition**: a parity constraint on pairs of edges of one 1-factor.
//! - The **2K4-e condition**: no two disjoint vertex quadruples whose \(K_4\)s agree
//!   in color on exactly five of their six edges.
//! - A streaming batch pipeline chaining the two tests.
//!
//! ## Quick Start
//!
//! ```
//! use onefactor::encoding::decode_compact;
//! use onefactor::c4::passes_c4;
//! use onefactor::k4e::passes_2k4e;
//!
//! // The round-robin factorization GK12, in colex compact form.
//! let adj = decode_compact(
//!     "61772828398394A394A5094A50614A506172A5061728350617283940123456789A",
//! )
//! .unwrap();
//! assert!(adj.check_one_factorization().is_ok());
//! assert!(passes_c4(&adj));
//! assert!(passes_2k4e(&adj));
//! ```
//!
//! ## Filtering a Stream
//!
//! ```
//! use onefactor::pipeline::{run_filter, FilterConfig};
//! use onefactor::fixtures::{FIRST_INCIDENCE_TEXT, FIRST_COMPACT};
//!
//! let mut out = Vec::new();
//! let stats = run_filter(&FilterConfig::c4_stage(), FIRST_INCIDENCE_TEXT.as_bytes(), &mut out)
//!     .unwrap();
//! assert_eq!((stats.tested, stats.good), (1, 1));
//! assert_eq!(String::from_utf8(out).unwrap().trim_end(), FIRST_COMPACT);
//! ```
//!
//! ## Modules
//!
//! - [`matrix`]: matrix representations and the structural 1-factorization check.
//! - [`encoding`]: text encodings.
//! - [`c4`]: the C4 condition.
//! - [`k4e`]: the 2K4-e condition.
//! - [`pipeline`]: batch filtering with counters and progress logging.
//! - [`validate`]: deterministic validation of bundled factorizations.
//! - [`fixtures`]: bundled factorizations with known outcomes.
//! - [`error`]: error types and exit statuses.
//!
//! ## Performance Notes
//!
//! - The 2K4-e test is the dominant cost: 495 subsets times 1680 ordered tuples,
//!   six comparisons each, cut short at the first violation. A passing candidate
//!   pays the full 831,600 alignments.
//! - The C4 test reads at most 150 edge pairs, so C4-only runs are bound by input
//!   parsing. Filter with `c4` first and feed the survivors to `k4e`.
//! - Run large enumerations from a `--release` build (fat LTO, one codegen unit).

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::inline_always)] // Matrix accessors sit inside the 2K4-e loop
#![allow(clippy::many_single_char_names)] // Vertex names a, b, c, d, i, j
#![allow(clippy::needless_range_loop)] // Vertex indices address both rows and columns
#![allow(clippy::doc_markdown)] // K12, GK12 and 2K4-e in prose

pub mod c4;
pub mod encoding;
pub mod error;
pub mod fixtures;
pub mod k4e;
pub mod matrix;
pub mod pipeline;
pub mod validate;

/// Re-export commonly used types for convenience.
pub mod prelude {
    pub use crate::c4::{passes_c4, passes_c4_with_edges};
    pub use crate::encoding::{decode_compact, decode_incidence, encode_compact, encode_edge_lists};
    pub use crate::error::{DecodeError, PipelineError};
    pub use crate::k4e::passes_2k4e;
    pub use crate::matrix::{AdjacencyMatrix, EdgeMatrix, IncidenceMatrix};
    pub use crate::pipeline::{run_filter, run_paths, FilterConfig, FilterStats};
    pub use crate::validate::validate_known_factorizations;
}
