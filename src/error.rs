//! Error types and process exit statuses.

use std::io;
use thiserror::Error;

use crate::matrix::EDGES_PER_FACTOR;

/// Exit status for missing or malformed command-line arguments.
pub const USAGE_EXIT_CODE: i32 = 99;

/// Exit status for input that does not match the expected encoding.
pub const FORMAT_EXIT_CODE: i32 = 5;

/// Exit status for I/O failures (open, read, write).
pub const IO_EXIT_CODE: i32 = 1;

/// Exit status when bundled fixtures fail validation.
pub const VALIDATION_EXIT_CODE: i32 = 2;

/// A single record could not be decoded into an adjacency matrix.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The record length does not match the encoding for 12 vertices.
    #[error("can't determine n from the input: len={len}, expected {expected}")]
    BadLength {
        /// Length found.
        len: usize,
        /// Length required.
        expected: usize,
    },

    /// A character outside `0-9A-Z`.
    #[error("invalid symbol {ch:?} at column {col}")]
    InvalidSymbol {
        /// Zero-based position in the record.
        col: usize,
        /// The offending character.
        ch: char,
    },

    /// An incidence entry names an edge index a 1-factor cannot have.
    #[error(
        "vertex {vertex} lies on edge {edge} of factor {factor}, but a factor has only {} edges",
        EDGES_PER_FACTOR
    )]
    EdgeIndexOutOfRange {
        /// Row of the incidence matrix.
        vertex: usize,
        /// Column of the incidence matrix.
        factor: usize,
        /// The entry.
        edge: u8,
    },

    /// An incidence column does not pair up its vertices.
    #[error("edge {edge} of factor {factor} has {endpoints} endpoints, expected 2")]
    UnpairedEdge {
        /// Column of the incidence matrix.
        factor: usize,
        /// Edge index within the factor.
        edge: usize,
        /// Number of rows carrying that edge index.
        endpoints: usize,
    },
}

/// Failure of a batch run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A record could not be decoded. `line` is 1-based.
    #[error("line {line}: {source}")]
    Format {
        /// Input line where the bad record starts (or the bad line itself).
        line: usize,
        /// What was wrong with it.
        #[source]
        source: DecodeError,
    },

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl PipelineError {
    /// The process exit status this error maps to.
    pub fn exit_code(&self) -> i32 {
        match self {
            PipelineError::Format { .. } => FORMAT_EXIT_CODE,
            PipelineError::Io(_) => IO_EXIT_CODE,
        }
    }
}
