//! Batch filtering of candidate 1-factorizations.
//!
//! A run reads candidates one at a time, applies its stages in order (stopping at the
//! first failure), appends survivors to the output and keeps running counters. The
//! two stages of the usual workflow are:
//!
//! 1. `c4`: incidence blocks in, C4 survivors out as compact strings.
//! 2. `k4e`: compact strings in, 2K4-e survivors out as edge lists.
//!
//! Progress goes through `log`; nothing but survivors is written to the output.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::{debug, info, warn};

use crate::c4::find_c4_violation;
use crate::encoding::{
    decode_compact, decode_incidence, encode_compact, encode_edge_lists, parse_incidence_row,
};
use crate::error::{DecodeError, PipelineError};
use crate::k4e::find_2k4e_violation;
use crate::matrix::{AdjacencyMatrix, EdgeMatrix, IncidenceMatrix, N, NUM_FACTORS, NUM_PAIRS};

/// Progress interval for C4-only runs.
pub const C4_PROGRESS_EVERY: u64 = 100_000;

/// Progress interval for runs that include the 2K4-e stage.
pub const K4E_PROGRESS_EVERY: u64 = 1;

// ============================================================================
// Configuration
// ============================================================================

/// How candidates are encoded in the input stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFormat {
    /// Blocks of 12 incidence rows, each block followed by a blank line.
    Incidence,
    /// One 66-symbol compact string per line.
    Compact,
}

/// How survivors are written to the output stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// One compact string per line.
    Compact,
    /// One edge-list line per factor, then a blank line.
    EdgeLists,
}

/// A test applied to each candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// The C4 condition.
    C4,
    /// The 2K4-e condition.
    K4e,
}

impl Stage {
    /// Returns `true` iff `candidate` passes this stage.
    pub fn check(self, candidate: &Candidate) -> bool {
        match self {
            Stage::C4 => {
                let derived;
                let edges = match &candidate.edges {
                    Some(edges) => edges,
                    None => {
                        derived = candidate.adjacency.edge_matrix();
                        &derived
                    }
                };
                match find_c4_violation(&candidate.adjacency, edges) {
                    Some(v) => {
                        debug!(
                            "candidate at line {}: C4 violation in factor {} on {:?} and {:?}",
                            candidate.line, v.factor, v.first, v.second
                        );
                        false
                    }
                    None => true,
                }
            }
            Stage::K4e => match find_2k4e_violation(&candidate.adjacency) {
                Some(v) => {
                    debug!(
                        "candidate at line {}: 2K4-e violation between {:?} and {:?}",
                        candidate.line, v.subset, v.tuple
                    );
                    false
                }
                None => true,
            },
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::C4 => write!(f, "C4"),
            Stage::K4e => write!(f, "2K4-e"),
        }
    }
}

/// Description of one batch run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterConfig {
    /// Input encoding.
    pub input: InputFormat,
    /// Stages applied in order; a candidate survives only if it passes all of them.
    pub stages: Vec<Stage>,
    /// Output encoding for survivors.
    pub output: OutputFormat,
    /// Log the counters every this many candidates.
    pub progress_every: u64,
}

impl FilterConfig {
    /// Stage 1: incidence blocks in, C4 survivors out as compact strings.
    pub fn c4_stage() -> Self {
        Self {
            input: InputFormat::Incidence,
            stages: vec![Stage::C4],
            output: OutputFormat::Compact,
            progress_every: C4_PROGRESS_EVERY,
        }
    }

    /// Stage 2: compact strings in, 2K4-e survivors out as edge lists.
    pub fn k4e_stage() -> Self {
        Self {
            input: InputFormat::Compact,
            stages: vec![Stage::K4e],
            output: OutputFormat::EdgeLists,
            progress_every: K4E_PROGRESS_EVERY,
        }
    }

    /// Both stages in one pass: incidence blocks in, edge lists out.
    pub fn two_stage() -> Self {
        Self {
            input: InputFormat::Incidence,
            stages: vec![Stage::C4, Stage::K4e],
            output: OutputFormat::EdgeLists,
            progress_every: K4E_PROGRESS_EVERY,
        }
    }

    /// Returns `true` iff `candidate` passes every stage, stopping at the first failure.
    pub fn passes(&self, candidate: &Candidate) -> bool {
        self.stages.iter().all(|stage| stage.check(candidate))
    }

    fn render(&self, adj: &AdjacencyMatrix) -> String {
        match self.output {
            OutputFormat::Compact => {
                let mut line = encode_compact(adj);
                line.push('\n');
                line
            }
            OutputFormat::EdgeLists => encode_edge_lists(adj),
        }
    }
}

// ============================================================================
// Readers
// ============================================================================

/// One decoded candidate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    /// Its adjacency matrix.
    pub adjacency: AdjacencyMatrix,
    /// Its edge matrix, when the input encoding provides one.
    pub edges: Option<EdgeMatrix>,
    /// 1-based input line where the record starts.
    pub line: usize,
}

/// Reads the next line into `buf` as raw bytes. Returns `Ok(false)` at end of input.
fn read_raw_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<bool> {
    buf.clear();
    Ok(reader.read_until(b'\n', buf)? > 0)
}

/// Returns the trimmed text of a raw line.
///
/// Bytes that are not valid UTF-8 are outside the alphabet, so they are reported
/// as [`DecodeError::InvalidSymbol`] at their column in the trimmed record.
fn utf8_record(bytes: &[u8]) -> Result<&str, DecodeError> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.trim()),
        Err(e) => {
            let valid = String::from_utf8_lossy(&bytes[..e.valid_up_to()]);
            Err(DecodeError::InvalidSymbol {
                col: valid.trim_start().chars().count(),
                ch: char::REPLACEMENT_CHARACTER,
            })
        }
    }
}

/// Reads incidence blocks.
///
/// Blank lines between blocks are skipped. End of input ends the stream, and a
/// trailing partial block is discarded.
pub struct IncidenceReader<R> {
    reader: R,
    buf: Vec<u8>,
    line_no: usize,
}

impl<R: BufRead> IncidenceReader<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::with_capacity(2 * NUM_FACTORS),
            line_no: 0,
        }
    }
}

impl<R: BufRead> Iterator for IncidenceReader<R> {
    type Item = Result<Candidate, PipelineError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut incidence = IncidenceMatrix::default();
        let mut filled = 0usize;
        let mut start = 0usize;

        while filled < N {
            match read_raw_line(&mut self.reader, &mut self.buf) {
                Ok(true) => {}
                Ok(false) => {
                    if filled > 0 {
                        warn!("discarding partial block of {filled} rows starting at line {start}");
                    }
                    return None;
                }
                Err(e) => return Some(Err(e.into())),
            }
            self.line_no += 1;

            let row = match utf8_record(&self.buf) {
                Ok(row) => row,
                Err(source) => {
                    return Some(Err(PipelineError::Format {
                        line: self.line_no,
                        source,
                    }))
                }
            };
            if row.is_empty() {
                if filled == 0 {
                    continue;
                }
                return Some(Err(PipelineError::Format {
                    line: self.line_no,
                    source: DecodeError::BadLength {
                        len: 0,
                        expected: NUM_FACTORS,
                    },
                }));
            }
            if filled == 0 {
                start = self.line_no;
            }

            match parse_incidence_row(row) {
                Ok(parsed) => incidence.rows[filled] = parsed,
                Err(source) => {
                    return Some(Err(PipelineError::Format {
                        line: self.line_no,
                        source,
                    }))
                }
            }
            filled += 1;
        }

        Some(
            decode_incidence(&incidence)
                .map(|(adjacency, edges)| Candidate {
                    adjacency,
                    edges: Some(edges),
                    line: start,
                })
                .map_err(|source| PipelineError::Format {
                    line: start,
                    source,
                }),
        )
    }
}

/// Reads compact strings, one per line. The first blank line ends the stream.
pub struct CompactReader<R> {
    reader: R,
    buf: Vec<u8>,
    line_no: usize,
    done: bool,
}

impl<R: BufRead> CompactReader<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::with_capacity(NUM_PAIRS + 2),
            line_no: 0,
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for CompactReader<R> {
    type Item = Result<Candidate, PipelineError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match read_raw_line(&mut self.reader, &mut self.buf) {
            Ok(true) => {}
            Ok(false) => return None,
            Err(e) => return Some(Err(e.into())),
        }
        self.line_no += 1;

        let line_no = self.line_no;
        let record = match utf8_record(&self.buf) {
            Ok(record) => record,
            Err(source) => return Some(Err(PipelineError::Format { line: line_no, source })),
        };
        if record.is_empty() {
            self.done = true;
            return None;
        }

        Some(
            decode_compact(record)
                .map(|adjacency| Candidate {
                    adjacency,
                    edges: None,
                    line: line_no,
                })
                .map_err(|source| PipelineError::Format {
                    line: line_no,
                    source,
                }),
        )
    }
}

// ============================================================================
// Running
// ============================================================================

/// Running counters of a batch run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FilterStats {
    /// Candidates read and tested.
    pub tested: u64,
    /// Candidates that passed every stage.
    pub good: u64,
}

impl fmt::Display for FilterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "num_tested={:>11}  num_good={:>3}", self.tested, self.good)
    }
}

/// Filters every candidate of `input` through `config`, appending survivors to `output`.
///
/// The output is flushed after each survivor, so survivors written before an error
/// are kept.
///
/// # Errors
/// Returns the first malformed record or I/O failure.
pub fn run_filter<R: BufRead, W: Write>(
    config: &FilterConfig,
    input: R,
    output: W,
) -> Result<FilterStats, PipelineError> {
    match config.input {
        InputFormat::Incidence => filter_candidates(config, IncidenceReader::new(input), output),
        InputFormat::Compact => filter_candidates(config, CompactReader::new(input), output),
    }
}

fn filter_candidates<I, W>(
    config: &FilterConfig,
    candidates: I,
    mut output: W,
) -> Result<FilterStats, PipelineError>
where
    I: Iterator<Item = Result<Candidate, PipelineError>>,
    W: Write,
{
    let progress_every = config.progress_every.max(1);

    let mut stats = FilterStats::default();
    for candidate in candidates {
        let candidate = candidate?;
        stats.tested += 1;
        if stats.tested % progress_every == 0 {
            info!("{stats}");
        }

        if config.passes(&candidate) {
            stats.good += 1;
            info!("{stats}  We have found a new good 1-factorization!");
            output.write_all(config.render(&candidate.adjacency).as_bytes())?;
            output.flush()?;
        }
    }

    info!("{stats}  Done, these are the total tested and good.");
    Ok(stats)
}

/// Opens `path` for buffered reading; `-` is standard input.
///
/// # Errors
/// Returns an error if the file cannot be opened.
pub fn open_input(path: &str) -> io::Result<Box<dyn BufRead>> {
    if path == "-" {
        Ok(Box::new(io::stdin().lock()))
    } else {
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }
}

/// Runs `config` from the file (or `-`) at `input` into a new file at `output`.
///
/// # Errors
/// Returns an error if either file cannot be opened, or as [`run_filter`].
pub fn run_paths(
    config: &FilterConfig,
    input: &str,
    output: impl AsRef<Path>,
) -> Result<FilterStats, PipelineError> {
    let stages: Vec<String> = config.stages.iter().map(ToString::to_string).collect();
    info!(
        "filtering {input} -> {} (stages: {})",
        output.as_ref().display(),
        stages.join(", ")
    );
    let reader = open_input(input)?;
    let writer = BufWriter::new(File::create(output)?);
    run_filter(config, reader, writer)
}

// ============================================================================
// Tests
// ============================================================================
