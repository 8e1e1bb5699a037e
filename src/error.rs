//! Crate-wide error type.
//!
//! Malformed packed link data and empty graphs are unrecoverable for a run
//! and surface here; zero-rank titles in the reporting stage are *not*
//! errors — they are collected as diagnostics alongside the output (see
//! [`crate::report::SkippedTitle`]).

use thiserror::Error;

/// Errors produced while building the link store, deriving graph metadata,
/// iterating, or reading raw data files.
#[derive(Debug, Error)]
pub enum Error {
    /// A packed record claims more source ids than the stream contains, or
    /// the stream ends inside a record header. Offsets count `i32` slots.
    #[error("truncated link record at offset {offset}")]
    TruncatedRecord { offset: usize },

    /// A record header carries a negative incoming-link count.
    #[error("negative incoming-link count {count} at offset {offset}")]
    NegativeLinkCount { count: i32, offset: usize },

    /// A destination or source id is negative.
    #[error("negative page id {id} at offset {offset}")]
    NegativePageId { id: i32, offset: usize },

    /// A destination id heads more than one record. The distribute pass
    /// overwrites rather than accumulates per destination, so duplicates
    /// would silently drop incoming mass; the producer must group all
    /// sources for a destination into a single record.
    #[error("destination id {id} appears in more than one link record")]
    DuplicateDestination { id: u32 },

    /// Every page id in the graph is disconnected. The algorithm divides by
    /// the active-page count, so an empty graph is a degenerate input.
    #[error("graph has no active pages")]
    NoActivePages,

    /// Damping factor outside `[0, 1]` (or NaN). Rejected up front rather
    /// than letting NaN propagate through the rank vector.
    #[error("damping factor {0} is outside [0, 1]")]
    InvalidDamping(f64),

    /// A raw data file's byte length is not a whole number of records.
    #[error("raw stream length {len} is not a multiple of {unit} bytes")]
    MisalignedStream { len: usize, unit: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
