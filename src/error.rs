// Error types for record decoding and cache access.
//
// `DecodeError` is local to one cursor: a single record or region buffer.
// `CacheError` covers everything above that: reference-table lookups,
// archive splitting, payload integrity, and table/region assembly.

use std::io;

use thiserror::Error;

use crate::config::ConfigKind;

// ---------------------------------------------------------------------------
// Decode errors
// ---------------------------------------------------------------------------

/// Failure while decoding a single byte stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A read ran past the end of the buffer.
    #[error("truncated data at offset {offset}: need {needed} byte(s), {remaining} remaining")]
    TruncatedData {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// The opcode is not part of this kind's opcode table.
    #[error("unknown {kind} opcode {opcode}")]
    UnknownOpcode { kind: ConfigKind, opcode: u8 },

    /// A params block entry carried a type tag other than int or string.
    #[error("invalid param value type tag {tag}")]
    InvalidParamType { tag: u8 },
}

// ---------------------------------------------------------------------------
// Cache errors
// ---------------------------------------------------------------------------

/// Failure while materializing tables or regions from a [`CacheStore`].
///
/// [`CacheStore`]: crate::store::CacheStore
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("archive {archive} not found in reference table {table}")]
    MissingArchive { table: u8, archive: u32 },

    #[error("archive {archive} has no child at index {index}")]
    MissingEntry { archive: u32, index: u32 },

    /// Decompression or decryption of a stored file failed.
    #[error("corrupt payload for file {file} in table {table}: {reason}")]
    CorruptPayload { table: u8, file: u32, reason: String },

    #[error("malformed archive: {reason}")]
    MalformedArchive { reason: String },

    /// One record of a table failed to decode; the whole table is abandoned.
    #[error("{kind} {id}: {source}")]
    Record {
        kind: ConfigKind,
        id: u32,
        #[source]
        source: DecodeError,
    },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("operation cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T, E = CacheError> = std::result::Result<T, E>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
