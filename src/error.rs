//! Error types for the storage engine

use thiserror::Error;

use crate::types::{ChunkId, ColumnId, DataType, ValueId};

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: DataType, actual: DataType },

    #[error("Unknown column type: {0}")]
    UnknownDataType(String),

    #[error("Value id {value_id} does not fit attribute vector width {width}")]
    ValueIdOutOfRange { value_id: ValueId, width: u8 },

    #[error("Dictionary size {0} exceeds attribute vector capacity")]
    DictionaryTooLarge(usize),

    #[error("Table '{0}' not found")]
    TableNotFound(String),

    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    #[error("Column id {0} out of range")]
    ColumnOutOfRange(ColumnId),

    #[error("Segment is immutable and cannot be appended to")]
    ImmutableSegment,

    #[error("Reference segments must not reference another reference segment")]
    NestedReference,

    #[error("Chunk {0} has not reached the chunk size and cannot be compressed")]
    ChunkNotFull(ChunkId),

    #[error("Reference segments cannot be dictionary-compressed")]
    CompressReferenceSegment,

    #[error("Row width mismatch: expected {expected} values, got {actual}")]
    RowWidthMismatch { expected: usize, actual: usize },

    #[error("Cannot append rows to a table with definition-only columns")]
    SchemaOnlyAppend,

    #[error("Columns can only be added to an empty table")]
    TableNotEmpty,
}
