//! Chunked columnar table.
//!
//! A table owns a column schema, a chunk-size policy, and an ordered list
//! of chunks behind a readers-writer lock. Every chunk except possibly
//! the last holds exactly `chunk_size` rows. A freshly constructed table
//! carries one empty chunk, so `append` always has a target.
//!
//! Locking: `get_chunk`, `append`, `compress_chunk`, and `emplace_chunk`
//! synchronize on the chunk-list lock. Chunks are handed out as `Arc`
//! snapshots; a reader observes either the pre-swap or post-swap chunk,
//! never a half-built one. Dictionary construction runs on a private copy
//! outside the lock, and only the pointer swap is exclusive.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{Result, StorageError};
use crate::storage::chunk::Chunk;
use crate::storage::dictionary_segment::DictionarySegment;
use crate::storage::segment::Segment;
use crate::storage::value_segment::ValueSegment;
use crate::types::{ChunkId, ColumnId, DataType, Value};

/// In-memory columnar table: schema + ordered chunks + chunk-size policy.
#[derive(Debug)]
pub struct Table {
    column_names: Vec<String>,
    column_types: Vec<DataType>,
    chunk_size: u32,
    chunks: RwLock<Vec<Arc<Chunk>>>,
}

impl Table {
    /// Create an empty table with the given chunk capacity. One empty
    /// chunk is installed eagerly.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    pub fn new(chunk_size: u32) -> Self {
        assert!(chunk_size > 0, "chunk size must be positive");
        Self {
            column_names: Vec::new(),
            column_types: Vec::new(),
            chunk_size,
            chunks: RwLock::new(vec![Arc::new(Chunk::new())]),
        }
    }

    fn chunks_read(&self) -> RwLockReadGuard<'_, Vec<Arc<Chunk>>> {
        self.chunks.read().expect("chunk list lock poisoned")
    }

    fn chunks_write(&self) -> RwLockWriteGuard<'_, Vec<Arc<Chunk>>> {
        self.chunks.write().expect("chunk list lock poisoned")
    }

    // ── Schema ─────────────────────────────────────────────────────

    /// Add a column to the schema only. Used when the caller populates
    /// chunks externally, e.g. for an operator's output table.
    pub fn add_column_definition(&mut self, name: impl Into<String>, data_type: DataType) {
        self.column_names.push(name.into());
        self.column_types.push(data_type);
    }

    /// Add a column and install an empty value segment in the last chunk.
    /// Only permitted while the table has no rows.
    pub fn add_column(&mut self, name: impl Into<String>, data_type: DataType) -> Result<()> {
        if self.row_count() > 0 {
            return Err(StorageError::TableNotEmpty);
        }
        self.add_column_definition(name, data_type);

        let chunks = self.chunks.get_mut().expect("chunk list lock poisoned");
        let last = chunks.last_mut().expect("table always has a chunk");
        Arc::make_mut(last).add_segment(Segment::Value(ValueSegment::new(data_type)));
        Ok(())
    }

    /// Number of columns in the schema.
    pub fn column_count(&self) -> u16 {
        self.column_types.len() as u16
    }

    /// All column names in declaration order.
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Name of one column.
    ///
    /// # Panics
    ///
    /// Panics if `column_id` is out of range.
    pub fn column_name(&self, column_id: ColumnId) -> &str {
        &self.column_names[column_id as usize]
    }

    /// Declared type of one column.
    ///
    /// # Panics
    ///
    /// Panics if `column_id` is out of range.
    pub fn column_type(&self, column_id: ColumnId) -> DataType {
        self.column_types[column_id as usize]
    }

    /// Position of a column by name.
    pub fn column_id_by_name(&self, name: &str) -> Result<ColumnId> {
        self.column_names
            .iter()
            .position(|candidate| candidate == name)
            .map(|position| position as ColumnId)
            .ok_or_else(|| StorageError::ColumnNotFound(name.to_string()))
    }

    // ── Rows ───────────────────────────────────────────────────────

    /// Append one row. Starts a fresh chunk when the last one is full.
    ///
    /// Fails on a definition-only column set, a row of the wrong width,
    /// or a value whose variant does not match its column's declared type.
    pub fn append(&self, values: Vec<Value>) -> Result<()> {
        let mut chunks = self.chunks_write();

        let last = chunks.last().expect("table always has a chunk");
        if !self.column_types.is_empty() && last.column_count() == 0 {
            return Err(StorageError::SchemaOnlyAppend);
        }
        if last.size() == self.chunk_size as usize {
            chunks.push(Arc::new(self.new_value_chunk()));
        }

        let last = chunks.last_mut().expect("table always has a chunk");
        Arc::make_mut(last).append(values)
    }

    /// Fresh chunk with one empty value segment per declared column.
    fn new_value_chunk(&self) -> Chunk {
        let mut chunk = Chunk::new();
        for &data_type in &self.column_types {
            chunk.add_segment(Segment::Value(ValueSegment::new(data_type)));
        }
        chunk
    }

    /// Total number of rows across all chunks.
    pub fn row_count(&self) -> u64 {
        self.chunks_read()
            .iter()
            .map(|chunk| chunk.size() as u64)
            .sum()
    }

    // ── Chunks ─────────────────────────────────────────────────────

    /// Number of chunks.
    pub fn chunk_count(&self) -> ChunkId {
        self.chunks_read().len() as ChunkId
    }

    /// Chunk capacity policy.
    pub fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    /// Snapshot of one chunk. The returned handle stays valid across
    /// concurrent appends and compressions; it just observes the state at
    /// the time of the call.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_id` is out of range.
    pub fn get_chunk(&self, chunk_id: ChunkId) -> Arc<Chunk> {
        Arc::clone(&self.chunks_read()[chunk_id as usize])
    }

    /// Exclusive access to one chunk. If a reader still holds a snapshot
    /// of it, the chunk is copied first and the snapshot keeps the old
    /// state.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_id` is out of range.
    pub fn get_chunk_mut(&mut self, chunk_id: ChunkId) -> &mut Chunk {
        let chunks = self.chunks.get_mut().expect("chunk list lock poisoned");
        Arc::make_mut(&mut chunks[chunk_id as usize])
    }

    /// Append a prebuilt chunk, used by operator output construction. The
    /// eagerly created chunk is replaced if it is still untouched.
    ///
    /// Chunks installed this way are not bound by `chunk_size`: a scan
    /// output's single chunk carries its whole position list.
    pub fn emplace_chunk(&mut self, chunk: Chunk) {
        let chunks = self.chunks.get_mut().expect("chunk list lock poisoned");
        let untouched =
            chunks.len() == 1 && chunks[0].size() == 0 && chunks[0].column_count() == 0;
        if untouched {
            chunks[0] = Arc::new(chunk);
        } else {
            chunks.push(Arc::new(chunk));
        }
    }

    /// Replace every value segment of a full chunk with a dictionary
    /// segment holding identical logical values.
    ///
    /// The replacement chunk is built off-lock from a snapshot; the write
    /// lock covers only the pointer swap, so concurrent readers see either
    /// the uncompressed or the compressed chunk. Dictionary segments are
    /// kept as-is, making the operation idempotent.
    pub fn compress_chunk(&self, chunk_id: ChunkId) -> Result<()> {
        let chunk = self.get_chunk(chunk_id);
        if chunk.size() != self.chunk_size as usize {
            return Err(StorageError::ChunkNotFull(chunk_id));
        }

        let mut compressed = Chunk::new();
        for column_id in 0..chunk.column_count() {
            let segment = match chunk.get_segment(column_id) {
                Segment::Value(segment) => {
                    Segment::Dictionary(DictionarySegment::from_value_segment(segment)?)
                }
                Segment::Dictionary(segment) => Segment::Dictionary(segment.clone()),
                Segment::Reference(_) => return Err(StorageError::CompressReferenceSegment),
            };
            compressed.add_segment(segment);
        }

        self.chunks_write()[chunk_id as usize] = Arc::new(compressed);
        tracing::debug!(chunk_id, columns = chunk.column_count(), "compressed chunk");
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────────
