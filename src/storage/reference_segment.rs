//! Positional references into a base table.

use std::sync::Arc;

use crate::error::{Result, StorageError};
use crate::storage::segment::Segment;
use crate::storage::table::Table;
use crate::types::{ColumnId, PosList, Value};

/// Logical projection of one column of a base table through a shared
/// position list. Produced by operators, immutable after construction.
///
/// The referenced table is always a base (value- or dictionary-populated)
/// table, never another reference table, and the segment keeps it alive.
#[derive(Debug, Clone)]
pub struct ReferenceSegment {
    referenced_table: Arc<Table>,
    referenced_column_id: ColumnId,
    pos_list: Arc<PosList>,
}

impl ReferenceSegment {
    pub fn new(
        referenced_table: Arc<Table>,
        referenced_column_id: ColumnId,
        pos_list: Arc<PosList>,
    ) -> Self {
        Self {
            referenced_table,
            referenced_column_id,
            pos_list,
        }
    }

    /// Resolve the `i`-th row id into the referenced table's column.
    ///
    /// Fails with [`StorageError::NestedReference`] if the resolved segment
    /// is itself a reference segment.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    pub fn get(&self, i: usize) -> Result<Value> {
        let row_id = self.pos_list[i];
        let chunk = self.referenced_table.get_chunk(row_id.chunk_id);
        match chunk.get_segment(self.referenced_column_id) {
            Segment::Value(segment) => Ok(segment.get(row_id.chunk_offset as usize)),
            Segment::Dictionary(segment) => Ok(segment.get(row_id.chunk_offset as usize)),
            Segment::Reference(_) => Err(StorageError::NestedReference),
        }
    }

    /// Number of referenced rows.
    pub fn len(&self) -> usize {
        self.pos_list.len()
    }

    /// True if the position list is empty.
    pub fn is_empty(&self) -> bool {
        self.pos_list.is_empty()
    }

    /// The table this segment projects.
    pub fn referenced_table(&self) -> &Arc<Table> {
        &self.referenced_table
    }

    /// The projected column within the referenced table.
    pub fn referenced_column_id(&self) -> ColumnId {
        self.referenced_column_id
    }

    /// The shared position list.
    pub fn pos_list(&self) -> &Arc<PosList> {
        &self.pos_list
    }
}

// ── Tests ──────────────────────────────────────────────────────────
