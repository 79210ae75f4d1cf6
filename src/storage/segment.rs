//! The segment tagged union.

use crate::error::{Result, StorageError};
use crate::storage::dictionary_segment::DictionarySegment;
use crate::storage::reference_segment::ReferenceSegment;
use crate::storage::value_segment::ValueSegment;
use crate::types::{DataType, Value};

/// One column's physical storage within a chunk: exactly one of the three
/// representations. Operators match on the variant, so an unknown segment
/// kind cannot occur.
#[derive(Debug, Clone)]
pub enum Segment {
    Value(ValueSegment),
    Dictionary(DictionarySegment),
    Reference(ReferenceSegment),
}

impl Segment {
    /// Number of rows.
    pub fn len(&self) -> usize {
        match self {
            Segment::Value(segment) => segment.len(),
            Segment::Dictionary(segment) => segment.len(),
            Segment::Reference(segment) => segment.len(),
        }
    }

    /// True if the segment holds no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element type for physically typed segments. `None` for reference
    /// segments, whose type lives in the referenced table's schema.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Segment::Value(segment) => Some(segment.data_type()),
            Segment::Dictionary(segment) => Some(segment.data_type()),
            Segment::Reference(_) => None,
        }
    }

    /// Value at row offset `i`.
    ///
    /// Fallible because reference resolution can surface a nested
    /// reference segment.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    pub fn get(&self, i: usize) -> Result<Value> {
        match self {
            Segment::Value(segment) => Ok(segment.get(i)),
            Segment::Dictionary(segment) => Ok(segment.get(i)),
            Segment::Reference(segment) => segment.get(i),
        }
    }

    /// Append one value. Only value segments are mutable.
    pub fn append(&mut self, value: Value) -> Result<()> {
        match self {
            Segment::Value(segment) => segment.append(value),
            Segment::Dictionary(_) | Segment::Reference(_) => Err(StorageError::ImmutableSegment),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────
